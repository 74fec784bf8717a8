//! Embed and extract key/value metadata in PNG files.
//!
//! Metadata is stored in standard `tEXt` ancillary chunks (`key NUL value`),
//! so the decoded image is never altered and any PNG reader can still open
//! the file.
//!
//! # Design Principles
//!
//! - **Byte-exact**: chunks are framed and checksummed exactly as the PNG format requires
//! - **Non-destructive**: embedding returns a new buffer; the input is never mutated
//! - **Strict**: a bad signature or CRC aborts the operation, nothing is repaired
//! - **Minimal parsing**: only chunk framing is read; pixel data is never decoded
//!
//! # Quick Start
//!
//! ```no_run
//! use png_embed::{embed_value, extract_text};
//!
//! # fn main() -> png_embed::Result<()> {
//! let image = std::fs::read("image.png")?;
//!
//! // Embed typed values
//! let image = embed_value(&image, "Author", "someone")?;
//! let image = embed_value(&image, "Revision", 42)?;
//! std::fs::write("tagged.png", &image)?;
//!
//! // Read them back
//! let text = extract_text(&image)?;
//! assert_eq!(text[b"Revision".as_slice()], b"42");
//! # Ok(())
//! # }
//! ```
//!
//! # Chunk-Level API
//!
//! For more control, encode chunks and walk the stream directly:
//!
//! ```no_run
//! use png_embed::{encode_chunk, scan, ChunkType};
//!
//! # fn main() -> png_embed::Result<()> {
//! let chunk = encode_chunk("tEXt", b"Comment\0hello")?;
//! assert_eq!(chunk.len(), 13 + 12);
//!
//! let image = std::fs::read("image.png")?;
//! for chunk in scan(&image, &[ChunkType::TEXT])? {
//!     let chunk = chunk?;
//!     println!("{} bytes of text at offset {}", chunk.length, chunk.offset);
//! }
//! # Ok(())
//! # }
//! ```

mod chunk;
mod embed;
mod error;
mod extract;
pub mod text;
mod value;

pub use chunk::{
    check_magic, chunk_crc, encode_chunk, write_chunk, Chunk, ChunkCursor, ChunkType,
    CHUNK_OVERHEAD, MAX_CHUNK_LEN, PNG_MAGIC,
};
pub use embed::embed;
pub use error::{Error, Result};
pub use extract::{extract_text, scan, text_entries, ChunkReader, TextEntries, TextMap};
pub use text::TextEntry;
pub use value::Value;

use std::path::Path;

// Test utilities - only compiled for tests or when explicitly enabled
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

/// Convert `value` to bytes and embed it under `key`
///
/// See [`Value`] for how each kind of value is rendered.
///
/// # Errors
/// - [`Error::UnsupportedValue`]: the value has no byte encoding
/// - any error from [`embed`]
pub fn embed_value(image: &[u8], key: &str, value: impl Into<Value>) -> Result<Vec<u8>> {
    let bytes = value.into().to_bytes()?;
    embed(image, key, &bytes)
}

/// Read the PNG at `path` and embed `value` under `key`
///
/// The file is not modified; the new image bytes are returned.
pub fn embed_file(path: impl AsRef<Path>, key: &str, value: impl Into<Value>) -> Result<Vec<u8>> {
    let image = std::fs::read(path)?;
    embed_value(&image, key, value)
}

/// Read the PNG at `path` and collect its `tEXt` entries
pub fn extract_file(path: impl AsRef<Path>) -> Result<TextMap> {
    let image = std::fs::read(path)?;
    extract_text(&image)
}

//! Splice a `tEXt` chunk into a PNG stream right after its first chunk

use crate::{
    chunk::{check_magic, write_chunk, ChunkType, CHUNK_OVERHEAD, PNG_MAGIC},
    error::{Error, Result},
    text,
};
use byteorder::{BigEndian, ByteOrder};
use tracing::{debug, warn};

/// Insert a `tEXt` chunk holding `key` and `value` after the first chunk of `image`
///
/// Only the signature and the framing of the first chunk are checked; the
/// first chunk's bytes and everything after it are copied verbatim. The
/// input is left untouched and the result is
/// `image.len() + 12 + key.len() + 1 + value.len()` bytes long.
///
/// # Errors
/// - [`Error::NotAPng`]: the signature is missing or wrong
/// - [`Error::Truncated`]: the stream ends inside the first chunk
///
/// # Example
///
/// ```
/// use png_embed::{embed, extract_text, test_utils::PngBuilder};
///
/// let image = PngBuilder::minimal().build();
/// let out = embed(&image, "Author", b"someone")?;
///
/// assert_eq!(out.len(), image.len() + 12 + 6 + 1 + 7);
/// assert_eq!(extract_text(&out)?[b"Author".as_slice()], b"someone");
/// # Ok::<(), png_embed::Error>(())
/// ```
pub fn embed(image: &[u8], key: &str, value: &[u8]) -> Result<Vec<u8>> {
    check_magic(image)?;
    let magic_len = PNG_MAGIC.len();

    let length_field = image
        .get(magic_len..magic_len + 4)
        .ok_or_else(|| truncated(image, magic_len, 4))?;
    let first_len = BigEndian::read_u32(length_field) as usize;

    // Type + data + CRC of the first chunk
    let first_end = (magic_len + 4)
        .checked_add(first_len)
        .and_then(|n| n.checked_add(8))
        .filter(|&end| end <= image.len())
        .ok_or_else(|| truncated(image, magic_len + 4, first_len.saturating_add(8)))?;

    let first_type = &image[magic_len + 4..magic_len + 8];
    if first_type != ChunkType::IHDR.as_bytes() {
        warn!(
            first = %String::from_utf8_lossy(first_type),
            "first chunk is not IHDR, inserting after it anyway"
        );
    }

    let payload = text::build_payload(key.as_bytes(), value);
    let mut out = Vec::with_capacity(image.len() + payload.len() + CHUNK_OVERHEAD);
    out.extend_from_slice(&image[..first_end]);
    write_chunk(&mut out, ChunkType::TEXT, &payload)?;
    out.extend_from_slice(&image[first_end..]);

    debug!(
        key,
        value_len = value.len(),
        at = first_end,
        size = out.len(),
        "embedded tEXt chunk"
    );

    Ok(out)
}

fn truncated(image: &[u8], offset: usize, needed: usize) -> Error {
    Error::Truncated {
        offset,
        needed,
        available: image.len().saturating_sub(offset),
    }
}

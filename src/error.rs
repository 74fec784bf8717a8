//! Error types for png-embed

use std::io;

use crate::chunk::ChunkType;

/// Result type for png-embed operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while encoding, embedding or scanning PNG chunks
///
/// Every variant is terminal for the operation that produced it: nothing is
/// retried and malformed input is never repaired.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Input does not start with the 8-byte PNG signature
    #[error("Not a PNG file")]
    NotAPng,

    /// Stream ended before a required field could be read
    #[error("Truncated stream at offset {offset}: needed {needed} bytes, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// Stored CRC does not match the CRC computed over type and data
    #[error("Bad CRC for {chunk_type} chunk at offset {offset}: stored {stored:#010x}, computed {computed:#010x}")]
    BadCrc {
        chunk_type: ChunkType,
        offset: usize,
        stored: u32,
        computed: u32,
    },

    /// Attempt to encode a chunk with an unrecognized tag
    #[error("Invalid chunk type: {0:?}")]
    InvalidChunkType(String),

    /// Value could not be converted to bytes
    #[error("Unsupported value: {0}")]
    UnsupportedValue(String),

    /// Data size exceeds maximum allowed
    #[error("Data too large: {size} bytes (max: {max})")]
    DataTooLarge { size: usize, max: usize },
}

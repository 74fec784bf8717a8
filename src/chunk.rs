//! PNG chunk codec
//!
//! Every chunk after the 8-byte signature has the same layout:
//!
//! ```text
//! -------------------------------------------------------------------
//! |  Length    |  Chunk Type |       ... Data ...       |    CRC    |
//! -------------------------------------------------------------------
//! |  4 bytes   |   4 bytes   |     `Length` bytes       |  4 bytes  |
//!              |-------------- CRC32'd -----------------|
//! ```
//!
//! Length and CRC are big-endian. The CRC is CRC-32/IEEE over the type and
//! data only, never over the length field.

use crate::error::{Error, Result};
use byteorder::{BigEndian, ByteOrder, WriteBytesExt};
use std::fmt;
use std::io::Write;
use std::str::FromStr;
use tracing::{debug, trace};

/// PNG signature: 89 50 4E 47 0D 0A 1A 0A
pub const PNG_MAGIC: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Largest data length a chunk may declare (2^31 - 1)
pub const MAX_CHUNK_LEN: usize = 0x7FFF_FFFF;

/// Bytes a chunk occupies beyond its data: length + type + CRC
pub const CHUNK_OVERHEAD: usize = 12;

/// A 4-byte PNG chunk type tag
///
/// Any four bytes can be decoded from a stream, but only the
/// [recognized](ChunkType::is_recognized) set can be encoded.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkType([u8; 4]);

impl ChunkType {
    pub const IHDR: Self = Self(*b"IHDR");
    pub const PLTE: Self = Self(*b"PLTE");
    pub const IDAT: Self = Self(*b"IDAT");
    pub const IEND: Self = Self(*b"IEND");
    pub const TEXT: Self = Self(*b"tEXt");

    /// Wrap raw tag bytes
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// Raw tag bytes
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Whether this tag belongs to the fixed set of chunk types that may be written
    pub fn is_recognized(&self) -> bool {
        matches!(
            &self.0,
            // Critical chunks
            b"IHDR" | b"PLTE" | b"IDAT" | b"IEND"
            // Ancillary chunks
            | b"bKGD" | b"cHRM" | b"dSIG" | b"eXIf" | b"gAMA" | b"hIST" | b"iCCP"
            | b"iTXt" | b"pHYs" | b"sBIT" | b"sPLT" | b"sRGB" | b"sTER" | b"tEXt"
            | b"tIME" | b"tRNS" | b"zTXt"
        )
    }

    /// Ancillary bit: lowercase first letter
    pub fn is_ancillary(&self) -> bool {
        self.0[0] & 0x20 != 0
    }

    /// Critical chunks are required to decode the image
    pub fn is_critical(&self) -> bool {
        !self.is_ancillary()
    }
}

impl fmt::Display for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            let c = if b.is_ascii_graphic() { b as char } else { '.' };
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChunkType({self})")
    }
}

impl FromStr for ChunkType {
    type Err = Error;

    /// Parse a tag of exactly four ASCII letters
    fn from_str(s: &str) -> Result<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 4 || !bytes.iter().all(u8::is_ascii_alphabetic) {
            return Err(Error::InvalidChunkType(s.to_string()));
        }
        let mut tag = [0u8; 4];
        tag.copy_from_slice(bytes);
        Ok(Self(tag))
    }
}

impl From<[u8; 4]> for ChunkType {
    fn from(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }
}

/// A chunk decoded from a stream, borrowing its data from the scanned bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    /// Offset of the length field from the start of the stream
    pub offset: usize,
    /// Declared data length
    pub length: u32,
    pub chunk_type: ChunkType,
    pub data: &'a [u8],
    /// Stored CRC, already verified against type and data
    pub crc: u32,
}

impl Chunk<'_> {
    /// Total size on the wire, including length, type and CRC
    pub fn size(&self) -> usize {
        self.data.len() + CHUNK_OVERHEAD
    }
}

/// Verify that `stream` starts with the PNG signature
pub fn check_magic(stream: &[u8]) -> Result<()> {
    match stream.get(..PNG_MAGIC.len()) {
        Some(magic) if magic == PNG_MAGIC => Ok(()),
        _ => Err(Error::NotAPng),
    }
}

/// Calculate CRC32 for PNG chunk
pub fn chunk_crc(chunk_type: ChunkType, data: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type.as_bytes());
    hasher.update(data);
    hasher.finalize()
}

/// Write a PNG chunk with proper CRC
///
/// # Errors
/// - [`Error::InvalidChunkType`]: the tag is outside the recognized set
/// - [`Error::DataTooLarge`]: `data` is longer than [`MAX_CHUNK_LEN`]; the
///   length field cannot hold it, so nothing is written
/// - [`Error::Io`]: the writer failed
pub fn write_chunk<W: Write>(writer: &mut W, chunk_type: ChunkType, data: &[u8]) -> Result<()> {
    if !chunk_type.is_recognized() {
        return Err(Error::InvalidChunkType(chunk_type.to_string()));
    }
    write_raw_chunk(writer, chunk_type, data)
}

/// Write a chunk without checking the tag against the recognized set
pub(crate) fn write_raw_chunk<W: Write>(
    writer: &mut W,
    chunk_type: ChunkType,
    data: &[u8],
) -> Result<()> {
    if data.len() > MAX_CHUNK_LEN {
        return Err(Error::DataTooLarge {
            size: data.len(),
            max: MAX_CHUNK_LEN,
        });
    }

    writer.write_u32::<BigEndian>(data.len() as u32)?;
    writer.write_all(chunk_type.as_bytes())?;
    writer.write_all(data)?;
    writer.write_u32::<BigEndian>(chunk_crc(chunk_type, data))?;

    Ok(())
}

/// Encode `data` into a complete chunk of type `chunk_type`
///
/// The output is `data.len() + 12` bytes long. Fails as [`write_chunk`] does.
///
/// # Example
///
/// ```
/// let chunk = png_embed::encode_chunk("tEXt", b"Key\0Value")?;
/// assert_eq!(chunk.len(), 9 + 12);
/// assert_eq!(&chunk[4..8], b"tEXt");
///
/// assert!(png_embed::encode_chunk("1234", b"").is_err());
/// # Ok::<(), png_embed::Error>(())
/// ```
pub fn encode_chunk(chunk_type: &str, data: &[u8]) -> Result<Vec<u8>> {
    let chunk_type = ChunkType::from_str(chunk_type)?;
    let mut out = Vec::with_capacity(data.len() + CHUNK_OVERHEAD);
    write_chunk(&mut out, chunk_type, data)?;
    Ok(out)
}

/// Forward-only cursor over the chunks of an in-memory PNG stream
///
/// The cursor starts right after the signature. Once it reports the end of
/// the stream or a CRC failure it stays exhausted.
#[derive(Debug, Clone)]
pub struct ChunkCursor<'a> {
    stream: &'a [u8],
    pos: usize,
}

impl<'a> ChunkCursor<'a> {
    /// Create a cursor after verifying the PNG signature
    pub fn new(stream: &'a [u8]) -> Result<Self> {
        check_magic(stream)?;
        Ok(Self {
            stream,
            pos: PNG_MAGIC.len(),
        })
    }

    /// Current offset from the start of the stream
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left after the current offset
    pub fn remaining(&self) -> usize {
        self.stream.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Option<&'a [u8]> {
        let end = self.pos.checked_add(n)?;
        let bytes = self.stream.get(self.pos..end)?;
        self.pos = end;
        Some(bytes)
    }

    fn finish(&mut self, offset: usize) -> Option<Chunk<'a>> {
        if offset < self.stream.len() {
            debug!(
                offset,
                trailing = self.stream.len() - offset,
                "ignoring incomplete trailing chunk"
            );
        }
        self.pos = self.stream.len();
        None
    }

    /// Decode the next chunk
    ///
    /// Returns `Ok(None)` at the end of the stream, including when only an
    /// incomplete trailing fragment is left. A CRC mismatch is an error and
    /// ends the scan.
    pub fn decode_next(&mut self) -> Result<Option<Chunk<'a>>> {
        let offset = self.pos;

        let Some(length) = self.take(4).map(BigEndian::read_u32) else {
            return Ok(self.finish(offset));
        };

        // Type + data must both be present before anything is consumed
        let Some(body) = self.take((length as usize).saturating_add(4)) else {
            return Ok(self.finish(offset));
        };
        let (tag, data) = body.split_at(4);

        let Some(stored) = self.take(4).map(BigEndian::read_u32) else {
            return Ok(self.finish(offset));
        };

        let mut raw = [0u8; 4];
        raw.copy_from_slice(tag);
        let chunk_type = ChunkType(raw);

        let computed = chunk_crc(chunk_type, data);
        if computed != stored {
            self.pos = self.stream.len();
            return Err(Error::BadCrc {
                chunk_type,
                offset,
                stored,
                computed,
            });
        }

        trace!(offset, %chunk_type, length, "decoded chunk");

        Ok(Some(Chunk {
            offset,
            length,
            chunk_type,
            data,
            crc: stored,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IHDR_1X1_RGB: [u8; 13] = [
        0x00, 0x00, 0x00, 0x01, // Width: 1
        0x00, 0x00, 0x00, 0x01, // Height: 1
        0x08, // Bit depth: 8
        0x02, // Color type: RGB
        0x00, // Compression: deflate
        0x00, // Filter: adaptive
        0x00, // Interlace: none
    ];

    fn minimal_png() -> Vec<u8> {
        let mut data = PNG_MAGIC.to_vec();
        write_chunk(&mut data, ChunkType::IHDR, &IHDR_1X1_RGB).unwrap();
        write_chunk(&mut data, ChunkType::IEND, &[]).unwrap();
        data
    }

    #[test]
    fn test_crc_known_values() {
        assert_eq!(chunk_crc(ChunkType::IEND, &[]), 0xAE42_6082);
        assert_eq!(chunk_crc(ChunkType::IHDR, &IHDR_1X1_RGB), 0x9077_53DE);
        assert_eq!(chunk_crc(ChunkType::TEXT, b"Key\0Value"), 0x478E_AF23);
    }

    #[test]
    fn test_encode_layout() {
        let chunk = encode_chunk("tEXt", b"Key\0Value").unwrap();

        assert_eq!(chunk.len(), 9 + CHUNK_OVERHEAD);
        assert_eq!(&chunk[0..4], &[0, 0, 0, 9]);
        assert_eq!(&chunk[4..8], b"tEXt");
        assert_eq!(&chunk[8..17], b"Key\0Value");
        assert_eq!(&chunk[17..], &0x478E_AF23_u32.to_be_bytes());
    }

    #[test]
    fn test_encode_empty_data() {
        let chunk = encode_chunk("IEND", &[]).unwrap();
        assert_eq!(
            chunk,
            [0, 0, 0, 0, b'I', b'E', b'N', b'D', 0xAE, 0x42, 0x60, 0x82]
        );
    }

    #[test]
    fn test_encode_rejects_unknown_types() {
        for tag in ["1234", "caBX", "TEXT", "tEX", "tEXtt", ""] {
            let result = encode_chunk(tag, &[1, 2, 3]);
            assert!(
                matches!(result, Err(Error::InvalidChunkType(ref t)) if t == tag),
                "{tag:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_every_recognized_type_encodes() {
        let tags = [
            "IHDR", "PLTE", "IDAT", "IEND", "bKGD", "cHRM", "dSIG", "eXIf", "gAMA", "hIST",
            "iCCP", "iTXt", "pHYs", "sBIT", "sPLT", "sRGB", "sTER", "tEXt", "tIME", "tRNS",
            "zTXt",
        ];
        for tag in tags {
            let chunk = encode_chunk(tag, &[1, 2, 3]).unwrap();
            assert_eq!(chunk.len(), 15, "{tag}");
        }
    }

    #[test]
    fn test_chunk_type_flags() {
        assert!(ChunkType::IHDR.is_critical());
        assert!(ChunkType::TEXT.is_ancillary());
        assert!(ChunkType::from_bytes(*b"caBX").is_ancillary());
        assert!(!ChunkType::from_bytes(*b"caBX").is_recognized());
        assert_eq!(ChunkType::from_bytes([b'a', 0, b'b', 0xFF]).to_string(), "a.b.");
        assert_eq!(format!("{:?}", ChunkType::TEXT), "ChunkType(tEXt)");
    }

    #[test]
    fn test_check_magic() {
        assert!(check_magic(&PNG_MAGIC).is_ok());
        assert!(matches!(check_magic(&PNG_MAGIC[..7]), Err(Error::NotAPng)));
        assert!(matches!(check_magic(&[0; 8]), Err(Error::NotAPng)));
    }

    #[test]
    fn test_cursor_walks_chunks() {
        let data = minimal_png();
        let mut cursor = ChunkCursor::new(&data).unwrap();
        assert_eq!(cursor.position(), 8);

        let ihdr = cursor.decode_next().unwrap().unwrap();
        assert_eq!(ihdr.offset, 8);
        assert_eq!(cursor.position(), 33);
        assert_eq!(ihdr.chunk_type, ChunkType::IHDR);
        assert_eq!(ihdr.length, 13);
        assert_eq!(ihdr.data, &IHDR_1X1_RGB);
        assert_eq!(ihdr.crc, 0x9077_53DE);
        assert_eq!(ihdr.size(), 25);

        let iend = cursor.decode_next().unwrap().unwrap();
        assert_eq!(iend.offset, 33);
        assert_eq!(iend.chunk_type, ChunkType::IEND);
        assert!(iend.data.is_empty());

        assert!(cursor.decode_next().unwrap().is_none());
        assert_eq!(cursor.remaining(), 0);
        assert_eq!(cursor.position(), data.len());
    }

    #[test]
    fn test_cursor_stops_at_trailing_fragment() {
        let mut data = minimal_png();
        // Claims 100 bytes of data that never arrive
        data.extend_from_slice(&[0, 0, 0, 100]);
        data.extend_from_slice(b"tEXt");
        data.extend_from_slice(b"short");

        let mut cursor = ChunkCursor::new(&data).unwrap();
        assert!(cursor.decode_next().unwrap().is_some());
        assert!(cursor.decode_next().unwrap().is_some());
        assert!(cursor.decode_next().unwrap().is_none());
        assert!(cursor.decode_next().unwrap().is_none());
    }

    #[test]
    fn test_cursor_stops_when_crc_missing() {
        let mut data = minimal_png();
        data.truncate(data.len() - 2);

        let mut cursor = ChunkCursor::new(&data).unwrap();
        assert!(cursor.decode_next().unwrap().is_some());
        assert!(cursor.decode_next().unwrap().is_none());
    }

    #[test]
    fn test_cursor_huge_length_is_end_of_stream() {
        let mut data = PNG_MAGIC.to_vec();
        data.extend_from_slice(&[0xFF, 0xFF, 0xFF, 0xFF]);
        data.extend_from_slice(b"IHDR");

        let mut cursor = ChunkCursor::new(&data).unwrap();
        assert!(cursor.decode_next().unwrap().is_none());
    }

    #[test]
    fn test_cursor_bad_crc_is_fatal() {
        let mut data = minimal_png();
        data[8 + 8] ^= 0x01; // first IHDR data byte

        let mut cursor = ChunkCursor::new(&data).unwrap();
        let err = cursor.decode_next().unwrap_err();
        match err {
            Error::BadCrc {
                chunk_type,
                offset,
                stored,
                computed,
            } => {
                assert_eq!(chunk_type, ChunkType::IHDR);
                assert_eq!(offset, 8);
                assert_eq!(stored, 0x9077_53DE);
                assert_ne!(computed, stored);
            }
            other => panic!("expected BadCrc, got {other:?}"),
        }

        // No resync after a bad chunk
        assert!(cursor.decode_next().unwrap().is_none());
    }

    #[test]
    fn test_cursor_rejects_bad_magic() {
        assert!(matches!(ChunkCursor::new(&[1, 2, 3]), Err(Error::NotAPng)));
    }
}

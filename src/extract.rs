//! Scanning chunks and collecting `tEXt` metadata

use crate::{
    chunk::{Chunk, ChunkCursor, ChunkType},
    error::Result,
    text::TextEntry,
};
use std::collections::BTreeMap;
use std::iter::FusedIterator;
use tracing::debug;

/// Key/value pairs collected from `tEXt` chunks
///
/// Keys and values are kept as the raw bytes found in the chunk. tEXt
/// keywords are Latin-1, so keys are not decoded; look them up with
/// `map.get(b"Author".as_slice())` or `map.get("Author".as_bytes())`.
pub type TextMap = BTreeMap<Vec<u8>, Vec<u8>>;

/// Lazy, single-pass iterator over the chunks of a PNG stream
///
/// Yields `Err` at most once, for a CRC mismatch, and then stops.
#[derive(Debug, Clone)]
pub struct ChunkReader<'a> {
    cursor: ChunkCursor<'a>,
    filter: Vec<ChunkType>,
    done: bool,
}

impl<'a> ChunkReader<'a> {
    /// Create a reader yielding every chunk whose type is in `filter`
    ///
    /// An empty filter yields every chunk. Fails with
    /// [`Error::NotAPng`](crate::Error::NotAPng) before anything is read if
    /// the signature is wrong.
    pub fn new(image: &'a [u8], filter: &[ChunkType]) -> Result<Self> {
        Ok(Self {
            cursor: ChunkCursor::new(image)?,
            filter: filter.to_vec(),
            done: false,
        })
    }

    fn includes(&self, chunk_type: ChunkType) -> bool {
        self.filter.is_empty() || self.filter.contains(&chunk_type)
    }
}

impl<'a> Iterator for ChunkReader<'a> {
    type Item = Result<Chunk<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            match self.cursor.decode_next() {
                Ok(Some(chunk)) if self.includes(chunk.chunk_type) => return Some(Ok(chunk)),
                Ok(Some(_)) => continue,
                Ok(None) => {
                    self.done = true;
                    return None;
                }
                Err(e) => {
                    debug!(error = %e, "chunk scan aborted");
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

impl FusedIterator for ChunkReader<'_> {}

/// Scan `image` for chunks, optionally restricted to the types in `filter`
///
/// # Example
///
/// ```
/// use png_embed::{scan, ChunkType, test_utils::PngBuilder};
///
/// let image = PngBuilder::minimal().build();
/// let types = scan(&image, &[])?
///     .map(|chunk| chunk.map(|c| c.chunk_type.to_string()))
///     .collect::<png_embed::Result<Vec<_>>>()?;
/// assert_eq!(types, ["IHDR", "IDAT", "IEND"]);
///
/// assert_eq!(scan(&image, &[ChunkType::TEXT])?.count(), 0);
/// # Ok::<(), png_embed::Error>(())
/// ```
pub fn scan<'a>(image: &'a [u8], filter: &[ChunkType]) -> Result<ChunkReader<'a>> {
    ChunkReader::new(image, filter)
}

/// Iterator over the key/value pairs of `tEXt` chunks, in file order
///
/// Duplicate keys are all yielded. Chunks whose payload has no NUL
/// separator are skipped.
#[derive(Debug, Clone)]
pub struct TextEntries<'a> {
    chunks: ChunkReader<'a>,
}

impl<'a> Iterator for TextEntries<'a> {
    type Item = Result<TextEntry<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let chunk = match self.chunks.next()? {
                Ok(chunk) => chunk,
                Err(e) => return Some(Err(e)),
            };
            match TextEntry::parse(chunk.data) {
                Some(entry) => return Some(Ok(entry)),
                None => debug!(offset = chunk.offset, "skipping tEXt chunk without separator"),
            }
        }
    }
}

impl FusedIterator for TextEntries<'_> {}

/// Iterate over the `tEXt` entries of `image`
pub fn text_entries(image: &[u8]) -> Result<TextEntries<'_>> {
    Ok(TextEntries {
        chunks: ChunkReader::new(image, &[ChunkType::TEXT])?,
    })
}

/// Collect every `tEXt` entry of `image` into a map
///
/// When a key appears more than once, the entry found last in the file wins.
/// Any error aborts the whole extraction; no partial map is returned.
pub fn extract_text(image: &[u8]) -> Result<TextMap> {
    let mut map = TextMap::new();
    for entry in text_entries(image)? {
        let entry = entry?;
        map.insert(entry.key.to_vec(), entry.value.to_vec());
    }
    Ok(map)
}

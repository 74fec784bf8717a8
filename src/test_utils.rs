//! Test utilities for building PNG streams and locating fixture files.
//!
//! This module provides:
//! - [`PngBuilder`], which assembles synthetic PNGs chunk by chunk with valid CRCs
//! - Embedded fixtures (when the `embed-fixtures` feature is enabled)
//! - File-based fixtures from `tests/fixtures/`
//! - Extended fixtures from a custom directory (via the `PNG_EMBED_TEST_FIXTURES` env var)
//!
//! # Usage
//!
//! ```no_run
//! use png_embed::test_utils::*;
//!
//! # fn example() -> png_embed::Result<()> {
//! // Synthetic image: IHDR + IDAT + IEND
//! let image = PngBuilder::minimal().build();
//!
//! // Fixture bytes (embedded or read from disk)
//! let red = fixture_bytes(RED_PNG)?;
//!
//! // List all available fixtures
//! let all_fixtures = list_fixtures()?;
//! # Ok(())
//! # }
//! ```

use std::{collections::HashMap, fs, path::PathBuf, sync::LazyLock};

use crate::{
    chunk::{write_raw_chunk, ChunkType, PNG_MAGIC},
    Error, Result,
};

/// Assembles a PNG stream from raw chunks
///
/// Tags are not checked against the recognized set, so private chunk types
/// can be produced. CRCs are always correct.
#[derive(Debug, Clone, Default)]
pub struct PngBuilder {
    chunks: Vec<([u8; 4], Vec<u8>)>,
}

impl PngBuilder {
    /// IHDR data for a 1x1, 8-bit RGB, non-interlaced image
    pub const IHDR_1X1_RGB: [u8; 13] = [
        0x00, 0x00, 0x00, 0x01, // Width: 1
        0x00, 0x00, 0x00, 0x01, // Height: 1
        0x08, // Bit depth: 8
        0x02, // Color type: RGB
        0x00, // Compression: deflate
        0x00, // Filter: adaptive
        0x00, // Interlace: none
    ];

    /// zlib stream of a single unfiltered black RGB pixel
    pub const IDAT_1X1_RGB: [u8; 12] = [
        0x78, 0xDA, 0x63, 0x60, 0x60, 0x60, 0x00, 0x00, 0x00, 0x04, 0x00, 0x01,
    ];

    /// Empty builder: signature only
    pub fn new() -> Self {
        Self::default()
    }

    /// 1x1 image with IHDR, IDAT and IEND
    pub fn minimal() -> Self {
        Self::new().ihdr().idat().iend()
    }

    pub fn ihdr(self) -> Self {
        self.chunk(*ChunkType::IHDR.as_bytes(), &Self::IHDR_1X1_RGB)
    }

    pub fn idat(self) -> Self {
        self.chunk(*ChunkType::IDAT.as_bytes(), &Self::IDAT_1X1_RGB)
    }

    pub fn iend(self) -> Self {
        self.chunk(*ChunkType::IEND.as_bytes(), &[])
    }

    /// Append a chunk
    pub fn chunk(mut self, tag: [u8; 4], data: &[u8]) -> Self {
        self.chunks.push((tag, data.to_vec()));
        self
    }

    /// Serialize signature and chunks
    pub fn build(&self) -> Vec<u8> {
        let mut out = PNG_MAGIC.to_vec();
        for (tag, data) in &self.chunks {
            // Writing to a Vec cannot fail and test data stays far below the length limit
            write_raw_chunk(&mut out, ChunkType::from_bytes(*tag), data)
                .expect("in-memory chunk write");
        }
        out
    }
}

/// Flip a single bit of `data`, returning the modified copy
pub fn flip_bit(data: &[u8], byte: usize, bit: u8) -> Vec<u8> {
    let mut out = data.to_vec();
    out[byte] ^= 1 << bit;
    out
}

/// Macro to define fixtures with embedded data and file fallback
macro_rules! define_fixtures {
    ($($name:ident => $file:expr),* $(,)?) => {
        // Define constants for fixture names
        $(
            #[allow(dead_code)]
            pub const $name: &str = $file;
        )*

        // Create embedded registry (small files compiled into binary)
        static EMBEDDED_FIXTURES: LazyLock<HashMap<&'static str, &'static [u8]>> =
            LazyLock::new(|| {
                #[allow(unused_mut)]
                let mut map = HashMap::new();
                $(
                    // Only embed if feature is enabled
                    #[cfg(feature = "embed-fixtures")]
                    {
                        let bytes: &'static [u8] = include_bytes!(concat!("../tests/fixtures/", $file));
                        map.insert($file, bytes);
                    }
                )*
                map
            });

        /// Get the embedded fixtures registry
        pub fn get_registry() -> &'static HashMap<&'static str, &'static [u8]> {
            &EMBEDDED_FIXTURES
        }

        /// List all defined fixtures
        pub fn list_all_fixtures() -> Vec<&'static str> {
            vec![$($file),*]
        }
    };
}

define_fixtures!(
    RED_PNG => "red.png", // 86 bytes - 4x4 red RGB: IHDR, sRGB, IDAT, IEND
);

/// Get path to a fixture file
///
/// Search order:
/// 1. PNG_EMBED_TEST_FIXTURES env var (for extended test sets)
/// 2. Default tests/fixtures directory
pub fn fixture_path(file_name: &str) -> PathBuf {
    if let Ok(custom_dir) = std::env::var("PNG_EMBED_TEST_FIXTURES") {
        let path = PathBuf::from(custom_dir).join(file_name);
        if path.exists() {
            return path;
        }
    }

    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests/fixtures");
    path.push(file_name);
    path
}

/// Helper to get fixture data as bytes
pub fn fixture_bytes(name: &str) -> Result<Vec<u8>> {
    if let Some(bytes) = get_registry().get(name) {
        return Ok(bytes.to_vec());
    }

    fs::read(fixture_path(name)).map_err(Error::Io)
}

/// List all available fixtures (defined + PNGs in PNG_EMBED_TEST_FIXTURES)
pub fn list_fixtures() -> Result<Vec<String>> {
    let mut fixtures: Vec<String> = list_all_fixtures().into_iter().map(String::from).collect();

    if let Ok(custom_dir) = std::env::var("PNG_EMBED_TEST_FIXTURES") {
        let extended_path = PathBuf::from(custom_dir);
        if extended_path.is_dir() {
            for entry in fs::read_dir(extended_path)? {
                let path = entry?.path();
                let is_png = path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
                if !path.is_file() || !is_png {
                    continue;
                }
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    if !fixtures.iter().any(|f| f == name) {
                        fixtures.push(name.to_string());
                    }
                }
            }
        }
    }

    Ok(fixtures)
}

/// Check if a fixture is embedded
pub fn is_embedded(fixture_name: &str) -> bool {
    get_registry().contains_key(fixture_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_layout() {
        let image = PngBuilder::minimal().build();
        assert_eq!(&image[..8], &PNG_MAGIC);
        // signature + IHDR(25) + IDAT(24) + IEND(12)
        assert_eq!(image.len(), 8 + 25 + 24 + 12);
        assert_eq!(&image[image.len() - 4..], &[0xAE, 0x42, 0x60, 0x82]);
    }

    #[test]
    fn test_builder_allows_private_types() {
        let image = PngBuilder::new().chunk(*b"caBX", b"jumbf").build();
        assert_eq!(&image[12..16], b"caBX");
    }

    #[test]
    fn test_flip_bit() {
        assert_eq!(flip_bit(&[0b0000_0000, 0xFF], 1, 7), [0, 0x7F]);
    }

    #[test]
    fn test_fixture_constants() {
        assert_eq!(RED_PNG, "red.png");
        assert_eq!(list_all_fixtures(), ["red.png"]);
    }

    #[test]
    fn test_fixture_path() {
        let path = fixture_path(RED_PNG);
        assert!(path.to_string_lossy().ends_with("red.png"));
    }

    #[test]
    fn test_list_fixtures_with_extended_dir() {
        let dir = std::env::temp_dir().join("png_embed_extended_fixtures");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("extra.PNG"), PngBuilder::minimal().build()).unwrap();
        fs::write(dir.join("notes.txt"), b"not an image").unwrap();

        // No red.png in the extended dir, so fixture_path keeps falling back
        std::env::set_var("PNG_EMBED_TEST_FIXTURES", &dir);
        let fixtures = list_fixtures();
        std::env::remove_var("PNG_EMBED_TEST_FIXTURES");
        fs::remove_dir_all(&dir).ok();

        let fixtures = fixtures.unwrap();
        assert_eq!(fixtures.iter().filter(|f| *f == RED_PNG).count(), 1);
        assert!(fixtures.iter().any(|f| f == "extra.PNG"));
        assert!(!fixtures.iter().any(|f| f == "notes.txt"));
    }

    #[cfg(feature = "embed-fixtures")]
    #[test]
    fn test_embedded_fixtures() {
        assert!(is_embedded(RED_PNG));
    }

    #[cfg(not(feature = "embed-fixtures"))]
    #[test]
    fn test_no_embedded_fixtures() {
        assert!(get_registry().is_empty());
        assert!(!is_embedded(RED_PNG));
    }
}

//! `tEXt` payload convention: `key ++ NUL ++ value`

/// Separator between keyword and text
pub const SEPARATOR: u8 = 0;

/// A key/value pair read from a single `tEXt` chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextEntry<'a> {
    /// Everything before the first NUL
    pub key: &'a [u8],
    /// Everything after the first NUL (may itself contain NULs)
    pub value: &'a [u8],
}

impl<'a> TextEntry<'a> {
    /// Split a `tEXt` payload at its first NUL
    ///
    /// Returns `None` when the payload has no separator at all.
    pub fn parse(payload: &'a [u8]) -> Option<Self> {
        let p = payload.iter().position(|&b| b == SEPARATOR)?;
        Some(Self {
            key: &payload[..p],
            value: &payload[p + 1..],
        })
    }
}

/// Build a `tEXt` payload from a key and value
pub fn build_payload(key: &[u8], value: &[u8]) -> Vec<u8> {
    let mut payload = Vec::with_capacity(key.len() + 1 + value.len());
    payload.extend_from_slice(key);
    payload.push(SEPARATOR);
    payload.extend_from_slice(value);
    payload
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_and_parse() {
        let payload = build_payload(b"Author", b"someone");
        assert_eq!(payload, b"Author\0someone");

        let entry = TextEntry::parse(&payload).unwrap();
        assert_eq!(entry.key, b"Author");
        assert_eq!(entry.value, b"someone");
    }

    #[test]
    fn test_parse_splits_on_first_nul_only() {
        let entry = TextEntry::parse(b"k\0v\0w").unwrap();
        assert_eq!(entry.key, b"k");
        assert_eq!(entry.value, b"v\0w");
    }

    #[test]
    fn test_parse_edge_positions() {
        let entry = TextEntry::parse(b"\0value").unwrap();
        assert!(entry.key.is_empty());
        assert_eq!(entry.value, b"value");

        let entry = TextEntry::parse(b"key\0").unwrap();
        assert_eq!(entry.key, b"key");
        assert!(entry.value.is_empty());
    }

    #[test]
    fn test_parse_without_separator() {
        assert!(TextEntry::parse(b"no separator here").is_none());
        assert!(TextEntry::parse(b"").is_none());
    }
}

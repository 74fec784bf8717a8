#![no_main]

use libfuzzer_sys::fuzz_target;
use png_embed::{embed, extract_text};

fuzz_target!(|data: &[u8]| {
    // Embed into arbitrary input; whenever it succeeds the output must grow
    // by exactly one chunk and keep the original signature
    if let Ok(out) = embed(data, "fuzz", b"value") {
        assert_eq!(out.len(), data.len() + 12 + 4 + 1 + 5);
        assert_eq!(&out[..8], &data[..8]);

        // The rest of the stream may be garbage, so only the call itself is checked
        let _ = extract_text(&out);
    }
});

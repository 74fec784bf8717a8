#![no_main]

use libfuzzer_sys::fuzz_target;
use png_embed::{extract_text, scan};

fuzz_target!(|data: &[u8]| {
    // Scanning arbitrary bytes should NEVER panic, only return errors
    if let Ok(reader) = scan(data, &[]) {
        for chunk in reader {
            match chunk {
                Ok(chunk) => assert!(chunk.offset + chunk.size() <= data.len()),
                Err(_) => break,
            }
        }
    }

    let _ = extract_text(data);
});

#![no_main]

use libfuzzer_sys::fuzz_target;

// Accepts arbitrary bytes, attempts to parse as JSON, feeds to convert().
// Goal: no panics, even on malformed input.
fuzz_target!(|data: &[u8]| {
    if let Ok(manifest) = serde_json::from_slice::<serde_json::Value>(data) {
        let _ = iiif_downgrade_core::convert(&manifest, &Default::default());
    }
});

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        // Arbitrary (possibly malformed) conflict markers must never panic,
        // and text without an opening marker must come back unchanged.
        let outcome = contractor::resolve(text);
        if !text.contains("<<<<<<<") {
            assert_eq!(outcome.text, text);
        }
    }
});

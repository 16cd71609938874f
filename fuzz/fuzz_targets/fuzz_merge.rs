#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    // base \0 local \0 incoming
    let mut parts = input.splitn(3, '\0');
    let (Some(base), Some(local), Some(incoming)) = (parts.next(), parts.next(), parts.next())
    else {
        return;
    };

    let merged = contractor::merge(base, local, incoming).expect("merge must not fail");
    if local == base {
        assert_eq!(merged.text, incoming);
    }
    if incoming == base || local == incoming {
        assert_eq!(merged.text, local);
    }
    let _ = contractor::diff(base, &merged.text, 3);
});

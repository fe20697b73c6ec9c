#![no_main]

use libfuzzer_sys::fuzz_target;
use owf_wire::header::{check_magic, parse_length, SEGMENT_ALIGN};

// Fuzz target: magic and length header parsing on the first 8 bytes.
//
// A parsed length must always be word aligned.
fuzz_target!(|data: &[u8]| {
    if data.len() < 8 {
        return;
    }
    let magic: [u8; 4] = data[..4].try_into().unwrap();
    let length: [u8; 4] = data[4..8].try_into().unwrap();

    let _ = check_magic(magic);
    if let Ok(len) = parse_length(length) {
        assert_eq!(len % SEGMENT_ALIGN, 0);
    }
});

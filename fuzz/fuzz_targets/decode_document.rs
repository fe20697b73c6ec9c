#![no_main]

use libfuzzer_sys::fuzz_target;
use owf_decoder::{DecoderConfig, OwfDecoder};

// Fuzz target: full materializing decode.
//
// The allocation ceiling is kept small so a hostile length header fails
// with AllocationLimitExceeded instead of exhausting the fuzzer's memory.
// Catches bugs in:
// - Magic and length header checks
// - Budget debits for nested segments
// - Sample array alignment and byte-order conversion
// - Materializer parent tracking
fuzz_target!(|data: &[u8]| {
    let decoder = OwfDecoder::with_config(DecoderConfig::with_max_alloc(1 << 16));
    if let Ok(doc) = decoder.decode(data) {
        // Whatever decoded must fit inside the input.
        let samples: usize = doc
            .channels
            .iter()
            .flat_map(|c| &c.namespaces)
            .flat_map(|ns| &ns.signals)
            .map(|s| s.sample_count() * 8)
            .sum();
        assert!(samples <= data.len());
    }
});

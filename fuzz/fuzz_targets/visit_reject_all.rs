#![no_main]

use libfuzzer_sys::fuzz_target;
use owf_decoder::{DecoderConfig, Entity, OwfDecoder, Visit};

// Fuzz target: streaming decode with a visitor that rejects everything.
//
// Exercises the skip drain on every container. The first byte picks the
// skip chunk size so odd chunk boundaries get covered too.
fuzz_target!(|data: &[u8]| {
    let Some((&chunk, payload)) = data.split_first() else {
        return;
    };
    let config = DecoderConfig {
        skip_chunk: usize::from(chunk),
        ..DecoderConfig::with_max_alloc(1 << 16)
    };

    let mut visited = 0usize;
    let mut visitor = |_: Entity| {
        visited += 1;
        Visit::Reject
    };
    if let Ok(summary) = OwfDecoder::with_config(config).visit_bytes(payload, &mut visitor) {
        assert!(summary.bytes_read <= payload.len() as u64);
        assert!(summary.bytes_skipped <= summary.bytes_read);
    }
});

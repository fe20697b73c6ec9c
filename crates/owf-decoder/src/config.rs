use owf_wire::header::SEGMENT_ALIGN;

/// Default ceiling for a single variable-length field: 16 MiB.
pub const DEFAULT_MAX_ALLOC: u32 = 16 * 1024 * 1024;

/// Default size of the scratch buffer used to drain skipped segments.
pub const DEFAULT_SKIP_CHUNK: usize = 4096;

/// Decoder settings.
///
/// ```text
/// ┌────────────┬──────────────────────────────────────────────────────┐
/// │ Field      │ Purpose                                              │
/// ├────────────┼──────────────────────────────────────────────────────┤
/// │ max_alloc  │ Ceiling for any one string or sample array, in bytes │
/// │ skip_chunk │ Bytes drained per read when skipping a segment       │
/// └────────────┴──────────────────────────────────────────────────────┘
/// ```
///
/// `max_alloc` is checked before every allocation, so a document that
/// claims a 4 GiB string fails without the allocator ever being asked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecoderConfig {
    pub max_alloc: u32,
    pub skip_chunk: usize,
}

impl DecoderConfig {
    /// Config with the given allocation ceiling and default skip chunk.
    #[must_use]
    pub fn with_max_alloc(max_alloc: u32) -> Self {
        Self {
            max_alloc,
            ..Self::default()
        }
    }

    /// `skip_chunk` rounded down to a multiple of 4, at least 4, and
    /// capped to `u32::MAX` rounded down.
    pub(crate) fn aligned_skip_chunk(&self) -> u32 {
        let chunk = u32::try_from(self.skip_chunk).unwrap_or(u32::MAX);
        (chunk - chunk % SEGMENT_ALIGN).max(SEGMENT_ALIGN)
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_alloc: DEFAULT_MAX_ALLOC,
            skip_chunk: DEFAULT_SKIP_CHUNK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_chunk_is_word_aligned() {
        let config = DecoderConfig {
            skip_chunk: 4095,
            ..DecoderConfig::default()
        };
        assert_eq!(config.aligned_skip_chunk(), 4092);
    }

    #[test]
    fn skip_chunk_has_a_floor() {
        let config = DecoderConfig {
            skip_chunk: 0,
            ..DecoderConfig::default()
        };
        assert_eq!(config.aligned_skip_chunk(), 4);
    }

    #[test]
    fn with_max_alloc_keeps_default_chunk() {
        let config = DecoderConfig::with_max_alloc(64);
        assert_eq!(config.max_alloc, 64);
        assert_eq!(config.skip_chunk, DEFAULT_SKIP_CHUNK);
    }
}

use std::path::PathBuf;

use owf_wire::WireError;

/// Errors that can occur while decoding an OWF document.
///
/// Every error is terminal for the decode call that raised it: nothing
/// is retried and no partial document is returned. Visitor rejection is
/// not an error and never shows up here.
///
/// ```text
///   DecodeError
///   ├── Io                       ← source could not supply N bytes
///   ├── Open                     ← file could not be opened
///   ├── Wire(WireError)          ← bad magic, misaligned length, budget underflow
///   ├── AllocationLimitExceeded  ← field larger than the configured ceiling
///   ├── AllocationFailure        ← the allocator refused the reservation
///   └── TrailingData             ← segment not fully consumed (invariant breach)
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The byte source could not supply `requested` bytes.
    ///
    /// `offset` is the number of bytes successfully read from the source
    /// before the failing read.
    #[error("read error ({requested} bytes at offset {offset})")]
    Io {
        requested: usize,
        offset: u64,
        #[source]
        source: std::io::Error,
    },

    /// The input file could not be opened.
    #[error("cannot open {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A wire-level check failed: magic, alignment or budget arithmetic.
    #[error(transparent)]
    Wire(#[from] WireError),

    /// A variable-length field declared more bytes than the configured
    /// maximum. Nothing was allocated or read for it.
    #[error("max allocation size exceeded (attempted to allocate {requested} bytes, max_alloc={max} bytes)")]
    AllocationLimitExceeded { requested: u32, max: u32 },

    /// The allocator could not reserve space for a field within the limit.
    #[error("memory allocation failure ({requested} bytes)")]
    AllocationFailure { requested: u32 },

    /// A segment still had bytes left after its decoder and the skip
    /// drain both finished. Only reachable through a decoder bug.
    #[error("trailing data when reading segment ({remaining} bytes)")]
    TrailingData { remaining: u32 },
}

impl DecodeError {
    /// True for misaligned segment or sample-array lengths.
    #[must_use]
    pub fn is_alignment(&self) -> bool {
        matches!(self, Self::Wire(WireError::Misaligned { .. }))
    }
}

/// Errors raised by the wire-level primitives.
///
/// These cover everything that can be judged from the raw numbers on the
/// wire alone: the magic header, segment lengths and the byte budget that
/// tracks how much of the current segment is left. I/O and allocation
/// failures belong to the decoder, which owns the byte source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    /// A length value was not a multiple of the required word size.
    ///
    /// `align` is 4 for generic segment lengths and 8 for sample arrays.
    #[error("length was not {align}-byte aligned (got {length} bytes)")]
    Misaligned { length: u32, align: u32 },

    /// A debit would take the remaining budget below zero.
    #[error("unsigned subtraction error ({remaining} - {requested})")]
    BudgetUnderflow { remaining: u32, requested: u32 },

    /// The first four bytes were not "OWF1".
    #[error("invalid magic header: expected 0x4F574631, got {found:#010X}")]
    BadMagic { found: u32 },
}

// NOTE
// Both Misaligned and BudgetUnderflow come out of the same check in
// `safe_sub`. The variant only records which half of the check tripped.
// {found:#010X} prints the magic as 0x-prefixed, zero-padded uppercase hex,
// so a bad file shows e.g. 0x4F574632 rather than 1331119666.

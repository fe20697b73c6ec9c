use crate::error::WireError;
use crate::header::SEGMENT_ALIGN;

/// Word-aligned, underflow-checked subtraction: `a - b`.
///
/// Succeeds only when both operands are multiples of [`SEGMENT_ALIGN`]
/// and `b <= a`. Every budget debit in the decoder funnels through this
/// function, so one check covers alignment and underflow across the
/// whole recursive descent.
///
/// # Errors
///
/// - [`WireError::Misaligned`] if either operand is not 4-byte aligned.
/// - [`WireError::BudgetUnderflow`] if `b > a`.
pub fn safe_sub(a: u32, b: u32) -> Result<u32, WireError> {
    for length in [a, b] {
        if length % SEGMENT_ALIGN != 0 {
            return Err(WireError::Misaligned {
                length,
                align: SEGMENT_ALIGN,
            });
        }
    }
    a.checked_sub(b).ok_or(WireError::BudgetUnderflow {
        remaining: a,
        requested: b,
    })
}

/// Remaining undecoded bytes in the segment currently being parsed.
///
/// A `Budget` is a bounded cursor: it is created from a segment length,
/// only ever shrinks, and every debit is validated by [`safe_sub`]. The
/// aligned invariant is established at construction, so a `Budget`
/// that exists is always a multiple of 4.
///
/// ```text
///   ┌─ length ──────────────────────────────────┐
///   │ consumed ............ │ remaining ........│
///   └───────────────────────┴───────────────────┘
///                           ^ debit() moves this right
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Budget {
    length: u32,
    remaining: u32,
}

impl Budget {
    /// Open a budget over a segment of `length` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::Misaligned`] if `length` is not 4-byte aligned.
    pub fn new(length: u32) -> Result<Self, WireError> {
        if length % SEGMENT_ALIGN != 0 {
            return Err(WireError::Misaligned {
                length,
                align: SEGMENT_ALIGN,
            });
        }
        Ok(Self {
            length,
            remaining: length,
        })
    }

    /// The declared length this budget was opened with.
    #[must_use]
    pub fn length(self) -> u32 {
        self.length
    }

    #[must_use]
    pub fn remaining(self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn consumed(self) -> u32 {
        self.length - self.remaining
    }

    #[must_use]
    pub fn is_exhausted(self) -> bool {
        self.remaining == 0
    }

    /// Take `n` bytes out of the budget.
    ///
    /// On error the budget is left unchanged.
    ///
    /// # Errors
    ///
    /// Propagates [`safe_sub`] failures.
    pub fn debit(&mut self, n: u32) -> Result<(), WireError> {
        self.remaining = safe_sub(self.remaining, n)?;
        Ok(())
    }
}

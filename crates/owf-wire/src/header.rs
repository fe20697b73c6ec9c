use crate::error::WireError;

/// Magic number: ASCII "OWF1", read as a big-endian u32.
pub const OWF_MAGIC: u32 = 0x4F57_4631;

/// Size of the magic header and of every segment length prefix.
pub const LENGTH_SIZE: u32 = 4;

/// Every segment length and every budget debit must be a multiple of this.
pub const SEGMENT_ALIGN: u32 = 4;

/// Width of one IEEE-754 double in a sample array.
pub const SAMPLE_WIDTH: u32 = 8;

/// Validate the 4-byte magic header.
///
/// ```text
/// ┌────────┬─────────┬──────────────────────────────────┐
/// │ Offset │ Size    │ Description                      │
/// ├────────┼─────────┼──────────────────────────────────┤
/// │ 0x00   │ 4 bytes │ Magic: "OWF1" (0x4F574631)       │
/// │ 0x04   │ 4 bytes │ Top-level segment length L       │
/// │ 0x08   │ L bytes │ Channel segments, back to back   │
/// └────────┴─────────┴──────────────────────────────────┘
/// ```
///
/// # Errors
///
/// Returns [`WireError::BadMagic`] if the bytes are anything other than
/// "OWF1".
pub fn check_magic(buf: [u8; 4]) -> Result<(), WireError> {
    let found = u32::from_be_bytes(buf);
    if found == OWF_MAGIC {
        Ok(())
    } else {
        Err(WireError::BadMagic { found })
    }
}

/// Parse a segment length prefix and verify its alignment.
///
/// # Errors
///
/// Returns [`WireError::Misaligned`] if the length is not a multiple of
/// [`SEGMENT_ALIGN`].
pub fn parse_length(buf: [u8; 4]) -> Result<u32, WireError> {
    let length = u32::from_be_bytes(buf);
    if length % SEGMENT_ALIGN == 0 {
        Ok(length)
    } else {
        Err(WireError::Misaligned {
            length,
            align: SEGMENT_ALIGN,
        })
    }
}

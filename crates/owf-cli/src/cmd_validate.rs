/// Implementation of `owf validate`.
///
/// Streams the whole file through a counting visitor that accepts every
/// entity, so every segment length, alignment and field is checked
/// without holding the document in memory.
///
/// # Success output
///
/// ```text
/// ✓ Magic: OWF1
/// ✓ Segments: 224 bytes, every length aligned and inside its parent
/// ✓ Entities: 1 channel, 1 namespace, 1 signal, 1 event, 1 alarm
/// ```
///
/// # Failure output
///
/// ```text
/// ✗ Error: truncated at offset 200 (needed 8 more bytes)
/// ```
use std::io::ErrorKind;

use anyhow::{Result, anyhow};
use owf_decoder::{DecodeError, OwfDecoder};
use owf_wire::WireError;

use crate::ValidateArgs;
use crate::cmd_stats::Tally;

/// Run the `owf validate` command.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or fails any structural
/// check. The diagnostic itself goes to stdout.
pub fn run(args: &ValidateArgs, decoder: &OwfDecoder) -> Result<()> {
    let source = crate::open(&args.file)?;
    let mut tally = Tally::default();

    match decoder.visit(source, &mut tally) {
        Ok(summary) => {
            println!("✓ Magic: OWF1");
            println!(
                "✓ Segments: {} bytes, every length aligned and inside its parent",
                summary.bytes_read
            );
            println!("✓ Entities: {}", tally.census());
            Ok(())
        }
        Err(e) => {
            println!("✗ Error: {}", diagnostic(&e));
            Err(anyhow!("validation failed"))
        }
    }
}

// ── Error formatting ──────────────────────────────────────────────────────────

/// Human-readable diagnostic for a failed decode.
///
/// ```text
/// ┌──────────────────────────┬──────────────────────────────────────────┐
/// │ DecodeError              │ Diagnostic                               │
/// ├──────────────────────────┼──────────────────────────────────────────┤
/// │ Io (UnexpectedEof)       │ "truncated at offset N (needed M ...)"   │
/// │ Wire(BadMagic)           │ "not an OWF file (magic 0x........)"     │
/// │ Wire(Misaligned)         │ "misaligned length N (must be ...)"      │
/// │ Wire(BudgetUnderflow)    │ "segment overruns its parent ..."        │
/// │ AllocationLimitExceeded  │ "field of N bytes exceeds --max-alloc"   │
/// │ anything else            │ "<error Display>"                        │
/// └──────────────────────────┴──────────────────────────────────────────┘
/// ```
fn diagnostic(e: &DecodeError) -> String {
    match e {
        DecodeError::Io {
            requested,
            offset,
            source,
        } if source.kind() == ErrorKind::UnexpectedEof => {
            format!("truncated at offset {offset} (needed {requested} more bytes)")
        }
        DecodeError::Wire(WireError::BadMagic { found }) => {
            format!("not an OWF file (magic {found:#010X})")
        }
        DecodeError::Wire(WireError::Misaligned { length, align }) => {
            format!("misaligned length {length} (must be a multiple of {align})")
        }
        DecodeError::Wire(WireError::BudgetUnderflow {
            remaining,
            requested,
        }) => {
            format!("segment overruns its parent ({requested} bytes claimed, {remaining} left)")
        }
        DecodeError::AllocationLimitExceeded { requested, max } => {
            format!("field of {requested} bytes exceeds --max-alloc {max}")
        }
        other => other.to_string(),
    }
}

//! Golden fixture generator for the OWF conformance suite.
//!
//! Writes every fixture under `tests/golden/`. Run it after a deliberate
//! change to the fixture builders, then review the conformance snapshots.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin generate_golden -p owf-tests
//! ```
//!
//! # Generated fixtures
//!
//! | File                | Contents                                        |
//! |---------------------|-------------------------------------------------|
//! | empty.owf           | Magic and an empty top-level segment            |
//! | bedside.owf         | One channel, one namespace, ECG + event + alarm |
//! | ward.owf            | Two channels × two namespaces, one signal each  |
//! | namespace_tail.owf  | bedside with 8 unknown bytes after the alarms   |
//! | trailing_junk.owf   | bedside followed by "JUNK" outside the document |

#![allow(clippy::pedantic)]

use std::path::Path;

use owf_tests::fixture::{bedside_document, document_bytes, namespace_bytes, segment, with_magic, ward_document};
use owf_types::Document;

fn main() {
    let manifest_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let golden_dir = manifest_dir.join("tests/golden");

    write_file(&golden_dir.join("empty.owf"), &document_bytes(&Document::default()));
    write_file(&golden_dir.join("bedside.owf"), &document_bytes(&bedside_document()));
    write_file(&golden_dir.join("ward.owf"), &document_bytes(&ward_document(2, 2, 1, 4)));
    write_file(&golden_dir.join("namespace_tail.owf"), &namespace_tail());

    let mut junk = document_bytes(&bedside_document());
    junk.extend_from_slice(b"JUNK");
    write_file(&golden_dir.join("trailing_junk.owf"), &junk);

    println!("All golden fixtures written to {}", golden_dir.display());
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn write_file(path: &Path, data: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create_dir_all");
    }
    std::fs::write(path, data).expect("write_file");
    println!("  wrote {}", path.display());
}

/// The bedside document with an unknown 8-byte field appended to its
/// namespace, as a newer writer might emit.
fn namespace_tail() -> Vec<u8> {
    let doc = bedside_document();
    let channel = &doc.channels[0];
    let mut ns = namespace_bytes(&channel.namespaces[0]);
    ns.extend_from_slice(&[0xAB; 8]);
    let payload = [segment(channel.id.as_bytes()), segment(&ns)].concat();
    with_magic(&segment(&payload))
}

//! Malformed payloads and visitor rejection.
//!
//! Every error case checks both the error value and what the visitor saw
//! before it: a structural error found ahead of an entity's dispatch
//! must leave that entity unvisited.

use owf_decoder::{DecodeError, DecoderConfig, Entity, Materializer, OwfDecoder, Visit, Visitor};
use owf_tests::fixture::{
    bedside_document, channel_bytes, document_bytes, length_header, namespace_bytes, segment,
    text, time, ward_document, with_magic,
};
use owf_types::{Document, EntityKind};
use owf_wire::WireError;

/// Visitor that records entity kinds and accepts everything.
#[derive(Default)]
struct Kinds(Vec<EntityKind>);

impl Visitor for Kinds {
    fn visit(&mut self, entity: Entity) -> Visit {
        self.0.push(entity.kind());
        Visit::Accept
    }
}

fn visit_kinds(bytes: &[u8]) -> (Result<owf_decoder::DecodeSummary, DecodeError>, Vec<EntityKind>) {
    let mut kinds = Kinds::default();
    let result = OwfDecoder::new().visit_bytes(bytes, &mut kinds);
    (result, kinds.0)
}

/// Materialize `bytes`, rejecting every entity `reject` matches.
fn decode_rejecting(bytes: &[u8], reject: impl Fn(&Entity) -> bool) -> (Document, u64) {
    let mut materializer = Materializer::new();
    let mut visitor = |entity: Entity| {
        if reject(&entity) {
            Visit::Reject
        } else {
            materializer.visit(entity)
        }
    };
    let summary = OwfDecoder::new().visit_bytes(bytes, &mut visitor).unwrap();
    (materializer.into_document(), summary.bytes_skipped)
}

// ── Framing ─────────────────────────────────────────────────────────────

#[test]
fn empty_document() {
    let (result, kinds) = visit_kinds(b"OWF1\0\0\0\0");
    assert_eq!(result.unwrap().bytes_read, 8);
    assert!(kinds.is_empty());
    assert_eq!(OwfDecoder::new().decode(b"OWF1\0\0\0\0").unwrap(), Document::default());
}

#[test]
fn single_channel_with_no_namespaces() {
    let bytes = [b"OWF1".as_slice(), &[0, 0, 0, 12, 0, 0, 0, 8, 0, 0, 0, 4], b"A\0\0\0"].concat();
    let (result, kinds) = visit_kinds(&bytes);
    assert_eq!(result.unwrap().bytes_read, 20);
    assert_eq!(kinds, [EntityKind::Channel]);

    let doc = OwfDecoder::new().decode(&bytes).unwrap();
    assert_eq!(doc.channels[0].id.as_bytes(), b"A\0\0\0");
    assert!(doc.channels[0].namespaces.is_empty());
}

#[test]
fn bad_magic_consumes_only_four_bytes() {
    let mut source: &[u8] = b"OWF2\0\0\0\0";
    let err = OwfDecoder::new()
        .visit(&mut source, &mut Kinds::default())
        .unwrap_err();
    assert!(matches!(
        err,
        DecodeError::Wire(WireError::BadMagic { found: 0x4F57_4632 })
    ));
    assert_eq!(source, b"\0\0\0\0");
}

#[test]
fn misaligned_top_length() {
    let bytes = [b"OWF1".as_slice(), &[0, 0, 0, 5], b"ABCDE"].concat();
    let (result, kinds) = visit_kinds(&bytes);
    let err = result.unwrap_err();
    assert!(err.is_alignment());
    assert!(matches!(
        err,
        DecodeError::Wire(WireError::Misaligned { length: 5, align: 4 })
    ));
    assert!(kinds.is_empty());
}

#[test]
fn unpadded_channel_id() {
    let channel = [length_header(1), b"A\0\0\0".to_vec()].concat();
    let (result, kinds) = visit_kinds(&with_magic(&segment(&channel)));
    assert!(matches!(
        result.unwrap_err(),
        DecodeError::Wire(WireError::Misaligned { length: 1, align: 4 })
    ));
    assert!(kinds.is_empty());
}

/// A document holding one channel, one namespace and one signal whose
/// sample segment carries `raw` verbatim.
fn single_signal(raw: &[u8]) -> Vec<u8> {
    let signal = [segment(b"S\0\0\0"), segment(b""), segment(raw)].concat();
    let ns = [
        time(0),
        time(1),
        segment(b"N\0\0\0"),
        segment(&signal),
        segment(b""),
        segment(b""),
    ]
    .concat();
    let channel = [segment(b"C\0\0\0"), segment(&ns)].concat();
    with_magic(&segment(&channel))
}

#[test]
fn partial_sample_is_misaligned() {
    let (result, kinds) = visit_kinds(&single_signal(&[0u8; 12]));
    assert!(matches!(
        result.unwrap_err(),
        DecodeError::Wire(WireError::Misaligned { length: 12, align: 8 })
    ));
    assert_eq!(kinds, [EntityKind::Channel, EntityKind::Namespace]);
}

#[test]
fn samples_are_big_endian() {
    let doc = OwfDecoder::new()
        .decode(&single_signal(&[0x3F, 0xF8, 0, 0, 0, 0, 0, 0]))
        .unwrap();
    let signal = &doc.channels[0].namespaces[0].signals[0];
    assert_eq!(signal.samples, [1.5]);
    assert_eq!(signal.id, text("S"));
    assert!(signal.unit.is_empty());
}

#[test]
fn child_overruns_parent() {
    let channel = [length_header(8), b"AAAA".to_vec()].concat();
    let (result, kinds) = visit_kinds(&with_magic(&segment(&channel)));
    assert!(matches!(
        result.unwrap_err(),
        DecodeError::Wire(WireError::BudgetUnderflow { remaining: 4, requested: 8 })
    ));
    assert!(kinds.is_empty());
}

#[test]
fn truncated_input_is_io_error() {
    let bytes = document_bytes(&bedside_document());
    let (result, kinds) = visit_kinds(&bytes[..bytes.len() - 3]);
    match result.unwrap_err() {
        DecodeError::Io { source, .. } => {
            assert_eq!(source.kind(), std::io::ErrorKind::UnexpectedEof);
        }
        other => panic!("expected Io, got {other:?}"),
    }
    // The alarm was never completed.
    assert!(!kinds.contains(&EntityKind::Alarm));
}

#[test]
fn truncated_magic_is_io_error() {
    let (result, _) = visit_kinds(b"OW");
    assert!(matches!(
        result.unwrap_err(),
        DecodeError::Io { requested: 4, offset: 0, .. }
    ));
}

// ── Allocation ceiling ──────────────────────────────────────────────────

#[test]
fn oversized_string_fails_before_reading() {
    // Header claims a 32-byte id but the payload stops right after it.
    let bytes = [b"OWF1".as_slice(), &[0, 0, 0, 40], &[0, 0, 0, 36], &[0, 0, 0, 32]].concat();
    let decoder = OwfDecoder::with_config(DecoderConfig::with_max_alloc(16));
    let err = decoder.decode(&bytes).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::AllocationLimitExceeded { requested: 32, max: 16 }
    ));
}

#[test]
fn oversized_sample_array_fails_before_reading() {
    let decoder = OwfDecoder::with_config(DecoderConfig::with_max_alloc(16));
    let mut kinds = Kinds::default();
    let err = decoder
        .visit_bytes(&single_signal(&[0u8; 32]), &mut kinds)
        .unwrap_err();
    assert!(matches!(
        err,
        DecodeError::AllocationLimitExceeded { requested: 32, max: 16 }
    ));
    assert_eq!(kinds.0, [EntityKind::Channel, EntityKind::Namespace]);
}

#[test]
fn field_at_ceiling_is_allowed() {
    let doc = ward_document(1, 1, 1, 2);
    let decoder = OwfDecoder::with_config(DecoderConfig::with_max_alloc(16));
    assert_eq!(decoder.decode(&document_bytes(&doc)).unwrap(), doc);
}

// ── Rejection ───────────────────────────────────────────────────────────

#[test]
fn rejected_namespace_skips_its_children() {
    let doc = ward_document(2, 2, 2, 3);
    let bytes = document_bytes(&doc);

    let (decoded, skipped) = decode_rejecting(&bytes, |e| {
        matches!(e, Entity::Namespace(ns) if ns.id.trimmed() == b"NS_0")
    });

    for channel in &decoded.channels {
        assert_eq!(channel.namespaces.len(), 1);
        assert_eq!(channel.namespaces[0].id.trimmed(), b"NS_1");
        assert_eq!(channel.namespaces[0].signals.len(), 2);
    }
    let ns0 = &doc.channels[0].namespaces[0];
    let header = 8 + 8 + 4 + ns0.id.len();
    let per_channel = namespace_bytes(ns0).len() - header;
    assert_eq!(skipped, 2 * per_channel as u64);
}

#[test]
fn rejected_channel_skips_its_namespaces() {
    let doc = ward_document(3, 2, 1, 1);
    let bytes = document_bytes(&doc);

    let mut seen = Vec::new();
    let mut visitor = |entity: Entity| {
        seen.push(entity.kind());
        match &entity {
            Entity::Channel(c) if c.id.trimmed() == b"BED_1" => Visit::Reject,
            _ => Visit::Accept,
        }
    };
    let summary = OwfDecoder::new().visit_bytes(&bytes, &mut visitor).unwrap();

    let channels = seen.iter().filter(|k| **k == EntityKind::Channel).count();
    let namespaces = seen.iter().filter(|k| **k == EntityKind::Namespace).count();
    assert_eq!(channels, 3);
    assert_eq!(namespaces, 4);

    let bed1 = &doc.channels[1];
    let id_segment = 4 + bed1.id.len();
    assert_eq!(
        summary.bytes_skipped,
        (channel_bytes(bed1).len() - id_segment) as u64
    );
    assert_eq!(summary.bytes_read, bytes.len() as u64);
}

#[test]
fn rejected_signal_drops_only_that_signal() {
    let doc = ward_document(1, 1, 3, 2);
    let (decoded, skipped) = decode_rejecting(&document_bytes(&doc), |e| {
        matches!(e, Entity::Signal(s) if s.id.trimmed() == b"SIG_1")
    });

    let ns = &decoded.channels[0].namespaces[0];
    let ids: Vec<_> = ns.signals.iter().map(|s| s.id.to_string_lossy()).collect();
    assert_eq!(ids, ["SIG_0", "SIG_2"]);
    assert_eq!(ns.events.len(), 1);
    assert_eq!(skipped, 0);
}

#[test]
fn rejected_leaves_keep_siblings() {
    let doc = bedside_document();
    let (decoded, _) = decode_rejecting(&document_bytes(&doc), |e| {
        matches!(e, Entity::Event(_) | Entity::Alarm(_))
    });
    let ns = &decoded.channels[0].namespaces[0];
    assert!(ns.events.is_empty());
    assert!(ns.alarms.is_empty());
    assert_eq!(ns.signals, doc.channels[0].namespaces[0].signals);
}

// ── Forward compatibility ───────────────────────────────────────────────

#[test]
fn unknown_namespace_tail_is_skipped() {
    let doc = bedside_document();
    let channel = &doc.channels[0];
    let mut ns = namespace_bytes(&channel.namespaces[0]);
    ns.extend_from_slice(&[0xAB; 8]);
    let payload = [segment(channel.id.as_bytes()), segment(&ns)].concat();
    let bytes = with_magic(&segment(&payload));

    let mut kinds = Kinds::default();
    let summary = OwfDecoder::new().visit_bytes(&bytes, &mut kinds).unwrap();
    assert_eq!(summary.bytes_skipped, 8);
    assert_eq!(summary.bytes_read, bytes.len() as u64);
    assert_eq!(OwfDecoder::new().decode(&bytes).unwrap(), doc);
}

#[test]
fn bytes_after_top_segment_are_not_read() {
    let doc = bedside_document();
    let mut bytes = document_bytes(&doc);
    let len = bytes.len();
    bytes.extend_from_slice(b"JUNK");

    let mut source = &bytes[..];
    let summary = OwfDecoder::new()
        .visit(&mut source, &mut Kinds::default())
        .unwrap();
    assert_eq!(summary.bytes_read, len as u64);
    assert_eq!(source, b"JUNK");
}

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::debug;
use owf_types::Document;

use crate::config::DecoderConfig;
use crate::error::DecodeError;
use crate::fields;
use crate::materialize::Materializer;
use crate::reader::Reader;
use crate::visitor::Visitor;

/// Byte accounting for a completed streaming decode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecodeSummary {
    /// Bytes pulled from the source, magic included.
    pub bytes_read: u64,

    /// Bytes drained without being decoded: rejected subtrees and any
    /// trailing bytes a segment's decoder did not understand.
    pub bytes_skipped: u64,
}

/// OWF decoder: streams a document to a [`Visitor`] or materializes it.
///
/// Both modes run the same recursive descent; materialization is just
/// streaming into a [`Materializer`].
///
/// ```text
///   visit(source, visitor)   → DecodeSummary   (streaming)
///   decode(bytes)            → Document        (materialized)
///   decode_from_reader(src)  → Document
///   decode_file(path)        → Document
/// ```
///
/// Each call owns its own reader state; a decoder can be shared freely.
///
/// # Example
///
/// ```rust
/// use owf_decoder::OwfDecoder;
///
/// // "OWF1", top segment of 12 bytes holding one channel with id "A".
/// let bytes = [
///     b'O', b'W', b'F', b'1',
///     0, 0, 0, 12,
///     0, 0, 0, 8,
///     0, 0, 0, 4, b'A', 0, 0, 0,
/// ];
/// let doc = OwfDecoder::new().decode(&bytes).unwrap();
/// assert_eq!(doc.channels.len(), 1);
/// assert_eq!(doc.channels[0].id.trimmed(), b"A");
/// assert!(doc.channels[0].namespaces.is_empty());
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct OwfDecoder {
    config: DecoderConfig,
}

impl OwfDecoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: DecoderConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Stream every entity in the document to `visitor`, in wire order.
    ///
    /// Bytes after the top-level segment are left unread in `source`.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::Io`] if the source runs out early.
    /// - [`DecodeError::Wire`] on bad magic, a misaligned length, or a
    ///   child segment that overruns its parent.
    /// - [`DecodeError::AllocationLimitExceeded`] /
    ///   [`DecodeError::AllocationFailure`] for oversized fields.
    pub fn visit<R: Read, V: Visitor>(
        &self,
        source: R,
        visitor: &mut V,
    ) -> Result<DecodeSummary, DecodeError> {
        debug!("decoding document, max_alloc={}", self.config.max_alloc);
        let mut reader = Reader::new(source, visitor, &self.config);
        let total = fields::read_document(&mut reader)?;
        let summary = DecodeSummary {
            bytes_read: reader.offset(),
            bytes_skipped: reader.skipped(),
        };
        debug!(
            "decoded document: top segment {total} bytes, {} read, {} skipped",
            summary.bytes_read, summary.bytes_skipped
        );
        Ok(summary)
    }

    /// [`visit`](Self::visit) over an in-memory payload.
    ///
    /// # Errors
    ///
    /// Same as [`visit`](Self::visit).
    pub fn visit_bytes<V: Visitor>(
        &self,
        bytes: &[u8],
        visitor: &mut V,
    ) -> Result<DecodeSummary, DecodeError> {
        self.visit(bytes, visitor)
    }

    /// Decode an in-memory payload into a [`Document`].
    ///
    /// # Errors
    ///
    /// Same as [`visit`](Self::visit). No partial document is returned.
    pub fn decode(&self, bytes: &[u8]) -> Result<Document, DecodeError> {
        self.decode_from_reader(bytes)
    }

    /// Decode from any byte source into a [`Document`].
    ///
    /// # Errors
    ///
    /// Same as [`visit`](Self::visit).
    pub fn decode_from_reader<R: Read>(&self, source: R) -> Result<Document, DecodeError> {
        let mut materializer = Materializer::new();
        self.visit(source, &mut materializer)?;
        Ok(materializer.into_document())
    }

    /// Open `path` and decode it into a [`Document`].
    ///
    /// # Errors
    ///
    /// [`DecodeError::Open`] if the file cannot be opened, otherwise the
    /// same as [`visit`](Self::visit).
    pub fn decode_file(&self, path: impl AsRef<Path>) -> Result<Document, DecodeError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DecodeError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        self.decode_from_reader(BufReader::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visitor::{Entity, Visit};
    use owf_types::EntityKind;

    fn seg(payload: &[u8]) -> Vec<u8> {
        let mut out = u32::try_from(payload.len()).unwrap().to_be_bytes().to_vec();
        out.extend_from_slice(payload);
        out
    }

    fn namespace(id: &[u8], groups: [&[u8]; 3]) -> Vec<u8> {
        [
            10i64.to_be_bytes().to_vec(),
            2i64.to_be_bytes().to_vec(),
            seg(id),
            seg(groups[0]),
            seg(groups[1]),
            seg(groups[2]),
        ]
        .concat()
    }

    fn document(channels: &[Vec<u8>]) -> Vec<u8> {
        let body: Vec<u8> = channels.iter().flat_map(|c| seg(c)).collect();
        [b"OWF1".to_vec(), seg(&body)].concat()
    }

    fn channel(id: &[u8], namespaces: &[Vec<u8>]) -> Vec<u8> {
        let mut out = seg(id);
        for ns in namespaces {
            out.extend(seg(ns));
        }
        out
    }

    #[test]
    fn empty_document_has_no_channels() {
        let doc = OwfDecoder::new().decode(&document(&[])).unwrap();
        assert!(doc.channels.is_empty());
    }

    #[test]
    fn rejected_namespace_is_skipped_whole() {
        let event = [7i64.to_be_bytes().to_vec(), seg(b"x\0\0\0")].concat();
        let bytes = document(&[channel(
            b"A\0\0\0",
            &[
                namespace(b"drop", [b"", &event[..], b""]),
                namespace(b"keep", [b"", &event[..], b""]),
            ],
        )]);

        let mut kinds = Vec::new();
        let mut visitor = |entity: Entity| {
            let verdict = match &entity {
                Entity::Namespace(ns) if ns.id.trimmed() == b"drop" => Visit::Reject,
                _ => Visit::Accept,
            };
            kinds.push(entity.kind());
            verdict
        };
        let summary = OwfDecoder::new().visit_bytes(&bytes, &mut visitor).unwrap();

        assert_eq!(
            kinds,
            vec![
                EntityKind::Channel,
                EntityKind::Namespace,
                EntityKind::Namespace,
                EntityKind::Event
            ]
        );
        // Three group envelopes: 4 + (4 + 8 + 8) + 4.
        assert_eq!(summary.bytes_skipped, 28);
        assert_eq!(summary.bytes_read, bytes.len() as u64);
    }

    #[test]
    fn rejected_channel_skips_its_namespaces() {
        let bytes = document(&[
            channel(b"A\0\0\0", &[namespace(b"n\0\0\0", [b"", b"", b""])]),
            channel(b"B\0\0\0", &[]),
        ]);
        let mut seen = Vec::new();
        let mut visitor = |entity: Entity| {
            seen.push(entity.kind());
            if entity.kind() == EntityKind::Channel { Visit::Reject } else { Visit::Accept }
        };
        OwfDecoder::new().visit_bytes(&bytes, &mut visitor).unwrap();
        assert_eq!(seen, vec![EntityKind::Channel, EntityKind::Channel]);
    }

    #[test]
    fn decode_fails_without_partial_result() {
        let mut bytes = document(&[channel(b"A\0\0\0", &[])]);
        bytes.truncate(bytes.len() - 2);
        let err = OwfDecoder::new().decode(&bytes).unwrap_err();
        assert!(matches!(err, DecodeError::Io { .. }));
    }

    #[test]
    fn decode_file_reports_missing_file() {
        let err = OwfDecoder::new()
            .decode_file("/nonexistent/owf/input.owf")
            .unwrap_err();
        assert!(matches!(err, DecodeError::Open { .. }));
    }
}

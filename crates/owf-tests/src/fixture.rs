//! Wire-format builders for tests, benches and golden files.
//!
//! Two layers:
//!
//! - raw helpers ([`segment`], [`with_magic`], [`time`]) for hand-crafting
//!   malformed payloads byte by byte;
//! - [`document_bytes`], which lays out a whole [`Document`] the way a
//!   conforming writer would, so decode results can be compared against
//!   the tree that produced them.
//!
//! Byte strings are written exactly as stored. Use [`text`] to get the
//! NUL padding that keeps segments aligned.

use owf_types::{ByteString, Channel, Document, Event, Namespace, Signal};
use owf_wire::header::{OWF_MAGIC, SEGMENT_ALIGN};

/// `[len][payload]` with a big-endian length.
pub fn segment(payload: &[u8]) -> Vec<u8> {
    let len = u32::try_from(payload.len()).expect("fixture segment over 4 GiB");
    let mut out = Vec::with_capacity(payload.len() + 4);
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(payload);
    out
}

/// A raw length header with no payload, for lying about lengths.
pub fn length_header(len: u32) -> Vec<u8> {
    len.to_be_bytes().to_vec()
}

/// Magic followed by one top-level segment around `top`.
pub fn with_magic(top: &[u8]) -> Vec<u8> {
    let mut out = OWF_MAGIC.to_be_bytes().to_vec();
    out.extend(segment(top));
    out
}

pub fn time(t: i64) -> Vec<u8> {
    t.to_be_bytes().to_vec()
}

pub fn samples(values: &[f64]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_be_bytes()).collect()
}

/// `s` padded with NULs to the next multiple of 4.
pub fn text(s: &str) -> ByteString {
    let mut bytes = s.as_bytes().to_vec();
    let align = SEGMENT_ALIGN as usize;
    bytes.resize(bytes.len().div_ceil(align) * align, 0);
    ByteString::new(bytes)
}

pub fn signal_bytes(signal: &Signal) -> Vec<u8> {
    [
        segment(signal.id.as_bytes()),
        segment(signal.unit.as_bytes()),
        segment(&samples(&signal.samples)),
    ]
    .concat()
}

fn timed_bytes(t: i64, data: &ByteString) -> Vec<u8> {
    [time(t), segment(data.as_bytes())].concat()
}

pub fn namespace_bytes(ns: &Namespace) -> Vec<u8> {
    let signals: Vec<u8> = ns.signals.iter().flat_map(signal_bytes).collect();
    let events: Vec<u8> = ns.events.iter().flat_map(|e| timed_bytes(e.time, &e.data)).collect();
    let alarms: Vec<u8> = ns.alarms.iter().flat_map(|a| timed_bytes(a.time, &a.data)).collect();
    [
        time(ns.t0),
        time(ns.dt),
        segment(ns.id.as_bytes()),
        segment(&signals),
        segment(&events),
        segment(&alarms),
    ]
    .concat()
}

pub fn channel_bytes(channel: &Channel) -> Vec<u8> {
    let mut out = segment(channel.id.as_bytes());
    for ns in &channel.namespaces {
        out.extend(segment(&namespace_bytes(ns)));
    }
    out
}

/// Full payload for `doc`: magic, top segment, bracketed channels.
pub fn document_bytes(doc: &Document) -> Vec<u8> {
    let channels: Vec<u8> = doc
        .channels
        .iter()
        .flat_map(|c| segment(&channel_bytes(c)))
        .collect();
    with_magic(&channels)
}

/// A bedside monitor capture: one channel, one namespace holding an ECG
/// lead, a power-on event and an SpO2 alarm.
pub fn bedside_document() -> Document {
    let mut ns = Namespace::new(text("GEWAVE"), 1_500_000_000_000, 3);
    ns.signals.push(Signal {
        id: text("ECG_LEAD_2"),
        unit: text("mV"),
        samples: (0..11).map(|i| f64::from(i) * 0.25 - 1.0).collect(),
    });
    ns.events.push(Event {
        time: 1_500_000_000_005,
        data: text("POST OK"),
    });
    ns.alarms.push(owf_types::Alarm {
        time: 1_500_000_000_007,
        data: text("SPO2 LO"),
    });
    let mut channel = Channel::new(text("BED_42"));
    channel.namespaces.push(ns);
    Document {
        channels: vec![channel],
    }
}

/// Several channels with several namespaces each, for ordering tests
/// and benches. `signals` sets the signals per namespace.
pub fn ward_document(beds: usize, namespaces: usize, signals: usize, samples: usize) -> Document {
    let mut doc = Document::default();
    for bed in 0..beds {
        let mut channel = Channel::new(text(&format!("BED_{bed}")));
        for n in 0..namespaces {
            let mut ns = Namespace::new(text(&format!("NS_{n}")), 0, 4);
            for s in 0..signals {
                ns.signals.push(Signal {
                    id: text(&format!("SIG_{s}")),
                    unit: text("mV"),
                    samples: (0..samples).map(|i| i as f64).collect(),
                });
            }
            ns.events.push(Event {
                time: i64::try_from(n).unwrap_or(i64::MAX),
                data: text("tick"),
            });
            channel.namespaces.push(ns);
        }
        doc.channels.push(channel);
    }
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_pads_to_word() {
        assert_eq!(text("A").as_bytes(), b"A\0\0\0");
        assert_eq!(text("BED_").as_bytes(), b"BED_");
        assert!(text("").is_empty());
    }

    #[test]
    fn empty_document_layout() {
        assert_eq!(document_bytes(&Document::default()), b"OWF1\0\0\0\0");
    }

    #[test]
    fn channel_layout() {
        let doc = Document {
            channels: vec![Channel::new(text("A"))],
        };
        assert_eq!(
            document_bytes(&doc),
            [b"OWF1".as_slice(), &[0, 0, 0, 12, 0, 0, 0, 8, 0, 0, 0, 4], b"A\0\0\0"].concat()
        );
    }
}

/// Implementation of `owf dump`.
///
/// Materialises the whole file and prints it either as the indented
/// document outline or, with `--json`, as pretty-printed JSON:
///
/// ```json
/// {
///   "channels": [
///     {
///       "id": "BED_42",
///       "namespaces": [
///         {
///           "id": "GEWAVE", "t0": 1500000000000, "dt": 3,
///           "signals": [{ "id": "ECG_LEAD_2", "unit": "mV", "samples": [-1.0, ...] }],
///           "events": [{ "time": 1500000000005, "data": "POST OK" }],
///           "alarms": [{ "time": 1500000000007, "data": "SPO2 LO" }]
///         }
///       ]
///     }
///   ]
/// }
/// ```
///
/// Byte strings are rendered without their NUL padding, lossily decoded
/// as UTF-8.
use anyhow::{Context, Result};
use owf_decoder::OwfDecoder;
use owf_types::{Channel, Document, Namespace, Signal, Time};
use serde::Serialize;

use crate::DumpArgs;

/// Run the `owf dump` command.
///
/// # Errors
///
/// Returns an error if the file cannot be opened, fails to decode, or
/// cannot be serialised.
pub fn run(args: &DumpArgs, decoder: &OwfDecoder) -> Result<()> {
    let doc = decoder
        .decode_file(&args.file)
        .with_context(|| format!("failed to decode {}", args.file.display()))?;

    if args.json {
        let json = serde_json::to_string_pretty(&DocumentView::from(&doc))
            .context("failed to serialise document")?;
        println!("{json}");
    } else {
        print!("{doc}");
    }
    Ok(())
}

// ── JSON views ────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct DocumentView {
    channels: Vec<ChannelView>,
}

#[derive(Serialize)]
struct ChannelView {
    id: String,
    namespaces: Vec<NamespaceView>,
}

#[derive(Serialize)]
struct NamespaceView {
    id: String,
    t0: Time,
    dt: Time,
    signals: Vec<SignalView>,
    events: Vec<TimedView>,
    alarms: Vec<TimedView>,
}

#[derive(Serialize)]
struct SignalView {
    id: String,
    unit: String,
    samples: Vec<f64>,
}

#[derive(Serialize)]
struct TimedView {
    time: Time,
    data: String,
}

impl From<&Document> for DocumentView {
    fn from(doc: &Document) -> Self {
        Self {
            channels: doc.channels.iter().map(ChannelView::from).collect(),
        }
    }
}

impl From<&Channel> for ChannelView {
    fn from(channel: &Channel) -> Self {
        Self {
            id: channel.id.to_string_lossy(),
            namespaces: channel.namespaces.iter().map(NamespaceView::from).collect(),
        }
    }
}

impl From<&Namespace> for NamespaceView {
    fn from(ns: &Namespace) -> Self {
        Self {
            id: ns.id.to_string_lossy(),
            t0: ns.t0,
            dt: ns.dt,
            signals: ns.signals.iter().map(SignalView::from).collect(),
            events: ns
                .events
                .iter()
                .map(|e| TimedView {
                    time: e.time,
                    data: e.data.to_string_lossy(),
                })
                .collect(),
            alarms: ns
                .alarms
                .iter()
                .map(|a| TimedView {
                    time: a.time,
                    data: a.data.to_string_lossy(),
                })
                .collect(),
        }
    }
}

impl From<&Signal> for SignalView {
    fn from(signal: &Signal) -> Self {
        Self {
            id: signal.id.to_string_lossy(),
            unit: signal.unit.to_string_lossy(),
            samples: signal.samples.clone(),
        }
    }
}

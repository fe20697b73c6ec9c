/// Implementation of `owf inspect`.
///
/// Streams the file through [`InspectVisitor`], printing one line per
/// entity as it is decoded. Nothing is materialised.
///
/// # Output format
///
/// ```text
/// channel "BED_42"
///   namespace "GEWAVE" t0=1500000000000 dt=3
///     signal "ECG_LEAD_2" [mV] 11 samples
///     event @1500000000005 "POST OK"
///     alarm @1500000000007 "SPO2 LO"
/// channel "BED_43" (skipped)
/// ---
/// 412 bytes read, 188 skipped
/// ```
use anyhow::{Context, Result};
use owf_decoder::{Entity, OwfDecoder, Visit, Visitor};

use crate::InspectArgs;

/// Run the `owf inspect` command.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or the payload is
/// structurally invalid. Lines printed before the failure stay printed.
pub fn run(args: &InspectArgs, decoder: &OwfDecoder) -> Result<()> {
    let source = crate::open(&args.file)?;
    let mut visitor = InspectVisitor {
        skip_channels: &args.skip_channels,
        skip_namespaces: &args.skip_namespaces,
    };

    let summary = decoder
        .visit(source, &mut visitor)
        .with_context(|| format!("failed to decode {}", args.file.display()))?;

    println!("---");
    println!(
        "{} bytes read, {} skipped",
        summary.bytes_read, summary.bytes_skipped
    );
    Ok(())
}

struct InspectVisitor<'a> {
    skip_channels: &'a [String],
    skip_namespaces: &'a [String],
}

impl InspectVisitor<'_> {
    fn verdict(&self, entity: &Entity) -> Visit {
        if !entity.kind().is_container() {
            return Visit::Accept;
        }
        let skipped = match entity {
            Entity::Channel(c) => self.skip_channels.iter().any(|id| c.id.trimmed() == id.as_bytes()),
            Entity::Namespace(ns) => self
                .skip_namespaces
                .iter()
                .any(|id| ns.id.trimmed() == id.as_bytes()),
            _ => false,
        };
        if skipped { Visit::Reject } else { Visit::Accept }
    }
}

impl Visitor for InspectVisitor<'_> {
    fn visit(&mut self, entity: Entity) -> Visit {
        let verdict = self.verdict(&entity);
        let suffix = if verdict.is_reject() { " (skipped)" } else { "" };
        println!("{}{suffix}", describe(&entity));
        verdict
    }
}

/// One indented line for `entity`, in the same shape as the document outline.
fn describe(entity: &Entity) -> String {
    let indent = "  ".repeat(entity.kind().depth());
    let body = match entity {
        Entity::Channel(c) => format!("channel {:?}", c.id.to_string_lossy()),
        Entity::Namespace(ns) => format!(
            "namespace {:?} t0={} dt={}",
            ns.id.to_string_lossy(),
            ns.t0,
            ns.dt
        ),
        Entity::Signal(s) => format!(
            "signal {:?} [{}] {} samples",
            s.id.to_string_lossy(),
            s.unit,
            s.sample_count()
        ),
        Entity::Event(e) => format!("event @{} {:?}", e.time, e.data.to_string_lossy()),
        Entity::Alarm(a) => format!("alarm @{} {:?}", a.time, a.data.to_string_lossy()),
    };
    format!("{indent}{body}")
}

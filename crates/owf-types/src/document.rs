use std::fmt;

use crate::channel::Channel;

/// A fully materialized document: channels in wire order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    pub channels: Vec<Channel>,
}

impl Document {
    /// First channel whose id, without NUL padding, equals `id`.
    #[must_use]
    pub fn channel(&self, id: &str) -> Option<&Channel> {
        self.channels
            .iter()
            .find(|c| c.id.trimmed() == id.as_bytes())
    }

    #[must_use]
    pub fn namespace_count(&self) -> usize {
        self.channels.iter().map(|c| c.namespaces.len()).sum()
    }
}

/// Indented outline, one line per entity.
///
/// ```text
/// document (1 channel)
///   channel "BED_42"
///     namespace "GEWAVE" t0=0 dt=3
///       signal "ECG_LEAD_2" [mV] 11 samples
///       event @5 "POST OK"
///       alarm @7 "SPO2 LO"
/// ```
impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.channels.len();
        writeln!(f, "document ({n} channel{})", if n == 1 { "" } else { "s" })?;
        for channel in &self.channels {
            writeln!(f, "  channel {:?}", channel.id.to_string_lossy())?;
            for ns in &channel.namespaces {
                writeln!(
                    f,
                    "    namespace {:?} t0={} dt={}",
                    ns.id.to_string_lossy(),
                    ns.t0,
                    ns.dt
                )?;
                for signal in &ns.signals {
                    writeln!(
                        f,
                        "      signal {:?} [{}] {} samples",
                        signal.id.to_string_lossy(),
                        signal.unit,
                        signal.sample_count()
                    )?;
                }
                for event in &ns.events {
                    writeln!(f, "      event @{} {:?}", event.time, event.data.to_string_lossy())?;
                }
                for alarm in &ns.alarms {
                    writeln!(f, "      alarm @{} {:?}", alarm.time, alarm.data.to_string_lossy())?;
                }
            }
        }
        Ok(())
    }
}

/// Implementation of `owf stats`.
///
/// Streams the file through a [`Tally`] and prints a summary report.
///
/// # Example output
///
/// ```text
/// File:       bedside.owf  (224 bytes read)
/// Channels:   1
/// Namespaces: 1
/// Signals:    1  (11 samples, 88 bytes)
/// Events:     1
/// Alarms:     1
/// Time span:  1500000000000 ..= 1500000000030
/// ```
///
/// The time span covers namespace start times, the last sample of every
/// signal (`t0 + (n - 1) * dt`) and every event and alarm time.
use anyhow::{Context, Result};
use owf_decoder::{Entity, OwfDecoder, Visit, Visitor};
use owf_types::{Namespace, Time};

use crate::StatsArgs;

/// Run the `owf stats` command.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or the payload is
/// structurally invalid.
pub fn run(args: &StatsArgs, decoder: &OwfDecoder) -> Result<()> {
    let source = crate::open(&args.file)?;
    let mut tally = Tally::default();
    let summary = decoder
        .visit(source, &mut tally)
        .with_context(|| format!("failed to decode {}", args.file.display()))?;

    println!(
        "File:       {}  ({} bytes read)",
        args.file.display(),
        summary.bytes_read
    );
    println!("Channels:   {}", tally.channels);
    println!("Namespaces: {}", tally.namespaces);
    println!(
        "Signals:    {}  ({} samples, {} bytes)",
        tally.signals,
        tally.samples,
        tally.samples * 8
    );
    println!("Events:     {}", tally.events);
    println!("Alarms:     {}", tally.alarms);
    match tally.span {
        Some((first, last)) => println!("Time span:  {first} ..= {last}"),
        None => println!("Time span:  (none)"),
    }
    Ok(())
}

/// Counting visitor shared by `stats` and `validate`. Accepts everything.
#[derive(Debug, Default)]
pub struct Tally {
    pub channels: u64,
    pub namespaces: u64,
    pub signals: u64,
    pub events: u64,
    pub alarms: u64,
    pub samples: u64,
    /// Earliest and latest time seen.
    pub span: Option<(Time, Time)>,
    /// Header of the namespace whose children are arriving.
    current: Option<Namespace>,
}

impl Tally {
    /// `"1 channel, 2 namespaces, ..."` with singular/plural nouns.
    pub fn census(&self) -> String {
        [
            (self.channels, "channel"),
            (self.namespaces, "namespace"),
            (self.signals, "signal"),
            (self.events, "event"),
            (self.alarms, "alarm"),
        ]
        .iter()
        .map(|&(n, noun)| format!("{n} {noun}{}", if n == 1 { "" } else { "s" }))
        .collect::<Vec<_>>()
        .join(", ")
    }

    fn observe(&mut self, t: Time) {
        self.span = Some(match self.span {
            Some((lo, hi)) => (lo.min(t), hi.max(t)),
            None => (t, t),
        });
    }
}

impl Visitor for Tally {
    fn visit(&mut self, entity: Entity) -> Visit {
        match entity {
            Entity::Channel(_) => self.channels += 1,
            Entity::Namespace(ns) => {
                self.namespaces += 1;
                self.observe(ns.t0);
                self.current = Some(ns);
            }
            Entity::Signal(s) => {
                self.signals += 1;
                self.samples += s.sample_count() as u64;
                let last = s
                    .sample_count()
                    .checked_sub(1)
                    .and_then(|i| self.current.as_ref()?.sample_time(i));
                if let Some(t) = last {
                    self.observe(t);
                }
            }
            Entity::Event(e) => {
                self.events += 1;
                self.observe(e.time);
            }
            Entity::Alarm(a) => {
                self.alarms += 1;
                self.observe(a.time);
            }
        }
        Visit::Accept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use owf_types::{Channel, Event, Signal};

    #[test]
    fn counts_and_span() {
        let mut tally = Tally::default();
        tally.visit(Entity::Channel(Channel::new("A".into())));
        tally.visit(Entity::Namespace(Namespace::new("N".into(), 100, 10)));
        tally.visit(Entity::Signal(Signal {
            samples: vec![0.0; 4],
            ..Signal::default()
        }));
        tally.visit(Entity::Event(Event {
            time: 90,
            data: "x".into(),
        }));

        assert_eq!(tally.census(), "1 channel, 1 namespace, 1 signal, 1 event, 0 alarms");
        assert_eq!(tally.samples, 4);
        assert_eq!(tally.span, Some((90, 130)));
    }

    #[test]
    fn empty_signal_adds_no_time() {
        let mut tally = Tally::default();
        tally.visit(Entity::Namespace(Namespace::new("N".into(), 5, 1)));
        tally.visit(Entity::Signal(Signal::default()));
        assert_eq!(tally.span, Some((5, 5)));
    }
}

use crate::Time;
use crate::byte_string::ByteString;
use crate::event::{Alarm, Event};
use crate::signal::Signal;

/// A group of signals, events and alarms sharing one time base.
///
/// `t0` is the base time and `dt` the interval between consecutive
/// samples of every signal in the namespace.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Namespace {
    pub id: ByteString,
    pub t0: Time,
    pub dt: Time,
    pub signals: Vec<Signal>,
    pub events: Vec<Event>,
    pub alarms: Vec<Alarm>,
}

impl Namespace {
    /// A namespace header with no children yet.
    #[must_use]
    pub fn new(id: ByteString, t0: Time, dt: Time) -> Self {
        Self {
            id,
            t0,
            dt,
            ..Self::default()
        }
    }

    /// Time of the sample at `index`: `t0 + index * dt`.
    ///
    /// Returns `None` if the result does not fit in an `i64`.
    #[must_use]
    pub fn sample_time(&self, index: usize) -> Option<Time> {
        let index = Time::try_from(index).ok()?;
        index.checked_mul(self.dt)?.checked_add(self.t0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.signals.is_empty() && self.events.is_empty() && self.alarms.is_empty()
    }
}

use crate::byte_string::ByteString;

/// A sampled waveform: an id, a unit and a run of doubles.
///
/// Samples are already in host byte order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Signal {
    pub id: ByteString,
    pub unit: ByteString,
    pub samples: Vec<f64>,
}

impl Signal {
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }
}

use crate::Time;
use crate::byte_string::ByteString;

/// A timestamped, free-form event (e.g. "POST OK").
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Event {
    pub time: Time,
    pub data: ByteString,
}

/// A timestamped device alarm (e.g. "SPO2 LO").
///
/// Same shape as [`Event`] on the wire. Richer alarm payloads are a
/// versioned extension and are not decoded here.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Alarm {
    pub time: Time,
    pub data: ByteString,
}

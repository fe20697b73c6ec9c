#![warn(clippy::pedantic)]

pub mod byte_string;
pub mod entity_kind;
pub mod signal;
pub mod event;
pub mod namespace;
pub mod channel;
pub mod document;

pub use byte_string::ByteString;
pub use channel::Channel;
pub use document::Document;
pub use entity_kind::EntityKind;
pub use event::{Alarm, Event};
pub use namespace::Namespace;
pub use signal::Signal;

/// Signed 64-bit time value. Units are defined by the producer.
pub type Time = i64;

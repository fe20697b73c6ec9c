#![warn(clippy::pedantic)]

pub mod config;
pub mod decoder;
pub mod error;
pub mod materialize;
pub mod visitor;

mod fields;
mod reader;

pub use config::DecoderConfig;
pub use decoder::{DecodeSummary, OwfDecoder};
pub use error::DecodeError;
pub use materialize::Materializer;
pub use visitor::{AcceptAll, Entity, Visit, Visitor};

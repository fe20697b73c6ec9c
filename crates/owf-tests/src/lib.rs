#![warn(clippy::pedantic)]
#![allow(
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]

pub mod fixture;

//! Filesystem adapters

pub mod ics_source;

pub use ics_source::IcsFileSource;

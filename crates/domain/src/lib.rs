//! # CalStats Domain
//!
//! Business domain types and models for CalStats.
//!
//! This crate contains:
//! - Calendar event and timeline types (RawEvent, DisplayInterval, Viewport)
//! - Analysis payloads exchanged over the real-time channel
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other CalStats crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;

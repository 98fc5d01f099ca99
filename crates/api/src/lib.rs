//! # CalStats App
//!
//! Interactive client - commands, context and entry point support.
//!
//! This crate contains:
//! - Shell commands (keyboard → context bridge)
//! - Application context (dependency injection)
//! - Screen rendering and the interactive loop
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture

pub mod commands;
pub mod context;
pub mod render;
pub mod shell;
pub mod utils;

// Re-export for convenience
pub use commands::{execute, Command, Flow};
pub use context::*;

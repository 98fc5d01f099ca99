//! # CalStats Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - Configuration loading (environment, JSON/TOML files)
//! - The Socket.IO real-time channel over WebSocket
//! - The `.ics` file source
//! - A character-cell timeline widget
//!
//! ## Architecture
//! - Implements traits defined in `calstats-core`
//! - Depends on `calstats-domain` and `calstats-core`
//! - Contains all "impure" code (sockets, files)

pub mod channel;
pub mod config;
pub mod files;
pub mod widget;

// Re-export commonly used items
pub use channel::{socket_io_endpoint, Packet, WebSocketChannel};
pub use files::IcsFileSource;
pub use widget::TextTimelineWidget;

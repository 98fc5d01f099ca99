//! Domain types and models
//!
//! - [`event`]: raw calendar events and their display intervals
//! - [`viewport`]: the visible timeline window and navigation vocabulary
//! - [`selection`]: single-interval selection state
//! - [`stats`]: analysis results produced by the companion service
//! - [`channel`]: real-time channel event payloads

pub mod channel;
pub mod event;
pub mod selection;
pub mod stats;
pub mod timestamp;
pub mod viewport;

pub use channel::{ErrorPayload, InboundEvent, OutboundEvent, UploadPayload};
pub use event::{DisplayInterval, EventId, RawEvent};
pub use selection::Selection;
pub use stats::{AnalysisResult, CitizenshipInfo, WindowEvent};
pub use viewport::{NavDirection, NavUnit, Viewport};

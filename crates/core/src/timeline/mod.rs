//! Timeline rendering and navigation
//!
//! - [`normalizer`]: raw events to display intervals
//! - [`viewport`]: visible window initialization and month/year navigation
//! - [`selection`]: single-interval selection and detail overlay
//! - [`view`]: composition over an owned rendering widget
//! - [`ports`]: the widget boundary

pub mod normalizer;
pub mod ports;
pub mod selection;
pub mod view;
pub mod viewport;

pub use normalizer::{normalize_event, normalize_events};
pub use selection::{EventDetail, SelectionTracker};
pub use view::TimelineView;
pub use viewport::ViewportController;

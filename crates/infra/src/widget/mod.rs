//! Timeline widget adapters

pub mod text;

pub use text::TextTimelineWidget;

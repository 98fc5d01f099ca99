//! Shared helpers for presentation models.

pub mod format;

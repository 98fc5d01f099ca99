//! Shared test helpers for `calstats-core` integration tests.
//!
//! Lightweight mocks for the channel, file source and widget ports so the
//! flow tests can focus on behaviour instead of boilerplate.

#![allow(dead_code)]

pub mod channel;
pub mod widget;

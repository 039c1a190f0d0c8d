//! Integration test utilities for the moderation bot
//!
//! This crate provides helpers for driving whole moderation scenarios through the
//! event handler, plus a liveness server harness.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;

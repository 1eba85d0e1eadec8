//! Shared utilities for integration tests.

pub mod blob;
pub mod harness;

//! # Unit Tests
//!
//! Tests for each layer of the crate, from the register map table up to the
//! verification harness running end to end on the behavioral model.


/// Unit tests for configuration defaults, JSON and environment sources, and validation.
pub mod config;

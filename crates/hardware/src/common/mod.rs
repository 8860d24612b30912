//! Common types shared by the decoder, the behavioral hardware model, and the harness.
//!
//! This module provides:
//! 1. **Raw Words:** The assembled 32-bit register value and wire width.
//! 2. **Error Handling:** Bus errors, register map defects, field mismatches, and harness errors.

/// Raw register word type.
pub mod data;

/// Error types for every layer of the crate.
pub mod error;

pub use data::{RawRegister, WORD_BYTES};
pub use error::{BusError, ConfigurationDefect, FieldMismatch, HarnessError};

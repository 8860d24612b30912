//! System Version register decoder and verification harness.
//!
//! This crate checks the register-layout contract of the System Version identification block:
//! 1. **Register map:** Offsets, masks, and shifts of the five fields, validated at compile time.
//! 2. **Decoder:** Little-endian word assembly and `(raw & mask) >> shift` field extraction.
//! 3. **Driver:** One bus read per field through the abstract `RegisterBus` capability.
//! 4. **Hardware model:** A behavioral System Version block on an APB-style bus.
//! 5. **Harness:** Seeded scenarios, reset sequencing, readback, and per-field reports.

/// Common types (raw register words, error taxonomy).
pub mod common;
/// Harness configuration (parameters, widths, timing; env and JSON sources).
pub mod config;
/// Named field reads over a register bus.
pub mod driver;
/// Register map table and field decoder.
pub mod regmap;
/// Behavioral hardware (device model, bus, testbench, traits).
pub mod soc;
/// Scenario generation, harness, and reports.
pub mod verify;

/// Root configuration type; use `HarnessConfig::default()`, `from_env`, or `from_json`.
pub use crate::config::HarnessConfig;
/// Field selector for decode and report APIs.
pub use crate::regmap::{Field, decode_field};
/// Behavioral design under test.
pub use crate::soc::Testbench;
/// Verification harness and its scenario type.
pub use crate::verify::{Harness, Scenario};

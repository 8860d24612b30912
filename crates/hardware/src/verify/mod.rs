//! Verification of the register map contract against hardware.
//!
//! This module provides:
//! 1. **Scenarios:** Seeded random board straps plus the build-time version parameters.
//! 2. **Harness:** The reset → settle → readback → compare sequence.
//! 3. **Reports:** Per-field expected/actual results and the failure type.

/// Reset and readback sequencing.
pub mod harness;

/// Field checks, reports, and failures.
pub mod report;

/// Seeded pseudo-random source.
pub mod rng;

/// Scenario generation.
pub mod scenario;

pub use harness::{Harness, Phase};
pub use report::{FieldCheck, VerificationFailure, VerificationReport};
pub use scenario::Scenario;

use crate::common::HarnessError;
use crate::config::HarnessConfig;
use crate::soc::Testbench;

/// Runs one scenario against a freshly built behavioral testbench.
///
/// # Arguments
///
/// * `config` - Hardware parameters, port widths, and timing.
/// * `seed` - Seed for the board strap values.
pub fn run_on_model(config: &HarnessConfig, seed: u64) -> Result<VerificationReport, HarnessError> {
    config.validate()?;
    let scenario = Scenario::generate(config, seed);
    let mut testbench = Testbench::new(config);
    Harness::new(config).run(&mut testbench, &scenario)
}

//! Reset, stimulus, and readback sequencing.
//!
//! The harness walks a fixed sequence per run:
//! 1. **Configuring:** Drive the scenario's board values onto the strap inputs.
//! 2. **ResetAsserted:** Assert reset and hold it for `reset_hold_cycles`.
//! 3. **Deasserting:** Release reset and wait `settle_cycles` for the registers to load.
//! 4. **Verifying:** Read and decode all five fields and compare them to the scenario.
//! 5. **Passed / Failed:** Every field is read even after a mismatch, so a failure lists them all.
//!
//! A bus error aborts the run immediately without a field verdict.

use std::fmt;

use tracing::{debug, error, info, trace};

use super::report::{FieldCheck, VerificationFailure, VerificationReport};
use super::scenario::Scenario;
use crate::common::HarnessError;
use crate::config::{HarnessConfig, TimingConfig};
use crate::driver;
use crate::regmap::Field;
use crate::soc::{HardwareControl, RegisterBus};

/// Order in which the fields are read back.
pub const CHECK_ORDER: [Field; 5] = [
    Field::BoardType,
    Field::BoardRev,
    Field::FpgaVersionMajor,
    Field::FpgaVersionMinor,
    Field::FpgaBuild,
];

/// Harness state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No run in progress.
    Idle,
    /// Strap inputs being driven.
    Configuring,
    /// Reset active, hold time elapsing.
    ResetAsserted,
    /// Reset released, settle time elapsing.
    Deasserting,
    /// Fields being read back.
    Verifying,
    /// Every field matched.
    Passed,
    /// A field mismatched or the bus failed.
    Failed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Configuring => "configuring",
            Self::ResetAsserted => "reset-asserted",
            Self::Deasserting => "deasserting",
            Self::Verifying => "verifying",
            Self::Passed => "passed",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Drives one verification run at a time against a design under test.
#[derive(Debug, Clone)]
pub struct Harness {
    timing: TimingConfig,
    phase: Phase,
}

impl Harness {
    /// Creates an idle harness using the timing from `config`.
    pub const fn new(config: &HarnessConfig) -> Self {
        Self {
            timing: config.timing,
            phase: Phase::Idle,
        }
    }

    /// Current phase.
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Runs the full sequence: reset with the scenario's straps applied, then verify.
    ///
    /// # Returns
    ///
    /// The report of a passing run, `HarnessError::Verification` listing every
    /// mismatched field, or `HarnessError::Bus` if a read failed.
    pub fn run<D>(&mut self, dut: &mut D, scenario: &Scenario) -> Result<VerificationReport, HarnessError>
    where
        D: RegisterBus + HardwareControl + ?Sized,
    {
        self.apply_reset(dut, scenario);
        self.verify(dut, scenario)
    }

    /// Drives the straps, pulses reset, and waits for the registers to settle.
    pub fn apply_reset<H>(&mut self, hw: &mut H, scenario: &Scenario)
    where
        H: HardwareControl + ?Sized,
    {
        self.enter(Phase::Configuring);
        hw.set_board_type(scenario.board_type);
        hw.set_board_rev(scenario.board_rev);

        self.enter(Phase::ResetAsserted);
        hw.set_reset_active(true);
        hw.advance_cycles(self.timing.reset_hold_cycles);

        self.enter(Phase::Deasserting);
        hw.set_reset_active(false);
        hw.advance_cycles(self.timing.settle_cycles);
    }

    /// Reads every field and compares it with the scenario.
    pub fn verify<B>(&mut self, bus: &mut B, scenario: &Scenario) -> Result<VerificationReport, HarnessError>
    where
        B: RegisterBus + ?Sized,
    {
        self.enter(Phase::Verifying);
        let expected = scenario.expected();
        let mut checks = Vec::with_capacity(CHECK_ORDER.len());

        for field in CHECK_ORDER {
            let actual = match driver::read_field(bus, field) {
                Ok(value) => value,
                Err(err) => {
                    error!(seed = ?scenario.seed, %field, %err, "bus failure during readback");
                    self.enter(Phase::Failed);
                    return Err(err.into());
                }
            };
            let check = FieldCheck {
                field,
                expected: expected.get(field),
                actual,
            };
            trace!(%field, expected = check.expected, actual, passed = check.passed(), "field check");
            checks.push(check);
        }

        let report = VerificationReport {
            scenario: *scenario,
            checks,
        };
        match VerificationFailure::from_report(report.clone()) {
            None => {
                self.enter(Phase::Passed);
                info!(seed = ?scenario.seed, "all fields match");
                Ok(report)
            }
            Some(failure) => {
                error!(seed = ?scenario.seed, "{failure}");
                self.enter(Phase::Failed);
                Err(Box::new(failure).into())
            }
        }
    }

    fn enter(&mut self, next: Phase) {
        debug!(from = %self.phase, to = %next, "harness phase");
        self.phase = next;
    }
}

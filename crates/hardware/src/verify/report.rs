//! Verification results.

use std::fmt;

use serde::Serialize;

use super::scenario::Scenario;
use crate::common::FieldMismatch;
use crate::regmap::{Field, FieldValues};

/// Outcome of comparing one decoded field with its expected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldCheck {
    /// Field compared.
    pub field: Field,
    /// Expected value.
    pub expected: u32,
    /// Decoded value.
    pub actual: u32,
}

impl FieldCheck {
    /// Returns `true` if the decoded value matches.
    pub const fn passed(&self) -> bool {
        self.expected == self.actual
    }

    /// Returns the mismatch, if any.
    pub const fn mismatch(&self) -> Option<FieldMismatch> {
        if self.passed() {
            None
        } else {
            Some(FieldMismatch {
                field: self.field,
                expected: self.expected,
                actual: self.actual,
            })
        }
    }
}

/// Every field comparison made by one run, with the scenario that drove it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    /// Scenario that was applied.
    pub scenario: Scenario,
    /// One entry per field, in the order the reads were issued.
    pub checks: Vec<FieldCheck>,
}

impl VerificationReport {
    /// Returns `true` if every field matched.
    pub fn passed(&self) -> bool {
        self.checks.iter().all(FieldCheck::passed)
    }

    /// Returns every field that disagreed.
    pub fn mismatches(&self) -> Vec<FieldMismatch> {
        self.checks.iter().filter_map(FieldCheck::mismatch).collect()
    }

    /// Returns the decoded values.
    pub fn observed(&self) -> FieldValues {
        let mut values = FieldValues::default();
        for check in &self.checks {
            values.set(check.field, check.actual);
        }
        values
    }

    /// Returns the check for `field`, if it was read.
    pub fn check(&self, field: Field) -> Option<&FieldCheck> {
        self.checks.iter().find(|c| c.field == field)
    }
}

impl fmt::Display for VerificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scenario.seed {
            Some(seed) => writeln!(f, "seed {seed}")?,
            None => writeln!(f, "seed fixed")?,
        }
        writeln!(f, "{:<20} {:>12} {:>12}", "field", "expected", "actual")?;
        for check in &self.checks {
            writeln!(
                f,
                "{:<20} {:>#12x} {:>#12x}{}",
                check.field.name(),
                check.expected,
                check.actual,
                if check.passed() { "" } else { "  MISMATCH" }
            )?;
        }
        Ok(())
    }
}

/// A completed run in which at least one field disagreed.
///
/// Carries the full report so the run can be reproduced from its seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationFailure {
    /// Complete report, including fields that matched.
    pub report: VerificationReport,
    /// Fields that disagreed, in read order.
    pub mismatches: Vec<FieldMismatch>,
}

impl VerificationFailure {
    /// Builds a failure from a report; `None` if the report passed.
    pub fn from_report(report: VerificationReport) -> Option<Self> {
        let mismatches = report.mismatches();
        if mismatches.is_empty() {
            None
        } else {
            Some(Self { report, mismatches })
        }
    }

    /// Seed of the failing scenario; `None` if it was built with [`Scenario::fixed`].
    pub const fn seed(&self) -> Option<u64> {
        self.report.scenario.seed
    }
}

impl fmt::Display for VerificationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "verification failed: {} mismatched field(s)",
            self.mismatches.len()
        )?;
        for mismatch in &self.mismatches {
            writeln!(f, "  {mismatch}")?;
        }
        write!(f, "{}", self.report.to_string().trim_end())
    }
}

impl std::error::Error for VerificationFailure {}

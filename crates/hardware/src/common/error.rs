//! Error taxonomy for register decode and verification.
//!
//! This module defines every failure the crate can report. It provides:
//! 1. **Bus Errors:** Opaque transaction failures from the register bus.
//! 2. **Configuration Defects:** Static inconsistencies in the register map table.
//! 3. **Verification Failures:** Field mismatches between decoded and expected values.
//! 4. **Harness Errors:** The top-level error a verification run surfaces to its caller.

use thiserror::Error;

use crate::config::ConfigError;
use crate::regmap::Field;
use crate::verify::VerificationFailure;

/// Failure of a single register bus transaction.
///
/// These errors originate below the decoder and are never interpreted by it;
/// they abort the current run without producing a field verdict.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum BusError {
    /// The requested offset is not aligned to the 32-bit bus word.
    #[error("misaligned register access at offset {offset:#x}")]
    Misaligned {
        /// Offending byte offset.
        offset: u64,
    },

    /// No device decodes the requested address.
    #[error("address {addr:#x} is outside the device window [{base:#x}, {base:#x}+{size:#x})")]
    OutOfRange {
        /// Requested address.
        addr: u64,
        /// Base of the device window.
        base: u64,
        /// Size of the device window in bytes.
        size: u64,
    },

    /// The transaction was issued while the peripheral was held in reset.
    #[error("register read at offset {offset:#x} issued while reset is asserted")]
    InReset {
        /// Requested offset.
        offset: u64,
    },

    /// The completer never signalled ready.
    #[error("bus transaction at offset {offset:#x} timed out after {cycles} cycles")]
    Timeout {
        /// Requested offset.
        offset: u64,
        /// Cycles waited before giving up.
        cycles: u64,
    },
}

/// Static defect in a register map table.
///
/// A defective table is a build problem, not a runtime fault: the shipped map is
/// checked by a `const` assertion and every variant is covered by unit tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConfigurationDefect {
    /// The field's mask selects no bits.
    #[error("{field}: mask is empty")]
    EmptyMask {
        /// Field with the defect.
        field: Field,
    },

    /// The field's mask is not a single run of set bits.
    #[error("{field}: mask {mask:#010x} is not contiguous")]
    NonContiguousMask {
        /// Field with the defect.
        field: Field,
        /// Offending mask.
        mask: u32,
    },

    /// The shift does not equal the position of the mask's lowest set bit.
    #[error("{field}: shift {shift} does not match mask lowest bit {expected}")]
    ShiftMismatch {
        /// Field with the defect.
        field: Field,
        /// Shift found in the table.
        shift: u32,
        /// Lowest set bit of the mask.
        expected: u32,
    },

    /// Two fields of the same register claim the same bits.
    #[error("{first} and {second} overlap in bits {overlap:#010x}")]
    OverlappingMasks {
        /// Earlier field in table order.
        first: Field,
        /// Later field in table order.
        second: Field,
        /// Bits claimed by both.
        overlap: u32,
    },

    /// Two distinct registers are mapped at the same offset.
    #[error("registers {first} and {second} alias offset {offset:#x}")]
    AliasedOffset {
        /// Earlier register name.
        first: &'static str,
        /// Later register name.
        second: &'static str,
        /// Shared offset.
        offset: u64,
    },

    /// A register offset is not 32-bit aligned.
    #[error("register {register} at offset {offset:#x} is not word aligned")]
    MisalignedOffset {
        /// Register name.
        register: &'static str,
        /// Offending offset.
        offset: u64,
    },
}

/// A decoded field that disagrees with the scenario's expected value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("{field} should have been {expected:#04x} but was {actual:#04x}")]
pub struct FieldMismatch {
    /// Field that disagreed.
    pub field: Field,
    /// Value injected into (or built into) the hardware.
    pub expected: u32,
    /// Value decoded from the register read.
    pub actual: u32,
}

/// Top-level failure of a verification run.
///
/// Nothing is retried: the first bus error aborts the run, and a completed run
/// with any mismatch is reported as [`HarnessError::Verification`].
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The register bus failed before a verdict could be reached.
    #[error("bus failure: {0}")]
    Bus(#[from] BusError),

    /// Every field was read, and at least one disagreed.
    #[error(transparent)]
    Verification(#[from] Box<VerificationFailure>),

    /// The harness configuration was rejected.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

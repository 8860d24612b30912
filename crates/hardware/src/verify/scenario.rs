//! Verification scenarios.
//!
//! A scenario is the set of values one run expects to read back: the board
//! straps it drives (drawn at random within their declared widths) and the
//! version parameters the design was built with. It is fully determined by
//! the configuration and the seed.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use super::rng::Xorshift64;
use crate::config::{HardwareParams, HarnessConfig};
use crate::regmap::FieldValues;

/// Expected values for one reset→read→compare cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Scenario {
    /// Seed the board values were drawn from; `None` for a fixed scenario.
    pub seed: Option<u64>,
    /// Value driven onto `board_type`.
    pub board_type: u32,
    /// Value driven onto `board_rev`.
    pub board_rev: u32,
    /// Expected FPGA major version.
    pub fpga_version_major: u32,
    /// Expected FPGA minor version.
    pub fpga_version_minor: u32,
    /// Expected FPGA build number.
    pub fpga_build: u32,
}

impl Scenario {
    /// Draws a scenario from `seed`.
    ///
    /// `board_type` and `board_rev` are drawn independently, each bounded by its
    /// declared port width. Version fields come from `config.params` unchanged.
    pub fn generate(config: &HarnessConfig, seed: u64) -> Self {
        let mut rng = Xorshift64::new(seed);
        let board_type = rng.next_bits(config.widths.board_type);
        let board_rev = rng.next_bits(config.widths.board_rev);
        Self::with_seed(Some(seed), config.params, board_type, board_rev)
    }

    /// Builds a scenario with explicit board values and no randomization.
    ///
    /// It carries no seed: no call to [`Scenario::generate`] reproduces it.
    pub const fn fixed(params: HardwareParams, board_type: u32, board_rev: u32) -> Self {
        Self::with_seed(None, params, board_type, board_rev)
    }

    const fn with_seed(seed: Option<u64>, params: HardwareParams, board_type: u32, board_rev: u32) -> Self {
        Self {
            seed,
            board_type,
            board_rev,
            fpga_version_major: params.ver_maj,
            fpga_version_minor: params.ver_min,
            fpga_build: params.ver_build,
        }
    }

    /// Values each field is expected to decode to.
    pub const fn expected(&self) -> FieldValues {
        FieldValues {
            fpga_version_major: self.fpga_version_major,
            fpga_version_minor: self.fpga_version_minor,
            fpga_build: self.fpga_build,
            board_type: self.board_type,
            board_rev: self.board_rev,
        }
    }
}

/// Returns the configured seed, or draws one from the system clock.
pub fn resolve_seed(config: &HarnessConfig) -> u64 {
    config.seed.unwrap_or_else(entropy_seed)
}

/// Draws a seed from the system clock.
pub fn entropy_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos() as u64)
}

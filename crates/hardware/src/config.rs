//! Configuration for the verification harness and the behavioral hardware model.
//!
//! This module defines everything a run is parameterized by. It provides:
//! 1. **Defaults:** Reference timing (10 ns clock, 10-cycle reset hold and settle) and parameter values.
//! 2. **Structures:** Build-time hardware parameters, declared port widths, and timing.
//! 3. **Sources:** JSON documents, `PARAM_*` environment variables, or `HarnessConfig::default()`.
//! 4. **Validation:** Declared widths and version parameters must fit their register fields;
//!    timing values must stay within what a run can simulate.
//!
//! Environment keys follow the HDL parameter names (`PARAM_C_VER_MAJ`, ...). An absent key
//! keeps the current value; a present but unparsable one is an error.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::regmap::Field;
use crate::verify::rng::Xorshift64;

/// Default configuration constants.
///
/// These mirror the reference test environment when nothing is overridden.
mod defaults {
    /// Clock period of the peripheral bus clock in nanoseconds.
    pub const CLOCK_PERIOD_NS: u64 = 10;

    /// Clock periods reset is held active before release.
    pub const RESET_HOLD_CYCLES: u64 = 10;

    /// Clock periods waited after reset release before the first read.
    pub const SETTLE_CYCLES: u64 = 10;

    /// Cycles per bus read (APB setup phase + access phase).
    pub const BUS_LATENCY: u64 = 2;

    /// Base address of the System Version block on the bus.
    pub const BASE_ADDR: u64 = 0x0000_0000;

    /// Declared width of the `board_type` input port.
    pub const BOARD_TYPE_WIDTH: u32 = 4;

    /// Declared width of the `board_rev` input port.
    pub const BOARD_REV_WIDTH: u32 = 4;

    /// FPGA version parameters default to zero when not supplied.
    pub const VERSION: u32 = 0;

    /// Upper bound on any cycle count (reset hold, settle, bus latency).
    pub const MAX_CYCLES: u64 = 1_000_000;

    /// Upper bound on the clock period (1 ms).
    pub const MAX_CLOCK_PERIOD_NS: u64 = 1_000_000;
}

/// Environment variable names read by [`HarnessConfig::from_env`].
pub mod env_keys {
    /// FPGA major version parameter.
    pub const VER_MAJ: &str = "PARAM_C_VER_MAJ";
    /// FPGA minor version parameter.
    pub const VER_MIN: &str = "PARAM_C_VER_MIN";
    /// FPGA build number parameter.
    pub const VER_BUILD: &str = "PARAM_C_VER_BUILD";
    /// Declared width of the board type port.
    pub const BOARD_TYPE_WIDTH: &str = "PARAM_C_BOARD_TYPE_WIDTH";
    /// Declared width of the board revision port.
    pub const BOARD_REV_WIDTH: &str = "PARAM_C_BOARD_REV_WIDTH";
    /// Scenario seed.
    pub const SEED: &str = "RANDOM_SEED";
}

/// Errors produced while building or validating a [`HarnessConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment value could not be parsed as an unsigned integer.
    #[error("{key}={value:?} is not a valid unsigned integer")]
    InvalidValue {
        /// Variable name.
        key: String,
        /// Raw value.
        value: String,
    },

    /// A declared port width is wider than the register field it lands in.
    #[error("declared width {width} for {field} exceeds its {max}-bit register field")]
    WidthTooWide {
        /// Field the port feeds.
        field: Field,
        /// Declared width.
        width: u32,
        /// Field width in the register map.
        max: u32,
    },

    /// A build-time parameter does not fit its register field.
    #[error("{field} parameter {value:#x} exceeds field maximum {max:#x}")]
    ValueTooWide {
        /// Field the parameter is reported through.
        field: Field,
        /// Supplied value.
        value: u32,
        /// Largest value the field holds.
        max: u32,
    },

    /// A timing value is outside the range a run can simulate.
    #[error("timing value {name}={value} is outside {min}..={max}")]
    TimingOutOfRange {
        /// Timing key.
        name: &'static str,
        /// Supplied value.
        value: u64,
        /// Smallest accepted value.
        min: u64,
        /// Largest accepted value.
        max: u64,
    },

    /// The JSON document was malformed.
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A configuration file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
}

/// Root configuration for one or more verification runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HarnessConfig {
    /// Build-time parameters of the hardware under test.
    #[serde(default)]
    pub params: HardwareParams,

    /// Declared widths of the board strap inputs.
    #[serde(default)]
    pub widths: DeclaredWidths,

    /// Reset sequencing and bus timing.
    #[serde(default)]
    pub timing: TimingConfig,

    /// Scenario seed; `None` draws one from the clock at run time.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl HarnessConfig {
    /// Builds a configuration from the process environment over the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup over the defaults.
    ///
    /// # Arguments
    ///
    /// * `lookup` - Returns the value for a key, or `None` if it is not set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::default().with_overrides(lookup)
    }

    /// Applies environment-style overrides on top of this configuration and validates it.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup_u32(&lookup, env_keys::VER_MAJ)? {
            self.params.ver_maj = v;
        }
        if let Some(v) = lookup_u32(&lookup, env_keys::VER_MIN)? {
            self.params.ver_min = v;
        }
        if let Some(v) = lookup_u32(&lookup, env_keys::VER_BUILD)? {
            self.params.ver_build = v;
        }
        if let Some(v) = lookup_u32(&lookup, env_keys::BOARD_TYPE_WIDTH)? {
            self.widths.board_type = v;
        }
        if let Some(v) = lookup_u32(&lookup, env_keys::BOARD_REV_WIDTH)? {
            self.widths.board_rev = v;
        }
        if let Some(raw) = lookup(env_keys::SEED) {
            self.seed = Some(parse_u64(env_keys::SEED, &raw)?);
        }
        self.validate()?;
        Ok(self)
    }

    /// Parses and validates a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Checks that every parameter fits the register field it is reported through.
    ///
    /// Declared widths only bound the randomizer; they never alter a decode mask, so a
    /// width wider than its field can not be honored and is rejected.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for field in Field::ALL {
            let Some(width) = self.widths.for_field(field) else {
                continue;
            };
            let max = field.spec().width();
            if width > max {
                return Err(ConfigError::WidthTooWide { field, width, max });
            }
        }
        for (field, value) in [
            (Field::FpgaVersionMajor, self.params.ver_maj),
            (Field::FpgaVersionMinor, self.params.ver_min),
            (Field::FpgaBuild, self.params.ver_build),
        ] {
            let max = field.spec().max_value();
            if value > max {
                return Err(ConfigError::ValueTooWide { field, value, max });
            }
        }
        self.timing.validate()
    }

    /// Returns the `PARAM_*` environment that reproduces this configuration.
    pub fn to_env_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            (env_keys::VER_MAJ, self.params.ver_maj.to_string()),
            (env_keys::VER_MIN, self.params.ver_min.to_string()),
            (env_keys::VER_BUILD, self.params.ver_build.to_string()),
            (env_keys::BOARD_TYPE_WIDTH, self.widths.board_type.to_string()),
            (env_keys::BOARD_REV_WIDTH, self.widths.board_rev.to_string()),
        ];
        if let Some(seed) = self.seed {
            pairs.push((env_keys::SEED, seed.to_string()));
        }
        pairs
    }
}

/// Build-time parameters elaborated into the hardware.
///
/// These are fixed when the design is built; the harness reads them back but never changes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct HardwareParams {
    /// FPGA major version (`C_VER_MAJ`).
    #[serde(default = "HardwareParams::default_version")]
    pub ver_maj: u32,

    /// FPGA minor version (`C_VER_MIN`).
    #[serde(default = "HardwareParams::default_version")]
    pub ver_min: u32,

    /// FPGA build number (`C_VER_BUILD`).
    #[serde(default = "HardwareParams::default_version")]
    pub ver_build: u32,
}

impl HardwareParams {
    const fn default_version() -> u32 {
        defaults::VERSION
    }

    /// Draws parameters the way a parametrized build would: major and minor over
    /// their full 8-bit fields, build over the full 32-bit word.
    pub fn randomized(seed: u64) -> Self {
        let mut rng = Xorshift64::new(seed);
        Self {
            ver_maj: rng.next_in_range(Field::FpgaVersionMajor.spec().max_value()),
            ver_min: rng.next_in_range(Field::FpgaVersionMinor.spec().max_value()),
            ver_build: rng.next_in_range(Field::FpgaBuild.spec().max_value()),
        }
    }
}

impl Default for HardwareParams {
    fn default() -> Self {
        Self {
            ver_maj: defaults::VERSION,
            ver_min: defaults::VERSION,
            ver_build: defaults::VERSION,
        }
    }
}

/// Declared bit-widths of the board strap input ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DeclaredWidths {
    /// Width of `board_type` (`C_BOARD_TYPE_WIDTH`).
    #[serde(default = "DeclaredWidths::default_board_type")]
    pub board_type: u32,

    /// Width of `board_rev` (`C_BOARD_REV_WIDTH`).
    #[serde(default = "DeclaredWidths::default_board_rev")]
    pub board_rev: u32,
}

impl DeclaredWidths {
    const fn default_board_type() -> u32 {
        defaults::BOARD_TYPE_WIDTH
    }

    const fn default_board_rev() -> u32 {
        defaults::BOARD_REV_WIDTH
    }

    /// Returns the declared width of the port feeding `field`, if it is a strap input.
    pub const fn for_field(&self, field: Field) -> Option<u32> {
        match field {
            Field::BoardType => Some(self.board_type),
            Field::BoardRev => Some(self.board_rev),
            _ => None,
        }
    }
}

impl Default for DeclaredWidths {
    fn default() -> Self {
        Self {
            board_type: defaults::BOARD_TYPE_WIDTH,
            board_rev: defaults::BOARD_REV_WIDTH,
        }
    }
}

/// Reset sequencing and bus timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TimingConfig {
    /// Bus clock period in nanoseconds.
    #[serde(default = "TimingConfig::default_clock_period_ns")]
    pub clock_period_ns: u64,

    /// Clock periods reset is held active.
    #[serde(default = "TimingConfig::default_reset_hold_cycles")]
    pub reset_hold_cycles: u64,

    /// Clock periods waited after reset release.
    #[serde(default = "TimingConfig::default_settle_cycles")]
    pub settle_cycles: u64,

    /// Cycles consumed by one bus read.
    #[serde(default = "TimingConfig::default_bus_latency")]
    pub bus_latency: u64,

    /// Base address of the block on the bus.
    #[serde(default = "TimingConfig::default_base_addr")]
    pub base_addr: u64,
}

impl TimingConfig {
    const fn default_clock_period_ns() -> u64 {
        defaults::CLOCK_PERIOD_NS
    }

    const fn default_reset_hold_cycles() -> u64 {
        defaults::RESET_HOLD_CYCLES
    }

    const fn default_settle_cycles() -> u64 {
        defaults::SETTLE_CYCLES
    }

    const fn default_bus_latency() -> u64 {
        defaults::BUS_LATENCY
    }

    const fn default_base_addr() -> u64 {
        defaults::BASE_ADDR
    }

    /// Checks that the clock period is non-zero and every duration is bounded.
    ///
    /// Cycle counts are simulated edge by edge, so an unbounded value would never finish.
    /// Reset hold and settle may be zero; the clock period may not.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.clock_period_ns == 0 || self.clock_period_ns > defaults::MAX_CLOCK_PERIOD_NS {
            return Err(ConfigError::TimingOutOfRange {
                name: "clock_period_ns",
                value: self.clock_period_ns,
                min: 1,
                max: defaults::MAX_CLOCK_PERIOD_NS,
            });
        }
        for (name, value) in [
            ("reset_hold_cycles", self.reset_hold_cycles),
            ("settle_cycles", self.settle_cycles),
            ("bus_latency", self.bus_latency),
        ] {
            if value > defaults::MAX_CYCLES {
                return Err(ConfigError::TimingOutOfRange {
                    name,
                    value,
                    min: 0,
                    max: defaults::MAX_CYCLES,
                });
            }
        }
        Ok(())
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            clock_period_ns: defaults::CLOCK_PERIOD_NS,
            reset_hold_cycles: defaults::RESET_HOLD_CYCLES,
            settle_cycles: defaults::SETTLE_CYCLES,
            bus_latency: defaults::BUS_LATENCY,
            base_addr: defaults::BASE_ADDR,
        }
    }
}

/// Parses a decimal or `0x`-prefixed hexadecimal unsigned integer.
pub fn parse_u64(key: &str, raw: &str) -> Result<u64, ConfigError> {
    let trimmed = raw.trim();
    let parsed = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(&hex.replace('_', ""), 16),
        None => trimmed.replace('_', "").parse::<u64>(),
    };
    parsed.map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: raw.to_string(),
    })
}

fn lookup_u32<F>(lookup: &F, key: &str) -> Result<Option<u32>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let value = parse_u64(key, &raw)?;
    u32::try_from(value)
        .map(Some)
        .map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
        })
}

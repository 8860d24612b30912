//! Register-mapped device models.
//!
//! This module contains behavioral models of peripherals that answer register
//! reads on the bus. They stand in for the HDL design when the harness runs
//! inside `cargo test` or from the command line.

/// System Version identification block.
pub mod system_version;

pub use system_version::SystemVersion;

pub use crate::soc::traits::Device;

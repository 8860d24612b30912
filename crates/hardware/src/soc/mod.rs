//! Behavioral hardware for the verification harness.
//!
//! This module organizes the components that stand in for the design under
//! test: the register-mapped device model, the APB-style bus that completes
//! transactions against it, and the testbench that wires both to the harness.

/// Testbench assembly: device + bus behind the harness-facing traits.
pub mod builder;

/// Register-mapped device models.
pub mod devices;

/// Peripheral bus interconnect.
pub mod interconnect;

/// Device, bus-read, and hardware-control trait definitions.
pub mod traits;

pub use builder::Testbench;
pub use traits::{Device, HardwareControl, RegisterBus};

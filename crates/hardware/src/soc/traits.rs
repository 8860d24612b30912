//! Traits at the boundaries between the harness, the bus, and the hardware.
//!
//! This module defines:
//! 1. **`Device`:** A register-mapped peripheral attached to the bus (behavioral models).
//! 2. **`RegisterBus`:** The bus-read capability the decoder consumes.
//! 3. **`HardwareControl`:** The reset and strap-input surface the harness drives.
//!
//! The decoder and harness only see `RegisterBus` and `HardwareControl`, so they run
//! unchanged against the behavioral testbench, a mock, or a bridge to a real simulator.

use crate::common::{BusError, WORD_BYTES};

/// A register-mapped peripheral attached to the system bus.
///
/// Devices provide a name, an address window, 32-bit reads at device-relative
/// offsets, and a clock edge. Reset is level-sensitive and driven from outside.
pub trait Device: Send + Sync {
    /// Returns a short name for this device (e.g., `"SYSVER"`).
    fn name(&self) -> &str;
    /// Returns (base_address, size_in_bytes) of this device's register window.
    fn address_range(&self) -> (u64, u64);
    /// Reads one 32-bit register at the given device-relative offset.
    fn read_u32(&mut self, offset: u64) -> u32;

    /// Advances the device by one rising clock edge.
    fn tick(&mut self) {}
    /// Returns `true` while the device is held in reset and cannot complete transfers.
    fn in_reset(&self) -> bool {
        false
    }
}

/// Bus-read capability: read one 32-bit register and return its wire bytes.
///
/// A call blocks until the transaction completes. Bytes are returned in wire
/// order; callers assemble them least-significant first.
pub trait RegisterBus {
    /// Reads the register at `offset` (relative to the block base).
    fn read(&mut self, offset: u64) -> Result<[u8; WORD_BYTES], BusError>;
}

/// Control surface of the hardware under test.
pub trait HardwareControl {
    /// Drives the reset-active signal.
    fn set_reset_active(&mut self, active: bool);
    /// Drives the `board_type` strap input.
    fn set_board_type(&mut self, value: u32);
    /// Drives the `board_rev` strap input.
    fn set_board_rev(&mut self, value: u32);
    /// Lets `cycles` clock periods elapse.
    fn advance_cycles(&mut self, cycles: u64);
}

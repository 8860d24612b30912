//! Testbench construction and the top-level `Testbench` type.
//!
//! This module builds the design under test from configuration. It performs:
//! 1. **Device setup:** Elaborates a `SystemVersion` block with the configured parameters and port widths.
//! 2. **Bus setup:** Places it behind an `ApbBus` at the configured base address and latency.
//! 3. **Harness surface:** Implements `RegisterBus` and `HardwareControl` so the harness can drive it.

use crate::common::{BusError, WORD_BYTES};
use crate::config::HarnessConfig;
use crate::soc::devices::SystemVersion;
use crate::soc::interconnect::ApbBus;
use crate::soc::traits::{HardwareControl, RegisterBus};

/// Behavioral design under test: a System Version block on a peripheral bus.
#[derive(Debug)]
pub struct Testbench {
    /// Peripheral bus with the System Version block attached.
    pub bus: ApbBus<SystemVersion>,
    base_addr: u64,
    clock_period_ns: u64,
}

impl Testbench {
    /// Builds a testbench from configuration.
    ///
    /// The block is elaborated with `config.params` and `config.widths`; reset is
    /// not applied, so the registers read as zero until the harness runs its
    /// reset sequence.
    pub fn new(config: &HarnessConfig) -> Self {
        let base_addr = config.timing.base_addr;
        let device = SystemVersion::new(base_addr, config.params, config.widths);
        Self {
            bus: ApbBus::new(device, config.timing.bus_latency),
            base_addr,
            clock_period_ns: config.timing.clock_period_ns,
        }
    }

    /// Returns the System Version block.
    pub const fn device(&self) -> &SystemVersion {
        self.bus.device()
    }

    /// Clock edges elapsed since construction.
    pub const fn elapsed_cycles(&self) -> u64 {
        self.bus.cycles()
    }

    /// Simulated time since construction, in nanoseconds.
    pub const fn elapsed_ns(&self) -> u64 {
        self.bus.cycles().saturating_mul(self.clock_period_ns)
    }
}

impl RegisterBus for Testbench {
    fn read(&mut self, offset: u64) -> Result<[u8; WORD_BYTES], BusError> {
        self.bus.read_word(self.base_addr.wrapping_add(offset))
    }
}

impl HardwareControl for Testbench {
    fn set_reset_active(&mut self, active: bool) {
        self.bus.device_mut().set_reset_active(active);
    }

    fn set_board_type(&mut self, value: u32) {
        self.bus.device_mut().set_board_type(value);
    }

    fn set_board_rev(&mut self, value: u32) {
        self.bus.device_mut().set_board_rev(value);
    }

    fn advance_cycles(&mut self, cycles: u64) {
        self.bus.tick(cycles);
    }
}

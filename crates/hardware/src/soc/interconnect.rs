//! Peripheral bus interconnect.
//!
//! This module implements an APB-style completer-side bus in front of one device. It provides:
//! 1. **Address decode:** Alignment and window checks before a transfer starts.
//! 2. **Transfer timing:** Every read advances the device clock by the bus latency.
//! 3. **Wire order:** Read data is returned as little-endian bytes, as it crosses the bus.
//! 4. **Counters:** Completed reads, failed reads, and elapsed cycles.

use tracing::trace;

use super::devices::Device;
use crate::common::{BusError, WORD_BYTES};

/// Peripheral bus with a single attached device.
#[derive(Debug)]
pub struct ApbBus<D: Device> {
    device: D,
    /// Cycles per read transaction (setup + access phases).
    pub latency_cycles: u64,
    cycles: u64,
    reads: u64,
    errors: u64,
}

impl<D: Device> ApbBus<D> {
    /// Creates a new bus in front of `device`.
    ///
    /// # Arguments
    ///
    /// * `device` - The completer answering every transfer.
    /// * `latency_cycles` - Clock edges consumed by each read; at least one.
    pub fn new(device: D, latency_cycles: u64) -> Self {
        Self {
            device,
            latency_cycles: latency_cycles.max(1),
            cycles: 0,
            reads: 0,
            errors: 0,
        }
    }

    /// Returns the attached device.
    pub const fn device(&self) -> &D {
        &self.device
    }

    /// Returns the attached device for pin-level control.
    pub const fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// Advances the bus clock by `cycles` edges.
    pub fn tick(&mut self, cycles: u64) {
        for _ in 0..cycles {
            self.device.tick();
        }
        self.cycles += cycles;
    }

    /// Total clock edges elapsed on this bus.
    pub const fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Number of reads that completed.
    pub const fn reads(&self) -> u64 {
        self.reads
    }

    /// Number of reads that failed.
    pub const fn errors(&self) -> u64 {
        self.errors
    }

    /// Performs one 32-bit read at physical address `addr`.
    ///
    /// # Returns
    ///
    /// The register bytes in wire order, or the reason the transfer failed.
    pub fn read_word(&mut self, addr: u64) -> Result<[u8; WORD_BYTES], BusError> {
        let result = self.transfer(addr);
        match &result {
            Ok(bytes) => {
                self.reads += 1;
                trace!(addr, data = ?bytes, "bus read");
            }
            Err(err) => {
                self.errors += 1;
                trace!(addr, %err, "bus read failed");
            }
        }
        result
    }

    fn transfer(&mut self, addr: u64) -> Result<[u8; WORD_BYTES], BusError> {
        let (base, size) = self.device.address_range();
        if addr < base || addr - base >= size {
            return Err(BusError::OutOfRange { addr, base, size });
        }
        let offset = addr - base;
        if offset % WORD_BYTES as u64 != 0 {
            return Err(BusError::Misaligned { offset });
        }
        if self.device.in_reset() {
            return Err(BusError::InReset { offset });
        }
        self.tick(self.latency_cycles);
        Ok(self.device.read_u32(offset).to_le_bytes())
    }
}

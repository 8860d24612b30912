//! System Version identification block.
//!
//! A read-only peripheral that reports the FPGA version and build number
//! elaborated into the design, and the board type and revision strapped onto
//! its input ports.
//!
//! # Registers
//!
//! * `0x00`: FPGA version (`[15:8]` major, `[7:0]` minor)
//! * `0x04`: FPGA build number
//! * `0x08`: Board version (`[31:16]` type, `[15:0]` revision)
//!
//! # Reset behavior
//!
//! The strap inputs are sampled while reset is active and frozen when it is
//! released; later changes on the pins are not seen. The register file loads on
//! the first clock edge after release and reads as zero until then.

use crate::config::{DeclaredWidths, HardwareParams};
use crate::regmap::{BOARD_VERSION, FPGA_BUILD, FPGA_VERSION, Field};
use crate::soc::devices::Device;
use crate::verify::rng::width_mask;

/// Size of the register window in bytes.
pub const SYSVER_WINDOW: u64 = 0x1000;

/// System Version device structure.
#[derive(Debug, Clone)]
pub struct SystemVersion {
    /// Base physical address of the device.
    base_addr: u64,
    /// Build-time version parameters.
    params: HardwareParams,
    /// Declared widths of the strap ports.
    widths: DeclaredWidths,
    /// Levels currently driven onto the strap ports.
    board_type_pin: u32,
    board_rev_pin: u32,
    /// Strap values captured during reset.
    latched_board_type: u32,
    latched_board_rev: u32,
    reset_active: bool,
    /// Set once a reset has been applied; the register file never loads before that.
    armed: bool,
    /// Output registers, indexed by offset / 4.
    regs: [u32; 3],
    loaded: bool,
}

impl SystemVersion {
    /// Creates a new System Version block in its power-on state.
    ///
    /// # Arguments
    ///
    /// * `base_addr` - The base physical address.
    /// * `params` - Version parameters elaborated into the design.
    /// * `widths` - Declared widths of the `board_type` and `board_rev` ports.
    pub const fn new(base_addr: u64, params: HardwareParams, widths: DeclaredWidths) -> Self {
        Self {
            base_addr,
            params,
            widths,
            board_type_pin: 0,
            board_rev_pin: 0,
            latched_board_type: 0,
            latched_board_rev: 0,
            reset_active: false,
            armed: false,
            regs: [0; 3],
            loaded: false,
        }
    }

    /// Drives the reset-active level.
    ///
    /// Asserting reset clears the register file and makes the strap latches
    /// transparent; releasing it freezes them.
    pub const fn set_reset_active(&mut self, active: bool) {
        self.reset_active = active;
        if active {
            self.armed = true;
            self.loaded = false;
            self.regs = [0; 3];
            self.sample_straps();
        }
    }

    /// Drives the `board_type` port; bits beyond its declared width are not connected.
    pub const fn set_board_type(&mut self, value: u32) {
        self.board_type_pin = value & width_mask(self.widths.board_type);
        if self.reset_active {
            self.sample_straps();
        }
    }

    /// Drives the `board_rev` port; bits beyond its declared width are not connected.
    pub const fn set_board_rev(&mut self, value: u32) {
        self.board_rev_pin = value & width_mask(self.widths.board_rev);
        if self.reset_active {
            self.sample_straps();
        }
    }

    /// Returns `true` once the register file holds valid data.
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Returns the build-time parameters of this instance.
    pub const fn params(&self) -> HardwareParams {
        self.params
    }

    const fn sample_straps(&mut self) {
        self.latched_board_type = self.board_type_pin;
        self.latched_board_rev = self.board_rev_pin;
    }

    const fn load_registers(&mut self) {
        let version = Field::FpgaVersionMajor.spec().encode(self.params.ver_maj)
            | Field::FpgaVersionMinor.spec().encode(self.params.ver_min);
        let build = Field::FpgaBuild.spec().encode(self.params.ver_build);
        let board = Field::BoardType.spec().encode(self.latched_board_type)
            | Field::BoardRev.spec().encode(self.latched_board_rev);
        self.regs = [version, build, board];
        self.loaded = true;
    }
}

impl Device for SystemVersion {
    /// Returns the device name.
    fn name(&self) -> &str {
        "SYSVER"
    }

    /// Returns the address range (Base, Size).
    fn address_range(&self) -> (u64, u64) {
        (self.base_addr, SYSVER_WINDOW)
    }

    /// Reads a word (32-bit) from the device; unmapped offsets read as zero.
    fn read_u32(&mut self, offset: u64) -> u32 {
        match offset {
            o if o == FPGA_VERSION.offset => self.regs[0],
            o if o == FPGA_BUILD.offset => self.regs[1],
            o if o == BOARD_VERSION.offset => self.regs[2],
            _ => 0,
        }
    }

    /// Loads the register file on the first edge after reset release.
    fn tick(&mut self) {
        if self.armed && !self.reset_active && !self.loaded {
            self.load_registers();
        }
    }

    fn in_reset(&self) -> bool {
        self.reset_active
    }
}

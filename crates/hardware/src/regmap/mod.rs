//! System Version register map and field decoder.
//!
//! This module is the single source of truth for the register layout shared by
//! software and hardware. It provides:
//! 1. **Registers:** The three word-aligned registers of the block.
//! 2. **Fields:** The five logical fields and the mask/shift that select them.
//! 3. **Decoding:** `decode_field`, a pure `(raw & mask) >> shift`.
//! 4. **Validation:** Table checks that reject overlapping or malformed entries.
//!
//! # Memory Map
//!
//! * `0x00`: FPGA version (`[15:8]` major, `[7:0]` minor, `[31:16]` reserved)
//! * `0x04`: FPGA build number (`[31:0]`)
//! * `0x08`: Board version (`[31:16]` board type, `[15:0]` board revision)

use serde::Serialize;
use std::fmt;

use crate::common::WORD_BYTES;

/// Register map table checks.
pub mod validate;

pub use validate::validate_register_map;

/// A named, word-aligned register in the block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Register {
    /// Mnemonic used in reports.
    pub name: &'static str,
    /// Byte offset from the block base.
    pub offset: u64,
}

/// FPGA version register.
pub const FPGA_VERSION: Register = Register {
    name: "FPGA_VERSION",
    offset: 0x0,
};

/// FPGA build number register.
pub const FPGA_BUILD: Register = Register {
    name: "FPGA_BUILD",
    offset: 0x4,
};

/// Board version register.
pub const BOARD_VERSION: Register = Register {
    name: "BOARD_VERSION",
    offset: 0x8,
};

/// All registers in offset order.
pub const REGISTERS: [Register; 3] = [FPGA_VERSION, FPGA_BUILD, BOARD_VERSION];

/// Logical fields of the System Version block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// FPGA version, major number.
    FpgaVersionMajor,
    /// FPGA version, minor number.
    FpgaVersionMinor,
    /// FPGA build number.
    FpgaBuild,
    /// Board type strapped into the design.
    BoardType,
    /// Board revision strapped into the design.
    BoardRev,
}

impl Field {
    /// Every field, in register map order.
    pub const ALL: [Self; 5] = [
        Self::FpgaVersionMajor,
        Self::FpgaVersionMinor,
        Self::FpgaBuild,
        Self::BoardType,
        Self::BoardRev,
    ];

    /// Returns this field's register map entry.
    #[inline]
    pub const fn spec(self) -> FieldSpec {
        REGISTER_MAP[self as usize]
    }

    /// Returns the field name used in reports.
    pub const fn name(self) -> &'static str {
        match self {
            Self::FpgaVersionMajor => "fpga_version_major",
            Self::FpgaVersionMinor => "fpga_version_minor",
            Self::FpgaBuild => "fpga_build",
            Self::BoardType => "board_type",
            Self::BoardRev => "board_rev",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One register map entry: which bits of which register hold a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field described by this entry.
    pub field: Field,
    /// Register holding the field.
    pub register: Register,
    /// Bits of the assembled word that belong to the field.
    pub mask: u32,
    /// Right-shift that moves the field down to bit 0.
    pub shift: u32,
}

impl FieldSpec {
    /// Extracts this field from an assembled register word.
    #[inline]
    pub const fn decode(&self, raw: u32) -> u32 {
        decode_field(raw, self.mask, self.shift)
    }

    /// Places `value` into this field's bits; bits beyond the field are dropped.
    #[inline]
    pub const fn encode(&self, value: u32) -> u32 {
        value.wrapping_shl(self.shift) & self.mask
    }

    /// Byte offset of the register holding this field.
    #[inline]
    pub const fn offset(&self) -> u64 {
        self.register.offset
    }

    /// Width of the field in bits.
    #[inline]
    pub const fn width(&self) -> u32 {
        self.mask.count_ones()
    }

    /// Largest value the field can hold.
    #[inline]
    pub const fn max_value(&self) -> u32 {
        self.mask >> self.shift
    }
}

/// The register map, indexed by `Field as usize`.
pub const REGISTER_MAP: [FieldSpec; 5] = [
    FieldSpec {
        field: Field::FpgaVersionMajor,
        register: FPGA_VERSION,
        mask: 0x0000_FF00,
        shift: 8,
    },
    FieldSpec {
        field: Field::FpgaVersionMinor,
        register: FPGA_VERSION,
        mask: 0x0000_00FF,
        shift: 0,
    },
    FieldSpec {
        field: Field::FpgaBuild,
        register: FPGA_BUILD,
        mask: 0xFFFF_FFFF,
        shift: 0,
    },
    FieldSpec {
        field: Field::BoardType,
        register: BOARD_VERSION,
        mask: 0xFFFF_0000,
        shift: 16,
    },
    FieldSpec {
        field: Field::BoardRev,
        register: BOARD_VERSION,
        mask: 0x0000_FFFF,
        shift: 0,
    },
];

const _: () = assert!(
    validate_register_map(&REGISTER_MAP).is_ok(),
    "REGISTER_MAP is malformed"
);

const _: () = {
    let mut i = 0;
    while i < REGISTER_MAP.len() {
        assert!(
            REGISTER_MAP[i].field as usize == i,
            "REGISTER_MAP is out of Field order"
        );
        i += 1;
    }
};

/// Extracts a field from a register word: `(raw & mask) >> shift`.
///
/// `mask` must be one contiguous run of set bits and `shift` the index of its
/// lowest bit. That precondition belongs to the table, so it is not checked here.
#[inline]
pub const fn decode_field(raw: u32, mask: u32, shift: u32) -> u32 {
    (raw & mask) >> shift
}

/// Assembles a register word from the bytes of one bus read, least-significant first.
///
/// Every read path goes through here, via [`RawRegister`](crate::common::RawRegister).
#[inline]
pub const fn assemble_word(bytes: [u8; WORD_BYTES]) -> u32 {
    u32::from_le_bytes(bytes)
}

/// The five field values of the block, as expected or as decoded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FieldValues {
    /// FPGA major version.
    pub fpga_version_major: u32,
    /// FPGA minor version.
    pub fpga_version_minor: u32,
    /// FPGA build number.
    pub fpga_build: u32,
    /// Board type.
    pub board_type: u32,
    /// Board revision.
    pub board_rev: u32,
}

impl FieldValues {
    /// Returns the value held for `field`.
    pub const fn get(&self, field: Field) -> u32 {
        match field {
            Field::FpgaVersionMajor => self.fpga_version_major,
            Field::FpgaVersionMinor => self.fpga_version_minor,
            Field::FpgaBuild => self.fpga_build,
            Field::BoardType => self.board_type,
            Field::BoardRev => self.board_rev,
        }
    }

    /// Sets the value held for `field`.
    pub fn set(&mut self, field: Field, value: u32) {
        match field {
            Field::FpgaVersionMajor => self.fpga_version_major = value,
            Field::FpgaVersionMinor => self.fpga_version_minor = value,
            Field::FpgaBuild => self.fpga_build = value,
            Field::BoardType => self.board_type = value,
            Field::BoardRev => self.board_rev = value,
        }
    }
}

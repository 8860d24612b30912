//! # Register Map Layout Tests
//!
//! The shipped table must match the documented memory map bit for bit.

use rstest::rstest;
use sysver_core::regmap::*;

#[test]
fn test_shipped_map_validates() {
    assert_eq!(validate_register_map(&REGISTER_MAP), Ok(()));
}

#[test]
fn test_register_offsets() {
    assert_eq!(FPGA_VERSION.offset, 0x0);
    assert_eq!(FPGA_BUILD.offset, 0x4);
    assert_eq!(BOARD_VERSION.offset, 0x8);
    assert_eq!(REGISTERS, [FPGA_VERSION, FPGA_BUILD, BOARD_VERSION]);
}

#[rstest]
#[case(Field::FpgaVersionMajor, 0x0, 0x0000_FF00, 8, 8)]
#[case(Field::FpgaVersionMinor, 0x0, 0x0000_00FF, 0, 8)]
#[case(Field::FpgaBuild, 0x4, 0xFFFF_FFFF, 0, 32)]
#[case(Field::BoardType, 0x8, 0xFFFF_0000, 16, 16)]
#[case(Field::BoardRev, 0x8, 0x0000_FFFF, 0, 16)]
fn test_field_layout(
    #[case] field: Field,
    #[case] offset: u64,
    #[case] mask: u32,
    #[case] shift: u32,
    #[case] width: u32,
) {
    let spec = field.spec();
    assert_eq!(spec.field, field);
    assert_eq!(spec.offset(), offset);
    assert_eq!(spec.mask, mask);
    assert_eq!(spec.shift, shift);
    assert_eq!(spec.width(), width);
}

#[test]
fn test_table_is_indexed_by_field() {
    for (i, field) in Field::ALL.iter().enumerate() {
        assert_eq!(REGISTER_MAP[i].field, *field);
    }
}

#[test]
fn test_field_names() {
    let names: Vec<&str> = Field::ALL.iter().map(|f| f.name()).collect();
    assert_eq!(
        names,
        [
            "fpga_version_major",
            "fpga_version_minor",
            "fpga_build",
            "board_type",
            "board_rev"
        ]
    );
    assert_eq!(Field::BoardType.to_string(), "board_type");
}

#[test]
fn test_packed_registers_leave_reserved_bits() {
    let version_bits = Field::FpgaVersionMajor.spec().mask | Field::FpgaVersionMinor.spec().mask;
    assert_eq!(version_bits, 0x0000_FFFF);
    let board_bits = Field::BoardType.spec().mask | Field::BoardRev.spec().mask;
    assert_eq!(board_bits, 0xFFFF_FFFF);
}

#[test]
fn test_build_decode_is_identity() {
    let spec = Field::FpgaBuild.spec();
    for raw in [0, 1, 123456, 0x8000_0000, u32::MAX] {
        assert_eq!(spec.decode(raw), raw);
    }
}

#[test]
fn test_encode_places_value_in_field() {
    assert_eq!(Field::BoardType.spec().encode(0xB), 0x000B_0000);
    assert_eq!(Field::BoardRev.spec().encode(0x3), 0x0000_0003);
    assert_eq!(Field::FpgaVersionMajor.spec().encode(2), 0x0000_0200);
    assert_eq!(Field::FpgaVersionMajor.spec().encode(0x1FF), 0x0000_FF00);
}

#[test]
fn test_board_version_word_decodes_both_fields() {
    let raw = assemble_word([0x03, 0x00, 0x0B, 0x00]);
    assert_eq!(raw, 0x000B_0003);
    assert_eq!(Field::BoardType.spec().decode(raw), 0xB);
    assert_eq!(Field::BoardRev.spec().decode(raw), 0x3);
}

#[test]
fn test_field_values_get_set() {
    let mut values = FieldValues::default();
    for (i, field) in Field::ALL.into_iter().enumerate() {
        values.set(field, i as u32 + 10);
    }
    for (i, field) in Field::ALL.into_iter().enumerate() {
        assert_eq!(values.get(field), i as u32 + 10);
    }
    assert_eq!(values.fpga_build, 12);
    assert_eq!(values.board_rev, 14);
}

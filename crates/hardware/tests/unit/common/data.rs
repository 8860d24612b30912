//! # Raw Register Tests

use proptest::prelude::*;
use sysver_core::common::RawRegister;
use sysver_core::driver::read_register;
use sysver_core::regmap::{BOARD_VERSION, assemble_word};

use crate::common::mocks::bus::bus_with_words;

#[test]
fn test_assembles_least_significant_byte_first() {
    let raw = RawRegister::from_le_bytes([0x78, 0x56, 0x34, 0x12]);
    assert_eq!(raw.value(), 0x1234_5678);
}

#[test]
fn test_to_le_bytes_inverts_assembly() {
    let raw = RawRegister(0xDEAD_BEEF);
    assert_eq!(raw.to_le_bytes(), [0xEF, 0xBE, 0xAD, 0xDE]);
}

#[test]
fn test_from_byte_array() {
    let raw: RawRegister = [0x01, 0x00, 0x00, 0x80].into();
    assert_eq!(raw, RawRegister(0x8000_0001));
}

#[test]
fn test_display_is_zero_padded_hex() {
    assert_eq!(RawRegister(0xB_0003).to_string(), "0x000b0003");
}

#[test]
fn test_driver_read_uses_same_assembly() {
    let mut bus = bus_with_words([0, 0, 0x000B_0003]);
    let raw = read_register(&mut bus, BOARD_VERSION).unwrap();
    assert_eq!(raw.value(), assemble_word(0x000B_0003u32.to_le_bytes()));
}

proptest! {
    #[test]
    fn raw_register_matches_assemble_word(bytes in any::<[u8; 4]>()) {
        prop_assert_eq!(RawRegister::from_le_bytes(bytes).value(), assemble_word(bytes));
    }
}

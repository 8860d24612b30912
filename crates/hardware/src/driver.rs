//! Register-level driver for the System Version block.
//!
//! Each read operation performs exactly one bus read at its field's register
//! offset, assembles the word least-significant byte first, and decodes the
//! field with the register map's mask and shift. Bus errors are returned
//! unchanged.

use crate::common::{BusError, RawRegister};
use crate::regmap::{Field, FieldValues, Register};
use crate::soc::RegisterBus;

/// Reads one register and assembles its word.
pub fn read_register<B>(bus: &mut B, register: Register) -> Result<RawRegister, BusError>
where
    B: RegisterBus + ?Sized,
{
    bus.read(register.offset).map(RawRegister::from_le_bytes)
}

/// Reads the register holding `field` and decodes the field from it.
pub fn read_field<B>(bus: &mut B, field: Field) -> Result<u32, BusError>
where
    B: RegisterBus + ?Sized,
{
    let spec = field.spec();
    let raw = read_register(bus, spec.register)?;
    Ok(spec.decode(raw.value()))
}

/// Reads the board type.
pub fn read_board_type<B: RegisterBus + ?Sized>(bus: &mut B) -> Result<u32, BusError> {
    read_field(bus, Field::BoardType)
}

/// Reads the board revision.
pub fn read_board_rev<B: RegisterBus + ?Sized>(bus: &mut B) -> Result<u32, BusError> {
    read_field(bus, Field::BoardRev)
}

/// Reads the FPGA major version.
pub fn read_fpga_version_major<B: RegisterBus + ?Sized>(bus: &mut B) -> Result<u32, BusError> {
    read_field(bus, Field::FpgaVersionMajor)
}

/// Reads the FPGA minor version.
pub fn read_fpga_version_minor<B: RegisterBus + ?Sized>(bus: &mut B) -> Result<u32, BusError> {
    read_field(bus, Field::FpgaVersionMinor)
}

/// Reads the FPGA build number (the whole 32-bit register).
pub fn read_fpga_build<B: RegisterBus + ?Sized>(bus: &mut B) -> Result<u32, BusError> {
    read_field(bus, Field::FpgaBuild)
}

/// Reads all five fields, one bus read each, in register map order.
///
/// Stops at the first bus error.
pub fn read_all<B: RegisterBus + ?Sized>(bus: &mut B) -> Result<FieldValues, BusError> {
    let mut values = FieldValues::default();
    for field in Field::ALL {
        values.set(field, read_field(bus, field)?);
    }
    Ok(values)
}

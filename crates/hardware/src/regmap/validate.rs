//! Register map table validation.
//!
//! The checks run in `const` context so the shipped table is rejected at compile
//! time, and at runtime so tests can report exactly which defect a table has.
//! Fields are checked in table order; the first defect found is returned.

use super::FieldSpec;
use crate::common::ConfigurationDefect;
use crate::common::WORD_BYTES;

/// Checks a register map table for every `ConfigurationDefect` class.
///
/// # Arguments
///
/// * `map` - Table entries, in any order.
///
/// # Returns
///
/// `Ok(())` for a well-formed table, otherwise the first defect found.
pub const fn validate_register_map(map: &[FieldSpec]) -> Result<(), ConfigurationDefect> {
    let mut i = 0;
    while i < map.len() {
        if let Err(defect) = check_entry(&map[i]) {
            return Err(defect);
        }
        let mut j = i + 1;
        while j < map.len() {
            if let Err(defect) = check_pair(&map[i], &map[j]) {
                return Err(defect);
            }
            j += 1;
        }
        i += 1;
    }
    Ok(())
}

/// Returns `true` if `mask` is a single non-empty run of set bits.
#[inline]
pub const fn is_contiguous(mask: u32) -> bool {
    if mask == 0 {
        return false;
    }
    let run = mask >> mask.trailing_zeros();
    run & run.wrapping_add(1) == 0
}

const fn check_entry(spec: &FieldSpec) -> Result<(), ConfigurationDefect> {
    if spec.register.offset % WORD_BYTES as u64 != 0 {
        return Err(ConfigurationDefect::MisalignedOffset {
            register: spec.register.name,
            offset: spec.register.offset,
        });
    }
    if spec.mask == 0 {
        return Err(ConfigurationDefect::EmptyMask { field: spec.field });
    }
    if !is_contiguous(spec.mask) {
        return Err(ConfigurationDefect::NonContiguousMask {
            field: spec.field,
            mask: spec.mask,
        });
    }
    let lowest = spec.mask.trailing_zeros();
    if spec.shift != lowest {
        return Err(ConfigurationDefect::ShiftMismatch {
            field: spec.field,
            shift: spec.shift,
            expected: lowest,
        });
    }
    Ok(())
}

const fn check_pair(a: &FieldSpec, b: &FieldSpec) -> Result<(), ConfigurationDefect> {
    if a.register.offset != b.register.offset {
        return Ok(());
    }
    if !str_eq(a.register.name, b.register.name) {
        return Err(ConfigurationDefect::AliasedOffset {
            first: a.register.name,
            second: b.register.name,
            offset: a.register.offset,
        });
    }
    let overlap = a.mask & b.mask;
    if overlap != 0 {
        return Err(ConfigurationDefect::OverlappingMasks {
            first: a.field,
            second: b.field,
            overlap,
        });
    }
    Ok(())
}

// `str::eq` is not usable in const context.
const fn str_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

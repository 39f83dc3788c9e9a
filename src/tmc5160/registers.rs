//! TMC5160 register map (the subset the demos touch).
//!
//! Addresses and bit positions follow the TMC5160 datasheet register tables.

#![allow(missing_docs)]

use crate::error::{MotionError, Result};

/// A 32-bit driver register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Register {
    /// Datasheet name.
    pub name: &'static str,
    /// Register address.
    pub address: u8,
    /// Largest value the register accepts.
    pub max: u32,
}

impl Register {
    const fn full(name: &'static str, address: u8) -> Self {
        Self { name, address, max: u32::MAX }
    }

    const fn bits(name: &'static str, address: u8, width: u32) -> Self {
        Self { name, address, max: (1 << width) - 1 }
    }

    /// Check that `value` fits the register.
    ///
    /// # Errors
    ///
    /// Returns `MotionError::RegisterOverflow` if it does not.
    pub fn check(&self, value: u64) -> Result<u32> {
        if value > self.max as u64 {
            return Err(MotionError::RegisterOverflow {
                register: self.name,
                value,
                max: self.max as u64,
            }
            .into());
        }
        Ok(value as u32)
    }
}

/// A bit field inside a register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Field {
    /// Datasheet name.
    pub name: &'static str,
    /// Containing register.
    pub register: Register,
    /// Mask in register position.
    pub mask: u32,
    /// Position of the lowest bit.
    pub shift: u8,
}

impl Field {
    const fn new(name: &'static str, register: Register, mask: u32, shift: u8) -> Self {
        Self { name, register, mask, shift }
    }

    /// Largest value the field can hold.
    #[inline]
    pub const fn max(&self) -> u32 {
        self.mask >> self.shift
    }

    /// Extract the field from a register value.
    #[inline]
    pub const fn get(&self, register_value: u32) -> u32 {
        (register_value & self.mask) >> self.shift
    }

    /// Replace the field inside a register value.
    ///
    /// # Errors
    ///
    /// Returns `MotionError::RegisterOverflow` if `value` is wider than the field.
    pub fn set(&self, register_value: u32, value: u32) -> Result<u32> {
        if value > self.max() {
            return Err(MotionError::RegisterOverflow {
                register: self.name,
                value: value as u64,
                max: self.max() as u64,
            }
            .into());
        }
        Ok((register_value & !self.mask) | ((value << self.shift) & self.mask))
    }
}

pub const IHOLD_IRUN: Register = Register::bits("IHOLD_IRUN", 0x10, 20);
pub const XACTUAL: Register = Register::full("XACTUAL", 0x21);
pub const VSTART: Register = Register::bits("VSTART", 0x23, 18);
pub const A1: Register = Register::bits("A1", 0x24, 16);
pub const V1: Register = Register::bits("V1", 0x25, 20);
pub const AMAX: Register = Register::bits("AMAX", 0x26, 16);
pub const VMAX: Register = Register {
    name: "VMAX",
    address: 0x27,
    max: (1 << 23) - 512,
};
pub const DMAX: Register = Register::bits("DMAX", 0x28, 16);
pub const D1: Register = Register::bits("D1", 0x2A, 16);
pub const VSTOP: Register = Register::bits("VSTOP", 0x2B, 18);
pub const ENCMODE: Register = Register::bits("ENCMODE", 0x38, 11);
pub const ENC_CONST: Register = Register::full("ENC_CONST", 0x3A);
pub const CHOPCONF: Register = Register::full("CHOPCONF", 0x6C);

pub const IHOLD: Field = Field::new("IHOLD", IHOLD_IRUN, 0x0000_001F, 0);
pub const IRUN: Field = Field::new("IRUN", IHOLD_IRUN, 0x0000_1F00, 8);
pub const IHOLDDELAY: Field = Field::new("IHOLDDELAY", IHOLD_IRUN, 0x000F_0000, 16);
pub const ENC_SEL_DECIMAL: Field = Field::new("enc_sel_decimal", ENCMODE, 0x0000_0400, 10);
pub const ENC_CONST_INTEGER: Field = Field::new("INTEGER", ENC_CONST, 0xFFFF_0000, 16);
pub const ENC_CONST_FRACTIONAL: Field = Field::new("FRACTIONAL", ENC_CONST, 0x0000_FFFF, 0);
pub const MRES: Field = Field::new("MRES", CHOPCONF, 0x0F00_0000, 24);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_roundtrip() {
        // CHOPCONF reset value on the eval board, MRES = 0
        let chopconf = 0x1001_0150;
        let updated = MRES.set(chopconf, 4).unwrap();
        assert_eq!(MRES.get(updated), 4);
        assert_eq!(updated & !MRES.mask, chopconf & !MRES.mask);
    }

    #[test]
    fn test_field_overflow() {
        assert!(IRUN.set(0, 32).is_err());
        assert_eq!(IRUN.set(0, 31).unwrap(), 0x1F00);
    }

    #[test]
    fn test_register_widths() {
        assert_eq!(A1.max, 0xFFFF);
        assert_eq!(VSTART.max, 0x3_FFFF);
        assert_eq!(VMAX.max, 8_388_096);
        assert!(VMAX.check(8_388_097).is_err());
        assert_eq!(XACTUAL.check(u32::MAX as u64).unwrap(), u32::MAX);
    }

    #[test]
    fn test_encoder_fields_cover_register() {
        assert_eq!(ENC_CONST_INTEGER.mask | ENC_CONST_FRACTIONAL.mask, u32::MAX);
        assert_eq!(ENC_CONST_INTEGER.max(), 0xFFFF);
    }
}

//! Encoder constant for the ABN encoder interface.
//!
//! The constant is the number of microsteps per encoder tick:
//! `steps_per_turn * microsteps / encoder_ticks_per_turn`. For example, a 200-step motor
//! at 256 microsteps with a 10000 P/R encoder gives 5.12.

use core::fmt;

use crate::config::units::Microsteps;
use crate::config::{EncoderConfig, EncoderMode};
use crate::error::{ConfigError, Result};

/// Encoder constant split the way `ENC_CONST` stores it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncoderConstant {
    /// Exact ratio before encoding.
    pub value: f64,
    /// Integer part (`ENC_CONST[31:16]`).
    pub integer: u16,
    /// Fractional part (`ENC_CONST[15:0]`).
    pub fraction: u16,
    /// Encoding of the fraction.
    pub mode: EncoderMode,
}

impl EncoderConstant {
    /// Compute the constant for a motor and encoder.
    ///
    /// # Errors
    ///
    /// Fails for a zero encoder resolution or an integer part wider than 16 bits.
    pub fn compute(steps_per_turn: u16, microsteps: Microsteps, encoder: &EncoderConfig) -> Result<Self> {
        if encoder.ticks_per_turn == 0 {
            return Err(ConfigError::InvalidEncoderResolution(0).into());
        }

        let value = steps_per_turn as f64 * microsteps.value() as f64 / encoder.ticks_per_turn as f64;
        let integer = libm::trunc(value);
        if integer > u16::MAX as f64 {
            return Err(ConfigError::EncoderConstantOverflow(integer as u32).into());
        }

        let scale = match encoder.mode {
            EncoderMode::Binary => 65_536.0,
            EncoderMode::Decimal => 10_000.0,
        };
        let fraction = libm::trunc((value - integer) * scale);

        Ok(Self {
            value,
            integer: integer as u16,
            fraction: fraction as u16,
            mode: encoder.mode,
        })
    }

    /// Value for the whole `ENC_CONST` register.
    #[inline]
    pub fn register_value(&self) -> u32 {
        (self.integer as u32) << 16 | self.fraction as u32
    }

    /// `ENCMODE.enc_sel_decimal` setting matching the mode.
    #[inline]
    pub fn sel_decimal(&self) -> bool {
        self.mode == EncoderMode::Decimal
    }
}

impl fmt::Display for EncoderConstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.mode {
            EncoderMode::Binary => "Q16.16",
            EncoderMode::Decimal => "Decimal",
        };
        write!(
            f,
            "{}: {} -> Int: 0x{:04X}, Frac: 0x{:04X}",
            label, self.value, self.integer, self.fraction
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workshop_encoder() {
        let c = EncoderConstant::compute(200, Microsteps::TWO_FIFTY_SIXTH, &EncoderConfig::new(10_000)).unwrap();
        assert!((c.value - 5.12).abs() < 1e-12);
        assert_eq!(c.integer, 5);
        assert_eq!(c.fraction, 0x1EB8);
        assert_eq!(c.register_value(), 0x0005_1EB8);
        assert!(!c.sel_decimal());
    }

    #[test]
    fn test_decimal_mode() {
        let encoder = EncoderConfig {
            ticks_per_turn: 1000,
            mode: EncoderMode::Decimal,
        };
        // 200 * 16 / 1000 = 3.2
        let c = EncoderConstant::compute(200, Microsteps::SIXTEENTH, &encoder).unwrap();
        assert_eq!(c.integer, 3);
        assert_eq!(c.fraction, 2000);
        assert!(c.sel_decimal());
    }

    #[test]
    fn test_exact_ratio() {
        // 200 * 256 / 4096 = 12.5
        let c = EncoderConstant::compute(200, Microsteps::TWO_FIFTY_SIXTH, &EncoderConfig::new(4096)).unwrap();
        assert_eq!(c.integer, 12);
        assert_eq!(c.fraction, 0x8000);
    }

    #[test]
    fn test_zero_resolution() {
        assert!(EncoderConstant::compute(200, Microsteps::FULL, &EncoderConfig::new(0)).is_err());
    }

    #[test]
    fn test_display() {
        let c = EncoderConstant::compute(200, Microsteps::TWO_FIFTY_SIXTH, &EncoderConfig::new(10_000)).unwrap();
        let mut s = heapless::String::<64>::new();
        core::fmt::write(&mut s, format_args!("{}", c)).unwrap();
        assert_eq!(s.as_str(), "Q16.16: 5.12 -> Int: 0x0005, Frac: 0x1EB8");
    }
}

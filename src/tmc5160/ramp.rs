//! Ramp generator register set.

use core::fmt;

use crate::config::{InternalUnits, RampConfig};
use crate::error::{MotionError, Result};

use super::registers::{self, Register};

/// What to do with a converted value wider than its register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overflow {
    /// Fail with `MotionError::RegisterOverflow`.
    Reject,
    /// Write the register maximum instead and log a warning.
    Saturate,
}

/// One converted ramp value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RampValue {
    /// Target register.
    pub register: Register,
    /// Value to write.
    pub value: u32,
    /// Physical value it came from.
    pub requested: f64,
    /// Unit of `requested`: `"rps"` or `"rps^2"`.
    pub unit: &'static str,
    /// Whether the value was cut to the register maximum.
    pub saturated: bool,
}

/// The eight ramp registers, converted and range-checked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RampRegisters {
    /// Start velocity.
    pub vstart: RampValue,
    /// First acceleration.
    pub a1: RampValue,
    /// Threshold velocity.
    pub v1: RampValue,
    /// Second acceleration.
    pub amax: RampValue,
    /// Target velocity.
    pub vmax: RampValue,
    /// First deceleration.
    pub dmax: RampValue,
    /// Final deceleration.
    pub d1: RampValue,
    /// Stop velocity.
    pub vstop: RampValue,
}

impl RampRegisters {
    /// Convert a ramp configuration to register values.
    ///
    /// # Errors
    ///
    /// Fails on negative or non-finite inputs, on overflow with
    /// [`Overflow::Reject`], and when D1 is zero or VSTOP is below VSTART.
    pub fn compute(config: &RampConfig, units: &InternalUnits, overflow: Overflow) -> Result<Self> {
        let velocity = |register: Register, rps: f64| -> Result<RampValue> {
            let raw = units.velocity_to_internal(crate::config::Rps(rps))?;
            fit(register, raw, rps, "rps", overflow)
        };
        let acceleration = |register: Register, rps2: f64| -> Result<RampValue> {
            let raw = units.acceleration_to_internal(crate::config::RpsSquared(rps2))?;
            fit(register, raw, rps2, "rps^2", overflow)
        };

        let ramp = Self {
            vstart: velocity(registers::VSTART, config.vstart.0)?,
            a1: acceleration(registers::A1, config.a1.0)?,
            v1: velocity(registers::V1, config.v1.0)?,
            amax: acceleration(registers::AMAX, config.amax.0)?,
            vmax: velocity(registers::VMAX, config.vmax.0)?,
            dmax: acceleration(registers::DMAX, config.dmax.0)?,
            d1: acceleration(registers::D1, config.d1.0)?,
            vstop: velocity(registers::VSTOP, config.vstop.0)?,
        };
        ramp.check()?;
        Ok(ramp)
    }

    /// Ramp generator requirements for positioning mode.
    pub fn check(&self) -> Result<()> {
        if self.d1.value == 0 {
            return Err(MotionError::InvalidRamp("D1 must not be 0").into());
        }
        if self.vstop.value < self.vstart.value {
            return Err(MotionError::InvalidRamp("VSTOP must be >= VSTART").into());
        }
        Ok(())
    }

    /// Values in the order they are written to the driver.
    ///
    /// VMAX goes last so the ramp only starts once everything else is set.
    pub fn write_order(&self) -> [RampValue; 8] {
        [
            self.a1, self.v1, self.d1, self.dmax, self.vstart, self.vstop, self.amax, self.vmax,
        ]
    }
}

impl fmt::Display for RampValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Written {} to {} internal units (requested {} {})",
            self.register.name, self.value, self.requested, self.unit
        )?;
        if self.saturated {
            write!(f, " (saturated)")?;
        }
        Ok(())
    }
}

fn fit(register: Register, raw: u64, requested: f64, unit: &'static str, overflow: Overflow) -> Result<RampValue> {
    match (register.check(raw), overflow) {
        (Ok(value), _) => Ok(RampValue {
            register,
            value,
            requested,
            unit,
            saturated: false,
        }),
        (Err(_), Overflow::Saturate) => {
            log::warn!(
                "{} = {} exceeds register maximum {}, writing maximum",
                register.name,
                raw,
                register.max
            );
            Ok(RampValue {
                register,
                value: register.max,
                requested,
                unit,
                saturated: true,
            })
        }
        (Err(e), Overflow::Reject) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Microsteps, Rps, DEFAULT_CLOCK_FREQUENCY_HZ};
    use crate::error::Error;

    fn units(microsteps: Microsteps) -> InternalUnits {
        InternalUnits::new(DEFAULT_CLOCK_FREQUENCY_HZ, 200, microsteps).unwrap()
    }

    #[test]
    fn test_default_ramp_at_sixteenth_steps() {
        let ramp = RampRegisters::compute(&RampConfig::default(), &units(Microsteps::SIXTEENTH), Overflow::Reject)
            .unwrap();
        // 1.5 rps * 3200 * 2^24 / 12 MHz = 6710.9
        assert_eq!(ramp.vmax.value, 6710);
        assert_eq!(ramp.vstart.value, ramp.vstop.value);
        assert!(ramp.write_order().iter().all(|v| !v.saturated));
    }

    #[test]
    fn test_overflow_rejected() {
        // A1 = 100 rps² at 256 microsteps needs 78187 > 0xFFFF
        let result = RampRegisters::compute(
            &RampConfig::default(),
            &units(Microsteps::TWO_FIFTY_SIXTH),
            Overflow::Reject,
        );
        assert!(matches!(
            result,
            Err(Error::Motion(MotionError::RegisterOverflow { register: "A1", value: 78_187, .. }))
        ));
    }

    #[test]
    fn test_overflow_saturated() {
        let ramp = RampRegisters::compute(
            &RampConfig::default(),
            &units(Microsteps::TWO_FIFTY_SIXTH),
            Overflow::Saturate,
        )
        .unwrap();
        assert!(ramp.a1.saturated);
        assert_eq!(ramp.a1.value, 0xFFFF);
        assert!(ramp.d1.saturated);
        assert!(!ramp.amax.saturated);
        assert_eq!(ramp.amax.value, 54_731);
    }

    #[test]
    fn test_write_order() {
        let ramp = RampRegisters::compute(&RampConfig::default(), &units(Microsteps::SIXTEENTH), Overflow::Reject)
            .unwrap();
        let names: heapless::Vec<&str, 8> = ramp.write_order().iter().map(|v| v.register.name).collect();
        assert_eq!(names.as_slice(), &["A1", "V1", "D1", "DMAX", "VSTART", "VSTOP", "AMAX", "VMAX"]);
    }

    #[test]
    fn test_vstop_below_vstart() {
        let mut config = RampConfig::default();
        config.vstop = Rps(0.01);
        let result = RampRegisters::compute(&config, &units(Microsteps::SIXTEENTH), Overflow::Reject);
        assert_eq!(result, Err(Error::Motion(MotionError::InvalidRamp("VSTOP must be >= VSTART"))));
    }

    #[test]
    fn test_zero_d1() {
        let mut config = RampConfig::default();
        config.d1 = crate::config::RpsSquared(0.0);
        let result = RampRegisters::compute(&config, &units(Microsteps::SIXTEENTH), Overflow::Reject);
        assert!(matches!(result, Err(Error::Motion(MotionError::InvalidRamp(_)))));
    }

    #[test]
    fn test_written_value_log_line() {
        use core::fmt::Write;

        let ramp = RampRegisters::compute(
            &RampConfig::default(),
            &units(Microsteps::TWO_FIFTY_SIXTH),
            Overflow::Saturate,
        )
        .unwrap();

        let mut line = heapless::String::<96>::new();
        write!(line, "{}", ramp.vmax).unwrap();
        assert_eq!(line.as_str(), "Written VMAX to 107374 internal units (requested 1.5 rps)");

        line.clear();
        write!(line, "{}", ramp.a1).unwrap();
        assert_eq!(
            line.as_str(),
            "Written A1 to 65535 internal units (requested 100 rps^2) (saturated)"
        );
    }
}

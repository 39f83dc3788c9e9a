//! Conversion between physical units and TMC5160 internal ramp units.
//!
//! With `f_clk` the driver clock:
//! - velocity: µsteps/s = v_int * f_clk / 2 / 2^23
//! - acceleration: µsteps/s² = a_int * f_clk² / (512 * 256) / 2^24
//! - ramp length: µsteps = v_int² / a_int / 2^8

use crate::error::{ConfigError, Result};

use super::units::{Microsteps, Rps, RpsSquared};

/// Default TMC5160 internal clock.
pub const DEFAULT_CLOCK_FREQUENCY_HZ: u32 = 12_000_000;

const VELOCITY_SCALE: f64 = (1u64 << 24) as f64;
const ACCELERATION_SCALE: f64 = (1u64 << 41) as f64;

/// Conversion parameters derived from clock, motor and microstep settings.
///
/// Computed once per connection and used for every ramp register value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InternalUnits {
    /// Driver clock frequency in hertz.
    pub clock_frequency_hz: u32,

    /// Full steps per motor turn.
    pub steps_per_turn: u16,

    /// Active microstep setting.
    pub microsteps: Microsteps,
}

impl InternalUnits {
    /// Create conversion parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the clock frequency or steps per turn is zero.
    pub fn new(clock_frequency_hz: u32, steps_per_turn: u16, microsteps: Microsteps) -> Result<Self> {
        if clock_frequency_hz == 0 {
            return Err(ConfigError::InvalidClockFrequency(clock_frequency_hz).into());
        }
        if steps_per_turn == 0 {
            return Err(ConfigError::InvalidStepsPerTurn(steps_per_turn).into());
        }
        Ok(Self {
            clock_frequency_hz,
            steps_per_turn,
            microsteps,
        })
    }

    /// Microsteps per motor turn.
    #[inline]
    pub fn microsteps_per_turn(&self) -> u32 {
        self.steps_per_turn as u32 * self.microsteps.value() as u32
    }

    /// Convert rps to the internal velocity unit (truncated).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidRampValue` for negative or non-finite input.
    pub fn velocity_to_internal(&self, velocity: Rps) -> Result<u64> {
        let rps = check_physical("velocity", velocity.0)?;
        let microstep_velocity = rps * self.microsteps_per_turn() as f64;
        Ok(libm::trunc(microstep_velocity * VELOCITY_SCALE / self.clock()) as u64)
    }

    /// Convert rps² to the internal acceleration unit (truncated).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidRampValue` for negative or non-finite input.
    pub fn acceleration_to_internal(&self, acceleration: RpsSquared) -> Result<u64> {
        let rps2 = check_physical("acceleration", acceleration.0)?;
        let microstep_acceleration = rps2 * self.microsteps_per_turn() as f64;
        let clock = self.clock();
        Ok(libm::trunc(microstep_acceleration * ACCELERATION_SCALE / (clock * clock)) as u64)
    }

    /// Convert an internal velocity back to rps.
    pub fn internal_to_velocity(&self, internal: i64) -> Rps {
        Rps(internal as f64 * self.clock() / VELOCITY_SCALE / self.microsteps_per_turn() as f64)
    }

    /// Convert an internal acceleration back to rps².
    pub fn internal_to_acceleration(&self, internal: u64) -> RpsSquared {
        let clock = self.clock();
        RpsSquared(internal as f64 * clock * clock / ACCELERATION_SCALE / self.microsteps_per_turn() as f64)
    }

    /// Microsteps travelled while ramping between standstill and `velocity`.
    ///
    /// Returns `None` for a zero acceleration.
    pub fn ramp_microsteps(velocity: u64, acceleration: u64) -> Option<u64> {
        if acceleration == 0 {
            return None;
        }
        Some((velocity as u128 * velocity as u128 / acceleration as u128 / 256) as u64)
    }

    #[inline]
    fn clock(&self) -> f64 {
        self.clock_frequency_hz as f64
    }
}

fn check_physical(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidRampValue { name, value }.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units() -> InternalUnits {
        InternalUnits::new(DEFAULT_CLOCK_FREQUENCY_HZ, 200, Microsteps::TWO_FIFTY_SIXTH).unwrap()
    }

    #[test]
    fn test_microsteps_per_turn() {
        assert_eq!(units().microsteps_per_turn(), 51_200);
    }

    #[test]
    fn test_velocity_conversion() {
        // 1.5 rps * 51200 = 76800 µsteps/s; / (12 MHz / 2^24) = 107374.18
        assert_eq!(units().velocity_to_internal(Rps(1.5)).unwrap(), 107_374);
        assert_eq!(units().velocity_to_internal(Rps(0.0)).unwrap(), 0);
    }

    #[test]
    fn test_acceleration_conversion() {
        // 70 rps² * 51200 = 3.584e6 µsteps/s²; * 2^41 / (12 MHz)² = 54731.25
        assert_eq!(units().acceleration_to_internal(RpsSquared(70.0)).unwrap(), 54_731);
    }

    #[test]
    fn test_inverse_conversion() {
        let u = units();
        let v = u.velocity_to_internal(Rps(1.0)).unwrap();
        assert!((u.internal_to_velocity(v as i64).0 - 1.0).abs() < 1e-4);

        let a = u.acceleration_to_internal(RpsSquared(10.0)).unwrap();
        assert!((u.internal_to_acceleration(a).0 - 10.0).abs() < 1e-2);
    }

    #[test]
    fn test_negative_rejected() {
        assert!(matches!(
            units().velocity_to_internal(Rps(-1.0)),
            Err(crate::Error::Config(ConfigError::InvalidRampValue { .. }))
        ));
        assert!(units().acceleration_to_internal(RpsSquared(f64::NAN)).is_err());
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(InternalUnits::new(0, 200, Microsteps::FULL).is_err());
        assert!(InternalUnits::new(DEFAULT_CLOCK_FREQUENCY_HZ, 0, Microsteps::FULL).is_err());
    }

    #[test]
    fn test_ramp_microsteps() {
        assert_eq!(InternalUnits::ramp_microsteps(51_200, 1000), Some(10_240));
        assert_eq!(InternalUnits::ramp_microsteps(51_200, 0), None);
    }
}

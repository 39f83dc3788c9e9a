//! Unit types for physical quantities.
//!
//! Keeps rotations, rotational velocities and accelerations apart from raw
//! microstep counts so a register value is never mistaken for an rps value.

use serde::Deserialize;

use crate::error::ConfigError;

/// Rotational velocity in rotations per second.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct Rps(pub f64);

impl Rps {
    /// Create a new Rps value.
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f64 {
        self.0
    }
}

/// Rotational acceleration in rotations per second squared.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct RpsSquared(pub f64);

impl RpsSquared {
    /// Create a new RpsSquared value.
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f64 {
        self.0
    }
}

/// Motor position in microsteps, as held by the board's position counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize)]
#[serde(transparent)]
pub struct MicrostepPosition(pub i32);

impl MicrostepPosition {
    /// Create a new position.
    #[inline]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> i32 {
        self.0
    }
}

/// Microstep divisor (1, 2, 4, 8, 16, 32, 64, 128, 256).
///
/// Validated at construction to be a power of 2 within the valid range.
/// Maps onto the TMC5160 `CHOPCONF.MRES` code where 0 means 256 microsteps
/// and 8 means full steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Microsteps(u16);

impl Microsteps {
    /// Full step (no microstepping).
    pub const FULL: Self = Self(1);
    /// Half step.
    pub const HALF: Self = Self(2);
    /// Quarter step.
    pub const QUARTER: Self = Self(4);
    /// Eighth step.
    pub const EIGHTH: Self = Self(8);
    /// Sixteenth step.
    pub const SIXTEENTH: Self = Self(16);
    /// Thirty-second step.
    pub const THIRTY_SECOND: Self = Self(32);
    /// Sixty-fourth step.
    pub const SIXTY_FOURTH: Self = Self(64);
    /// 128th step.
    pub const ONE_TWENTY_EIGHTH: Self = Self(128);
    /// 256th step (maximum resolution, TMC5160 reset default).
    pub const TWO_FIFTY_SIXTH: Self = Self(256);

    /// Valid microstep values.
    const VALID_VALUES: [u16; 9] = [1, 2, 4, 8, 16, 32, 64, 128, 256];

    /// Create a new Microsteps value with validation.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidMicrosteps` if the value is not a valid power of 2.
    pub fn new(value: u16) -> Result<Self, ConfigError> {
        if Self::VALID_VALUES.contains(&value) {
            Ok(Self(value))
        } else {
            Err(ConfigError::InvalidMicrosteps(value))
        }
    }

    /// Decode a `MRES` register code.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidMicrostepCode` for codes above 8.
    pub fn from_mres(code: u8) -> Result<Self, ConfigError> {
        if code > 8 {
            return Err(ConfigError::InvalidMicrostepCode(code));
        }
        Ok(Self(256 >> code))
    }

    /// Encode as a `MRES` register code.
    #[inline]
    pub const fn mres(self) -> u8 {
        8 - self.0.trailing_zeros() as u8
    }

    /// Get the raw divisor value.
    #[inline]
    pub const fn value(self) -> u16 {
        self.0
    }
}

impl Default for Microsteps {
    fn default() -> Self {
        Self::TWO_FIFTY_SIXTH
    }
}

impl TryFrom<u16> for Microsteps {
    type Error = ConfigError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for Microsteps {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use core::fmt::Write;
        let value = u16::deserialize(deserializer)?;
        Microsteps::new(value).map_err(|e| {
            let mut buf = heapless::String::<128>::new();
            let _ = write!(buf, "{}", e);
            serde::de::Error::custom(buf.as_str())
        })
    }
}

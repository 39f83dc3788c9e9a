//! Supported boards and their axis parameter numbers.

use core::fmt;

use serde::Deserialize;

/// Board behind a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BoardKind {
    /// TMC5160-EVAL on a Landungsbrücke.
    #[serde(rename = "tmc5160-eval")]
    Tmc5160Eval,
    /// TMCM-BB4 base board.
    #[serde(rename = "tmcm-bb4")]
    TmcmBb4,
    /// TMCM-1637 single-axis module.
    #[serde(rename = "tmcm-1637")]
    Tmcm1637,
}

impl BoardKind {
    /// Product name.
    pub fn name(self) -> &'static str {
        match self {
            BoardKind::Tmc5160Eval => "TMC5160-Eval",
            BoardKind::TmcmBb4 => "TMCM-BB4",
            BoardKind::Tmcm1637 => "TMCM-1637",
        }
    }

    /// Number of motor axes.
    pub fn motor_count(self) -> u8 {
        match self {
            BoardKind::TmcmBb4 => 4,
            BoardKind::Tmc5160Eval | BoardKind::Tmcm1637 => 1,
        }
    }

    /// Largest run/standby current value accepted.
    ///
    /// The eval firmware passes currents straight to the 5-bit `IRUN`/`IHOLD`
    /// fields, the modules scale a byte.
    pub fn max_current(self) -> u16 {
        match self {
            BoardKind::Tmc5160Eval => 31,
            BoardKind::TmcmBb4 | BoardKind::Tmcm1637 => 255,
        }
    }

    /// Whether raw driver registers can be read and written.
    pub fn has_register_access(self) -> bool {
        matches!(self, BoardKind::Tmc5160Eval)
    }
}

impl fmt::Display for BoardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Axis parameter numbers shared by the supported boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum AxisParameter {
    /// Target position of the current move.
    TargetPosition = 0,
    /// Position counter.
    ActualPosition = 1,
    /// Target velocity in velocity mode.
    TargetVelocity = 2,
    /// Current velocity.
    ActualVelocity = 3,
    /// Velocity limit for position moves.
    MaxVelocity = 4,
    /// Acceleration limit.
    MaxAcceleration = 5,
    /// Run current.
    MaxCurrent = 6,
    /// Standstill current.
    StandbyCurrent = 7,
    /// Set once the target position is reached.
    PositionReached = 8,
    /// Microstep resolution code (0 = full step .. 8 = 256).
    MicrostepResolution = 140,
}

impl AxisParameter {
    /// Parameter number on the wire.
    #[inline]
    pub const fn number(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_properties() {
        assert_eq!(BoardKind::TmcmBb4.motor_count(), 4);
        assert!(BoardKind::Tmc5160Eval.has_register_access());
        assert!(!BoardKind::Tmcm1637.has_register_access());
        assert_eq!(BoardKind::Tmcm1637.name(), "TMCM-1637");
    }
}

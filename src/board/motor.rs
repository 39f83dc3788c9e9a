//! Axis-level motor commands.

use embedded_io::{Read, Write};

use crate::config::units::MicrostepPosition;
use crate::error::Result;
use crate::tmcl::{MoveMode, TmclClient};

use super::kind::AxisParameter;

/// One motor axis on an open connection.
///
/// Borrowing the connection keeps commands from outliving it.
pub struct Motor<'a, T> {
    client: &'a mut TmclClient<T>,
    index: u8,
}

impl<'a, T> Motor<'a, T>
where
    T: Read + Write,
{
    pub(crate) fn new(client: &'a mut TmclClient<T>, index: u8) -> Self {
        Self { client, index }
    }

    /// Axis index on the board.
    #[inline]
    pub fn index(&self) -> u8 {
        self.index
    }

    /// Rotate at `velocity` (board units, sign selects direction).
    pub fn rotate(&mut self, velocity: i32) -> Result<()> {
        log::debug!("motor {}: rotate at {}", self.index, velocity);
        if velocity < 0 {
            self.client.rotate_left(self.index, velocity.saturating_neg())
        } else {
            self.client.rotate_right(self.index, velocity)
        }
    }

    /// Stop the motor.
    pub fn stop(&mut self) -> Result<()> {
        log::debug!("motor {}: stop", self.index);
        self.client.motor_stop(self.index)
    }

    /// Move to an absolute position at up to `velocity`.
    pub fn move_to(&mut self, position: MicrostepPosition, velocity: i32) -> Result<()> {
        self.set_axis_parameter(AxisParameter::MaxVelocity, velocity)?;
        log::debug!("motor {}: move to {}", self.index, position.0);
        self.client.move_to_position(self.index, MoveMode::Absolute, position.0)
    }

    /// Move relative to the current target at up to `velocity`.
    pub fn move_by(&mut self, delta: MicrostepPosition, velocity: i32) -> Result<()> {
        self.set_axis_parameter(AxisParameter::MaxVelocity, velocity)?;
        log::debug!("motor {}: move by {}", self.index, delta.0);
        self.client.move_to_position(self.index, MoveMode::Relative, delta.0)
    }

    /// Read the position counter.
    pub fn actual_position(&mut self) -> Result<MicrostepPosition> {
        self.axis_parameter(AxisParameter::ActualPosition)
            .map(MicrostepPosition)
    }

    /// Overwrite the position counter without moving.
    pub fn set_actual_position(&mut self, position: MicrostepPosition) -> Result<()> {
        self.set_axis_parameter(AxisParameter::ActualPosition, position.0)
    }

    /// Read the current velocity.
    pub fn actual_velocity(&mut self) -> Result<i32> {
        self.axis_parameter(AxisParameter::ActualVelocity)
    }

    /// Whether the last position move has finished.
    pub fn position_reached(&mut self) -> Result<bool> {
        self.axis_parameter(AxisParameter::PositionReached)
            .map(|v| v != 0)
    }

    /// Set the run current.
    pub fn set_max_current(&mut self, current: u16) -> Result<()> {
        self.set_axis_parameter(AxisParameter::MaxCurrent, current as i32)
    }

    /// Set the standstill current.
    pub fn set_standby_current(&mut self, current: u16) -> Result<()> {
        self.set_axis_parameter(AxisParameter::StandbyCurrent, current as i32)
    }

    /// Set the acceleration limit.
    pub fn set_max_acceleration(&mut self, acceleration: i32) -> Result<()> {
        self.set_axis_parameter(AxisParameter::MaxAcceleration, acceleration)
    }

    /// Write any axis parameter.
    pub fn set_axis_parameter(&mut self, parameter: AxisParameter, value: i32) -> Result<()> {
        self.client.set_axis_parameter(self.index, parameter.number(), value)
    }

    /// Read any axis parameter.
    pub fn axis_parameter(&mut self, parameter: AxisParameter) -> Result<i32> {
        self.client.get_axis_parameter(self.index, parameter.number())
    }
}

//! Configuration helper for a TMC5160 behind an eval board connection.

use embedded_io::{Read, Write};

use crate::board::Connection;
use crate::config::units::{Microsteps, Rps};
use crate::config::{EncoderConfig, InternalUnits, RampConfig};
use crate::error::{ConfigError, Error, Result};

use super::encoder::EncoderConstant;
use super::ramp::{Overflow, RampRegisters};
use super::registers;

/// Configures encoder, ramper and currents on a TMC5160.
///
/// The microstep setting is read from `CHOPCONF.MRES` on construction so
/// physical units convert against what the driver actually uses.
pub struct Tmc5160<'a, T> {
    connection: &'a mut Connection<T>,
    motor: u8,
    units: InternalUnits,
    encoder: Option<EncoderConfig>,
}

impl<'a, T> Tmc5160<'a, T>
where
    T: Read + Write,
{
    /// Attach to motor `motor` of an eval board connection.
    ///
    /// # Errors
    ///
    /// Fails if the board has no register access, the motor index is out of
    /// range, or `MRES` cannot be read.
    pub fn new(
        connection: &'a mut Connection<T>,
        motor: u8,
        steps_per_turn: u16,
        clock_frequency_hz: u32,
        encoder: Option<EncoderConfig>,
    ) -> Result<Self> {
        connection.motor(motor)?;
        let mres = connection.registers()?.read_field(registers::MRES)?;
        let microsteps = Microsteps::from_mres(mres as u8)?;
        let units = InternalUnits::new(clock_frequency_hz, steps_per_turn, microsteps)?;
        log::debug!("MRES = {} -> {} microsteps", mres, microsteps.value());

        Ok(Self {
            connection,
            motor,
            units,
            encoder,
        })
    }

    /// Active microstep setting.
    #[inline]
    pub fn microsteps(&self) -> Microsteps {
        self.units.microsteps
    }

    /// Unit conversion in use.
    #[inline]
    pub fn units(&self) -> &InternalUnits {
        &self.units
    }

    /// Change the microstep resolution.
    pub fn set_microsteps(&mut self, microsteps: Microsteps) -> Result<()> {
        self.connection
            .registers()?
            .write_field(registers::MRES, microsteps.mres() as u32)?;
        self.units.microsteps = microsteps;
        log::info!("Microsteps set to {}", microsteps.value());
        Ok(())
    }

    /// Program the ABN encoder constant.
    ///
    /// An encoder given here replaces the one given at construction.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEncoderResolution` if neither was given.
    pub fn config_encoder(&mut self, encoder: Option<EncoderConfig>) -> Result<EncoderConstant> {
        if encoder.is_some() {
            self.encoder = encoder;
        }
        let encoder = self
            .encoder
            .ok_or(Error::Config(ConfigError::MissingEncoderResolution))?;

        let constant = EncoderConstant::compute(self.units.steps_per_turn, self.units.microsteps, &encoder)?;

        let mut regs = self.connection.registers()?;
        regs.write_field(registers::ENC_SEL_DECIMAL, constant.sel_decimal() as u32)?;
        regs.write_field(registers::ENC_CONST_INTEGER, constant.integer as u32)?;
        regs.write_field(registers::ENC_CONST_FRACTIONAL, constant.fraction as u32)?;

        log::info!("Writing ABN Encoder settings:");
        log::info!(
            "Microsteps: {}, Motor Steps: {}, Encoder resolution: {}",
            self.units.microsteps.value(),
            self.units.steps_per_turn,
            encoder.ticks_per_turn
        );
        log::info!("{}", constant);

        Ok(constant)
    }

    /// Convert and write the ramp generator registers.
    ///
    /// Values wider than their register are written as the register maximum.
    pub fn config_ramper(&mut self, ramp: &RampConfig) -> Result<RampRegisters> {
        let values = RampRegisters::compute(ramp, &self.units, Overflow::Saturate)?;

        let mut regs = self.connection.registers()?;
        for value in values.write_order() {
            regs.write(value.register, value.value)?;
        }

        for value in values.write_order() {
            log::info!("{}", value);
        }

        Ok(values)
    }

    /// Set run and hold current scales (0..=31) and the hold delay.
    pub fn set_currents(&mut self, run: u16, hold: u16, hold_delay: u8) -> Result<()> {
        let mut value = 0;
        value = registers::IRUN.set(value, run as u32)?;
        value = registers::IHOLD.set(value, hold as u32)?;
        value = registers::IHOLDDELAY.set(value, hold_delay as u32)?;
        self.connection.registers()?.write(registers::IHOLD_IRUN, value)?;
        log::info!("Currents: IRUN {}, IHOLD {}, IHOLDDELAY {}", run, hold, hold_delay);
        Ok(())
    }

    /// Rotate at a physical velocity; negative values rotate left.
    pub fn rotate_rps(&mut self, velocity: Rps) -> Result<i32> {
        let magnitude = self.units.velocity_to_internal(Rps(libm::fabs(velocity.0)))?;
        let internal = registers::VMAX.check(magnitude)? as i32;
        let signed = if velocity.0 < 0.0 { -internal } else { internal };
        log::info!("Rotating at {} rps ({} internal units)", velocity.0, signed);
        self.connection.motor(self.motor)?.rotate(signed)?;
        Ok(signed)
    }
}

//! Workshop demo sequences.
//!
//! Each sequence takes an open connection and a configuration, runs to
//! completion and leaves closing the connection to the caller.

use embedded_hal::delay::DelayNs;
use embedded_io::{Read, Write};

use crate::board::{AxisParameter, Connection};
use crate::config::units::{MicrostepPosition, Microsteps};
use crate::config::DemoConfig;
use crate::error::Result;
use crate::motion::{wait_for_position, PollSettings};
use crate::tmc5160::registers::{self, Register};
use crate::tmc5160::{EncoderConstant, RampRegisters, Tmc5160};

/// Ramp used by the rotate demo, in internal units.
pub const BASIC_RAMP: [(Register, u32); 7] = [
    (registers::A1, 1000),
    (registers::V1, 50_000),
    (registers::D1, 500),
    (registers::DMAX, 500),
    (registers::VSTART, 0),
    (registers::VSTOP, 10),
    (registers::AMAX, 1000),
];

/// Result of [`configure_and_ramp`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RampSetup {
    /// Encoder constant written, if an encoder is configured.
    pub encoder: Option<EncoderConstant>,
    /// Ramp registers written.
    pub ramp: RampRegisters,
}

/// Rotate, stop, and move back to the origin.
///
/// Writes a fixed ramp on boards with register access, sets currents,
/// clears the position counter, rotates for `sequence.rotate_ms`, stops,
/// then moves back to 0 and polls until there.
pub fn rotate_basic<T, D>(connection: &mut Connection<T>, config: &DemoConfig, delay: &mut D) -> Result<MicrostepPosition>
where
    T: Read + Write,
    D: DelayNs,
{
    let sequence = &config.sequence;
    let index = config.board.motor;

    log::info!("Preparing parameters...");
    if connection.kind().has_register_access() {
        let mut regs = connection.registers()?;
        for (register, value) in BASIC_RAMP {
            regs.write(register, value)?;
        }
    } else {
        log::info!("{} has no register access, keeping firmware ramp", connection.kind());
    }

    if let Some(microsteps) = config.motor.microsteps {
        apply_microsteps(connection, index, microsteps)?;
    }

    let mut motor = connection.motor(index)?;
    motor.set_max_current(config.motor.run_current)?;
    motor.set_standby_current(config.motor.hold_current)?;

    // Clear actual position
    let origin = MicrostepPosition::default();
    motor.set_actual_position(origin)?;

    log::info!("Rotating...");
    motor.rotate(sequence.rotate_velocity)?;
    delay.delay_ms(sequence.rotate_ms);

    log::info!("Stopping...");
    motor.stop()?;
    delay.delay_ms(sequence.settle_ms);

    log::info!("Moving back to 0...");
    motor.move_to(origin, sequence.rotate_velocity.saturating_abs())?;
    wait_for_position(&mut motor, origin, PollSettings::from(sequence), delay)?;

    log::info!("Reached position 0");
    motor.actual_position()
}

/// Program the ABN encoder constant from the configured encoder.
///
/// A configured microstep resolution is written first, otherwise the one
/// set on the board is used.
pub fn encoder_config<T>(connection: &mut Connection<T>, config: &DemoConfig) -> Result<EncoderConstant>
where
    T: Read + Write,
{
    let mut tmc = configurator(connection, config)?;
    tmc.config_encoder(None)
}

/// Configure encoder (when present) and ramp generator.
pub fn configure_and_ramp<T>(connection: &mut Connection<T>, config: &DemoConfig) -> Result<RampSetup>
where
    T: Read + Write,
{
    let mut tmc = configurator(connection, config)?;

    let encoder = match config.encoder {
        Some(_) => Some(tmc.config_encoder(None)?),
        None => {
            log::info!("No encoder configured, skipping encoder setup");
            None
        }
    };
    let ramp = tmc.config_ramper(&config.ramp)?;

    Ok(RampSetup { encoder, ramp })
}

fn configurator<'a, T>(connection: &'a mut Connection<T>, config: &DemoConfig) -> Result<Tmc5160<'a, T>>
where
    T: Read + Write,
{
    let mut tmc = Tmc5160::new(
        connection,
        config.board.motor,
        config.motor.steps_per_turn,
        config.board.clock_frequency_hz,
        config.encoder,
    )?;
    if let Some(microsteps) = config.motor.microsteps {
        tmc.set_microsteps(microsteps)?;
    }
    Ok(tmc)
}

fn apply_microsteps<T>(connection: &mut Connection<T>, index: u8, microsteps: Microsteps) -> Result<()>
where
    T: Read + Write,
{
    if connection.kind().has_register_access() {
        connection
            .registers()?
            .write_field(registers::MRES, microsteps.mres() as u32)?;
    } else {
        // Modules count up: 0 = full step, 8 = 256 microsteps
        let code = 8 - microsteps.mres() as i32;
        connection
            .motor(index)?
            .set_axis_parameter(AxisParameter::MicrostepResolution, code)?;
    }
    log::info!("Microsteps set to {}", microsteps.value());
    Ok(())
}

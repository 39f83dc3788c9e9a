//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::ramp::RampConfig;
use super::DemoConfig;

/// Validate a demo configuration.
///
/// Checks:
/// - Motor index exists on the board
/// - Clock frequency and steps per turn are positive
/// - Currents are within the board's range
/// - Ramp values are finite and non-negative
/// - Poll interval is positive
/// - Encoder resolution is positive
pub fn validate_config(config: &DemoConfig) -> Result<()> {
    let kind = config.board.kind;

    if config.board.motor >= kind.motor_count() {
        return Err(Error::Config(ConfigError::InvalidMotorIndex {
            index: config.board.motor,
            count: kind.motor_count(),
        }));
    }

    if config.board.clock_frequency_hz == 0 {
        return Err(Error::Config(ConfigError::InvalidClockFrequency(
            config.board.clock_frequency_hz,
        )));
    }

    if config.motor.steps_per_turn == 0 {
        return Err(Error::Config(ConfigError::InvalidStepsPerTurn(
            config.motor.steps_per_turn,
        )));
    }

    // Currents: eval boards take the 5-bit IRUN/IHOLD scale, modules a byte
    for current in [config.motor.run_current, config.motor.hold_current] {
        if current > kind.max_current() {
            return Err(Error::Config(ConfigError::InvalidCurrent {
                value: current,
                max: kind.max_current(),
            }));
        }
    }

    validate_ramp(&config.ramp)?;

    if config.sequence.poll_interval_ms == 0 {
        return Err(Error::Config(ConfigError::InvalidPollInterval(
            config.sequence.poll_interval_ms,
        )));
    }

    if let Some(encoder) = config.encoder {
        if encoder.ticks_per_turn == 0 {
            return Err(Error::Config(ConfigError::InvalidEncoderResolution(
                encoder.ticks_per_turn,
            )));
        }
    }

    Ok(())
}

/// Reject negative and non-finite ramp values.
pub fn validate_ramp(ramp: &RampConfig) -> Result<()> {
    let velocities = ramp.velocities().into_iter().map(|(n, v)| (n, v.0));
    let accelerations = ramp.accelerations().into_iter().map(|(n, a)| (n, a.0));

    for (name, value) in velocities.chain(accelerations) {
        if !value.is_finite() || value < 0.0 {
            return Err(Error::Config(ConfigError::InvalidRampValue { name, value }));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardKind;
    use crate::config::units::Rps;
    use crate::config::BoardConfig;

    #[test]
    fn test_default_config_is_valid() {
        let config = DemoConfig::for_board(BoardConfig::new(BoardKind::Tmc5160Eval));
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_motor_index_out_of_range() {
        let mut board = BoardConfig::new(BoardKind::Tmcm1637);
        board.motor = 1;
        let result = validate_config(&DemoConfig::for_board(board));
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidMotorIndex { index: 1, count: 1 }))
        ));
    }

    #[test]
    fn test_current_range_depends_on_board() {
        let mut config = DemoConfig::for_board(BoardConfig::new(BoardKind::Tmc5160Eval));
        config.motor.run_current = 32;
        assert!(validate_config(&config).is_err());

        config.board.kind = BoardKind::TmcmBb4;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_negative_ramp_value() {
        let mut config = DemoConfig::for_board(BoardConfig::new(BoardKind::Tmc5160Eval));
        config.ramp.vmax = Rps(-1.0);
        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::InvalidRampValue { name: "VMAX", .. }))
        ));
    }

    #[test]
    fn test_zero_poll_interval_rejected() {
        let mut config = DemoConfig::for_board(BoardConfig::new(BoardKind::Tmc5160Eval));
        config.sequence.poll_interval_ms = 0;
        config.sequence.timeout_ms = Some(1000);
        assert_eq!(
            validate_config(&config),
            Err(Error::Config(ConfigError::InvalidPollInterval(0)))
        );
    }
}

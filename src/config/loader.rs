//! Configuration loading from files (std only).

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Error, Result};

use super::DemoConfig;

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
///
/// ```rust,ignore
/// use trinamic_eval::load_config;
///
/// let config = load_config("tmc5160.toml")?;
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<DemoConfig> {
    let content = fs::read_to_string(path.as_ref()).map_err(|e| {
        let msg = truncated(&e.to_string());
        Error::Config(ConfigError::IoError(msg))
    })?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or fails validation.
pub fn parse_config(content: &str) -> Result<DemoConfig> {
    let config: DemoConfig = toml::from_str(content)
        .map_err(|e| Error::Config(ConfigError::ParseError(truncated(e.message()))))?;

    // Validate the configuration
    super::validation::validate_config(&config)?;

    Ok(config)
}

// Keeps as much of the message as fits instead of dropping it entirely.
pub(crate) fn truncated<const N: usize>(msg: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    for c in msg.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardKind;
    use crate::config::EncoderMode;

    #[test]
    fn test_parse_minimal_config() {
        let toml = r#"
[board]
kind = "tmc5160-eval"
"#;

        let config = parse_config(toml).unwrap();
        assert_eq!(config.board.kind, BoardKind::Tmc5160Eval);
        assert!(config.board.auto_port());
        assert_eq!(config.board.module_address, 1);
        assert_eq!(config.board.clock_frequency_hz, 12_000_000);
        assert_eq!(config.board.baud_rate, 115_200);
        assert_eq!(config.board.timeout_ms, 1000);
        assert_eq!(config.motor.steps_per_turn, 200);
        assert!(config.encoder.is_none());
    }

    #[test]
    fn test_parse_with_encoder() {
        let toml = r#"
[board]
kind = "tmc5160-eval"
port = "/dev/ttyACM0"

[encoder]
ticks_per_turn = 10000
mode = "decimal"
"#;

        let config = parse_config(toml).unwrap();
        let encoder = config.encoder.unwrap();
        assert_eq!(encoder.ticks_per_turn, 10_000);
        assert_eq!(encoder.mode, EncoderMode::Decimal);
        assert_eq!(config.board.port.as_str(), "/dev/ttyACM0");
    }

    #[test]
    fn test_parse_rejects_unknown_board() {
        let toml = r#"
[board]
kind = "tmc2209-eval"
"#;

        assert!(matches!(
            parse_config(toml),
            Err(Error::Config(ConfigError::ParseError(_)))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_config("/nonexistent/trinamic-eval.toml"),
            Err(Error::Config(ConfigError::IoError(_)))
        ));
    }

    #[test]
    fn test_truncated_message() {
        let s: heapless::String<4> = truncated("abcdef");
        assert_eq!(s.as_str(), "abcd");
    }
}

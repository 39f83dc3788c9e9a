//! Demo configuration - root configuration structure.

use serde::Deserialize;

use super::board::BoardConfig;
use super::encoder::EncoderConfig;
use super::motor::MotorConfig;
use super::ramp::RampConfig;
use super::sequence::SequenceConfig;

/// Log verbosity for the demo binaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    /// Nothing.
    Off,
    /// Errors only.
    Error,
    /// Warnings and errors.
    Warn,
    /// Progress messages (default).
    #[default]
    Info,
    /// Every register write and TMCL exchange.
    Debug,
    /// Raw frames.
    Trace,
}

impl LogLevel {
    /// Matching `log` filter.
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Logging section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct LoggingConfig {
    /// Maximum level printed.
    #[serde(default)]
    pub level: LogLevel,
}

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct DemoConfig {
    /// Board and connection.
    pub board: BoardConfig,

    /// Motor settings.
    #[serde(default)]
    pub motor: MotorConfig,

    /// Ramp generator settings.
    #[serde(default)]
    pub ramp: RampConfig,

    /// Optional ABN encoder.
    #[serde(default)]
    pub encoder: Option<EncoderConfig>,

    /// Demo sequence timing.
    #[serde(default)]
    pub sequence: SequenceConfig,

    /// Logging.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl DemoConfig {
    /// Default configuration for a board, matching the workshop setup.
    pub fn for_board(board: BoardConfig) -> Self {
        Self {
            board,
            motor: MotorConfig::default(),
            ramp: RampConfig::default(),
            encoder: None,
            sequence: SequenceConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

//! Error types for trinamic-eval.
//!
//! Provides unified error handling across configuration, board communication,
//! and motion commands.

use core::fmt;

use crate::tmcl::Status;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all trinamic-eval operations.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Transport or TMCL protocol error
    Connection(ConnectionError),
    /// Motion command or register value error
    Motion(MotionError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Invalid microstep value (must be power of 2: 1, 2, 4, 8, 16, 32, 64, 128, 256)
    InvalidMicrosteps(u16),
    /// MRES register code outside 0..=8
    InvalidMicrostepCode(u8),
    /// Clock frequency must be > 0
    InvalidClockFrequency(u32),
    /// Full steps per turn must be > 0
    InvalidStepsPerTurn(u16),
    /// Encoder resolution must be > 0
    InvalidEncoderResolution(u32),
    /// Encoder configuration requested without any resolution
    MissingEncoderResolution,
    /// Encoder constant integer part does not fit in 16 bits
    EncoderConstantOverflow(u32),
    /// Current setting above what the board accepts
    InvalidCurrent {
        /// Requested current scale
        value: u16,
        /// Largest accepted value
        max: u16,
    },
    /// Physical ramp value is negative or not finite
    InvalidRampValue {
        /// Ramp parameter name
        name: &'static str,
        /// Offending value
        value: f64,
    },
    /// Motor index beyond the board's axis count
    InvalidMotorIndex {
        /// Requested motor index
        index: u8,
        /// Number of motors on the board
        count: u8,
    },
    /// Operation needs raw register access which the board does not expose
    RegisterAccessUnsupported(&'static str),
    /// Poll interval must be > 0
    InvalidPollInterval(u32),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Transport and TMCL protocol errors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectionError {
    /// Underlying byte transport failed
    Transport(embedded_io::ErrorKind),
    /// Transport closed before a full reply arrived
    UnexpectedEof,
    /// Reply checksum does not match its contents
    ChecksumMismatch {
        /// Checksum computed over the reply
        expected: u8,
        /// Checksum carried by the reply
        actual: u8,
    },
    /// Board rejected the command
    Rejected(Status),
    /// Reply status byte is not a known TMCL status
    UnknownStatus(u8),
    /// Reply does not answer the command that was sent
    UnexpectedReply {
        /// Command number sent
        sent: u8,
        /// Command number echoed by the board
        received: u8,
    },
    /// Reply comes from another module than the one addressed
    WrongModule {
        /// Module address the request was sent to
        expected: u8,
        /// Module address carried by the reply
        received: u8,
    },
    /// No serial port found to connect to
    PortNotFound,
}

/// Motion command and register value errors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionError {
    /// Position was not reached in time
    Timeout {
        /// Last observed position
        position: i32,
        /// Requested target
        target: i32,
    },
    /// Converted value does not fit the target register
    RegisterOverflow {
        /// Register name
        register: &'static str,
        /// Converted value
        value: u64,
        /// Largest accepted value
        max: u64,
    },
    /// Register set violates a ramp generator requirement
    InvalidRamp(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Connection(e) => write!(f, "Connection error: {}", e),
            Error::Motion(e) => write!(f, "Motion error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidMicrosteps(v) => {
                write!(f, "Invalid microsteps: {}. Valid values: 1, 2, 4, 8, 16, 32, 64, 128, 256", v)
            }
            ConfigError::InvalidMicrostepCode(v) => write!(f, "Invalid MRES code: {}. Must be 0-8", v),
            ConfigError::InvalidClockFrequency(v) => write!(f, "Invalid clock frequency: {} Hz. Must be > 0", v),
            ConfigError::InvalidStepsPerTurn(v) => write!(f, "Invalid steps per turn: {}. Must be > 0", v),
            ConfigError::InvalidEncoderResolution(v) => {
                write!(f, "Invalid encoder resolution: {}. Must be > 0", v)
            }
            ConfigError::MissingEncoderResolution => {
                write!(f, "No encoder resolution given at construction or at configuration time")
            }
            ConfigError::EncoderConstantOverflow(v) => {
                write!(f, "Encoder constant integer part {} does not fit in 16 bits", v)
            }
            ConfigError::InvalidCurrent { value, max } => {
                write!(f, "Invalid current: {}. Must be 0-{}", value, max)
            }
            ConfigError::InvalidRampValue { name, value } => {
                write!(f, "Invalid ramp value {}: {}. Must be finite and >= 0", name, value)
            }
            ConfigError::InvalidMotorIndex { index, count } => {
                write!(f, "Invalid motor index {}: board has {} motor(s)", index, count)
            }
            ConfigError::RegisterAccessUnsupported(board) => {
                write!(f, "Board {} does not expose raw register access", board)
            }
            ConfigError::InvalidPollInterval(v) => {
                write!(f, "Invalid poll interval: {} ms. Must be > 0", v)
            }
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionError::Transport(kind) => write!(f, "Transport failure: {:?}", kind),
            ConnectionError::UnexpectedEof => write!(f, "Transport closed before reply was complete"),
            ConnectionError::ChecksumMismatch { expected, actual } => {
                write!(f, "Reply checksum mismatch: expected 0x{:02X}, got 0x{:02X}", expected, actual)
            }
            ConnectionError::Rejected(status) => write!(f, "Command rejected: {}", status),
            ConnectionError::UnknownStatus(code) => write!(f, "Unknown reply status {}", code),
            ConnectionError::UnexpectedReply { sent, received } => {
                write!(f, "Reply to command {} received for command {}", received, sent)
            }
            ConnectionError::WrongModule { expected, received } => {
                write!(f, "Reply from module {} while waiting for module {}", received, expected)
            }
            ConnectionError::PortNotFound => write!(f, "No serial port found"),
        }
    }
}

impl fmt::Display for MotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionError::Timeout { position, target } => {
                write!(f, "Timed out at position {} waiting for {}", position, target)
            }
            MotionError::RegisterOverflow { register, value, max } => {
                write!(f, "{} value {} exceeds register maximum {}", register, value, max)
            }
            MotionError::InvalidRamp(reason) => write!(f, "Invalid ramp: {}", reason),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<ConnectionError> for Error {
    fn from(e: ConnectionError) -> Self {
        Error::Connection(e)
    }
}

impl From<MotionError> for Error {
    fn from(e: MotionError) -> Self {
        Error::Motion(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for ConnectionError {}

#[cfg(feature = "std")]
impl std::error::Error for MotionError {}

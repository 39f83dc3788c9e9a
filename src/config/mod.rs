//! Configuration module for trinamic-eval.
//!
//! Provides types for loading and validating board, motor, ramp and encoder
//! configuration from TOML files (with `std` feature) or pre-built values.

mod board;
mod conversion;
mod encoder;
mod motor;
mod ramp;
mod sequence;
mod system;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use board::BoardConfig;
pub use conversion::{InternalUnits, DEFAULT_CLOCK_FREQUENCY_HZ};
pub use encoder::{EncoderConfig, EncoderMode};
pub use motor::MotorConfig;
pub use ramp::RampConfig;
pub use sequence::SequenceConfig;
pub use system::{DemoConfig, LogLevel, LoggingConfig};
pub use validation::{validate_config, validate_ramp};

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};
#[cfg(feature = "std")]
pub(crate) use loader::truncated;

// Re-export unit types at config level
pub use units::{MicrostepPosition, Microsteps, Rps, RpsSquared};

//! # trinamic-eval
//!
//! Configuration-driven demos for Trinamic motor-controller boards over TMCL.
//!
//! ## Features
//!
//! - **Boards**: TMC5160-Eval (on a Landungsbrücke), TMCM-BB4, TMCM-1637
//! - **TMCL**: 9-byte request/reply frames over any `embedded-io` byte stream
//! - **Physical units**: ramp settings in rps / rps², converted to TMC5160 internal units
//! - **Encoder**: ABN encoder constant in binary or decimal mode
//! - **Scoped connections**: commands borrow an open [`Connection`], closing consumes it
//! - **no_std compatible**: Core library works without standard library
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use trinamic_eval::{demo, transport::SerialPort, Connection};
//!
//! let config = trinamic_eval::load_config("tmc5160.toml")?;
//! let port = SerialPort::open_configured(&config.board)?;
//! let mut connection = Connection::open(port, config.board.kind, config.board.module_address)?;
//!
//! demo::configure_and_ramp(&mut connection, &config)?;
//! connection.close();
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): TOML loading, serial ports and the demo logger
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Derives `defmt::Format` on public types for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Core modules
pub mod board;
pub mod config;
pub mod demo;
pub mod error;
pub mod motion;
pub mod tmc5160;
pub mod tmcl;

// Host-side modules (std only)
#[cfg(feature = "std")]
pub mod logging;
#[cfg(feature = "std")]
pub mod transport;

// Re-exports for ergonomic API
pub use board::{AxisParameter, BoardKind, Connection, Motor, Registers};
pub use config::{validate_config, DemoConfig, EncoderConfig, EncoderMode, MotorConfig, RampConfig};
pub use error::{Error, Result};
pub use motion::{wait_for_position, PollSettings};
pub use tmc5160::{EncoderConstant, RampRegisters, Tmc5160};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{MicrostepPosition, Microsteps, Rps, RpsSquared};

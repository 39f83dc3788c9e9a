//! Board and connection configuration.

use heapless::String;
use serde::Deserialize;

use crate::board::BoardKind;

/// Where and how to reach the board.
#[derive(Debug, Clone, Deserialize)]
pub struct BoardConfig {
    /// Board type behind the connection.
    pub kind: BoardKind,

    /// Serial device path. Empty selects the first discovered port.
    #[serde(default)]
    pub port: String<64>,

    /// TMCL module address.
    #[serde(default = "default_module_address")]
    pub module_address: u8,

    /// Motor (axis) index on the board.
    #[serde(default)]
    pub motor: u8,

    /// Driver clock frequency in hertz (TMC5160 internal clock is 12 MHz).
    #[serde(default = "default_clock_frequency")]
    pub clock_frequency_hz: u32,

    /// Serial baud rate. USB CDC devices ignore it.
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,

    /// Reply timeout per request, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u32,
}

fn default_module_address() -> u8 {
    1
}

fn default_clock_frequency() -> u32 {
    crate::config::DEFAULT_CLOCK_FREQUENCY_HZ
}

fn default_baud_rate() -> u32 {
    115_200
}

fn default_timeout_ms() -> u32 {
    1000
}

impl BoardConfig {
    /// Configuration for a board on an auto-detected port.
    pub fn new(kind: BoardKind) -> Self {
        Self {
            kind,
            port: String::new(),
            module_address: default_module_address(),
            motor: 0,
            clock_frequency_hz: default_clock_frequency(),
            baud_rate: default_baud_rate(),
            timeout_ms: default_timeout_ms(),
        }
    }

    /// Whether the port should be discovered rather than opened by path.
    pub fn auto_port(&self) -> bool {
        self.port.trim().is_empty()
    }
}

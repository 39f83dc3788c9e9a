//! Timing and targets for the demo sequences.

use serde::Deserialize;

/// Timing of the rotate/stop/return sequence and position polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SequenceConfig {
    /// Rotation velocity in board units (7 turns/s worth of 25600 µsteps).
    #[serde(default = "default_rotate_velocity")]
    pub rotate_velocity: i32,

    /// How long to rotate before stopping.
    #[serde(default = "default_rotate_ms")]
    pub rotate_ms: u32,

    /// Pause after the stop command.
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u32,

    /// Interval between position samples.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u32,

    /// Give up waiting for a position after this long. Unset waits forever.
    #[serde(default)]
    pub timeout_ms: Option<u32>,
}

fn default_rotate_velocity() -> i32 {
    7 * 25_600
}

fn default_rotate_ms() -> u32 {
    5_000
}

fn default_settle_ms() -> u32 {
    1_000
}

fn default_poll_interval_ms() -> u32 {
    200
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            rotate_velocity: default_rotate_velocity(),
            rotate_ms: default_rotate_ms(),
            settle_ms: default_settle_ms(),
            poll_interval_ms: default_poll_interval_ms(),
            timeout_ms: None,
        }
    }
}

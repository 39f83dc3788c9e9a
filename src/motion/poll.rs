//! Polling the position counter until a move completes.

use embedded_hal::delay::DelayNs;
use embedded_io::{Read, Write};

use crate::board::Motor;
use crate::config::units::MicrostepPosition;
use crate::config::SequenceConfig;
use crate::error::{MotionError, Result};

/// How often to sample and when to give up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    /// Delay between samples.
    pub interval_ms: u32,
    /// Total wait before failing. `None` waits forever.
    pub timeout_ms: Option<u32>,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval_ms: 200,
            timeout_ms: None,
        }
    }
}

impl From<&SequenceConfig> for PollSettings {
    fn from(config: &SequenceConfig) -> Self {
        Self {
            interval_ms: config.poll_interval_ms,
            timeout_ms: config.timeout_ms,
        }
    }
}

/// Wait until the motor's position counter equals `target`.
///
/// Elapsed time is the sum of the poll delays, counting at least 1 ms per
/// sample, so bus time per sample is not counted against the timeout.
///
/// Returns the number of samples taken that were not yet at the target.
///
/// # Errors
///
/// Returns `MotionError::Timeout` once the timeout has elapsed, or any
/// communication error.
pub fn wait_for_position<T, D>(
    motor: &mut Motor<'_, T>,
    target: MicrostepPosition,
    settings: PollSettings,
    delay: &mut D,
) -> Result<u32>
where
    T: Read + Write,
    D: DelayNs,
{
    let mut polls: u32 = 0;
    let mut elapsed_ms: u64 = 0;

    loop {
        let position = motor.actual_position()?;
        if position == target {
            return Ok(polls);
        }

        log::info!("Actual position: {}", position.0);

        if let Some(timeout) = settings.timeout_ms {
            if elapsed_ms >= timeout as u64 {
                return Err(MotionError::Timeout {
                    position: position.0,
                    target: target.0,
                }
                .into());
            }
        }

        delay.delay_ms(settings.interval_ms);
        // At least 1 ms per sample so a zero interval still times out
        elapsed_ms += settings.interval_ms.max(1) as u64;
        polls = polls.saturating_add(1);
    }
}

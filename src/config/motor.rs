//! Motor configuration from TOML.

use serde::Deserialize;

use super::units::Microsteps;

/// Motor wiring and current settings.
#[derive(Debug, Clone, Deserialize)]
pub struct MotorConfig {
    /// Full steps per turn (200 for 1.8° motors, 400 on precision steppers).
    #[serde(default = "default_steps_per_turn")]
    pub steps_per_turn: u16,

    /// Microstep setting. Eval boards read it back from `CHOPCONF.MRES` when unset.
    #[serde(default)]
    pub microsteps: Option<Microsteps>,

    /// Coil current scale while moving.
    #[serde(default = "default_current")]
    pub run_current: u16,

    /// Coil current scale at standstill.
    #[serde(default = "default_current")]
    pub hold_current: u16,
}

fn default_steps_per_turn() -> u16 {
    200
}

fn default_current() -> u16 {
    2
}

impl Default for MotorConfig {
    fn default() -> Self {
        Self {
            steps_per_turn: default_steps_per_turn(),
            microsteps: None,
            run_current: default_current(),
            hold_current: default_current(),
        }
    }
}

impl MotorConfig {
    /// Microsteps per full turn, using the board default when unset.
    pub fn microsteps_per_turn(&self) -> u32 {
        self.steps_per_turn as u32 * self.microsteps.unwrap_or_default().value() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_microsteps_per_turn() {
        let config = MotorConfig {
            microsteps: Some(Microsteps::SIXTEENTH),
            ..MotorConfig::default()
        };

        // 200 * 16 = 3200
        assert_eq!(config.microsteps_per_turn(), 3200);

        // Unset falls back to 256
        assert_eq!(MotorConfig::default().microsteps_per_turn(), 51_200);
    }
}

//! ABN encoder configuration.

use serde::Deserialize;

/// How the encoder constant's fractional part is encoded in `ENC_CONST`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncoderMode {
    /// Q16.16 fixed point (`ENCMODE.enc_sel_decimal = 0`, reset default).
    #[default]
    Binary,
    /// Fraction given in 1/10000 (`ENCMODE.enc_sel_decimal = 1`).
    Decimal,
}

/// Encoder attached to the motor shaft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct EncoderConfig {
    /// Encoder ticks per turn, printed as P/R on Trinamic encoders.
    pub ticks_per_turn: u32,

    /// Fraction encoding.
    #[serde(default)]
    pub mode: EncoderMode,
}

impl EncoderConfig {
    /// Binary mode encoder with the given resolution.
    pub fn new(ticks_per_turn: u32) -> Self {
        Self {
            ticks_per_turn,
            mode: EncoderMode::Binary,
        }
    }
}

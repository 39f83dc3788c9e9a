//! TMC5160 driver support: register map, encoder constant, ramp registers
//! and the configuration helper.

mod configurator;
mod encoder;
mod ramp;
pub mod registers;

pub use configurator::Tmc5160;
pub use encoder::EncoderConstant;
pub use ramp::{Overflow, RampRegisters, RampValue};

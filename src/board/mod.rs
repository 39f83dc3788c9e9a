//! Board connection, motor axes and register access.

mod connection;
mod kind;
mod motor;
mod registers;

pub use connection::Connection;
pub use kind::{AxisParameter, BoardKind};
pub use motor::Motor;
pub use registers::Registers;

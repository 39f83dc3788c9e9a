//! TMCL protocol: frame codec and blocking request/reply client.

mod client;
mod frame;

pub use client::{FirmwareVersion, MoveMode, TmclClient};
pub use frame::{checksum, Command, Reply, Request, Status, FRAME_LEN, HOST_ADDRESS};

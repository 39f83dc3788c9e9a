//! Motion module for trinamic-eval.
//!
//! Provides blocking waits on board-side moves.

mod poll;

pub use poll::{wait_for_position, PollSettings};

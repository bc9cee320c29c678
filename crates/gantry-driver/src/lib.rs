//! Robot driver for the gantry chess board.
//!
//! Polls the game-state service for committed moves and plays them
//! out on the serial-attached board controller, one choreography at
//! a time.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod moves;

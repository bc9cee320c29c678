//! Grid and planning error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("Invalid square notation: {0}")]
    InvalidSquare(String),

    #[error("Grid point ({x}, {y}) is not a square center")]
    InvalidGridPoint { x: i32, y: i32 },

    #[error("Discard lane at y={0} has no free slots")]
    DiscardLaneExhausted(i32),
}

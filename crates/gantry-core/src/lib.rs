//! Coordinate model and move planning for the gantry chess board.
//!
//! Maps chess squares onto the 17x19 physical grid, tracks captured
//! pieces in the discard lanes, and turns resolved moves into the
//! ordered action sequences the board controller executes.

pub mod action;
pub mod error;
pub mod grid;
pub mod planner;
pub mod square;

pub use action::{Action, Choreography};
pub use error::GridError;
pub use grid::{DiscardPile, GridPoint, Position, HOME};
pub use planner::{plan, MoveRequest};
pub use square::{PieceKind, Square};

//! Primitive controller actions and their line-oriented wire encoding

use std::fmt;

use crate::square::PieceKind;

/// One primitive instruction to the board controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Relative 2-axis displacement in grid units.
    Move { dx: i32, dy: i32 },
    /// Engage the magnet and pick up the piece under the head.
    Raise,
    /// Set the carried piece down and release it.
    Lower,
    /// Return to the (0,0) rest position.
    Home,
    /// Operator-facing marker: stage the named piece. No motion.
    Promote(PieceKind),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Move { dx, dy } => write!(f, "X: {dx} Y: {dy}"),
            Action::Raise => f.write_str("raise"),
            Action::Lower => f.write_str("lower"),
            Action::Home => f.write_str("home"),
            Action::Promote(kind) => write!(f, "PROMOTE:{}", kind.letter()),
        }
    }
}

/// The ordered action sequence for one chess move.
///
/// Built fresh per move by the planner and discarded once dispatch
/// completes or fails.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Choreography {
    actions: Vec<Action>,
}

impl Choreography {
    pub fn new(actions: Vec<Action>) -> Self {
        Self { actions }
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl<'a> IntoIterator for &'a Choreography {
    type Item = &'a Action;
    type IntoIter = std::slice::Iter<'a, Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.iter()
    }
}

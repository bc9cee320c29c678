//! Turns a resolved chess move into the action sequence that drives
//! the gantry.
//!
//! The head travels point-to-point while empty; with a piece in the
//! gripper it moves only along channel rows and columns, in at most
//! three axis-aligned legs, then settles onto the target point before
//! lowering. Captures relocate the captured piece to a discard lane
//! first, castling moves king then rook as two plain sub-moves, and
//! promotion swaps the delivered pawn for an operator-staged piece.

use crate::action::{Action, Choreography};
use crate::error::GridError;
use crate::grid::{self, DiscardPile, GridPoint, Position, HOME};
use crate::square::{PieceKind, Square};

/// A resolved chess move as delivered by the game service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    pub from: Square,
    pub to: Square,
    pub is_white: bool,
    pub is_capture: bool,
    pub is_castle: bool,
    pub promotion: Option<PieceKind>,
}

/// Plan the full choreography for one move.
///
/// Capture and promotion allocate discard slots out of `discards`;
/// a full lane surfaces as [`GridError::DiscardLaneExhausted`].
pub fn plan(request: &MoveRequest, discards: &mut DiscardPile) -> Result<Choreography, GridError> {
    if request.is_castle || is_castling_pair(request.from, request.to) {
        return Ok(plan_castle(request.from, request.to));
    }

    let from = grid::to_grid(request.from, Position::Center);
    let to = grid::to_grid(request.to, Position::Center);

    // Normalize gripper state before anything else.
    let mut actions = vec![Action::Lower, Action::Home];

    if request.is_capture {
        // The occupant leaves for the discard lane before the
        // capturing piece starts moving.
        let slot = discards.next_slot(request.is_white)?;
        actions.extend(transit(HOME, to));
        actions.push(Action::Raise);
        actions.extend(carry(to, slot));
        actions.push(Action::Lower);
        actions.push(Action::Home);
    }

    actions.extend(transit(HOME, from));
    actions.push(Action::Raise);
    actions.extend(carry(from, to));
    actions.push(Action::Lower);

    if let Some(kind) = request.promotion {
        plan_promotion(&mut actions, to, kind, discards)?;
    }

    Ok(Choreography::new(actions))
}

/// The four fixed king moves that identify castling even when the
/// flag is missing: e1g1, e1c1, e8g8, e8c8.
fn is_castling_pair(from: Square, to: Square) -> bool {
    from.rank() == to.rank()
        && (from.rank() == 0 || from.rank() == 7)
        && from.file() == 4
        && (to.file() == 6 || to.file() == 2)
}

/// King first, then the rook, each as an independent plain sub-move
/// separated by a return home. Castling never captures or discards.
fn plan_castle(king_from: Square, king_to: Square) -> Choreography {
    let rank = king_from.rank();
    let (rook_from, rook_to) = if king_to.file() == 6 {
        (Square::from_coords(7, rank), Square::from_coords(5, rank))
    } else {
        (Square::from_coords(0, rank), Square::from_coords(3, rank))
    };

    let mut actions = vec![Action::Lower, Action::Home];
    for (piece_from, piece_to) in [(king_from, king_to), (rook_from, rook_to)] {
        let from = grid::to_grid(piece_from, Position::Center);
        let to = grid::to_grid(piece_to, Position::Center);
        actions.extend(transit(HOME, from));
        actions.push(Action::Raise);
        actions.extend(carry(from, to));
        actions.push(Action::Lower);
        if piece_from == king_from {
            actions.push(Action::Home);
        }
    }
    Choreography::new(actions)
}

/// Retire the delivered pawn to the discard lane, ask the operator to
/// stage the promoted piece on the home point, then place it.
fn plan_promotion(
    actions: &mut Vec<Action>,
    square: GridPoint,
    kind: PieceKind,
    discards: &mut DiscardPile,
) -> Result<(), GridError> {
    // Promoted pawns always exit via the white-capture lane.
    let slot = discards.next_slot(true)?;
    actions.push(Action::Home);
    actions.extend(transit(HOME, square));
    actions.push(Action::Raise);
    actions.extend(carry(square, slot));
    actions.push(Action::Lower);
    actions.push(Action::Home);
    actions.push(Action::Promote(kind));
    actions.push(Action::Raise);
    actions.extend(carry(HOME, square));
    actions.push(Action::Lower);
    Ok(())
}

/// Direct point-to-point travel with nothing in the gripper.
fn transit(from: GridPoint, to: GridPoint) -> Option<Action> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    (dx != 0 || dy != 0).then_some(Action::Move { dx, dy })
}

/// Channel-routed travel with a piece in the gripper.
///
/// Up to three axis-aligned legs that stay on channel parity — minor
/// align onto the departure channel, major run, minor align onto the
/// approach point — plus the settle displacement onto the target
/// itself. Major axis is the larger |delta|; ties go horizontal.
/// Zero-length legs are omitted.
fn carry(from: GridPoint, to: GridPoint) -> Vec<Action> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let approach = approach_point(to);

    let mut legs = Vec::with_capacity(4);
    if dx.abs() >= dy.abs() {
        let chan_y = if from.y % 2 == 0 {
            if dy >= 0 { from.y + 1 } else { from.y - 1 }
        } else {
            from.y
        };
        push_leg(&mut legs, 0, chan_y - from.y);
        push_leg(&mut legs, approach.x - from.x, 0);
        push_leg(&mut legs, 0, approach.y - chan_y);
    } else {
        let chan_x = if from.x % 2 == 1 {
            if dx >= 0 { from.x + 1 } else { from.x - 1 }
        } else {
            from.x
        };
        push_leg(&mut legs, chan_x - from.x, 0);
        push_leg(&mut legs, 0, approach.y - from.y);
        push_leg(&mut legs, approach.x - chan_x, 0);
    }
    // Approach then settle: the corrective step onto the exact target
    // happens before touchdown, never during a long leg.
    push_leg(&mut legs, to.x - approach.x, to.y - approach.y);
    legs
}

/// The channel point adjacent to a pickup/placement point, from which
/// the settle displacement touches down. The bottom lane has no row
/// below it, so its approach comes from above.
fn approach_point(to: GridPoint) -> GridPoint {
    let x = if to.x % 2 == 1 { to.x - 1 } else { to.x };
    let y = if to.y % 2 == 0 {
        if to.y == 0 { 1 } else { to.y - 1 }
    } else {
        to.y
    };
    GridPoint { x, y }
}

fn push_leg(legs: &mut Vec<Action>, dx: i32, dy: i32) {
    if dx != 0 || dy != 0 {
        legs.push(Action::Move { dx, dy });
    }
}

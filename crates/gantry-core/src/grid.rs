//! The 17x19 physical grid: square centers, transit channels and
//! discard lanes.
//!
//! Square centers sit at odd x / even y, with ranks offset by +2 so
//! row 0 stays free for the white discard lane. The channels between
//! squares, at even x / odd y, are the only rows and columns a
//! carried piece may travel along. (0,0) is the controller's rest
//! position; y=0 and y=18 are the discard lanes.

use crate::error::GridError;
use crate::square::Square;

pub const GRID_WIDTH: i32 = 17;
pub const GRID_HEIGHT: i32 = 19;

/// White pieces captured by black are parked on this row.
pub const WHITE_DISCARD_Y: i32 = 0;
/// Black pieces captured by white are parked on this row.
pub const BLACK_DISCARD_Y: i32 = 18;

/// Controller rest position. Every choreography starts and ends here.
pub const HOME: GridPoint = GridPoint { x: 0, y: 0 };

/// A point in the actuator's addressable space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    pub fn in_bounds(&self) -> bool {
        (0..GRID_WIDTH).contains(&self.x) && (0..GRID_HEIGHT).contains(&self.y)
    }

    /// Channel parity: safe to cross while carrying a piece.
    pub fn is_channel(&self) -> bool {
        self.x % 2 == 0 || self.y % 2 == 1
    }
}

/// Which grid position of a square is being addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// The square's middle, for pickup and placement only.
    Center,
    /// The channel point below-left of the square, for transit.
    Channel,
}

/// Map a chess square onto the grid.
pub fn to_grid(square: Square, position: Position) -> GridPoint {
    let file = square.file() as i32;
    let rank = square.rank() as i32;
    match position {
        Position::Center => GridPoint {
            x: 2 * file + 1,
            y: 2 * rank + 2,
        },
        Position::Channel => GridPoint {
            x: 2 * file,
            y: 2 * rank + 1,
        },
    }
}

/// Recover the square whose center is at `point`.
///
/// Inverse of [`to_grid`] with [`Position::Center`]; rejects points
/// that are out of range or not on center parity.
pub fn to_square(point: GridPoint) -> Result<Square, GridError> {
    let invalid = || GridError::InvalidGridPoint {
        x: point.x,
        y: point.y,
    };
    if !point.in_bounds() || point.x % 2 == 0 || point.y % 2 == 1 {
        return Err(invalid());
    }
    let file = (point.x - 1) / 2;
    let rank = (point.y - 2) / 2;
    if !(0..8).contains(&file) || !(0..8).contains(&rank) {
        return Err(invalid());
    }
    Square::new(file as u8, rank as u8).ok_or_else(invalid)
}

/// The four corner points around a square's center.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Corners {
    pub bottom_left: GridPoint,
    pub bottom_right: GridPoint,
    pub top_left: GridPoint,
    pub top_right: GridPoint,
}

/// Corner points of a square, for diagnostics and visualization.
pub fn corners(square: Square) -> Corners {
    let c = to_grid(square, Position::Center);
    Corners {
        bottom_left: GridPoint { x: c.x - 1, y: c.y - 1 },
        bottom_right: GridPoint { x: c.x + 1, y: c.y - 1 },
        top_left: GridPoint { x: c.x - 1, y: c.y + 1 },
        top_right: GridPoint { x: c.x + 1, y: c.y + 1 },
    }
}

/// The four edge midpoints around a square's center.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edges {
    pub left: GridPoint,
    pub right: GridPoint,
    pub bottom: GridPoint,
    pub top: GridPoint,
}

/// Edge midpoints of a square, for diagnostics and visualization.
pub fn edges(square: Square) -> Edges {
    let c = to_grid(square, Position::Center);
    Edges {
        left: GridPoint { x: c.x - 1, y: c.y },
        right: GridPoint { x: c.x + 1, y: c.y },
        bottom: GridPoint { x: c.x, y: c.y - 1 },
        top: GridPoint { x: c.x, y: c.y + 1 },
    }
}

/// Signed grid displacement between two square centers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delta {
    pub dx: i32,
    pub dy: i32,
}

impl Delta {
    pub fn manhattan(&self) -> i32 {
        self.dx.abs() + self.dy.abs()
    }
}

pub fn delta(from: Square, to: Square) -> Delta {
    let from = to_grid(from, Position::Center);
    let to = to_grid(to, Position::Center);
    Delta {
        dx: to.x - from.x,
        dy: to.y - from.y,
    }
}

/// Occupied x slots in each discard lane, in allocation order.
///
/// Owned by the game session and threaded through planner calls.
/// Captured pieces never return to play, so the lists only grow
/// until [`DiscardPile::reset`] at the start of a new game.
#[derive(Debug, Default, Clone)]
pub struct DiscardPile {
    white_lane: Vec<i32>,
    black_lane: Vec<i32>,
}

impl DiscardPile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next free slot in the lane opposing the capturer.
    ///
    /// Slots advance by 2 from x=1 so parked pieces do not touch. A
    /// full lane is an error: there is no second row to overflow
    /// into, and reusing x=1 would stack two pieces on one point.
    pub fn next_slot(&mut self, capturer_is_white: bool) -> Result<GridPoint, GridError> {
        let (lane_y, lane) = if capturer_is_white {
            (BLACK_DISCARD_Y, &mut self.black_lane)
        } else {
            (WHITE_DISCARD_Y, &mut self.white_lane)
        };
        let next_x = lane.last().map_or(1, |x| x + 2);
        if next_x > 15 {
            return Err(GridError::DiscardLaneExhausted(lane_y));
        }
        lane.push(next_x);
        Ok(GridPoint { x: next_x, y: lane_y })
    }

    /// Slots handed out so far for the given capturing side.
    pub fn occupied(&self, capturer_is_white: bool) -> &[i32] {
        if capturer_is_white {
            &self.black_lane
        } else {
            &self.white_lane
        }
    }

    /// Clear both lanes for a new game.
    pub fn reset(&mut self) {
        self.white_lane.clear();
        self.black_lane.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_known_coordinates() {
        assert_eq!(to_grid(sq("a1"), Position::Center), GridPoint { x: 1, y: 2 });
        assert_eq!(to_grid(sq("a1"), Position::Channel), GridPoint { x: 0, y: 1 });
        assert_eq!(to_grid(sq("e4"), Position::Center), GridPoint { x: 9, y: 8 });
        assert_eq!(to_grid(sq("e4"), Position::Channel), GridPoint { x: 8, y: 7 });
        assert_eq!(to_grid(sq("h8"), Position::Center), GridPoint { x: 15, y: 16 });
    }

    #[test]
    fn test_center_round_trip_all_squares() {
        for file in 0..8u8 {
            for rank in 0..8u8 {
                let square = Square::new(file, rank).unwrap();
                let center = to_grid(square, Position::Center);
                assert_eq!(to_square(center), Ok(square));
                assert_eq!(to_grid(to_square(center).unwrap(), Position::Center), center);
            }
        }
    }

    #[test]
    fn test_to_square_rejects_non_centers() {
        // channel point, mixed parity, out of range, discard lane rows
        for (x, y) in [(0, 1), (9, 7), (17, 2), (1, 0), (1, 18), (-1, 2)] {
            assert_eq!(
                to_square(GridPoint { x, y }),
                Err(GridError::InvalidGridPoint { x, y })
            );
        }
    }

    #[test]
    fn test_corners_and_edges() {
        let c = corners(sq("e4"));
        assert_eq!(c.bottom_left, GridPoint { x: 8, y: 7 });
        assert_eq!(c.top_right, GridPoint { x: 10, y: 9 });

        let e = edges(sq("e4"));
        assert_eq!(e.left, GridPoint { x: 8, y: 8 });
        assert_eq!(e.right, GridPoint { x: 10, y: 8 });
        assert_eq!(e.bottom, GridPoint { x: 9, y: 7 });
        assert_eq!(e.top, GridPoint { x: 9, y: 9 });
    }

    #[test]
    fn test_delta() {
        let d = delta(sq("e2"), sq("e4"));
        assert_eq!((d.dx, d.dy), (0, 4));
        assert_eq!(d.manhattan(), 4);
        assert_eq!(delta(sq("a1"), sq("h8")).manhattan(), 28);
    }

    #[test]
    fn test_discard_slots_monotonic_until_exhausted() {
        let mut pile = DiscardPile::new();
        for expected_x in (1..=15).step_by(2) {
            let slot = pile.next_slot(true).unwrap();
            assert_eq!(slot, GridPoint { x: expected_x, y: BLACK_DISCARD_Y });
        }
        // lane is full after 8 pieces; the allocator must not wrap
        // back onto the occupied x=1 slot
        assert_eq!(
            pile.next_slot(true),
            Err(GridError::DiscardLaneExhausted(BLACK_DISCARD_Y))
        );

        // the opposing lane is tracked independently
        assert_eq!(pile.next_slot(false).unwrap(), GridPoint { x: 1, y: WHITE_DISCARD_Y });
        assert_eq!(pile.occupied(true).len(), 8);
        assert_eq!(pile.occupied(false), &[1]);

        pile.reset();
        assert_eq!(pile.next_slot(true).unwrap(), GridPoint { x: 1, y: BLACK_DISCARD_Y });
    }
}

//! Chess square and promotion piece value types

use std::fmt;
use std::str::FromStr;

use serde::de::{Deserialize, Deserializer, Error as DeError};
use serde::ser::{Serialize, Serializer};

use crate::error::GridError;

const FILES: &[u8; 8] = b"abcdefgh";

/// A chess board coordinate: file a-h, rank 1-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Create a square from 0-based file/rank indices.
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        if file > 7 || rank > 7 {
            return None;
        }
        Some(Square { file, rank })
    }

    /// Infallible constructor for indices already known to be 0-7.
    pub(crate) const fn from_coords(file: u8, rank: u8) -> Self {
        debug_assert!(file < 8 && rank < 8);
        Square { file, rank }
    }

    /// 0-based file index (a=0 .. h=7).
    pub fn file(&self) -> u8 {
        self.file
    }

    /// 0-based rank index (1=0 .. 8=7).
    pub fn rank(&self) -> u8 {
        self.rank
    }
}

impl FromStr for Square {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() == 2 && bytes[0].is_ascii_lowercase() {
            let file = bytes[0].wrapping_sub(b'a');
            let rank = bytes[1].wrapping_sub(b'1');
            if let Some(square) = Square::new(file, rank) {
                return Ok(square);
            }
        }
        Err(GridError::InvalidSquare(s.to_string()))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", FILES[self.file as usize] as char, self.rank + 1)
    }
}

impl Serialize for Square {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Square {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

/// Piece a pawn may be promoted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceKind {
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl PieceKind {
    /// Single-letter encoding used by the PROMOTE command.
    pub fn letter(&self) -> char {
        match self {
            PieceKind::Queen => 'Q',
            PieceKind::Rook => 'R',
            PieceKind::Bishop => 'B',
            PieceKind::Knight => 'N',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'Q' => Some(PieceKind::Queen),
            'R' => Some(PieceKind::Rook),
            'B' => Some(PieceKind::Bishop),
            'N' => Some(PieceKind::Knight),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display_round_trip() {
        for file in b'a'..=b'h' {
            for rank in b'1'..=b'8' {
                let notation = format!("{}{}", file as char, rank as char);
                let square: Square = notation.parse().unwrap();
                assert_eq!(square.to_string(), notation);
            }
        }
    }

    #[test]
    fn test_parse_indices() {
        let square: Square = "e4".parse().unwrap();
        assert_eq!(square.file(), 4);
        assert_eq!(square.rank(), 3);
    }

    #[test]
    fn test_rejects_bad_notation() {
        for bad in ["", "e", "e9", "i4", "4e", "e44", "E4"] {
            assert_eq!(
                bad.parse::<Square>(),
                Err(GridError::InvalidSquare(bad.to_string()))
            );
        }
    }

    #[test]
    fn test_serde_string_form() {
        let square: Square = serde_json::from_str("\"g7\"").unwrap();
        assert_eq!(square, Square::from_coords(6, 6));
        assert_eq!(serde_json::to_string(&square).unwrap(), "\"g7\"");
        assert!(serde_json::from_str::<Square>("\"z9\"").is_err());
    }

    #[test]
    fn test_piece_letters() {
        assert_eq!(PieceKind::Queen.letter(), 'Q');
        assert_eq!(PieceKind::from_letter('n'), Some(PieceKind::Knight));
        assert_eq!(PieceKind::from_letter('K'), None);
    }
}

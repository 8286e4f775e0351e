//! Stone colors and the board edges each color is trying to join.
//!
//! Black connects the left and right edges (columns `0` and `N-1`), White
//! connects the top and bottom edges (rows `0` and `N-1`). White moves first.

use crate::coord::Coordinate;
use serde::{Deserialize, Serialize};

/// Occupant of a cell, and the identity of a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PlayerColor {
    /// Empty cell / no player
    #[default]
    Unoccupied,
    /// Joins column 0 to column N-1
    Black,
    /// Joins row 0 to row N-1
    White,
}

impl PlayerColor {
    /// The other player. `Unoccupied` has no opponent and maps to itself.
    pub fn opponent(&self) -> Self {
        match self {
            PlayerColor::Black => PlayerColor::White,
            PlayerColor::White => PlayerColor::Black,
            PlayerColor::Unoccupied => PlayerColor::Unoccupied,
        }
    }

    /// Whether this is an actual stone rather than an empty cell
    pub fn is_stone(&self) -> bool {
        !matches!(self, PlayerColor::Unoccupied)
    }

    /// The two goal edges of this color
    pub fn goal_sides(&self) -> Option<[Side; 2]> {
        match self {
            PlayerColor::Black => Some([Side::BlackLeft, Side::BlackRight]),
            PlayerColor::White => Some([Side::WhiteTop, Side::WhiteBottom]),
            PlayerColor::Unoccupied => None,
        }
    }

    /// The goal edge of this color that `loc` touches, if any.
    ///
    /// On a board of size 1 a cell touches both goal edges; the first one wins.
    pub fn goal_side_at(&self, loc: Coordinate, size: usize) -> Option<Side> {
        self.goal_sides()?
            .into_iter()
            .find(|side| side.contains(loc, size))
    }
}

/// One of the four board edges, numbered clockwise from the upper left.
///
/// The numbering matches the order of the edge sentinel group ids: side `k`
/// is represented in the connectivity analysis by id `-(k + 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    /// Column 0
    BlackLeft,
    /// Row N-1
    WhiteBottom,
    /// Column N-1
    BlackRight,
    /// Row 0
    WhiteTop,
}

impl Side {
    /// All sides in index order
    pub const ALL: [Side; 4] = [
        Side::BlackLeft,
        Side::WhiteBottom,
        Side::BlackRight,
        Side::WhiteTop,
    ];

    /// Side from its 0-3 index
    pub fn from_index(index: usize) -> Option<Side> {
        Side::ALL.get(index).copied()
    }

    /// The 0-3 index of this side
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// The color whose goal this edge is
    pub fn owner(&self) -> PlayerColor {
        match self {
            Side::BlackLeft | Side::BlackRight => PlayerColor::Black,
            Side::WhiteTop | Side::WhiteBottom => PlayerColor::White,
        }
    }

    /// Whether `loc` lies on this edge of a `size × size` board
    pub fn contains(&self, loc: Coordinate, size: usize) -> bool {
        let last = size as i32 - 1;
        loc.is_valid(size)
            && match self {
                Side::BlackLeft => loc.col == 0,
                Side::BlackRight => loc.col == last,
                Side::WhiteTop => loc.row == 0,
                Side::WhiteBottom => loc.row == last,
            }
    }
}

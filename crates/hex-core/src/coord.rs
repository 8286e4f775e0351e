//! Cell coordinates on a Hex board.
//!
//! This module provides the foundational coordinate type for the rhombus-shaped board:
//! - `Coordinate`: a (row, column) pair with translation and scaling
//! - The six neighbor offsets of the hex grid
//! - The six bridge shapes and the support cells each one relies on
//!
//! Rows and columns are plain offsets into an N×N rhombus. Because the board is
//! sheared, the six neighbors of `(r, c)` are not the eight of a square grid:
//! `(r-1, c-1)` and `(r+1, c+1)` are *not* adjacent.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// A location on the board.
///
/// Coordinates are signed so that offsets and off-board results can be expressed
/// without wrapping. Any coordinate with a negative row is "nowhere".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Coordinate {
    /// Row (increases downward)
    pub row: i32,
    /// Column (increases to the right)
    pub col: i32,
}

impl Coordinate {
    /// The null location.
    pub const NOWHERE: Coordinate = Coordinate::new(-1, -1);

    /// Create a new coordinate
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// True for the null location (any negative row)
    pub const fn is_nowhere(&self) -> bool {
        self.row < 0
    }

    /// Whether this coordinate lies on a board of the given size
    pub const fn is_valid(&self, size: usize) -> bool {
        let size = size as i32;
        self.row >= 0 && self.col >= 0 && self.row < size && self.col < size
    }

    /// The up to six on-board neighbors of this cell
    pub fn neighbors(&self, size: usize) -> impl Iterator<Item = Coordinate> {
        let origin = *self;
        NEIGHBOR_OFFSETS
            .iter()
            .map(move |offset| origin + *offset)
            .filter(move |loc| loc.is_valid(size))
    }

    /// Whether `other` is one of the six cells touching this one
    pub fn is_adjacent_to(&self, other: &Coordinate) -> bool {
        NEIGHBOR_OFFSETS.contains(&(*other - *self))
    }

    /// Index into a row-major `size × size` array. Caller guarantees validity.
    pub(crate) fn index(&self, size: usize) -> usize {
        self.row as usize * size + self.col as usize
    }
}

impl Add for Coordinate {
    type Output = Coordinate;

    fn add(self, rhs: Coordinate) -> Coordinate {
        Coordinate::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Coordinate {
    type Output = Coordinate;

    fn sub(self, rhs: Coordinate) -> Coordinate {
        Coordinate::new(self.row - rhs.row, self.col - rhs.col)
    }
}

impl Mul<Coordinate> for i32 {
    type Output = Coordinate;

    fn mul(self, rhs: Coordinate) -> Coordinate {
        Coordinate::new(self * rhs.row, self * rhs.col)
    }
}

impl fmt::Display for Coordinate {
    /// Board notation: row letter followed by the 1-based column, e.g. `C11`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nowhere() {
            return write!(f, "--");
        }
        match u8::try_from(self.row).ok().filter(|row| *row < 26) {
            Some(row) => write!(f, "{}{}", char::from(b'A' + row), self.col + 1),
            None => write!(f, "({},{})", self.row, self.col),
        }
    }
}

/// The six neighbor offsets, starting at the lower left and proceeding counterclockwise
pub const NEIGHBOR_OFFSETS: [Coordinate; 6] = [
    Coordinate::new(1, -1),
    Coordinate::new(1, 0),
    Coordinate::new(0, 1),
    Coordinate::new(-1, 1),
    Coordinate::new(-1, 0),
    Coordinate::new(0, -1),
];

/// A bridge: a cell two steps away reachable through either of two shared neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bridge {
    /// Offset of the bridged-to cell
    pub target: Coordinate,
    /// The two cells that must stay empty for the bridge to be unbreakable
    pub supports: [Coordinate; 2],
}

impl Bridge {
    const fn new(target: (i32, i32), first: (i32, i32), second: (i32, i32)) -> Self {
        Self {
            target: Coordinate::new(target.0, target.1),
            supports: [
                Coordinate::new(first.0, first.1),
                Coordinate::new(second.0, second.1),
            ],
        }
    }
}

/// Bridge offsets starting from the upper right and proceeding clockwise
pub const BRIDGE_OFFSETS: [Bridge; 6] = [
    Bridge::new((2, -1), (1, -1), (1, 0)),
    Bridge::new((1, 1), (1, 0), (0, 1)),
    Bridge::new((-1, 2), (0, 1), (-1, 1)),
    Bridge::new((-2, 1), (-1, 1), (-1, 0)),
    Bridge::new((-1, -1), (-1, 0), (0, -1)),
    Bridge::new((1, -2), (0, -1), (1, -1)),
];

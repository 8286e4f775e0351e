//! Errors reported by the engine.
//!
//! Most of these are contract violations rather than recoverable conditions:
//! they mean the caller (or the engine itself) has a bug, and they are returned
//! so the caller can surface them instead of the engine guessing.

use crate::coord::Coordinate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when mutating or analysing a board
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum HexError {
    #[error("board size {0} is outside 1..={}", crate::board::MAX_BOARD_SIZE)]
    InvalidSize(usize),

    #[error("{0} is not on the board")]
    OffBoard(Coordinate),

    #[error("{0} is already occupied")]
    Occupied(Coordinate),

    #[error("{0} is empty")]
    Empty(Coordinate),

    #[error("game is over")]
    GameOver,

    #[error("group bookkeeping requires a stone color, got an unoccupied cell at {0}")]
    UnoccupiedColor(Coordinate),

    #[error("template mask {mask:#012b} should hold exactly one template")]
    AmbiguousTemplate { mask: u16 },

    #[error("sliding window is full ({capacity} slots)")]
    WindowOverflow { capacity: usize },

    #[error("sliding window index {index} out of range (length {len})")]
    WindowIndex { index: usize, len: usize },
}

//! Reversible board changes.
//!
//! Every mutation of a [`Board`](crate::Board) appends one of these to the
//! move log. Each entry records enough to put the board back exactly as it was.

use crate::coord::Coordinate;
use crate::player::PlayerColor;
use serde::{Deserialize, Serialize};

/// One entry of the move log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardChange {
    /// A stone was placed on an empty cell
    Placement {
        location: Coordinate,
        /// Player to move before the change
        previous_player: PlayerColor,
    },
    /// A stone was taken off the board
    Removal {
        location: Coordinate,
        /// Player to move before the change
        previous_player: PlayerColor,
        /// Color of the stone that was removed
        color: PlayerColor,
    },
}

impl BoardChange {
    /// The cell this change touched
    pub fn location(&self) -> Coordinate {
        match self {
            BoardChange::Placement { location, .. } | BoardChange::Removal { location, .. } => {
                *location
            }
        }
    }

    /// The player to move before this change was made
    pub fn previous_player(&self) -> PlayerColor {
        match self {
            BoardChange::Placement { previous_player, .. }
            | BoardChange::Removal { previous_player, .. } => *previous_player,
        }
    }

    pub fn is_placement(&self) -> bool {
        matches!(self, BoardChange::Placement { .. })
    }
}

//! Game board representation.
//!
//! This module contains:
//! - `Grid`: the N×N occupancy array
//! - `Board`: the grid plus turn, winner and an undoable move log
//! - Neighbor and bridge queries
//!
//! The board owns the connectivity [`Analysis`] and keeps it in step with every
//! placement and removal, including the ones replayed by [`Board::undo`].

use crate::analysis::{Analysis, ChainId, StoneOutcome};
use crate::change::BoardChange;
use crate::coord::{Coordinate, BRIDGE_OFFSETS};
use crate::error::HexError;
use crate::player::{PlayerColor, Side};
use crate::scan::{scan_edge, TemplateHit};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Standard tournament size
pub const DEFAULT_BOARD_SIZE: usize = 11;

/// Rows are labelled with a single letter, which caps the size
pub const MAX_BOARD_SIZE: usize = 26;

/// Occupancy of every cell on an N×N board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    cells: Vec<PlayerColor>,
}

impl Grid {
    /// An empty grid. Size is validated by [`Board::new`].
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![PlayerColor::Unoccupied; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Color at `loc`; off-board cells read as unoccupied
    pub fn get(&self, loc: Coordinate) -> PlayerColor {
        if loc.is_valid(self.size) {
            self.cells[loc.index(self.size)]
        } else {
            PlayerColor::Unoccupied
        }
    }

    /// Caller guarantees `loc` is on the board
    fn set(&mut self, loc: Coordinate, color: PlayerColor) {
        let index = loc.index(self.size);
        self.cells[index] = color;
    }

    /// The up to six on-board cells touching `loc`
    pub fn adjacent(&self, loc: Coordinate) -> impl Iterator<Item = Coordinate> {
        loc.neighbors(self.size)
    }

    /// Number of stones of the given color (or empty cells for `Unoccupied`)
    pub fn count(&self, color: PlayerColor) -> usize {
        self.cells.iter().filter(|c| **c == color).count()
    }

    fn clear(&mut self) {
        self.cells.fill(PlayerColor::Unoccupied);
    }
}

/// A Hex board with its move log and connectivity analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    grid: Grid,
    /// Player whose turn it is
    current_player: PlayerColor,
    /// `Unoccupied` until someone joins their two edges
    winner: PlayerColor,
    /// Every change since the last clear, oldest first
    moves: Vec<BoardChange>,
    analysis: Analysis,
}

impl Board {
    /// Create an empty board with White to move
    pub fn new(size: usize) -> Result<Self, HexError> {
        if size == 0 || size > MAX_BOARD_SIZE {
            return Err(HexError::InvalidSize(size));
        }
        Ok(Self::empty(size))
    }

    /// Caller guarantees `size` is in range
    fn empty(size: usize) -> Self {
        Self {
            grid: Grid::new(size),
            current_player: PlayerColor::White,
            winner: PlayerColor::Unoccupied,
            moves: Vec::new(),
            analysis: Analysis::new(size),
        }
    }

    // ==================== Queries ====================

    pub fn size(&self) -> usize {
        self.grid.size()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Color of the stone at `loc`
    pub fn occupant(&self, loc: Coordinate) -> PlayerColor {
        self.grid.get(loc)
    }

    pub fn current_player(&self) -> PlayerColor {
        self.current_player
    }

    /// The winner, or `Unoccupied` while the game is still going
    pub fn winner(&self) -> PlayerColor {
        self.winner
    }

    pub fn has_winner(&self) -> bool {
        self.winner.is_stone()
    }

    /// The move log, oldest first
    pub fn moves(&self) -> &[BoardChange] {
        &self.moves
    }

    /// The connectivity analysis kept in step with this board
    pub fn analysis(&self) -> &Analysis {
        &self.analysis
    }

    /// Group id of the stone at `loc`
    pub fn id_at(&self, loc: Coordinate) -> Option<ChainId> {
        self.analysis.id_at(loc)
    }

    /// Members of the group with the given id
    pub fn group_members(&self, id: ChainId) -> Option<&[Coordinate]> {
        self.analysis.group_members(id)
    }

    /// Number of groups of `color`, or of all groups for `Unoccupied`
    pub fn group_count(&self, color: PlayerColor) -> usize {
        self.analysis.chain_count(&self.grid, color)
    }

    /// Every edge template currently valid along `side`
    pub fn edge_templates(&self, side: Side) -> Result<Vec<TemplateHit>, HexError> {
        scan_edge(self, side)
    }

    /// Edge templates along all four sides, in side order
    pub fn all_edge_templates(&self) -> Result<Vec<(Side, TemplateHit)>, HexError> {
        let mut hits = Vec::new();
        for side in Side::ALL {
            hits.extend(scan_edge(self, side)?.into_iter().map(|hit| (side, hit)));
        }
        Ok(hits)
    }

    // ==================== Geometry ====================

    /// On-board neighbors of `loc`
    pub fn adjacent(&self, loc: Coordinate) -> impl Iterator<Item = Coordinate> {
        self.grid.adjacent(loc)
    }

    pub fn is_adjacent_to(&self, a: Coordinate, b: Coordinate) -> bool {
        a.is_adjacent_to(&b)
    }

    /// Cells the stone at `loc` reaches through an unbroken bridge.
    ///
    /// Both support cells must be empty. The target must be empty, or hold a
    /// stone of the same color when `include_friendly_occupied` is set. An empty
    /// or off-board `loc` has no bridges.
    pub fn bridged_to(&self, loc: Coordinate, include_friendly_occupied: bool) -> Vec<Coordinate> {
        let player = self.occupant(loc);
        if !player.is_stone() {
            return Vec::new();
        }

        BRIDGE_OFFSETS
            .iter()
            .filter_map(|bridge| {
                let target = loc + bridge.target;
                if !target.is_valid(self.size()) {
                    return None;
                }
                let at_target = self.occupant(target);
                let target_ok = at_target == PlayerColor::Unoccupied
                    || (include_friendly_occupied && at_target == player);
                let supports_empty = bridge
                    .supports
                    .iter()
                    .all(|support| self.occupant(loc + *support) == PlayerColor::Unoccupied);
                (target_ok && supports_empty).then_some(target)
            })
            .collect()
    }

    // ==================== Modifiers ====================

    /// Place a stone of `color` at `loc` and record it in the move log.
    ///
    /// The turn does not change; use [`Board::play`] for a normal move.
    pub fn place_stone(
        &mut self,
        loc: Coordinate,
        color: PlayerColor,
    ) -> Result<StoneOutcome, HexError> {
        if !color.is_stone() {
            return Err(HexError::UnoccupiedColor(loc));
        }
        self.check_on_board(loc)?;
        if self.has_winner() {
            return Err(HexError::GameOver);
        }
        if self.occupant(loc).is_stone() {
            return Err(HexError::Occupied(loc));
        }

        let previous_player = self.current_player;
        let outcome = self.put_stone(loc, color)?;
        self.moves.push(BoardChange::Placement {
            location: loc,
            previous_player,
        });
        Ok(outcome)
    }

    /// Place the current player's stone at `loc` and pass the turn
    pub fn play(&mut self, loc: Coordinate) -> Result<StoneOutcome, HexError> {
        let color = self.current_player;
        let outcome = self.place_stone(loc, color)?;
        self.current_player = color.opponent();
        Ok(outcome)
    }

    /// Take the stone at `loc` off the board and record it in the move log.
    ///
    /// Returns the color that was removed. Removal never changes the winner:
    /// once a game is won it stays won until the winning placement is undone
    /// or the board is cleared.
    pub fn remove_stone(&mut self, loc: Coordinate) -> Result<PlayerColor, HexError> {
        self.check_on_board(loc)?;
        let color = self.occupant(loc);
        if !color.is_stone() {
            return Err(HexError::Empty(loc));
        }

        let previous_player = self.current_player;
        self.take_stone(loc, color)?;
        self.moves.push(BoardChange::Removal {
            location: loc,
            previous_player,
            color,
        });
        Ok(color)
    }

    /// Reverse the most recent change.
    ///
    /// Restores the player to move. Undoing a placement also clears the
    /// winner, since stones are only placed while nobody has won; undoing a
    /// removal leaves it alone. Returns the change that was undone, or `None`
    /// when the log is empty.
    pub fn undo(&mut self) -> Result<Option<BoardChange>, HexError> {
        let Some(change) = self.moves.pop() else {
            return Ok(None);
        };
        debug!(?change, "undoing");

        self.current_player = change.previous_player();
        match change {
            BoardChange::Placement { location, .. } => {
                self.winner = PlayerColor::Unoccupied;
                let color = self.occupant(location);
                self.take_stone(location, color)?;
            }
            BoardChange::Removal {
                location, color, ..
            } => {
                self.put_stone(location, color)?;
            }
        }
        Ok(Some(change))
    }

    pub fn set_winner(&mut self, color: PlayerColor) {
        self.winner = color;
    }

    /// Empty the board, the log and the analysis; White to move
    pub fn clear(&mut self) {
        self.grid.clear();
        self.current_player = PlayerColor::White;
        self.winner = PlayerColor::Unoccupied;
        self.moves.clear();
        self.analysis.clear();
    }

    // ==================== Internals ====================

    fn check_on_board(&self, loc: Coordinate) -> Result<(), HexError> {
        if loc.is_valid(self.size()) {
            Ok(())
        } else {
            Err(HexError::OffBoard(loc))
        }
    }

    fn put_stone(&mut self, loc: Coordinate, color: PlayerColor) -> Result<StoneOutcome, HexError> {
        self.grid.set(loc, color);
        let outcome = self.analysis.place_stone(&self.grid, loc, color)?;
        if outcome == StoneOutcome::Won {
            info!(winner = ?color, %loc, "edges connected");
            self.winner = color;
        }
        Ok(outcome)
    }

    fn take_stone(&mut self, loc: Coordinate, color: PlayerColor) -> Result<(), HexError> {
        self.grid.set(loc, PlayerColor::Unoccupied);
        self.analysis.remove_stone(&self.grid, loc, color)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty(DEFAULT_BOARD_SIZE)
    }
}

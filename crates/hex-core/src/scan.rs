//! Single-pass edge template scanner.
//!
//! The scanner walks once along an edge. At every physical column it opens a
//! window slot holding the templates that could start there, then visits the
//! cells of that column from the edge inward. Each cell clears the bits of the
//! templates it rules out in every slot still in flight. When a slot reaches
//! the last column of a surviving template, that template is reported at its
//! connecting stone. Dead slots fall off the front of the window, so the work
//! per column is bounded by the widest template.

use crate::board::Board;
use crate::coord::Coordinate;
use crate::error::HexError;
use crate::player::{PlayerColor, Side};
use crate::template::{
    cell_masks, ending_at, fitting, CellMasks, TemplateKind, MAX_TEMPLATE_DEPTH,
};
use crate::window::SlidingWindow;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Window capacity as a power of two; 16 slots span the widest template
pub const WINDOW_CAPACITY_LOG: u32 = 4;

/// A template found along an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TemplateHit {
    pub kind: TemplateKind,
    /// Cell of the connecting stone
    pub location: Coordinate,
}

/// Board cell at `along` columns from the start of `side` and `depth` rows in.
///
/// Every side is walked so that the same template geometry applies: the left
/// and top edges are mirror images of each other across the main diagonal, and
/// the bottom and right edges are the top and left edges turned half a turn.
pub fn edge_cell(side: Side, along: usize, depth: usize, size: usize) -> Coordinate {
    let last = size as i32 - 1;
    let (along, depth) = (along as i32, depth as i32);
    match side {
        Side::BlackLeft => Coordinate::new(along, depth),
        Side::WhiteTop => Coordinate::new(depth, along),
        Side::WhiteBottom => Coordinate::new(last - depth, last - along),
        Side::BlackRight => Coordinate::new(last - along, last - depth),
    }
}

/// How a cell relates to the player owning the edge being scanned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellClass {
    Friendly,
    Unoccupied,
    Unfriendly,
}

/// State of one edge scan
#[derive(Debug)]
pub struct ScanCursor<'a> {
    board: &'a Board,
    side: Side,
    owner: PlayerColor,
    /// Physical column of the front window slot
    front: usize,
    /// Physical column being scanned
    column: usize,
    /// Depth of the cell being scanned
    depth: usize,
    /// Surviving templates for each start column from `front` to `column`
    window: SlidingWindow<u16>,
    hits: Vec<TemplateHit>,
}

impl<'a> ScanCursor<'a> {
    pub fn new(board: &'a Board, side: Side) -> Self {
        Self {
            board,
            side,
            owner: side.owner(),
            front: 0,
            column: 0,
            depth: 0,
            window: SlidingWindow::new(WINDOW_CAPACITY_LOG),
            hits: Vec::new(),
        }
    }

    /// Whether every column of the edge has been scanned
    pub fn is_done(&self) -> bool {
        self.column >= self.board.size()
    }

    /// Templates reported so far, in the order they were completed
    pub fn hits(&self) -> &[TemplateHit] {
        &self.hits
    }

    pub fn into_hits(self) -> Vec<TemplateHit> {
        self.hits
    }

    /// Scan the next physical column
    pub fn advance(&mut self) -> Result<(), HexError> {
        let size = self.board.size();
        self.window.push(fitting(self.column, size))?;

        for depth in 0..MAX_TEMPLATE_DEPTH.min(size) {
            self.depth = depth;
            match self.classify(self.cell(self.column, depth)) {
                CellClass::Friendly => self.process_friendly()?,
                CellClass::Unoccupied => self.process_unoccupied()?,
                CellClass::Unfriendly => self.process_unfriendly()?,
            }
        }

        self.complete_templates()?;
        while self.window.front() == Some(0) {
            self.window.pop();
            self.front += 1;
        }
        trace!(column = self.column, front = self.front, slots = self.window.len(), "column done");
        self.column += 1;
        Ok(())
    }

    /// A friendly stone is only allowed where a template wants its
    /// connecting stone
    pub fn process_friendly(&mut self) -> Result<(), HexError> {
        self.prune(CellMasks::killed_by_friendly)
    }

    /// An empty cell is fine anywhere except on a connecting stone or a
    /// don't-care cell
    pub fn process_unoccupied(&mut self) -> Result<(), HexError> {
        self.prune(CellMasks::killed_by_unoccupied)
    }

    /// An opponent stone breaks every template covering it, unless it is that
    /// template's don't-care cell
    pub fn process_unfriendly(&mut self) -> Result<(), HexError> {
        self.prune(CellMasks::killed_by_unfriendly)
    }

    /// Template-relative column of the cursor for the given window slot
    fn relative_column(&self, slot: usize) -> usize {
        self.column - (self.front + slot)
    }

    fn prune(&mut self, killed: fn(&CellMasks) -> u16) -> Result<(), HexError> {
        for slot in 0..self.window.len() {
            let Some(masks) = cell_masks(self.relative_column(slot), self.depth) else {
                continue;
            };
            let alive = self.window.get(slot)?;
            let survivors = alive & !killed(masks);
            if survivors != alive {
                trace!(
                    start = self.front + slot,
                    depth = self.depth,
                    killed = alive & !survivors,
                    "templates pruned"
                );
                self.window.set(slot, survivors)?;
            }
        }
        Ok(())
    }

    /// Report every template whose last column was just scanned
    fn complete_templates(&mut self) -> Result<(), HexError> {
        for slot in 0..self.window.len() {
            let alive = self.window.get(slot)?;
            let completed = alive & ending_at(self.relative_column(slot));
            if completed == 0 {
                continue;
            }

            let kind = TemplateKind::from_mask(completed)?;
            let (column, depth) = kind.template().connect_offset();
            let location = self.cell(self.front + slot + column, depth);
            debug!(side = ?self.side, %kind, %location, "edge template");
            self.hits.push(TemplateHit { kind, location });
            self.window.set(slot, alive & !completed)?;
        }
        Ok(())
    }

    fn cell(&self, along: usize, depth: usize) -> Coordinate {
        edge_cell(self.side, along, depth, self.board.size())
    }

    fn classify(&self, loc: Coordinate) -> CellClass {
        match self.board.occupant(loc) {
            PlayerColor::Unoccupied => CellClass::Unoccupied,
            color if color == self.owner => CellClass::Friendly,
            _ => CellClass::Unfriendly,
        }
    }
}

/// Every edge template currently valid along `side`, for the side's owner.
///
/// Templates are listed in the order their last column is reached.
pub fn scan_edge(board: &Board, side: Side) -> Result<Vec<TemplateHit>, HexError> {
    let mut cursor = ScanCursor::new(board, side);
    while !cursor.is_done() {
        cursor.advance()?;
    }
    debug!(?side, hits = cursor.hits().len(), "edge scanned");
    Ok(cursor.into_hits())
}

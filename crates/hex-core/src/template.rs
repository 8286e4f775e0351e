//! The catalog of edge templates.
//!
//! A template is described relative to the edge it connects to. Columns run
//! along the edge and depth runs inward, depth 0 being the edge row itself.
//! Column `c` of a template covers depths `0..column_heights[c]`. The
//! connecting stone sits at the deepest cell of the connecting column and every
//! other covered cell must be empty, except for the optional don't-care cell.
//!
//! ```text
//!  IIIa          IIIb          IIIc
//!  . . . .       . . . .       . . x . .
//!   . . .         . . .         . . . .
//!    O .           . O           . O .
//! ```
//!
//! In the drawing the edge is the top row, `O` is the connecting stone and `x`
//! the don't-care cell. A don't-care cell must hold an opponent stone: when it
//! is empty the smaller template drawn next to it already applies.

use crate::error::HexError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Widest template in the catalog, in columns
pub const MAX_TEMPLATE_WIDTH: usize = 10;

/// Deepest template in the catalog, in rows
pub const MAX_TEMPLATE_DEPTH: usize = 5;

/// The ten recognized edge templates, named after the row of their
/// connecting stone (I is on the edge itself)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum TemplateKind {
    I,
    II,
    IIIa,
    IIIb,
    IIIc,
    IVa,
    IVb,
    IVc,
    Va,
    Vb,
}

impl TemplateKind {
    /// Every kind in catalog order
    pub const ALL: [TemplateKind; 10] = [
        TemplateKind::I,
        TemplateKind::II,
        TemplateKind::IIIa,
        TemplateKind::IIIb,
        TemplateKind::IIIc,
        TemplateKind::IVa,
        TemplateKind::IVb,
        TemplateKind::IVc,
        TemplateKind::Va,
        TemplateKind::Vb,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// This kind's bit in a template survival mask
    pub fn bit(&self) -> u16 {
        1 << self.index()
    }

    pub fn name(&self) -> &'static str {
        match self {
            TemplateKind::I => "I",
            TemplateKind::II => "II",
            TemplateKind::IIIa => "IIIa",
            TemplateKind::IIIb => "IIIb",
            TemplateKind::IIIc => "IIIc",
            TemplateKind::IVa => "IVa",
            TemplateKind::IVb => "IVb",
            TemplateKind::IVc => "IVc",
            TemplateKind::Va => "Va",
            TemplateKind::Vb => "Vb",
        }
    }

    /// The shape of this kind
    pub fn template(&self) -> &'static EdgeTemplate {
        &CATALOG[self.index()]
    }

    /// The single kind whose bit is set in `mask`.
    ///
    /// Anything other than exactly one set bit means the scanner lost track of
    /// its state, which is reported rather than resolved by picking one.
    pub fn from_mask(mask: u16) -> Result<Self, HexError> {
        if mask.count_ones() != 1 {
            return Err(HexError::AmbiguousTemplate { mask });
        }
        TemplateKind::ALL
            .get(mask.trailing_zeros() as usize)
            .copied()
            .ok_or(HexError::AmbiguousTemplate { mask })
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shape of one template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeTemplate {
    pub kind: TemplateKind,
    /// Number of cells in each column, counted inward from the edge
    pub column_heights: &'static [usize],
    /// Column holding the connecting stone
    pub connect_column: usize,
    /// `(depth, column)` of the cell that must hold an opponent stone
    pub dont_care: Option<(usize, usize)>,
}

impl EdgeTemplate {
    /// Number of columns along the edge
    pub fn width(&self) -> usize {
        self.column_heights.len()
    }

    /// Number of rows inward from the edge
    pub fn depth(&self) -> usize {
        self.column_heights.iter().copied().max().unwrap_or(0)
    }

    /// `(column, depth)` of the connecting stone
    pub fn connect_offset(&self) -> (usize, usize) {
        let column = self.connect_column;
        (column, self.column_heights[column] - 1)
    }

    /// Whether the template's footprint includes this cell
    pub fn covers(&self, column: usize, depth: usize) -> bool {
        self.column_heights
            .get(column)
            .is_some_and(|height| depth < *height)
    }

    pub fn is_dont_care(&self, column: usize, depth: usize) -> bool {
        self.dont_care == Some((depth, column))
    }

    /// Whether the template fits on a `size` board when its first column is
    /// at `start` along the edge
    pub fn fits(&self, start: usize, size: usize) -> bool {
        start + self.width() <= size && self.depth() <= size
    }
}

const TEMPLATES: [EdgeTemplate; 10] = [
    EdgeTemplate {
        kind: TemplateKind::I,
        column_heights: &[1],
        connect_column: 0,
        dont_care: None,
    },
    EdgeTemplate {
        kind: TemplateKind::II,
        column_heights: &[2, 1],
        connect_column: 0,
        dont_care: None,
    },
    EdgeTemplate {
        kind: TemplateKind::IIIa,
        column_heights: &[3, 3, 2, 1],
        connect_column: 0,
        dont_care: None,
    },
    EdgeTemplate {
        kind: TemplateKind::IIIb,
        column_heights: &[3, 3, 2, 1],
        connect_column: 1,
        dont_care: None,
    },
    EdgeTemplate {
        kind: TemplateKind::IIIc,
        column_heights: &[3, 3, 3, 2, 1],
        connect_column: 1,
        dont_care: Some((0, 2)),
    },
    EdgeTemplate {
        kind: TemplateKind::IVa,
        column_heights: &[3, 4, 4, 3, 3, 2, 1],
        connect_column: 1,
        dont_care: None,
    },
    EdgeTemplate {
        kind: TemplateKind::IVb,
        column_heights: &[3, 4, 4, 3, 3, 2, 1],
        connect_column: 2,
        dont_care: None,
    },
    EdgeTemplate {
        kind: TemplateKind::IVc,
        column_heights: &[3, 4, 4, 4, 3, 3, 2, 1],
        connect_column: 2,
        dont_care: Some((1, 3)),
    },
    EdgeTemplate {
        kind: TemplateKind::Va,
        column_heights: &[3, 5, 5, 5, 4, 4, 3, 3, 2, 1],
        connect_column: 2,
        dont_care: None,
    },
    EdgeTemplate {
        kind: TemplateKind::Vb,
        column_heights: &[3, 4, 5, 5, 5, 4, 3, 3, 2, 1],
        connect_column: 3,
        dont_care: None,
    },
];

/// All templates, indexed by [`TemplateKind::index`]
pub static CATALOG: [EdgeTemplate; 10] = TEMPLATES;

/// Per-cell template masks used by the scanner.
///
/// For one template-relative `(column, depth)`, each mask holds a bit for
/// every template with that role at that cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct CellMasks {
    /// Templates whose footprint includes the cell, don't-care cells excluded
    pub shape: u16,
    /// Templates whose connecting stone is here
    pub connect: u16,
    /// Templates whose don't-care cell is here
    pub dont_care: u16,
}

impl CellMasks {
    const EMPTY: CellMasks = CellMasks {
        shape: 0,
        connect: 0,
        dont_care: 0,
    };

    /// Templates ruled out by a friendly stone here
    pub fn killed_by_friendly(&self) -> u16 {
        (self.shape & !self.connect) | self.dont_care
    }

    /// Templates ruled out by an empty cell here
    pub fn killed_by_unoccupied(&self) -> u16 {
        self.connect | self.dont_care
    }

    /// Templates ruled out by an opponent stone here
    pub fn killed_by_unfriendly(&self) -> u16 {
        self.shape
    }
}

const fn build_cell_masks() -> [[CellMasks; MAX_TEMPLATE_DEPTH]; MAX_TEMPLATE_WIDTH] {
    let mut table = [[CellMasks::EMPTY; MAX_TEMPLATE_DEPTH]; MAX_TEMPLATE_WIDTH];
    let mut t = 0;
    while t < TEMPLATES.len() {
        let template = TEMPLATES[t];
        let bit = 1u16 << t;
        let mut column = 0;
        while column < template.column_heights.len() {
            let height = template.column_heights[column];
            let mut depth = 0;
            while depth < height {
                let dont_care = match template.dont_care {
                    Some((d, c)) => d == depth && c == column,
                    None => false,
                };
                if dont_care {
                    table[column][depth].dont_care |= bit;
                } else {
                    table[column][depth].shape |= bit;
                }
                if column == template.connect_column && depth + 1 == height {
                    table[column][depth].connect |= bit;
                }
                depth += 1;
            }
            column += 1;
        }
        t += 1;
    }
    table
}

const fn build_ending_masks() -> [u16; MAX_TEMPLATE_WIDTH] {
    let mut masks = [0u16; MAX_TEMPLATE_WIDTH];
    let mut t = 0;
    while t < TEMPLATES.len() {
        masks[TEMPLATES[t].column_heights.len() - 1] |= 1u16 << t;
        t += 1;
    }
    masks
}

static CELL_MASKS: [[CellMasks; MAX_TEMPLATE_DEPTH]; MAX_TEMPLATE_WIDTH] = build_cell_masks();

static ENDING_MASKS: [u16; MAX_TEMPLATE_WIDTH] = build_ending_masks();

/// Masks for a template-relative cell, `None` outside every template
pub(crate) fn cell_masks(column: usize, depth: usize) -> Option<&'static CellMasks> {
    CELL_MASKS.get(column)?.get(depth)
}

/// Templates whose last column is `column`
pub(crate) fn ending_at(column: usize) -> u16 {
    ENDING_MASKS.get(column).copied().unwrap_or(0)
}

/// Templates that fit on a `size` board starting at `start`
pub(crate) fn fitting(start: usize, size: usize) -> u16 {
    CATALOG
        .iter()
        .filter(|template| template.fits(start, size))
        .fold(0, |mask, template| mask | template.kind.bit())
}

//! Hex-core - rules and analysis engine for the game of Hex
//!
//! This crate provides:
//! - A rhombus board with neighbor and bridge geometry
//! - Incremental connectivity analysis with win detection
//! - Recognition of edge templates, the stone patterns that are guaranteed to
//!   connect to an edge whatever the opponent does
//!
//! # Architecture
//!
//! The engine has no rendering or input handling. A presentation layer drives
//! a [`Board`] through placements, removals and undo, and queries it for
//! groups and templates. It can be compiled to:
//! - Native Rust for tools and tests
//! - WebAssembly for a browser front end (`wasm` feature)
//!
//! # Modules
//!
//! - [`coord`]: Cell coordinates, neighbors and bridges
//! - [`player`]: Stone colors and board edges
//! - [`board`]: Grid, move log and undo
//! - [`analysis`]: Group ids, membership and win detection
//! - [`template`]: The edge template catalog
//! - [`scan`]: Single-pass edge template scanner
//! - [`window`]: Fixed-capacity ring buffer used by the scanner

pub mod analysis;
pub mod board;
pub mod change;
pub mod coord;
pub mod error;
pub mod player;
pub mod scan;
pub mod template;
pub mod window;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use analysis::{Analysis, ChainId, StoneOutcome};
pub use board::{Board, Grid, DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE};
pub use change::BoardChange;
pub use coord::{Bridge, Coordinate, BRIDGE_OFFSETS, NEIGHBOR_OFFSETS};
pub use error::HexError;
pub use player::{PlayerColor, Side};
pub use scan::{edge_cell, scan_edge, ScanCursor, TemplateHit};
pub use template::{EdgeTemplate, TemplateKind, CATALOG};
pub use window::SlidingWindow;

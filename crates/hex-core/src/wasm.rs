//! WebAssembly bindings for the Hex engine.
//!
//! This module exposes a board to JavaScript through wasm-bindgen. Structured
//! results are handed over as JSON strings.

use wasm_bindgen::prelude::*;

use crate::board::Board;
use crate::coord::Coordinate;
use crate::error::HexError;
use crate::player::{PlayerColor, Side};

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn to_js(err: HexError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn parse_color(color: &str) -> Result<PlayerColor, JsValue> {
    match color {
        "Black" => Ok(PlayerColor::Black),
        "White" => Ok(PlayerColor::White),
        "Unoccupied" => Ok(PlayerColor::Unoccupied),
        _ => Err(JsValue::from_str(&format!("Unknown color: {}", color))),
    }
}

/// WASM-exposed board wrapper
#[wasm_bindgen]
pub struct WasmBoard {
    board: Board,
}

#[wasm_bindgen]
impl WasmBoard {
    /// Create an empty board of the given size
    #[wasm_bindgen(constructor)]
    pub fn new(size: usize) -> Result<WasmBoard, JsValue> {
        Ok(WasmBoard {
            board: Board::new(size).map_err(to_js)?,
        })
    }

    #[wasm_bindgen(js_name = getSize)]
    pub fn get_size(&self) -> usize {
        self.board.size()
    }

    /// Play the current player's stone; returns true when it wins the game
    pub fn play(&mut self, row: i32, col: i32) -> Result<bool, JsValue> {
        self.board.play(Coordinate::new(row, col)).map_err(to_js)?;
        Ok(self.board.has_winner())
    }

    /// Place a stone of "Black" or "White" without passing the turn
    #[wasm_bindgen(js_name = placeStone)]
    pub fn place_stone(&mut self, row: i32, col: i32, color: &str) -> Result<bool, JsValue> {
        let color = parse_color(color)?;
        self.board
            .place_stone(Coordinate::new(row, col), color)
            .map_err(to_js)?;
        Ok(self.board.has_winner())
    }

    /// Remove a stone, returning its color
    #[wasm_bindgen(js_name = removeStone)]
    pub fn remove_stone(&mut self, row: i32, col: i32) -> Result<String, JsValue> {
        let color = self
            .board
            .remove_stone(Coordinate::new(row, col))
            .map_err(to_js)?;
        Ok(format!("{:?}", color))
    }

    /// Undo the last change; returns false when there was nothing to undo
    pub fn undo(&mut self) -> Result<bool, JsValue> {
        Ok(self.board.undo().map_err(to_js)?.is_some())
    }

    pub fn clear(&mut self) {
        self.board.clear();
    }

    #[wasm_bindgen(js_name = getCurrentPlayer)]
    pub fn get_current_player(&self) -> String {
        format!("{:?}", self.board.current_player())
    }

    /// Get the winner ("Unoccupied" while the game is running)
    #[wasm_bindgen(js_name = getWinner)]
    pub fn get_winner(&self) -> String {
        format!("{:?}", self.board.winner())
    }

    /// Get the color at a cell
    #[wasm_bindgen(js_name = getOccupant)]
    pub fn get_occupant(&self, row: i32, col: i32) -> String {
        format!("{:?}", self.board.occupant(Coordinate::new(row, col)))
    }

    /// Group id of the stone at a cell (if any)
    #[wasm_bindgen(js_name = idAt)]
    pub fn id_at(&self, row: i32, col: i32) -> Option<i32> {
        self.board
            .id_at(Coordinate::new(row, col))
            .map(|id| id.value())
    }

    /// Number of groups of "Black" or "White", or of both for "Unoccupied"
    #[wasm_bindgen(js_name = groupCount)]
    pub fn group_count(&self, color: &str) -> Result<usize, JsValue> {
        let color = parse_color(color)?;
        Ok(self.board.group_count(color))
    }

    /// Members of the group holding the stone at a cell, as a JSON array
    #[wasm_bindgen(js_name = getGroup)]
    pub fn get_group(&self, row: i32, col: i32) -> String {
        let members = self
            .board
            .id_at(Coordinate::new(row, col))
            .and_then(|id| self.board.group_members(id))
            .unwrap_or(&[]);
        serde_json::to_string(members).unwrap_or_else(|_| "[]".to_string())
    }

    /// Cells bridged to from a stone, as a JSON array
    #[wasm_bindgen(js_name = getBridges)]
    pub fn get_bridges(&self, row: i32, col: i32, include_friendly: bool) -> String {
        let bridges = self
            .board
            .bridged_to(Coordinate::new(row, col), include_friendly);
        serde_json::to_string(&bridges).unwrap_or_else(|_| "[]".to_string())
    }

    /// Edge templates along a side (0-3), as a JSON array
    #[wasm_bindgen(js_name = getEdgeTemplates)]
    pub fn get_edge_templates(&self, side: usize) -> Result<String, JsValue> {
        let side = Side::from_index(side)
            .ok_or_else(|| JsValue::from_str(&format!("Invalid side: {}", side)))?;
        let hits = self.board.edge_templates(side).map_err(to_js)?;
        Ok(serde_json::to_string(&hits).unwrap_or_else(|_| "[]".to_string()))
    }

    /// Get the move log as JSON
    #[wasm_bindgen(js_name = getMoves)]
    pub fn get_moves(&self) -> String {
        serde_json::to_string(self.board.moves()).unwrap_or_else(|_| "[]".to_string())
    }

    /// Get the whole board state as JSON
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> String {
        serde_json::to_string(&self.board).unwrap_or_else(|_| "{}".to_string())
    }
}

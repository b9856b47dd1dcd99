use crate::game::{EngineResult, GameState};
use crate::piece::{Color, PieceKind};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
struct SquarePiece {
    kind: String,
    color: String,
}

#[derive(Serialize)]
struct EngineResultJson {
    board: Vec<Vec<Option<SquarePiece>>>,
    active_color: String,
    selected_square: Option<[usize; 2]>,
    white_in_check: bool,
    black_in_check: bool,
    white_checkmate: bool,
    black_checkmate: bool,
}

fn kind_to_string(kind: PieceKind) -> String {
    match kind {
        PieceKind::King => "King".to_string(),
        PieceKind::Queen => "Queen".to_string(),
        PieceKind::Rook => "Rook".to_string(),
        PieceKind::Bishop => "Bishop".to_string(),
        PieceKind::Knight => "Knight".to_string(),
        PieceKind::Pawn => "Pawn".to_string(),
    }
}

fn color_to_string(c: Color) -> String {
    match c {
        Color::White => "White".to_string(),
        Color::Black => "Black".to_string(),
    }
}

fn to_json(result: &EngineResult) -> EngineResultJson {
    let board: Vec<Vec<Option<SquarePiece>>> = (0..8)
        .map(|r| {
            (0..8)
                .map(|c| {
                    result.board[r][c].map(|p| SquarePiece {
                        kind: kind_to_string(p.kind),
                        color: color_to_string(p.color),
                    })
                })
                .collect()
        })
        .collect();

    EngineResultJson {
        board,
        active_color: color_to_string(result.active_color),
        selected_square: result.selected_square.map(|(r, c)| [r, c]),
        white_in_check: result.white_in_check,
        black_in_check: result.black_in_check,
        white_checkmate: result.white_checkmate,
        black_checkmate: result.black_checkmate,
    }
}

fn serialize(result: &EngineResult) -> JsValue {
    serde_wasm_bindgen::to_value(&to_json(result)).unwrap_or(JsValue::NULL)
}

#[wasm_bindgen]
pub struct Game {
    state: GameState,
}

#[wasm_bindgen]
impl Game {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Game {
        Game {
            state: GameState::new(),
        }
    }

    /// Process one tap. Out-of-range coordinates from JS are absorbed here;
    /// the engine itself assumes in-bounds squares.
    pub fn on_square_tapped(&mut self, rank: usize, file: usize) -> JsValue {
        if rank > 7 || file > 7 {
            return serialize(&self.state.snapshot());
        }
        serialize(&self.state.tap(rank, file))
    }

    pub fn restart(&mut self) -> JsValue {
        serialize(&self.state.restart())
    }

    pub fn get_state(&self) -> JsValue {
        serialize(&self.state.snapshot())
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }
}

//! The game state machine: selection handling, move application, castling,
//! promotion, and the derived check/checkmate flags.
//!
//! Failure semantics are silent: every illegal attempt clears the selection
//! and leaves the board untouched. The caller learns nothing beyond "board
//! unchanged" — there is no error type anywhere in the engine.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Square};
use crate::piece::{Color, Piece, PieceKind};
use crate::rules::{is_castling_attempt, is_checkmate, is_king_in_check, is_legal_move};

/// Per-role-slot "has this slot's piece ever moved" flags. Tracking is by
/// slot, not piece identity: any rook leaving a1 burns the white queen-side
/// flag, even if it is a promoted rook that wandered there. Left = file 0
/// (queen side), right = file 7 (king side).
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct CastleFlags {
    pub white_king_moved: bool,
    pub black_king_moved: bool,
    pub white_rook_left_moved: bool,
    pub white_rook_right_moved: bool,
    pub black_rook_left_moved: bool,
    pub black_rook_right_moved: bool,
}

/// Snapshot handed back to the UI after every tap. The UI owns all
/// rendering decisions; the engine only reports position and status.
#[derive(Clone, PartialEq, Serialize, Debug)]
pub struct EngineResult {
    pub board: [[Option<Piece>; 8]; 8],
    pub active_color: Color,
    pub selected_square: Option<Square>,
    pub white_in_check: bool,
    pub black_in_check: bool,
    pub white_checkmate: bool,
    pub black_checkmate: bool,
}

/// One two-player game. Created once, mutated in place by `tap`, reset by
/// `restart`; no persistence beyond the session.
#[derive(Clone, Debug)]
pub struct GameState {
    pub board: Board,
    pub active_color: Color,
    pub selected: Option<Square>,
    pub castle_flags: CastleFlags,
    pub white_in_check: bool,
    pub black_in_check: bool,
    pub white_checkmate: bool,
    pub black_checkmate: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

fn back_rank(color: Color) -> usize {
    match color {
        Color::White => 7,
        Color::Black => 0,
    }
}

/// The farthest rank from a pawn's start: reaching it promotes.
fn promotion_rank(color: Color) -> usize {
    match color {
        Color::White => 0,
        Color::Black => 7,
    }
}

impl GameState {
    pub fn new() -> GameState {
        GameState {
            board: Board::new(),
            active_color: Color::White,
            selected: None,
            castle_flags: CastleFlags::default(),
            white_in_check: false,
            black_in_check: false,
            white_checkmate: false,
            black_checkmate: false,
        }
    }

    /// Process one tap on `(rank, file)`, both in 0..8.
    ///
    /// With nothing selected, a tap on a piece of the active color selects
    /// it; anything else is a no-op. With a selection held, the tap is a
    /// move attempt against the selected square. Either way the full
    /// updated state comes back for the UI to render.
    pub fn tap(&mut self, rank: usize, file: usize) -> EngineResult {
        let sq = (rank, file);
        match self.selected {
            None => {
                if self.board.color_at(sq) == Some(self.active_color) {
                    self.selected = Some(sq);
                }
            }
            Some(from) => self.attempt_move(from, sq),
        }
        self.snapshot()
    }

    /// Reset to the initial position unconditionally. Cannot fail.
    pub fn restart(&mut self) -> EngineResult {
        *self = GameState::new();
        self.snapshot()
    }

    /// A read-only view of the current state, for rendering without input.
    pub fn snapshot(&self) -> EngineResult {
        EngineResult {
            board: self.board.squares,
            active_color: self.active_color,
            selected_square: self.selected,
            white_in_check: self.white_in_check,
            black_in_check: self.black_in_check,
            white_checkmate: self.white_checkmate,
            black_checkmate: self.black_checkmate,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.white_checkmate || self.black_checkmate
    }

    fn attempt_move(&mut self, from: Square, to: Square) {
        // The selection invariant guarantees a piece of the active color
        // here; a missing piece is a stale selection and is just dropped.
        let piece = match self.board.squares[from.0][from.1] {
            Some(p) => p,
            None => {
                self.selected = None;
                return;
            }
        };

        // Tapping one of your own pieces aborts the selection. This also
        // absorbs the degenerate from == to tap.
        if self.board.color_at(to) == Some(piece.color) {
            self.selected = None;
            return;
        }

        if is_castling_attempt(piece, from, to) {
            self.try_castle(piece.color, to.1);
            self.selected = None;
            return;
        }

        if !is_legal_move(piece, from, to, &self.board) {
            self.selected = None;
            return;
        }

        let mut next = self.board.clone();
        next.squares[to.0][to.1] = Some(piece);
        next.squares[from.0][from.1] = None;

        // A pawn reaching the far rank becomes a queen, unconditionally.
        if piece.kind == PieceKind::Pawn && to.0 == promotion_rank(piece.color) {
            next.squares[to.0][to.1] = Some(Piece::new(PieceKind::Queen, piece.color));
        }

        self.note_departure(piece, from);
        self.board = next;
        self.selected = None;
        self.active_color = self.active_color.opposite();
        self.refresh_status();
    }

    /// Castling is a side channel: it bypasses the king movement rule and
    /// checks none of the full legality conditions (rook presence, empty or
    /// safe transit squares). The only gate is the pair of role-slot flags
    /// for that side and direction. Both king and rook are written to their
    /// castled squares on the color's back rank and their home squares are
    /// cleared. A successful castle advances the turn but deliberately does
    /// NOT refresh the check/checkmate flags; the gap is kept in this one
    /// function so it stays visible (see DESIGN.md).
    fn try_castle(&mut self, color: Color, to_file: usize) {
        let kingside = match to_file {
            6 => true,
            2 => false,
            _ => return,
        };

        let flags = &self.castle_flags;
        let already_moved = match (color, kingside) {
            (Color::White, true) => flags.white_king_moved || flags.white_rook_right_moved,
            (Color::White, false) => flags.white_king_moved || flags.white_rook_left_moved,
            (Color::Black, true) => flags.black_king_moved || flags.black_rook_right_moved,
            (Color::Black, false) => flags.black_king_moved || flags.black_rook_left_moved,
        };
        if already_moved {
            return;
        }

        let rank = back_rank(color);
        let (rook_from, rook_to, king_to) = if kingside { (7, 5, 6) } else { (0, 3, 2) };
        self.board.squares[rank][king_to] = Some(Piece::new(PieceKind::King, color));
        self.board.squares[rank][rook_to] = Some(Piece::new(PieceKind::Rook, color));
        self.board.squares[rank][4] = None;
        self.board.squares[rank][rook_from] = None;

        match (color, kingside) {
            (Color::White, true) => {
                self.castle_flags.white_king_moved = true;
                self.castle_flags.white_rook_right_moved = true;
            }
            (Color::White, false) => {
                self.castle_flags.white_king_moved = true;
                self.castle_flags.white_rook_left_moved = true;
            }
            (Color::Black, true) => {
                self.castle_flags.black_king_moved = true;
                self.castle_flags.black_rook_right_moved = true;
            }
            (Color::Black, false) => {
                self.castle_flags.black_king_moved = true;
                self.castle_flags.black_rook_left_moved = true;
            }
        }

        self.active_color = self.active_color.opposite();
    }

    /// Record that a role slot's piece has left its home square.
    fn note_departure(&mut self, piece: Piece, from: Square) {
        match (piece.color, piece.kind, from) {
            (Color::White, PieceKind::King, (7, 4)) => self.castle_flags.white_king_moved = true,
            (Color::White, PieceKind::Rook, (7, 0)) => {
                self.castle_flags.white_rook_left_moved = true
            }
            (Color::White, PieceKind::Rook, (7, 7)) => {
                self.castle_flags.white_rook_right_moved = true
            }
            (Color::Black, PieceKind::King, (0, 4)) => self.castle_flags.black_king_moved = true,
            (Color::Black, PieceKind::Rook, (0, 0)) => {
                self.castle_flags.black_rook_left_moved = true
            }
            (Color::Black, PieceKind::Rook, (0, 7)) => {
                self.castle_flags.black_rook_right_moved = true
            }
            _ => {}
        }
    }

    /// Recompute all four check/checkmate flags from the live board.
    fn refresh_status(&mut self) {
        self.white_in_check = is_king_in_check(Color::White, &self.board);
        self.black_in_check = is_king_in_check(Color::Black, &self.board);
        self.white_checkmate = is_checkmate(Color::White, &self.board);
        self.black_checkmate = is_checkmate(Color::Black, &self.board);
    }
}

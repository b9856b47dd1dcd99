use serde::{Deserialize, Serialize};

use crate::piece::{Color, Piece, PieceKind};

/// A (rank, file) pair, each in 0..8. Callers bounds-check before indexing;
/// the board itself never produces out-of-range squares.
pub type Square = (usize, usize);

/// An 8×8 grid of optional pieces. Row 0 is the black back rank, row 7 the
/// white back rank, so white pawns start on row 6 and advance toward row 0.
///
/// The board is pure data: it is mutated only by the game state machine
/// applying a validated move, and cloned freely by the detectors to build
/// scratch positions that are discarded after one legality query.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct Board {
    pub squares: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// An empty board with no pieces. Useful for setting up test positions.
    pub fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    /// The standard starting position.
    pub fn new() -> Self {
        let mut squares = [[None; 8]; 8];

        // Black pieces (rows 0-1)
        squares[0][0] = Some(Piece::new(PieceKind::Rook, Color::Black));
        squares[0][1] = Some(Piece::new(PieceKind::Knight, Color::Black));
        squares[0][2] = Some(Piece::new(PieceKind::Bishop, Color::Black));
        squares[0][3] = Some(Piece::new(PieceKind::Queen, Color::Black));
        squares[0][4] = Some(Piece::new(PieceKind::King, Color::Black));
        squares[0][5] = Some(Piece::new(PieceKind::Bishop, Color::Black));
        squares[0][6] = Some(Piece::new(PieceKind::Knight, Color::Black));
        squares[0][7] = Some(Piece::new(PieceKind::Rook, Color::Black));
        for sq in &mut squares[1] {
            *sq = Some(Piece::new(PieceKind::Pawn, Color::Black));
        }

        // White pieces (rows 6-7)
        for sq in &mut squares[6] {
            *sq = Some(Piece::new(PieceKind::Pawn, Color::White));
        }
        squares[7][0] = Some(Piece::new(PieceKind::Rook, Color::White));
        squares[7][1] = Some(Piece::new(PieceKind::Knight, Color::White));
        squares[7][2] = Some(Piece::new(PieceKind::Bishop, Color::White));
        squares[7][3] = Some(Piece::new(PieceKind::Queen, Color::White));
        squares[7][4] = Some(Piece::new(PieceKind::King, Color::White));
        squares[7][5] = Some(Piece::new(PieceKind::Bishop, Color::White));
        squares[7][6] = Some(Piece::new(PieceKind::Knight, Color::White));
        squares[7][7] = Some(Piece::new(PieceKind::Rook, Color::White));

        Board { squares }
    }

    /// The color of the piece occupying `sq`, or None if the square is empty.
    /// Every movement rule classifies own/enemy/empty through this one
    /// accessor so that color membership is decided in exactly one place.
    pub fn color_at(&self, sq: Square) -> Option<Color> {
        self.squares[sq.0][sq.1].map(|p| p.color)
    }

    /// Locate the king of the given color. The rules keep exactly one king
    /// of each color on the board in any reachable position, so None is a
    /// defensive fallback rather than a normal state.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        for r in 0..8 {
            for c in 0..8 {
                if let Some(p) = self.squares[r][c] {
                    if p.kind == PieceKind::King && p.color == color {
                        return Some((r, c));
                    }
                }
            }
        }
        None
    }
}

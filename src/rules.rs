//! Pseudo-legal movement rules, the per-kind dispatcher, and the check /
//! checkmate detectors.
//!
//! "Pseudo-legal" means a move obeys the piece's movement pattern and the
//! occupancy rules, without regard for whether it leaves the mover's own
//! king in check. The game state machine layers turn order, selection, and
//! castling on top of these predicates; the detectors reuse them directly,
//! since pseudo-legal attack generation is exactly what "square X is
//! attacked" means.

use crate::board::{Board, Square};
use crate::piece::{Color, Piece, PieceKind};

/// Shared occupancy post-check: a destination is open unless it holds a
/// piece of the mover's own color. An enemy occupant is a capture.
fn destination_open(piece: Piece, to: Square, board: &Board) -> bool {
    board.color_at(to) != Some(piece.color)
}

/// Route a movement-legality query to the rule for the piece's kind.
/// The zero move is rejected here once, so the individual rules can assume
/// `from != to`.
pub fn is_legal_move(piece: Piece, from: Square, to: Square, board: &Board) -> bool {
    if from == to {
        return false;
    }
    match piece.kind {
        PieceKind::Pawn => pawn_move(piece, from, to, board),
        PieceKind::Knight => knight_move(piece, from, to, board),
        PieceKind::Bishop => bishop_move(piece, from, to, board),
        PieceKind::Rook => rook_move(piece, from, to, board),
        PieceKind::Queen => queen_move(piece, from, to, board),
        PieceKind::King => king_move(piece, from, to, board),
    }
}

/// True iff the move looks like a castling attempt: a king staying on its
/// rank and shifting exactly two files. Deliberately nothing more — rook
/// presence, intervening squares, and prior-move flags are the state
/// machine's concern (see `GameState::try_castle`).
pub fn is_castling_attempt(piece: Piece, from: Square, to: Square) -> bool {
    piece.kind == PieceKind::King
        && from.0 == to.0
        && (to.1 as i32 - from.1 as i32).abs() == 2
}

fn pawn_move(piece: Piece, from: Square, to: Square, board: &Board) -> bool {
    // White advances toward rank 0, black toward rank 7.
    let (dir, home_rank): (i32, usize) = match piece.color {
        Color::White => (-1, 6),
        Color::Black => (1, 1),
    };
    let (fr, fc) = (from.0 as i32, from.1 as i32);
    let (tr, tc) = (to.0 as i32, to.1 as i32);

    // Single forward step into an empty square.
    if fc == tc && tr == fr + dir && board.squares[to.0][to.1].is_none() {
        return true;
    }

    // Double step from the home rank; the intermediate square and the
    // destination must both be empty.
    if fc == tc
        && from.0 == home_rank
        && tr == fr + 2 * dir
        && board.squares[(fr + dir) as usize][from.1].is_none()
        && board.squares[to.0][to.1].is_none()
    {
        return true;
    }

    // One-square diagonal step onto an occupied enemy square. A diagonal
    // onto an empty square is illegal (no en-passant).
    if (tc - fc).abs() == 1
        && tr == fr + dir
        && board.color_at(to) == Some(piece.color.opposite())
    {
        return true;
    }

    false
}

fn knight_move(piece: Piece, from: Square, to: Square, board: &Board) -> bool {
    let dr = (to.0 as i32 - from.0 as i32).abs();
    let dc = (to.1 as i32 - from.1 as i32).abs();
    // L-shape only; knights jump, so no path check.
    if !((dr == 2 && dc == 1) || (dr == 1 && dc == 2)) {
        return false;
    }
    destination_open(piece, to, board)
}

fn rook_move(piece: Piece, from: Square, to: Square, board: &Board) -> bool {
    if from.0 != to.0 && from.1 != to.1 {
        return false;
    }

    if from.0 == to.0 {
        // Horizontal: every square strictly between must be empty.
        let step: i32 = if to.1 > from.1 { 1 } else { -1 };
        let mut c = from.1 as i32 + step;
        while c != to.1 as i32 {
            if board.squares[from.0][c as usize].is_some() {
                return false;
            }
            c += step;
        }
    } else {
        let step: i32 = if to.0 > from.0 { 1 } else { -1 };
        let mut r = from.0 as i32 + step;
        while r != to.0 as i32 {
            if board.squares[r as usize][from.1].is_some() {
                return false;
            }
            r += step;
        }
    }

    destination_open(piece, to, board)
}

fn bishop_move(piece: Piece, from: Square, to: Square, board: &Board) -> bool {
    let dr = (to.0 as i32 - from.0 as i32).abs();
    let dc = (to.1 as i32 - from.1 as i32).abs();
    if dr == 0 || dr != dc {
        return false;
    }

    let rstep: i32 = if to.0 > from.0 { 1 } else { -1 };
    let cstep: i32 = if to.1 > from.1 { 1 } else { -1 };
    let mut r = from.0 as i32 + rstep;
    let mut c = from.1 as i32 + cstep;
    // On a true diagonal both deltas are equal, so stopping when either
    // coordinate reaches the target is enough.
    while r != to.0 as i32 && c != to.1 as i32 {
        if board.squares[r as usize][c as usize].is_some() {
            return false;
        }
        r += rstep;
        c += cstep;
    }

    destination_open(piece, to, board)
}

fn queen_move(piece: Piece, from: Square, to: Square, board: &Board) -> bool {
    rook_move(piece, from, to, board) || bishop_move(piece, from, to, board)
}

fn king_move(piece: Piece, from: Square, to: Square, board: &Board) -> bool {
    let dr = (to.0 as i32 - from.0 as i32).abs();
    let dc = (to.1 as i32 - from.1 as i32).abs();
    // One step in any direction. Castling is not handled here; the state
    // machine consults is_castling_attempt before falling back to this rule.
    if dr > 1 || dc > 1 {
        return false;
    }
    destination_open(piece, to, board)
}

/// Whether the king of `color` is currently attacked: scan every opposing
/// piece and ask the dispatcher if it pseudo-legally reaches the king's
/// square. A missing king reports "not in check" — a defensive fallback,
/// not a reachable state under these rules.
pub fn is_king_in_check(color: Color, board: &Board) -> bool {
    let king_sq = match board.find_king(color) {
        Some(sq) => sq,
        None => return false,
    };

    for r in 0..8 {
        for c in 0..8 {
            if let Some(p) = board.squares[r][c] {
                if p.color != color && is_legal_move(p, (r, c), king_sq, board) {
                    return true;
                }
            }
        }
    }

    false
}

/// Whether `color` is checkmated: in check with no pseudo-legal move that
/// leaves its king safe. Every candidate is tried on a scratch clone of the
/// board (captures simply overwrite the destination) and the clone is
/// discarded after one check query. A side with no moves while NOT in check
/// is reported as not checkmate — there is no stalemate detection.
pub fn is_checkmate(color: Color, board: &Board) -> bool {
    if !is_king_in_check(color, board) {
        return false;
    }

    for r in 0..8 {
        for c in 0..8 {
            let piece = match board.squares[r][c] {
                Some(p) if p.color == color => p,
                _ => continue,
            };
            for tr in 0..8 {
                for tc in 0..8 {
                    if (r, c) == (tr, tc) {
                        continue;
                    }
                    if !is_legal_move(piece, (r, c), (tr, tc), board) {
                        continue;
                    }
                    let mut scratch = board.clone();
                    scratch.squares[tr][tc] = Some(piece);
                    scratch.squares[r][c] = None;
                    if !is_king_in_check(color, &scratch) {
                        return false;
                    }
                }
            }
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn piece(kind: PieceKind, color: Color) -> Piece {
        Piece::new(kind, color)
    }

    /// All destinations the dispatcher accepts for the piece sitting on `from`.
    fn reachable(board: &Board, from: Square) -> Vec<Square> {
        let p = board.squares[from.0][from.1].expect("no piece on from-square");
        let mut out = Vec::new();
        for r in 0..8 {
            for c in 0..8 {
                if is_legal_move(p, from, (r, c), board) {
                    out.push((r, c));
                }
            }
        }
        out
    }

    #[test]
    fn every_kind_rejects_zero_move() {
        let kinds = [
            PieceKind::Pawn,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Rook,
            PieceKind::Queen,
            PieceKind::King,
        ];
        for kind in kinds {
            let mut board = Board::empty();
            let p = piece(kind, Color::White);
            board.squares[3][3] = Some(p);
            assert!(
                !is_legal_move(p, (3, 3), (3, 3), &board),
                "{kind:?} accepted a zero move"
            );
        }
    }

    #[test]
    fn white_pawn_single_and_double_step_from_home_rank() {
        let mut board = Board::empty();
        let p = piece(PieceKind::Pawn, Color::White);
        board.squares[6][4] = Some(p);
        assert!(is_legal_move(p, (6, 4), (5, 4), &board));
        assert!(is_legal_move(p, (6, 4), (4, 4), &board));
        // Not from the home rank: no double step.
        board.squares[5][0] = Some(p);
        assert!(!is_legal_move(p, (5, 0), (3, 0), &board));
    }

    #[test]
    fn pawn_double_step_blocked_by_intermediate_piece() {
        let mut board = Board::empty();
        let p = piece(PieceKind::Pawn, Color::White);
        board.squares[6][4] = Some(p);
        board.squares[5][4] = Some(piece(PieceKind::Knight, Color::Black));
        assert!(!is_legal_move(p, (6, 4), (5, 4), &board));
        assert!(!is_legal_move(p, (6, 4), (4, 4), &board));
    }

    #[test]
    fn black_pawn_advances_toward_rank_seven() {
        let mut board = Board::empty();
        let p = piece(PieceKind::Pawn, Color::Black);
        board.squares[1][3] = Some(p);
        assert!(is_legal_move(p, (1, 3), (2, 3), &board));
        assert!(is_legal_move(p, (1, 3), (3, 3), &board));
        assert!(!is_legal_move(p, (1, 3), (0, 3), &board));
    }

    #[test]
    fn pawn_diagonal_requires_enemy_occupant() {
        let mut board = Board::empty();
        let p = piece(PieceKind::Pawn, Color::White);
        board.squares[4][4] = Some(p);
        // Empty diagonal: illegal (no en-passant).
        assert!(!is_legal_move(p, (4, 4), (3, 3), &board));
        // Enemy on the diagonal: capture.
        board.squares[3][3] = Some(piece(PieceKind::Rook, Color::Black));
        assert!(is_legal_move(p, (4, 4), (3, 3), &board));
        // Own piece on the diagonal: illegal.
        board.squares[3][5] = Some(piece(PieceKind::Rook, Color::White));
        assert!(!is_legal_move(p, (4, 4), (3, 5), &board));
        // Forward onto an occupied square: illegal even for an enemy piece.
        board.squares[3][4] = Some(piece(PieceKind::Rook, Color::Black));
        assert!(!is_legal_move(p, (4, 4), (3, 4), &board));
    }

    #[test]
    fn knight_has_eight_moves_from_centre_and_two_from_corner() {
        let mut board = Board::empty();
        board.squares[3][3] = Some(piece(PieceKind::Knight, Color::White));
        assert_eq!(reachable(&board, (3, 3)).len(), 8);

        let mut corner = Board::empty();
        corner.squares[0][0] = Some(piece(PieceKind::Knight, Color::White));
        let mut dests = reachable(&corner, (0, 0));
        dests.sort();
        assert_eq!(dests, vec![(1, 2), (2, 1)]);
    }

    #[test]
    fn knight_jumps_over_blockers() {
        let mut board = Board::empty();
        let n = piece(PieceKind::Knight, Color::White);
        board.squares[3][3] = Some(n);
        // Surround the knight completely; L-destinations stay reachable.
        for dr in -1i32..=1 {
            for dc in -1i32..=1 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let r = (3 + dr) as usize;
                let c = (3 + dc) as usize;
                board.squares[r][c] = Some(piece(PieceKind::Pawn, Color::Black));
            }
        }
        assert_eq!(reachable(&board, (3, 3)).len(), 8);
    }

    #[test]
    fn rook_is_blocked_by_any_intervening_piece() {
        let mut board = Board::empty();
        let r = piece(PieceKind::Rook, Color::White);
        board.squares[7][0] = Some(r);
        assert!(is_legal_move(r, (7, 0), (7, 7), &board));
        assert!(is_legal_move(r, (7, 0), (0, 0), &board));

        for blocker_file in 1..7 {
            let mut blocked = board.clone();
            blocked.squares[7][blocker_file] = Some(piece(PieceKind::Pawn, Color::Black));
            assert!(
                !is_legal_move(r, (7, 0), (7, 7), &blocked),
                "blocker on file {blocker_file} did not block"
            );
            // The blocker itself is capturable.
            assert!(is_legal_move(r, (7, 0), (7, blocker_file), &blocked));
        }
    }

    #[test]
    fn rook_rejects_non_lines() {
        let mut board = Board::empty();
        let r = piece(PieceKind::Rook, Color::White);
        board.squares[4][4] = Some(r);
        assert!(!is_legal_move(r, (4, 4), (3, 3), &board));
        assert!(!is_legal_move(r, (4, 4), (2, 5), &board));
    }

    #[test]
    fn bishop_moves_on_clear_diagonals_only() {
        let mut board = Board::empty();
        let b = piece(PieceKind::Bishop, Color::White);
        board.squares[4][4] = Some(b);
        assert!(is_legal_move(b, (4, 4), (0, 0), &board));
        assert!(is_legal_move(b, (4, 4), (7, 7), &board));
        assert!(is_legal_move(b, (4, 4), (1, 7), &board));
        assert!(!is_legal_move(b, (4, 4), (4, 6), &board));

        board.squares[2][2] = Some(piece(PieceKind::Pawn, Color::Black));
        assert!(!is_legal_move(b, (4, 4), (0, 0), &board));
        assert!(is_legal_move(b, (4, 4), (2, 2), &board));
    }

    #[test]
    fn queen_combines_rook_and_bishop() {
        let mut board = Board::empty();
        let q = piece(PieceKind::Queen, Color::White);
        board.squares[4][4] = Some(q);
        assert!(is_legal_move(q, (4, 4), (4, 0), &board));
        assert!(is_legal_move(q, (4, 4), (0, 4), &board));
        assert!(is_legal_move(q, (4, 4), (1, 1), &board));
        assert!(!is_legal_move(q, (4, 4), (2, 3), &board));

        board.squares[4][2] = Some(piece(PieceKind::Pawn, Color::Black));
        assert!(!is_legal_move(q, (4, 4), (4, 0), &board));
    }

    #[test]
    fn king_moves_one_step_in_any_direction() {
        let mut board = Board::empty();
        let k = piece(PieceKind::King, Color::White);
        board.squares[4][4] = Some(k);
        assert_eq!(reachable(&board, (4, 4)).len(), 8);
        assert!(!is_legal_move(k, (4, 4), (4, 6), &board));
        assert!(!is_legal_move(k, (4, 4), (2, 2), &board));
    }

    #[test]
    fn self_capture_is_illegal_for_every_kind() {
        // Knight with all eight targets occupied by own pieces.
        let mut board = Board::empty();
        let n = piece(PieceKind::Knight, Color::White);
        board.squares[3][3] = Some(n);
        let targets: Vec<Square> = reachable(&board, (3, 3));
        assert_eq!(targets.len(), 8);
        for &(r, c) in &targets {
            board.squares[r][c] = Some(piece(PieceKind::Pawn, Color::White));
        }
        assert!(reachable(&board, (3, 3)).is_empty());

        // Sliding pieces and the king onto an own-occupied destination.
        for kind in [PieceKind::Rook, PieceKind::Bishop, PieceKind::Queen, PieceKind::King] {
            let mut b = Board::empty();
            let p = piece(kind, Color::White);
            b.squares[4][4] = Some(p);
            let to = match kind {
                PieceKind::Bishop => (3, 3),
                PieceKind::King => (3, 4),
                _ => (4, 5),
            };
            b.squares[to.0][to.1] = Some(piece(PieceKind::Pawn, Color::White));
            assert!(!is_legal_move(p, (4, 4), to, &b), "{kind:?} self-captured");
            b.squares[to.0][to.1] = Some(piece(PieceKind::Pawn, Color::Black));
            assert!(is_legal_move(p, (4, 4), to, &b), "{kind:?} refused a capture");
        }
    }

    #[test]
    fn castling_attempt_is_king_two_files_same_rank() {
        let wk = piece(PieceKind::King, Color::White);
        assert!(is_castling_attempt(wk, (7, 4), (7, 6)));
        assert!(is_castling_attempt(wk, (7, 4), (7, 2)));
        let bk = piece(PieceKind::King, Color::Black);
        assert!(is_castling_attempt(bk, (0, 4), (0, 2)));
        // One file, different rank, or not a king: not an attempt.
        assert!(!is_castling_attempt(wk, (7, 4), (7, 5)));
        assert!(!is_castling_attempt(wk, (7, 4), (6, 6)));
        assert!(!is_castling_attempt(
            piece(PieceKind::Queen, Color::White),
            (7, 3),
            (7, 5)
        ));
    }

    #[test]
    fn starting_position_has_no_checks() {
        let board = Board::new();
        assert!(!is_king_in_check(Color::White, &board));
        assert!(!is_king_in_check(Color::Black, &board));
        assert!(!is_checkmate(Color::White, &board));
        assert!(!is_checkmate(Color::Black, &board));
    }

    #[test]
    fn queen_on_open_line_gives_check() {
        let mut board = Board::empty();
        board.squares[0][4] = Some(piece(PieceKind::King, Color::Black));
        board.squares[7][4] = Some(piece(PieceKind::King, Color::White));
        board.squares[4][4] = Some(piece(PieceKind::Queen, Color::White));
        assert!(is_king_in_check(Color::Black, &board));
        // The queen sits between the kings, so white is not in check.
        assert!(!is_king_in_check(Color::White, &board));

        // Interpose a black pawn: the line is blocked.
        board.squares[2][4] = Some(piece(PieceKind::Pawn, Color::Black));
        assert!(!is_king_in_check(Color::Black, &board));
    }

    #[test]
    fn knight_gives_check_over_blockers() {
        let mut board = Board::empty();
        board.squares[0][4] = Some(piece(PieceKind::King, Color::Black));
        board.squares[7][4] = Some(piece(PieceKind::King, Color::White));
        board.squares[2][3] = Some(piece(PieceKind::Knight, Color::White));
        board.squares[1][4] = Some(piece(PieceKind::Pawn, Color::Black));
        assert!(is_king_in_check(Color::Black, &board));
    }

    #[test]
    fn missing_king_reports_not_in_check() {
        let board = Board::empty();
        assert!(!is_king_in_check(Color::White, &board));
    }

    #[test]
    fn back_rank_mate_is_checkmate() {
        // Black king boxed in by its own pawns, white rook on the back rank.
        let mut board = Board::empty();
        board.squares[0][7] = Some(piece(PieceKind::King, Color::Black));
        board.squares[1][6] = Some(piece(PieceKind::Pawn, Color::Black));
        board.squares[1][7] = Some(piece(PieceKind::Pawn, Color::Black));
        board.squares[0][0] = Some(piece(PieceKind::Rook, Color::White));
        board.squares[7][4] = Some(piece(PieceKind::King, Color::White));
        assert!(is_king_in_check(Color::Black, &board));
        assert!(is_checkmate(Color::Black, &board));
    }

    #[test]
    fn defender_that_can_block_refutes_checkmate() {
        // Same back-rank position plus a black rook that can interpose.
        let mut board = Board::empty();
        board.squares[0][7] = Some(piece(PieceKind::King, Color::Black));
        board.squares[1][6] = Some(piece(PieceKind::Pawn, Color::Black));
        board.squares[1][7] = Some(piece(PieceKind::Pawn, Color::Black));
        board.squares[0][0] = Some(piece(PieceKind::Rook, Color::White));
        board.squares[7][4] = Some(piece(PieceKind::King, Color::White));
        board.squares[4][3] = Some(piece(PieceKind::Rook, Color::Black));
        assert!(is_king_in_check(Color::Black, &board));
        assert!(!is_checkmate(Color::Black, &board));
    }

    #[test]
    fn stalemate_like_position_is_not_reported_as_checkmate() {
        // White king cornered with no moves but not in check. The engine
        // has no stalemate detection, so this reads as a playable position.
        let mut board = Board::empty();
        board.squares[7][0] = Some(piece(PieceKind::King, Color::White));
        board.squares[5][1] = Some(piece(PieceKind::Queen, Color::Black));
        board.squares[5][2] = Some(piece(PieceKind::King, Color::Black));
        assert!(!is_king_in_check(Color::White, &board));
        assert!(!is_checkmate(Color::White, &board));
    }
}

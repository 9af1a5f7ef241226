//! Turns pseudo-legal moves into legal ones by trying them.
//!
//! Pins and discovered checks are not expressible as per-piece rules, so a
//! destination is legal exactly when playing it leaves the mover's king
//! unattacked. Every trial is applied to the board and reverted before the
//! next one is evaluated.

use log::debug;

use crate::game_state::{Board, Color, Piece, PieceKind, Square};

use super::attacks::is_in_check;
use super::movegen::{en_passant_square, pseudo_legal_destinations};

/// Mutations made by [`apply`], recorded so [`revert`] can undo them exactly.
#[derive(Debug)]
pub(crate) struct Trial {
    pub(crate) mover: Piece,
    pub(crate) to: Square,
    pub(crate) captured: Option<(usize, Piece)>,
    pub(crate) rook: Option<(Square, Square)>,
}

impl Trial {
    pub(crate) fn is_en_passant(&self) -> bool {
        self.captured.is_some_and(|(_, victim)| victim.square != self.to)
    }
}

/// Plays `from -> to` on the board: removes the captured piece (which for
/// en passant stands beside, not on, `to`), moves the piece, and relocates
/// the rook of a castling king. Neither `has_moved` nor the piece kind is
/// touched.
///
/// # Panics
/// If `from` is empty.
pub(crate) fn apply(
    board: &mut Board,
    from: Square,
    to: Square,
    en_passant: Option<Square>,
) -> Trial {
    let mover = *board
        .piece_at(from)
        .unwrap_or_else(|| panic!("no piece to play on {from}"));

    let captured = if board.is_occupied(to) {
        board.take(to)
    } else if mover.kind == PieceKind::Pawn && from.col() != to.col() && Some(to) == en_passant {
        board.take(en_passant_square(from, to))
    } else {
        None
    };

    board.move_piece(from, to);

    let rook = castling_rook(&mover, to);
    if let Some((rook_from, rook_to)) = rook {
        board.move_piece(rook_from, rook_to);
    }

    Trial {
        mover,
        to,
        captured,
        rook,
    }
}

/// Undoes [`apply`] in reverse order.
pub(crate) fn revert(board: &mut Board, trial: Trial) {
    if let Some((rook_from, rook_to)) = trial.rook {
        board.move_piece(rook_to, rook_from);
    }
    board.move_piece(trial.to, trial.mover.square);
    if let Some((slot, victim)) = trial.captured {
        board.restore(slot, victim);
    }
}

/// Rook relocation `(from, to)` when `king` moving to `to` castles.
fn castling_rook(king: &Piece, to: Square) -> Option<(Square, Square)> {
    if king.kind != PieceKind::King || king.square.col().abs_diff(to.col()) != 2 {
        return None;
    }
    let row = king.square.row();
    let (rook_col, rook_to_col) = if to.col() > king.square.col() {
        (7, 5)
    } else {
        (0, 3)
    };
    Some((Square::new(row, rook_col)?, Square::new(row, rook_to_col)?))
}

/// Whether playing `from -> to` keeps the mover's king out of check.
/// The board is unchanged afterwards.
pub(crate) fn keeps_king_safe(
    board: &mut Board,
    from: Square,
    to: Square,
    en_passant: Option<Square>,
) -> bool {
    let trial = apply(board, from, to, en_passant);
    let safe = !is_in_check(trial.mover.color, board);
    revert(board, trial);
    safe
}

/// Legal destinations of the piece on `from`, or nothing if it is empty.
pub(crate) fn legal_destinations(
    board: &mut Board,
    from: Square,
    en_passant: Option<Square>,
) -> Vec<Square> {
    let Some(piece) = board.piece_at(from).copied() else {
        return Vec::new();
    };

    pseudo_legal_destinations(&piece, board, en_passant)
        .into_iter()
        .filter(|&to| {
            let safe = keeps_king_safe(board, from, to, en_passant);
            if !safe {
                debug!("{from}{to} rejected: leaves {} king attacked", piece.color);
            }
            safe
        })
        .collect()
}

/// True if any piece of `color` has a legal destination.
pub(crate) fn has_legal_move(board: &mut Board, color: Color, en_passant: Option<Square>) -> bool {
    let origins: Vec<Square> = board.pieces_of(color).map(|p| p.square).collect();
    origins
        .into_iter()
        .any(|from| !legal_destinations(board, from, en_passant).is_empty())
}

/// Every legal `(from, to)` for `color`, ordered by origin square.
pub(crate) fn legal_moves(
    board: &mut Board,
    color: Color,
    en_passant: Option<Square>,
) -> Vec<(Square, Square)> {
    let mut origins: Vec<Square> = board.pieces_of(color).map(|p| p.square).collect();
    origins.sort();
    origins
        .into_iter()
        .flat_map(|from| {
            legal_destinations(board, from, en_passant)
                .into_iter()
                .map(move |to| (from, to))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_logic::test_helpers::{board_with, sq, squares};

    fn legal_of(board: &mut Board, square: &str, en_passant: Option<&str>) -> Vec<Square> {
        let mut result = legal_destinations(board, sq(square), en_passant.map(sq));
        result.sort();
        result
    }

    #[test]
    fn test_pinned_piece_cannot_leave_line() {
        let mut board = board_with(&["Ke1", "Be2", "ke8", "re7"]);
        assert!(legal_of(&mut board, "e2", None).is_empty());
    }

    #[test]
    fn test_pinned_rook_moves_along_pin() {
        let mut board = board_with(&["Ke1", "Re2", "ke8", "re7"]);
        assert_eq!(
            legal_of(&mut board, "e2", None),
            squares(&["e7", "e6", "e5", "e4", "e3"])
        );
    }

    #[test]
    fn test_king_cannot_step_into_attack() {
        let mut board = board_with(&["Ke1", "ke8", "rd8"]);
        assert_eq!(legal_of(&mut board, "e1", None), squares(&["e2", "f2", "f1"]));
    }

    #[test]
    fn test_king_cannot_capture_defended_piece() {
        let mut board = board_with(&["Ke1", "ke8", "qe2", "re7"]);
        assert_eq!(legal_of(&mut board, "e1", None), Vec::<Square>::new());
    }

    #[test]
    fn test_check_must_be_answered() {
        let mut board = board_with(&["Ke1", "Ra2", "Nb1", "ke8", "re7"]);
        // Only the rook can interpose; the knight cannot reach the file.
        assert_eq!(legal_of(&mut board, "a2", None), squares(&["e2"]));
        assert!(legal_of(&mut board, "b1", None).is_empty());
    }

    #[test]
    fn test_en_passant_exposing_king_is_illegal() {
        // Capturing removes both pawns from the fifth rank and opens the
        // rook's line to the king.
        let mut board = board_with(&["Ka5", "Pb5", "pc5", "rh5", "ke8"]);
        assert_eq!(legal_of(&mut board, "b5", Some("c6")), squares(&["b6"]));
    }

    #[test]
    fn test_trial_reverts_exactly() {
        let mut board = board_with(&["Ke1", "Rh1", "Ra1", "Pe5", "pd5", "ke8", "qb4", "nf3"]);
        let before = board.clone();

        for from in ["e1", "h1", "a1", "e5"] {
            let piece = *board.piece_at(sq(from)).unwrap();
            for to in pseudo_legal_destinations(&piece, &board, Some(sq("d6"))) {
                let trial = apply(&mut board, sq(from), to, Some(sq("d6")));
                revert(&mut board, trial);
                assert_eq!(board, before, "trial {from}{to} left the board changed");
            }
        }
    }

    #[test]
    fn test_apply_castling_moves_rook() {
        let mut board = board_with(&["Ke1", "Ra1", "ke8"]);
        let trial = apply(&mut board, sq("e1"), sq("c1"), None);

        assert_eq!(trial.rook, Some((sq("a1"), sq("d1"))));
        assert_eq!(board.piece_at(sq("d1")).unwrap().kind, PieceKind::Rook);
        assert_eq!(board.piece_at(sq("c1")).unwrap().kind, PieceKind::King);
        assert!(board.piece_at(sq("a1")).is_none());
    }

    #[test]
    fn test_apply_en_passant_removes_pawn_beside() {
        let mut board = board_with(&["Ke1", "Pe5", "pd5", "ke8"]);
        let trial = apply(&mut board, sq("e5"), sq("d6"), Some(sq("d6")));

        assert!(trial.is_en_passant());
        assert!(board.piece_at(sq("d5")).is_none());
        assert_eq!(board.piece_at(sq("d6")).unwrap().kind, PieceKind::Pawn);
    }

    #[test]
    fn test_no_legal_moves_when_mated() {
        let mut board = board_with(&["Kh1", "Pg2", "Ph2", "ke8", "rd1"]);
        assert!(!has_legal_move(&mut board, Color::White, None));
        assert!(has_legal_move(&mut board, Color::Black, None));
    }

    #[test]
    fn test_standard_position_has_twenty_moves() {
        let mut board = Board::standard();
        assert_eq!(legal_moves(&mut board, Color::White, None).len(), 20);
        assert_eq!(legal_moves(&mut board, Color::Black, None).len(), 20);
    }
}

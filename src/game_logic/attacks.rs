//! Threat detection built on the movement rules.
//!
//! Nothing in here looks at castling, so castling legality can ask about
//! attacked squares without recursing back into itself.

use crate::game_state::{Board, Color, Piece, PieceKind, Square};

use super::movegen::{KING_OFFSETS, pawn_attacks, pseudo_legal_destinations, step};

/// Squares `piece` threatens on the current board.
///
/// Pawns threaten both forward diagonals regardless of occupancy and kings
/// their adjacent squares; every other kind threatens its pseudo-legal
/// destinations.
fn threatened_squares(piece: &Piece, board: &Board) -> Vec<Square> {
    match piece.kind {
        PieceKind::Pawn => pawn_attacks(piece).collect(),
        PieceKind::King => step(piece, board, &KING_OFFSETS),
        _ => pseudo_legal_destinations(piece, board, None),
    }
}

/// True if any piece of color `by` attacks `square`.
pub(crate) fn is_square_attacked(square: Square, by: Color, board: &Board) -> bool {
    board
        .pieces_of(by)
        .any(|piece| threatened_squares(piece, board).contains(&square))
}

/// Squares of every piece of color `by` attacking `square`.
pub(crate) fn attackers(square: Square, by: Color, board: &Board) -> Vec<Square> {
    board
        .pieces_of(by)
        .filter(|piece| threatened_squares(piece, board).contains(&square))
        .map(|piece| piece.square)
        .collect()
}

/// True if `color`'s king is attacked.
///
/// # Panics
/// If `color` has no king. That never happens through play and means the
/// board was corrupted.
pub(crate) fn is_in_check(color: Color, board: &Board) -> bool {
    let king = board
        .king_square(color)
        .unwrap_or_else(|| panic!("{color} king must exist"));
    is_square_attacked(king, color.opponent(), board)
}

//! Per-kind movement rules, ignorant of check.

use crate::game_state::{Board, Piece, PieceKind, Square};

use super::attacks::is_square_attacked;

pub(crate) const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
pub(crate) const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
pub(crate) const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];
pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];
pub(crate) const KING_OFFSETS: [(i8, i8); 8] = QUEEN_DIRECTIONS;

/// File the king starts on.
const KING_COL: u8 = 4;

/// Destinations allowed by `piece`'s movement rule alone.
///
/// Whether the move would leave the mover's own king attacked is not
/// considered here.
pub(crate) fn pseudo_legal_destinations(
    piece: &Piece,
    board: &Board,
    en_passant: Option<Square>,
) -> Vec<Square> {
    match piece.kind {
        PieceKind::Pawn => pawn_destinations(piece, board, en_passant),
        PieceKind::Rook => slide(piece, board, &ROOK_DIRECTIONS),
        PieceKind::Bishop => slide(piece, board, &BISHOP_DIRECTIONS),
        PieceKind::Queen => slide(piece, board, &QUEEN_DIRECTIONS),
        PieceKind::Knight => step(piece, board, &KNIGHT_OFFSETS),
        PieceKind::King => {
            let mut destinations = step(piece, board, &KING_OFFSETS);
            destinations.extend(castling_destinations(piece, board));
            destinations
        }
    }
}

fn pawn_destinations(pawn: &Piece, board: &Board, en_passant: Option<Square>) -> Vec<Square> {
    let mut destinations = Vec::with_capacity(4);
    let forward = pawn.color.forward();

    if let Some(one) = pawn.square.offset(forward, 0)
        && !board.is_occupied(one)
    {
        destinations.push(one);

        if !pawn.has_moved
            && pawn.square.row() == pawn.color.pawn_row()
            && let Some(two) = pawn.square.offset(2 * forward, 0)
            && !board.is_occupied(two)
        {
            destinations.push(two);
        }
    }

    for target in pawn_attacks(pawn) {
        match board.piece_at(target) {
            Some(other) if other.color != pawn.color => destinations.push(target),
            None if Some(target) == en_passant && en_passant_victim(pawn, target, board) => {
                destinations.push(target)
            }
            _ => {}
        }
    }

    destinations
}

/// The two diagonal squares a pawn threatens, whether occupied or not.
pub(crate) fn pawn_attacks(pawn: &Piece) -> impl Iterator<Item = Square> {
    let forward = pawn.color.forward();
    let from = pawn.square;
    [-1, 1]
        .into_iter()
        .filter_map(move |dc| from.offset(forward, dc))
}

/// Square of the pawn that an en passant capture onto `target` removes.
///
/// It stands beside the capturing pawn, behind `target`.
pub(crate) fn en_passant_square(from: Square, target: Square) -> Square {
    Square::new(from.row(), target.col()).expect("en passant victim lies on the board")
}

fn en_passant_victim(pawn: &Piece, target: Square, board: &Board) -> bool {
    board
        .piece_at(en_passant_square(pawn.square, target))
        .is_some_and(|p| p.kind == PieceKind::Pawn && p.color != pawn.color)
}

/// Rays along `directions` until blocked; a blocking enemy piece is
/// included, a friendly one is not.
fn slide(piece: &Piece, board: &Board, directions: &[(i8, i8)]) -> Vec<Square> {
    let mut destinations = Vec::new();
    for &(dr, dc) in directions {
        let mut current = piece.square;
        while let Some(next) = current.offset(dr, dc) {
            match board.piece_at(next) {
                None => destinations.push(next),
                Some(other) => {
                    if other.color != piece.color {
                        destinations.push(next);
                    }
                    break;
                }
            }
            current = next;
        }
    }
    destinations
}

/// Single jumps by each offset onto empty or enemy-occupied squares.
pub(crate) fn step(piece: &Piece, board: &Board, offsets: &[(i8, i8)]) -> Vec<Square> {
    offsets
        .iter()
        .filter_map(|&(dr, dc)| piece.square.offset(dr, dc))
        .filter(|&target| board.piece_at(target).is_none_or(|p| p.color != piece.color))
        .collect()
}

/// Two-file king moves towards an unmoved rook of the same color.
///
/// The king must be unmoved on its starting square, every square between
/// king and rook must be empty, and none of the squares the king stands on
/// or passes through (start and destination included) may be attacked.
fn castling_destinations(king: &Piece, board: &Board) -> Vec<Square> {
    let row = king.color.home_row();
    if king.has_moved || king.square != Square::new(row, KING_COL).expect("home square") {
        return Vec::new();
    }

    let opponent = king.color.opponent();
    if is_square_attacked(king.square, opponent, board) {
        return Vec::new();
    }

    let mut destinations = Vec::with_capacity(2);
    for (rook_col, direction) in [(7u8, 1i8), (0u8, -1i8)] {
        let rook_square = Square::new(row, rook_col).expect("corner square");
        let rook_ready = board.piece_at(rook_square).is_some_and(|rook| {
            rook.kind == PieceKind::Rook && rook.color == king.color && !rook.has_moved
        });
        if !rook_ready {
            continue;
        }

        let (low, high) = (KING_COL.min(rook_col), KING_COL.max(rook_col));
        let path_clear = (low + 1..high)
            .filter_map(|col| Square::new(row, col))
            .all(|sq| !board.is_occupied(sq));
        if !path_clear {
            continue;
        }

        let transit_safe = (1..=2)
            .filter_map(|n| king.square.offset(0, n * direction))
            .all(|sq| !is_square_attacked(sq, opponent, board));
        if transit_safe && let Some(target) = king.square.offset(0, 2 * direction) {
            destinations.push(target);
        }
    }
    destinations
}

//! Commits chosen moves to the game state.

use log::{info, warn};

use crate::game_state::{Color, GameState, GameStatus, PieceKind, Square};

use super::MoveError;
use super::attacks::is_in_check;
use super::legality::{self, apply, revert};

/// What a committed move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub color: Color,
    pub kind: PieceKind,
    pub from: Square,
    pub to: Square,
    pub captured: Option<PieceKind>,
    pub en_passant: bool,
    pub castling: bool,
}

/// Result of finishing a ply, evaluated for the side now to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PlyOutcome {
    pub(crate) check: bool,
    pub(crate) checkmate: bool,
}

/// Commits `from -> to` for the side to move.
///
/// The move must be among the legal destinations of the piece on `from`;
/// anything else is rejected without touching the state. A pawn reaching
/// the last rank leaves the state in [`GameStatus::PromotionPending`] and
/// the turn is not passed.
pub(crate) fn commit(
    state: &mut GameState,
    from: Square,
    to: Square,
) -> Result<(MoveRecord, Option<PlyOutcome>), MoveError> {
    let en_passant = state.en_passant;
    if !legality::legal_destinations(&mut state.board, from, en_passant).contains(&to) {
        return Err(MoveError::IllegalMove { from, to });
    }

    let trial = apply(&mut state.board, from, to, en_passant);
    let mover = trial.mover;
    if is_in_check(mover.color, &state.board) {
        warn!("{from}{to} passed the legality filter but exposes the king; reverted");
        revert(&mut state.board, trial);
        return Err(MoveError::IllegalMove { from, to });
    }

    state.board.set_has_moved(to, true);
    if let Some((_, rook_to)) = trial.rook {
        state.board.set_has_moved(rook_to, true);
    }
    state.selection = None;

    let record = MoveRecord {
        color: mover.color,
        kind: mover.kind,
        from,
        to,
        captured: trial.captured.map(|(_, victim)| victim.kind),
        en_passant: trial.is_en_passant(),
        castling: trial.rook.is_some(),
    };
    info!("{} {}{}{}", mover.color, mover.kind.char(), from, to);

    if mover.kind == PieceKind::Pawn && to.row() == mover.color.promotion_row() {
        info!("{} pawn on {to} awaits promotion", mover.color);
        state.status = GameStatus::PromotionPending {
            color: mover.color,
            square: to,
        };
        return Ok((record, None));
    }

    let double_step = mover.kind == PieceKind::Pawn && from.row().abs_diff(to.row()) == 2;
    let next_en_passant = if double_step {
        from.offset(mover.color.forward(), 0)
    } else {
        None
    };
    Ok((record, Some(finish_ply(state, next_en_passant))))
}

/// Replaces the pending pawn with `choice` and completes the ply.
pub(crate) fn resolve_promotion(
    state: &mut GameState,
    choice: PieceKind,
) -> Result<(Square, PlyOutcome), MoveError> {
    let GameStatus::PromotionPending { square, .. } = state.status else {
        return Err(MoveError::NoPromotionPending);
    };
    if !choice.is_promotion_choice() {
        return Err(MoveError::InvalidPromotion(choice));
    }

    state.board.set_kind(square, choice);
    info!("{square} promoted to {}", choice.char());
    state.status = GameStatus::InProgress;
    Ok((square, finish_ply(state, None)))
}

/// Sets the en passant target, passes the turn, and evaluates check and
/// checkmate for the new side to move.
fn finish_ply(state: &mut GameState, next_en_passant: Option<Square>) -> PlyOutcome {
    state.en_passant = next_en_passant;
    state.turn = state.turn.opponent();

    let to_move = state.turn;
    let check = is_in_check(to_move, &state.board);
    let can_move = legality::has_legal_move(&mut state.board, to_move, state.en_passant);

    if check && !can_move {
        let winner = to_move.opponent();
        info!("checkmate, {winner} wins");
        state.status = GameStatus::Checkmate { winner };
    } else if check {
        info!("{to_move} is in check");
    } else if !can_move {
        // Stalemate is not scored; the game stays in progress.
        warn!("{to_move} has no legal move but is not in check");
    }

    PlyOutcome {
        check,
        checkmate: check && !can_move,
    }
}

use std::collections::VecDeque;
use std::str::FromStr;

use thiserror::Error;

use crate::StatsRecorder;
use crate::game_logic::{GameEngine, MoveError, MoveOutcome};
use crate::game_state::{PieceKind, Square};

/// Error when parsing a move script.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid move notation: '{0}'")]
pub struct ScriptError(String);

/// One scripted move: origin, destination and, for promotions, the kind to
/// promote to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptedMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

/// Parse coordinate notation like "e2e4" or "e7e8q".
impl FromStr for ScriptedMove {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || ScriptError(s.to_owned());
        if !s.is_ascii() || !(4..=5).contains(&s.len()) {
            return Err(error());
        }

        let from = s[0..2].parse().map_err(|_| error())?;
        let to = s[2..4].parse().map_err(|_| error())?;
        let promotion = match s[4..].chars().next() {
            None => None,
            Some(c) => Some(
                PieceKind::from_char(c)
                    .filter(|kind| kind.is_promotion_choice())
                    .ok_or_else(error)?,
            ),
        };
        Ok(Self {
            from,
            to,
            promotion,
        })
    }
}

/// A scripted player that feeds moves into a [`GameEngine`].
///
/// Stands in for a human or bot front end in tests and in the terminal.
/// New script can be appended at any time for interactive use.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPlayer {
    pending: VecDeque<ScriptedMove>,
}

impl ScriptedPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and queue additional moves.
    ///
    /// Moves are separated by whitespace, e.g. `"e2e4 e7e5 g1f3"`. A fifth
    /// letter picks the promotion kind (`"b7b8n"`); without one a promoting
    /// pawn becomes a queen. Nothing is queued if any move is invalid.
    pub fn push_script(&mut self, script: &str) -> Result<(), ScriptError> {
        let moves = script
            .split_whitespace()
            .map(str::parse)
            .collect::<Result<Vec<ScriptedMove>, _>>()?;
        self.pending.extend(moves);
        Ok(())
    }

    #[inline]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Plays the next queued move, resolving its promotion if needed.
    /// Returns None if no moves are pending.
    pub fn play_next<S: StatsRecorder>(
        &mut self,
        engine: &mut GameEngine<S>,
    ) -> Option<Result<MoveOutcome, MoveError>> {
        let mv = self.pending.pop_front()?;
        let result = engine.attempt_move(mv.from, mv.to).and_then(|outcome| {
            if outcome.promotion_required {
                engine.resolve_promotion(mv.promotion.unwrap_or(PieceKind::Queen))?;
            }
            Ok(outcome)
        });
        Some(result)
    }

    /// Plays every queued move, stopping at the first rejected one.
    ///
    /// Returns how many moves were played.
    pub fn drain<S: StatsRecorder>(
        &mut self,
        engine: &mut GameEngine<S>,
    ) -> Result<usize, MoveError> {
        let mut played = 0;
        while let Some(result) = self.play_next(engine) {
            result?;
            played += 1;
        }
        Ok(played)
    }
}

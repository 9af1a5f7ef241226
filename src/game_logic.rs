use log::{debug, info, warn};
use thiserror::Error;

use crate::events::GameEvent;
use crate::feedback::{CheckInfo, FeedbackSource};
use crate::game_state::{Board, Color, GameState, GameStatus, Piece, PieceKind, Square};
use crate::{GameObserver, StatsRecorder};

mod attacks;
mod executor;
mod legality;
mod movegen;

pub use executor::MoveRecord;

/// Name under which finished games are reported to the statistics recorder.
pub const GAME_KIND: &str = "chess";

/// A command the engine refused. The state is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("the game is over")]
    GameOver,
    #[error("a promotion choice is pending")]
    PromotionPending,
    #[error("no promotion is pending")]
    NoPromotionPending,
    #[error("no piece on {0}")]
    NoPiece(Square),
    #[error("piece on {0} does not belong to the side to move")]
    WrongTurn(Square),
    #[error("{from}{to} is not a legal move")]
    IllegalMove { from: Square, to: Square },
    #[error("cannot promote to {0:?}")]
    InvalidPromotion(PieceKind),
}

/// Result of an accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub record: MoveRecord,
    /// The moved pawn waits for [`GameEngine::resolve_promotion`].
    pub promotion_required: bool,
}

/// Turn-based rules engine owning the authoritative game state.
///
/// Commands come from the UI or a bot one at a time; collaborators are
/// notified through [`GameObserver`]s and, once per finished game, the
/// [`StatsRecorder`].
pub struct GameEngine<S = ()> {
    state: GameState,

    /// Legal destinations of the current selection.
    destinations: Vec<Square>,

    observers: Vec<Box<dyn GameObserver>>,
    stats: S,
}

impl GameEngine {
    #[inline]
    pub fn new() -> Self {
        Self::from_state(GameState::standard())
    }

    /// Creates a GameEngine from an arbitrary position.
    pub fn from_board(board: Board, turn: Color) -> Self {
        Self::from_state(GameState::new(board, turn))
    }

    fn from_state(state: GameState) -> Self {
        Self {
            state,
            destinations: Vec::new(),
            observers: Vec::new(),
            stats: (),
        }
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: StatsRecorder> GameEngine<S> {
    /// Reports finished games to `stats`.
    pub fn with_stats<T: StatsRecorder>(self, stats: T) -> GameEngine<T> {
        GameEngine {
            state: self.state,
            destinations: self.destinations,
            observers: self.observers,
            stats,
        }
    }

    #[inline]
    pub fn stats(&self) -> &S {
        &self.stats
    }

    /// Registers an observer for all subsequent events.
    pub fn subscribe(&mut self, observer: impl GameObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn emit(&mut self, event: GameEvent) {
        for observer in &mut self.observers {
            observer.on_event(&event);
        }
    }

    /// Selects the piece on `square` and returns its legal destinations.
    ///
    /// Anything other than a piece of the side to move in a running game
    /// clears the selection and returns no destinations.
    pub fn select_piece(&mut self, square: Square) -> &[Square] {
        let selectable = self.state.status == GameStatus::InProgress
            && self
                .state
                .board
                .piece_at(square)
                .is_some_and(|p| p.color == self.state.turn);

        if selectable {
            let mut destinations =
                legality::legal_destinations(&mut self.state.board, square, self.state.en_passant);
            destinations.sort();
            debug!("selected {square}: {} destinations", destinations.len());
            self.state.selection = Some(square);
            self.destinations = destinations;
        } else {
            self.state.selection = None;
            self.destinations.clear();
        }

        self.emit(GameEvent::SelectionChanged {
            selection: self.state.selection,
            destinations: self.destinations.clone(),
        });
        &self.destinations
    }

    /// Abandons the current selection. Does nothing without one.
    pub fn clear_selection(&mut self) {
        if self.state.selection.take().is_some() {
            self.destinations.clear();
            self.emit(GameEvent::SelectionChanged {
                selection: None,
                destinations: Vec::new(),
            });
        }
    }

    /// Plays `from -> to` for the side to move.
    pub fn attempt_move(&mut self, from: Square, to: Square) -> Result<MoveOutcome, MoveError> {
        if let Err(err) = self.check_move_command(from) {
            warn!("rejected {from}{to}: {err}");
            return Err(err);
        }

        let had_selection = self.state.selection.is_some();
        let (record, outcome) = executor::commit(&mut self.state, from, to).inspect_err(|err| {
            warn!("rejected {from}{to}: {err}");
        })?;
        self.destinations.clear();
        if had_selection {
            self.emit(GameEvent::SelectionChanged {
                selection: None,
                destinations: Vec::new(),
            });
        }
        self.emit(GameEvent::MoveCommitted(record));

        match outcome {
            Some(outcome) => self.announce(outcome),
            None => self.emit(GameEvent::PromotionRequired { square: to }),
        }

        Ok(MoveOutcome {
            record,
            promotion_required: outcome.is_none(),
        })
    }

    fn check_move_command(&self, from: Square) -> Result<(), MoveError> {
        match self.state.status {
            GameStatus::Checkmate { .. } => return Err(MoveError::GameOver),
            GameStatus::PromotionPending { .. } => return Err(MoveError::PromotionPending),
            GameStatus::InProgress => {}
        }
        let piece = self
            .state
            .board
            .piece_at(from)
            .ok_or(MoveError::NoPiece(from))?;
        if piece.color != self.state.turn {
            return Err(MoveError::WrongTurn(from));
        }
        Ok(())
    }

    /// Completes a pending promotion with `choice`.
    pub fn resolve_promotion(&mut self, choice: PieceKind) -> Result<(), MoveError> {
        let (square, outcome) = executor::resolve_promotion(&mut self.state, choice)
            .inspect_err(|err| warn!("rejected promotion to {choice:?}: {err}"))?;
        self.emit(GameEvent::Promoted {
            square,
            kind: choice,
        });
        self.announce(outcome);
        Ok(())
    }

    /// Publishes check and game over, and reports a finished game.
    fn announce(&mut self, outcome: executor::PlyOutcome) {
        if outcome.check {
            let color = self.state.turn;
            let king = self
                .state
                .board
                .king_square(color)
                .expect("king must exist");
            self.emit(GameEvent::CheckAsserted { color, king });
        }

        if let GameStatus::Checkmate { winner } = self.state.status {
            self.emit(GameEvent::GameOver { winner });
            if let Err(err) = self.stats.record_game(GAME_KIND, winner) {
                warn!("failed to record finished game: {err}");
            }
        }
    }

    /// Discards the game and starts over from the standard layout.
    pub fn reset(&mut self) -> &GameState {
        info!("new game");
        let had_selection = self.state.selection.is_some();
        self.state = GameState::standard();
        self.destinations.clear();
        if had_selection {
            self.emit(GameEvent::SelectionChanged {
                selection: None,
                destinations: Vec::new(),
            });
        }
        self.emit(GameEvent::Reset);
        &self.state
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    #[inline]
    pub fn current_turn(&self) -> Color {
        self.state.turn
    }

    /// Get the piece at a given square, if any
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.state.board.piece_at(square)
    }

    /// Every piece keyed by its square.
    pub fn snapshot(&self) -> Vec<(Square, Piece)> {
        self.state.board.snapshot()
    }

    #[inline]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.state.en_passant
    }

    /// The winner once the game is over.
    #[inline]
    pub fn winner(&self) -> Option<Color> {
        self.state.winner()
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        attacks::is_in_check(color, &self.state.board)
    }

    /// Squares of the pieces giving check to `color`.
    pub fn checkers(&self, color: Color) -> Vec<Square> {
        match self.state.board.king_square(color) {
            Some(king) => attacks::attackers(king, color.opponent(), &self.state.board),
            None => Vec::new(),
        }
    }

    /// In check with no legal move.
    pub fn is_checkmate(&self, color: Color) -> bool {
        // The en passant target is only usable by the side to move.
        let en_passant = self.state.en_passant.filter(|_| color == self.state.turn);
        let mut board = self.state.board.clone();
        attacks::is_in_check(color, &board)
            && !legality::has_legal_move(&mut board, color, en_passant)
    }

    /// Legal destinations of the piece on `square` without selecting it.
    pub fn legal_destinations(&self, square: Square) -> Vec<Square> {
        if self.state.status != GameStatus::InProgress {
            return Vec::new();
        }
        let mut board = self.state.board.clone();
        let mut destinations =
            legality::legal_destinations(&mut board, square, self.state.en_passant);
        destinations.sort();
        destinations
    }

    /// Every legal move of the side to move.
    pub fn legal_moves(&self) -> Vec<(Square, Square)> {
        if self.state.status != GameStatus::InProgress {
            return Vec::new();
        }
        let mut board = self.state.board.clone();
        legality::legal_moves(&mut board, self.state.turn, self.state.en_passant)
    }
}

impl<S> FeedbackSource for GameEngine<S> {
    fn selection(&self) -> Option<Square> {
        self.state.selection
    }

    fn destinations(&self) -> &[Square] {
        &self.destinations
    }

    fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.state.board.piece_at(square)
    }

    fn en_passant_target(&self) -> Option<Square> {
        self.state.en_passant
    }

    fn check_info(&self) -> Option<CheckInfo> {
        let color = self.state.turn;
        let king = self.state.board.king_square(color)?;
        let checkers = attacks::attackers(king, color.opponent(), &self.state.board);
        (!checkers.is_empty()).then_some(CheckInfo {
            king_square: king,
            checkers,
        })
    }
}

impl<S> std::fmt::Debug for GameEngine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("turn", &self.state.turn)
            .field("status", &self.state.status)
            .field("en_passant", &self.state.en_passant)
            .field("board", &self.state.board)
            .finish()
    }
}

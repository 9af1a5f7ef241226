use crate::game_state::{Piece, PieceKind, Square};

/// Type of visual feedback for an individual square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SquareFeedback {
    /// Legal destination of the selected piece
    Destination,
    /// Moving here captures an opponent piece
    Capture,
    /// The selected piece
    Origin,
    /// King of the side to move, currently attacked
    Check,
    /// Piece giving check
    Checker,
}

/// Contains the set of squares and their associated feedback types for the current board state.
///
/// `BoardFeedback` is computed by `compute_feedback()` and consumed by a
/// [`crate::BoardDisplay`] to provide visual cues to the player. It maps
/// squares to their feedback (selected piece, destinations, captures, check)
/// and is the primary interface between the game logic and rendering.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardFeedback {
    squares: Vec<(Square, SquareFeedback)>,
}

impl BoardFeedback {
    /// Create empty feedback (no highlights)
    #[inline]
    pub const fn new() -> Self {
        Self {
            squares: Vec::new(),
        }
    }

    /// Get all square feedback entries
    #[inline]
    pub fn squares(&self) -> &[(Square, SquareFeedback)] {
        &self.squares
    }

    /// Get feedback for a specific square, if any
    #[inline]
    pub fn get(&self, square: Square) -> Option<SquareFeedback> {
        self.squares
            .iter()
            .find(|(sq, _)| *sq == square)
            .map(|(_, feedback)| *feedback)
    }

    /// Set feedback for a square, replacing any earlier entry
    pub fn set(&mut self, square: Square, feedback: SquareFeedback) {
        match self.squares.iter_mut().find(|(sq, _)| *sq == square) {
            Some(entry) => entry.1 = feedback,
            None => self.squares.push((square, feedback)),
        }
    }

    /// Returns true if there are no feedback squares to display.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }
}

impl From<Vec<(Square, SquareFeedback)>> for BoardFeedback {
    fn from(squares: Vec<(Square, SquareFeedback)>) -> Self {
        Self { squares }
    }
}

/// The attacked king of the side to move and the pieces attacking it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckInfo {
    pub king_square: Square,
    pub checkers: Vec<Square>,
}

/// Game state information needed to compute feedback
///
/// This trait defines what the feedback system needs from the game engine.
pub trait FeedbackSource {
    /// Square of the currently selected piece
    fn selection(&self) -> Option<Square>;

    /// Legal destinations of the selected piece
    fn destinations(&self) -> &[Square];

    fn piece_at(&self, square: Square) -> Option<&Piece>;

    fn en_passant_target(&self) -> Option<Square>;

    /// Check information for the side to move, if it is in check
    fn check_info(&self) -> Option<CheckInfo>;
}

/// Compute visual feedback based on current game state.
///
/// Check highlights come first so that a selection drawn on top of them
/// (the checked king itself, or a capture of the checker) takes precedence.
pub fn compute_feedback(source: &impl FeedbackSource) -> BoardFeedback {
    let mut feedback = BoardFeedback::new();

    if let Some(check) = source.check_info() {
        feedback.set(check.king_square, SquareFeedback::Check);
        for checker in check.checkers {
            feedback.set(checker, SquareFeedback::Checker);
        }
    }

    if let Some(from) = source.selection() {
        feedback.set(from, SquareFeedback::Origin);
        for &to in source.destinations() {
            feedback.set(to, classify_destination(source, from, to));
        }
    }

    feedback
}

/// Classify a destination as either a capture or a quiet move
fn classify_destination(source: &impl FeedbackSource, from: Square, to: Square) -> SquareFeedback {
    let captures_en_passant = Some(to) == source.en_passant_target()
        && source
            .piece_at(from)
            .is_some_and(|p| p.kind == PieceKind::Pawn && from.col() != to.col());

    if source.piece_at(to).is_some() || captures_en_passant {
        SquareFeedback::Capture
    } else {
        SquareFeedback::Destination
    }
}

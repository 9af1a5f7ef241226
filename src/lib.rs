use game_state::{Board, Color};

pub mod events;
pub mod feedback;
pub mod game_logic;
pub mod game_state;
pub mod mock;
pub mod stats;

/// Trait for receiving game notifications.
///
/// Rendering and sound layers subscribe through this to selection changes,
/// committed moves, check and game over, without owning any game data.
pub trait GameObserver {
    fn on_event(&mut self, event: &events::GameEvent);
}

/// Trait for the statistics store that is told about every finished game.
///
/// Called exactly once per game, when it ends in checkmate.
pub trait StatsRecorder {
    /// Error type for recording failures.
    type Error: std::fmt::Debug + std::fmt::Display;

    /// Record that a game of `game_kind` was won by `winner`.
    fn record_game(&mut self, game_kind: &str, winner: Color) -> Result<(), Self::Error>;
}

/// Trait for displaying the board and its feedback to the player.
///
/// Abstracts over terminal rendering and any other front end, providing a
/// uniform interface for the output side of the game loop.
pub trait BoardDisplay {
    /// Error type for display update failures.
    type Error: std::fmt::Debug + std::fmt::Display;

    /// Show the given board with feedback highlights.
    ///
    /// Implementations map [`feedback::SquareFeedback`] variants
    /// to front-end specific output (terminal colors, etc.).
    fn show(&mut self, board: &Board, feedback: &feedback::BoardFeedback)
    -> Result<(), Self::Error>;
}

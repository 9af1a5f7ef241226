use super::{Board, Color, Square};

/// Where the game stands between commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Waiting for the side to move.
    InProgress,
    /// A pawn of `color` reached the last rank on `square` and waits for
    /// its promotion choice. Ordinary moves are rejected meanwhile.
    PromotionPending { color: Color, square: Square },
    /// Terminal. Only a reset leaves this state.
    Checkmate { winner: Color },
}

/// Complete, authoritative state of one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) turn: Color,
    pub(crate) selection: Option<Square>,
    pub(crate) en_passant: Option<Square>,
    pub(crate) status: GameStatus,
}

impl GameState {
    /// A game starting from `board` with `turn` to move.
    pub fn new(board: Board, turn: Color) -> Self {
        Self {
            board,
            turn,
            selection: None,
            en_passant: None,
            status: GameStatus::InProgress,
        }
    }

    /// Standard layout, White to move.
    pub fn standard() -> Self {
        Self::new(Board::standard(), Color::White)
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    #[inline]
    pub fn selection(&self) -> Option<Square> {
        self.selection
    }

    /// Square a pawn may capture onto en passant during this ply only.
    #[inline]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Square of the pawn awaiting promotion, if any.
    pub fn promotion_pending(&self) -> Option<Square> {
        match self.status {
            GameStatus::PromotionPending { square, .. } => Some(square),
            _ => None,
        }
    }

    pub fn winner(&self) -> Option<Color> {
        match self.status {
            GameStatus::Checkmate { winner } => Some(winner),
            _ => None,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::standard()
    }
}

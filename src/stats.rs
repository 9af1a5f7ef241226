use std::convert::Infallible;

use log::info;
use thiserror::Error;

use crate::StatsRecorder;
use crate::game_logic::GAME_KIND;
use crate::game_state::Color;

/// Games without a statistics store record nothing.
impl StatsRecorder for () {
    type Error = Infallible;

    fn record_game(&mut self, _game_kind: &str, _winner: Color) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Error when recording a finished game.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TallyError {
    #[error("unknown game kind '{0}'")]
    UnknownGame(String),
}

/// In-memory win counters for finished chess games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchTally {
    white_won: u32,
    black_won: u32,
}

impl MatchTally {
    #[inline]
    pub fn white_won(&self) -> u32 {
        self.white_won
    }

    #[inline]
    pub fn black_won(&self) -> u32 {
        self.black_won
    }

    /// Total games recorded.
    #[inline]
    pub fn games(&self) -> u32 {
        self.white_won + self.black_won
    }
}

impl StatsRecorder for MatchTally {
    type Error = TallyError;

    fn record_game(&mut self, game_kind: &str, winner: Color) -> Result<(), Self::Error> {
        if game_kind != GAME_KIND {
            return Err(TallyError::UnknownGame(game_kind.to_owned()));
        }
        match winner {
            Color::White => self.white_won += 1,
            Color::Black => self.black_won += 1,
        }
        info!(
            "recorded {winner} win ({} white, {} black)",
            self.white_won, self.black_won
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_counts_each_color() {
        let mut tally = MatchTally::default();
        tally.record_game(GAME_KIND, Color::White).unwrap();
        tally.record_game(GAME_KIND, Color::Black).unwrap();
        tally.record_game(GAME_KIND, Color::White).unwrap();

        assert_eq!(tally.white_won(), 2);
        assert_eq!(tally.black_won(), 1);
        assert_eq!(tally.games(), 3);
    }

    #[test]
    fn test_tally_rejects_other_games() {
        let mut tally = MatchTally::default();
        assert_eq!(
            tally.record_game("snake", Color::White),
            Err(TallyError::UnknownGame("snake".to_string()))
        );
        assert_eq!(tally.games(), 0);
    }
}

use std::cell::RefCell;
use std::rc::Rc;

use crate::GameObserver;
use crate::game_logic::MoveRecord;
use crate::game_state::{Color, PieceKind, Square};

/// State changes published by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// The selected piece changed or was cleared.
    SelectionChanged {
        selection: Option<Square>,
        destinations: Vec<Square>,
    },
    MoveCommitted(MoveRecord),
    /// A pawn reached the last rank; the engine waits for a choice.
    PromotionRequired { square: Square },
    Promoted { square: Square, kind: PieceKind },
    /// `color`'s king on `king` is attacked after the last ply.
    CheckAsserted { color: Color, king: Square },
    GameOver { winner: Color },
    Reset,
}

impl<F> GameObserver for F
where
    F: FnMut(&GameEvent),
{
    fn on_event(&mut self, event: &GameEvent) {
        self(event)
    }
}

/// Observer that keeps every event it receives.
///
/// Clones share the same log, so one clone can be subscribed while another
/// is inspected.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<GameEvent>>>,
}

impl EventLog {
    /// Events received so far, oldest first.
    pub fn events(&self) -> Vec<GameEvent> {
        self.events.borrow().clone()
    }

    /// Removes and returns the events received so far.
    pub fn take(&self) -> Vec<GameEvent> {
        self.events.take()
    }
}

impl GameObserver for EventLog {
    fn on_event(&mut self, event: &GameEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}

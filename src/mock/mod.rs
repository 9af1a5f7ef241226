mod display;
mod script;
mod terminal;

pub use display::{DisplayError, TerminalDisplay};
pub use script::{ScriptError, ScriptedMove, ScriptedPlayer};
pub use terminal::run_interactive_terminal;

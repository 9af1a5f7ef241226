use std::io::{self, Write};

use super::{ScriptedPlayer, TerminalDisplay};
use crate::BoardDisplay;
use crate::events::{EventLog, GameEvent};
use crate::feedback::compute_feedback;
use crate::game_logic::GameEngine;
use crate::game_state::{GameStatus, PieceKind, Square};
use crate::stats::MatchTally;

/// Clears the screen and moves cursor to top-left.
#[inline]
fn clear_screen() {
    print!("\x1B[2J\x1B[H");
}

/// Runs an interactive two-player game in the terminal.
pub fn run_interactive_terminal() {
    let mut engine = GameEngine::new().with_stats(MatchTally::default());
    let log = EventLog::default();
    engine.subscribe(log.clone());
    let mut display = TerminalDisplay::new();
    let mut player = ScriptedPlayer::new();

    redraw(&mut display, &engine, &log);

    loop {
        print!("> ");
        if let Err(e) = io::stdout().flush() {
            eprintln!("Failed to flush stdout: {}", e);
            break;
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("Failed to read input: {}", e);
                break;
            }
        }

        let parts: Vec<&str> = input.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0] {
            "s" => match parts.get(1).map(|s| s.parse::<Square>()) {
                Some(Ok(square)) => {
                    engine.select_piece(square);
                }
                Some(Err(e)) => println!("Invalid square: {}", e),
                None => println!("Usage: s <square>"),
            },
            "m" => {
                if parts.len() < 2 {
                    println!("Usage: m <from><to>[promotion] ...");
                    continue;
                }
                if let Err(e) = player.push_script(&parts[1..].join(" ")) {
                    println!("❌ {}", e);
                    continue;
                }
                if let Err(e) = player.drain(&mut engine) {
                    player = ScriptedPlayer::new();
                    println!("❌ {}", e);
                    continue;
                }
            }
            "p" => match parts.get(1).and_then(|s| s.chars().next()) {
                Some(c) => match PieceKind::from_char(c) {
                    Some(kind) => {
                        if let Err(e) = engine.resolve_promotion(kind) {
                            println!("❌ {}", e);
                            continue;
                        }
                    }
                    None => {
                        println!("Unknown piece '{}'", c);
                        continue;
                    }
                },
                None => {
                    println!("Usage: p <q|r|b|n>");
                    continue;
                }
            },
            "c" => engine.clear_selection(),
            "r" => {
                engine.reset();
            }
            "q" => break,
            _ => {
                println!("Unknown command");
                continue;
            }
        }

        redraw(&mut display, &engine, &log);
    }

    let tally = engine.stats();
    println!(
        "Games won: White {} | Black {}",
        tally.white_won(),
        tally.black_won()
    );
}

/// Draws the complete interface: help text, board, status and recent events.
fn redraw(display: &mut TerminalDisplay, engine: &GameEngine<MatchTally>, log: &EventLog) {
    clear_screen();
    println!("♟️  Chess");
    println!();
    println!("Commands: s <sq> | m <from><to> | p <q|r|b|n> | c (clear) | r (reset) | q (quit)");
    println!();

    let feedback = compute_feedback(engine);
    if let Err(e) = display.show(engine.state().board(), &feedback) {
        eprintln!("Failed to draw board: {}", e);
    }
    println!();

    match engine.status() {
        GameStatus::InProgress => println!("{} to move", engine.current_turn()),
        GameStatus::PromotionPending { square, .. } => {
            println!("Promote the pawn on {square}: p <q|r|b|n>")
        }
        GameStatus::Checkmate { winner } => {
            println!("🏁 Checkmate! {winner} wins (r to play again)")
        }
    }

    for event in log.take() {
        match event {
            GameEvent::CheckAsserted { color, .. } => println!("⚠️  {color} is in check"),
            GameEvent::MoveCommitted(record) => {
                println!("{} played {}{}", record.color, record.from, record.to)
            }
            _ => {}
        }
    }
}

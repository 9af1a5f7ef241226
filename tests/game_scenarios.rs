use chess_core::events::{EventLog, GameEvent};
use chess_core::feedback::{SquareFeedback, compute_feedback};
use chess_core::game_logic::{GameEngine, MoveError};
use chess_core::game_state::{Board, Color, GameStatus, Piece, PieceKind, Square};
use chess_core::mock::ScriptedPlayer;
use chess_core::stats::MatchTally;

fn sq(s: &str) -> Square {
    s.parse().expect("valid square")
}

/// Board from tokens like `"Ke1"`; upper case is White.
fn board_with(pieces: &[&str]) -> Board {
    let mut board = Board::empty();
    for token in pieces {
        let letter = token.chars().next().expect("piece letter");
        let kind = PieceKind::from_char(letter).expect("known piece letter");
        let color = if letter.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        board
            .place(Piece::new(kind, color, sq(&token[1..])))
            .expect("distinct squares");
    }
    board
}

/// Plays a whitespace separated script from the starting position.
fn play(script: &str) -> GameEngine {
    let mut engine = GameEngine::new();
    let mut player = ScriptedPlayer::new();
    player.push_script(script).expect("valid script");
    player.drain(&mut engine).expect("legal moves");
    engine
}

// ---------------------------------------------------------------
// Checkmate
// ---------------------------------------------------------------

#[test]
fn back_rank_mate_ends_the_game() {
    let board = board_with(&["Kg1", "Ra1", "kg8", "pf7", "pg7", "ph7"]);
    let mut engine = GameEngine::from_board(board, Color::White).with_stats(MatchTally::default());
    let log = EventLog::default();
    engine.subscribe(log.clone());

    engine.attempt_move(sq("a1"), sq("a8")).expect("legal move");

    assert_eq!(
        engine.status(),
        GameStatus::Checkmate {
            winner: Color::White
        }
    );
    assert_eq!(engine.winner(), Some(Color::White));
    assert!(engine.is_checkmate(Color::Black));
    assert_eq!(engine.checkers(Color::Black), vec![sq("a8")]);
    assert_eq!(engine.stats().white_won(), 1);

    let events = log.events();
    assert!(events.contains(&GameEvent::CheckAsserted {
        color: Color::Black,
        king: sq("g8")
    }));
    assert_eq!(
        events.last(),
        Some(&GameEvent::GameOver {
            winner: Color::White
        })
    );
}

#[test]
fn queen_mates_cornered_king() {
    let board = board_with(&["Kh1", "kf3", "qg4"]);
    let mut engine = GameEngine::from_board(board, Color::Black);
    assert!(!engine.is_in_check(Color::White));

    engine.attempt_move(sq("g4"), sq("g2")).expect("legal move");

    assert!(engine.is_in_check(Color::White));
    assert!(engine.is_checkmate(Color::White));
    assert_eq!(engine.winner(), Some(Color::Black));
    assert!(engine.legal_destinations(sq("h1")).is_empty());
}

#[test]
fn finished_game_rejects_further_commands() {
    let mut engine = play("f2f3 e7e5 g2g4 d8h4");
    assert_eq!(engine.winner(), Some(Color::Black));

    assert_eq!(
        engine.attempt_move(sq("e2"), sq("e4")),
        Err(MoveError::GameOver)
    );
    assert!(engine.select_piece(sq("e2")).is_empty());
    assert!(engine.legal_moves().is_empty());

    engine.reset();
    assert_eq!(engine.status(), GameStatus::InProgress);
    assert_eq!(engine.legal_moves().len(), 20);
}

// ---------------------------------------------------------------
// Selection and feedback
// ---------------------------------------------------------------

#[test]
fn black_pawn_destinations_after_e4() {
    let mut engine = play("e2e4");

    assert_eq!(engine.select_piece(sq("e7")), &[sq("e6"), sq("e5")]);

    let feedback = compute_feedback(&engine);
    assert_eq!(feedback.get(sq("e7")), Some(SquareFeedback::Origin));
    assert_eq!(feedback.get(sq("e6")), Some(SquareFeedback::Destination));
    assert_eq!(feedback.get(sq("e5")), Some(SquareFeedback::Destination));
    assert_eq!(feedback.squares().len(), 3);
}

#[test]
fn selecting_opponent_piece_clears_selection() {
    let mut engine = play("e2e4");
    engine.select_piece(sq("e7"));

    assert!(engine.select_piece(sq("d2")).is_empty());
    assert_eq!(engine.state().selection(), None);
    assert!(compute_feedback(&engine).is_empty());
}

#[test]
fn check_is_highlighted_for_side_to_move() {
    let engine = play("e2e4 f7f6 d1h5");

    let feedback = compute_feedback(&engine);
    assert_eq!(feedback.get(sq("e8")), Some(SquareFeedback::Check));
    assert_eq!(feedback.get(sq("h5")), Some(SquareFeedback::Checker));
    assert!(engine.is_in_check(Color::Black));
    assert!(!engine.is_checkmate(Color::Black));
}

// ---------------------------------------------------------------
// En passant
// ---------------------------------------------------------------

#[test]
fn en_passant_capture_removes_passed_pawn() {
    let mut engine = play("e2e4 a7a6 e4e5 d7d5");
    assert_eq!(engine.en_passant_target(), Some(sq("d6")));

    engine.select_piece(sq("e5"));
    assert_eq!(
        compute_feedback(&engine).get(sq("d6")),
        Some(SquareFeedback::Capture)
    );

    let outcome = engine.attempt_move(sq("e5"), sq("d6")).expect("legal move");

    assert!(outcome.record.en_passant);
    assert_eq!(outcome.record.captured, Some(PieceKind::Pawn));
    assert!(engine.piece_at(sq("d5")).is_none());
    assert_eq!(
        engine.piece_at(sq("d6")).map(|p| (p.kind, p.color)),
        Some((PieceKind::Pawn, Color::White))
    );
    assert_eq!(engine.snapshot().len(), 31);
}

#[test]
fn en_passant_target_only_follows_double_step() {
    let mut engine = GameEngine::new();
    let mut player = ScriptedPlayer::new();
    player
        .push_script("e2e4 a7a6 e4e5 d7d5 b1c3 a6a5")
        .expect("valid script");

    let expected = [
        Some(sq("e3")),
        None,
        None,
        Some(sq("d6")),
        None,
        None,
    ];
    for target in expected {
        player.play_next(&mut engine).expect("queued").expect("legal");
        assert_eq!(engine.en_passant_target(), target);
    }

    // The right to capture d5 en passant has lapsed.
    assert!(!engine.legal_destinations(sq("e5")).contains(&sq("d6")));
}

// ---------------------------------------------------------------
// Castling
// ---------------------------------------------------------------

#[test]
fn kingside_castling_moves_both_pieces() {
    let board = board_with(&["Ke1", "Rh1", "Ra1", "ke8"]);
    let mut engine = GameEngine::from_board(board, Color::White);

    let destinations = engine.select_piece(sq("e1")).to_vec();
    assert!(destinations.contains(&sq("g1")));
    assert!(destinations.contains(&sq("c1")));

    let outcome = engine.attempt_move(sq("e1"), sq("g1")).expect("legal move");

    assert!(outcome.record.castling);
    assert_eq!(
        engine.piece_at(sq("f1")).map(|p| (p.kind, p.has_moved)),
        Some((PieceKind::Rook, true))
    );
    assert_eq!(
        engine.piece_at(sq("g1")).map(|p| p.kind),
        Some(PieceKind::King)
    );
    assert!(engine.piece_at(sq("h1")).is_none());
    assert!(engine.piece_at(sq("e1")).is_none());
}

#[test]
fn castling_through_attacked_square_is_rejected() {
    let board = board_with(&["Ke1", "Rh1", "ke8", "rf8"]);
    let mut engine = GameEngine::from_board(board, Color::White);

    assert_eq!(
        engine.attempt_move(sq("e1"), sq("g1")),
        Err(MoveError::IllegalMove {
            from: sq("e1"),
            to: sq("g1")
        })
    );
    assert!(engine.piece_at(sq("e1")).is_some());
}

#[test]
fn moved_rook_cannot_castle() {
    let engine = play("e2e4 e7e5 g1f3 b8c6 f1c4 g8f6 h1g1 f6g8 g1h1 g8f6");

    assert!(!engine.legal_destinations(sq("e1")).contains(&sq("g1")));
}

// ---------------------------------------------------------------
// Promotion
// ---------------------------------------------------------------

#[test]
fn promotion_blocks_play_until_resolved() {
    let board = board_with(&["Ke1", "Pa7", "kh6"]);
    let mut engine = GameEngine::from_board(board, Color::White);

    let outcome = engine.attempt_move(sq("a7"), sq("a8")).expect("legal move");
    assert!(outcome.promotion_required);
    assert_eq!(engine.state().promotion_pending(), Some(sq("a8")));
    assert_eq!(engine.current_turn(), Color::White);

    assert_eq!(
        engine.attempt_move(sq("e1"), sq("e2")),
        Err(MoveError::PromotionPending)
    );
    assert!(engine.select_piece(sq("e1")).is_empty());
    assert_eq!(
        engine.resolve_promotion(PieceKind::King),
        Err(MoveError::InvalidPromotion(PieceKind::King))
    );

    engine
        .resolve_promotion(PieceKind::Knight)
        .expect("pending promotion");

    assert_eq!(
        engine.piece_at(sq("a8")).map(|p| (p.kind, p.color)),
        Some((PieceKind::Knight, Color::White))
    );
    assert_eq!(engine.current_turn(), Color::Black);
    assert_eq!(engine.status(), GameStatus::InProgress);
    assert_eq!(
        engine.resolve_promotion(PieceKind::Queen),
        Err(MoveError::NoPromotionPending)
    );
}

#[test]
fn scripted_promotion_defaults_to_given_kind_and_checks() {
    let board = board_with(&["Kf6", "Pg7", "kh7"]);
    let mut engine = GameEngine::from_board(board, Color::White);
    let mut player = ScriptedPlayer::new();
    player.push_script("g7g8q").expect("valid script");
    assert!(!engine.is_in_check(Color::Black));

    player.drain(&mut engine).expect("legal move");

    assert_eq!(
        engine.piece_at(sq("g8")).map(|p| p.kind),
        Some(PieceKind::Queen)
    );
    assert!(engine.is_in_check(Color::Black));
    assert_eq!(engine.status(), GameStatus::InProgress);
}

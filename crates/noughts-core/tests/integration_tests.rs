//! Integration tests for the Noughts game engine.
//!
//! These tests verify complete game flows from a fresh document through to
//! win or draw, plus the persisted-format round trip.

use noughts_core::*;

/// Start a two-player game with O to move
fn in_progress() -> GameDocument {
    GameDocument::new("Player 1", "Player 2").start(Identity::O)
}

/// Apply a sequence of (position, player) moves, panicking on rejection
fn play(document: GameDocument, moves: &[(u8, Identity)]) -> GameDocument {
    moves.iter().fold(document, |document, &(position, player)| {
        document.apply_move(position, player).unwrap().document
    })
}

/// A full 9-move sequence that ends in a draw
const DRAW_SEQUENCE: [(u8, Identity); 9] = [
    (1, Identity::O),
    (2, Identity::X),
    (3, Identity::O),
    (5, Identity::X),
    (4, Identity::O),
    (6, Identity::X),
    (8, Identity::O),
    (7, Identity::X),
    (9, Identity::O),
];

#[test]
fn test_turn_alternation() {
    let mut document = in_progress();

    for &(position, player) in DRAW_SEQUENCE.iter().take(8) {
        assert_eq!(document.current_player, Some(player));
        document = document.apply_move(position, player).unwrap().document;
        assert_eq!(
            document.current_player,
            Some(player.other()),
            "after move {} the other side must be on turn",
            position
        );
    }
}

#[test]
fn test_boards_stay_disjoint() {
    let mut document = in_progress();

    for &(position, player) in &DRAW_SEQUENCE {
        document = document.apply_move(position, player).unwrap().document;

        for held in &document.slot(Identity::O).held_positions {
            assert!(
                !document.slot(Identity::X).holds(*held),
                "position {} held by both sides",
                held
            );
        }
        document.validate().unwrap();
    }
}

#[test]
fn test_document_round_trip() {
    // At every step of a full game, serialize-then-deserialize is identity
    let mut document = in_progress();
    for &(position, player) in &DRAW_SEQUENCE {
        let decoded = GameDocument::from_json(&document.to_json()).unwrap();
        assert_eq!(decoded, document);
        document = document.apply_move(position, player).unwrap().document;
    }

    let decoded = GameDocument::from_json(&document.to_json()).unwrap();
    assert_eq!(decoded, document);
}

#[test]
fn test_finished_document_rejection_is_idempotent() {
    let document = play(
        in_progress(),
        &[
            (1, Identity::O),
            (4, Identity::X),
            (2, Identity::O),
            (5, Identity::X),
            (3, Identity::O),
        ],
    );
    let before = document.clone();

    for _ in 0..3 {
        assert_eq!(document.apply_move(7, Identity::X), Err(MoveError::GameOver));
        assert_eq!(document, before);
    }
}

#[test]
fn test_row_win_detection() {
    let mut document = in_progress();
    let mut last_outcome = None;

    for &(position, player) in &[
        (1, Identity::O),
        (4, Identity::X),
        (2, Identity::O),
        (5, Identity::X),
        (3, Identity::O),
    ] {
        let outcome = document.apply_move(position, player).unwrap();
        document = outcome.document.clone();
        last_outcome = Some(outcome);
    }

    let outcome = last_outcome.unwrap();
    assert_eq!(document.status, GameStatus::Finished);
    assert_eq!(document.last_winner, Some(Identity::O));
    assert_eq!(
        outcome.winning_line.map(|line| line.map(|p| p.label())),
        Some([1, 2, 3])
    );

    // the winner survives the round trip with its sentinel encoding
    let decoded = GameDocument::from_json(&document.to_json()).unwrap();
    assert_eq!(decoded.last_winner, Some(Identity::O));
}

#[test]
fn test_draw_detection() {
    let document = play(in_progress(), &DRAW_SEQUENCE);

    assert_eq!(document.status, GameStatus::Finished);
    assert!(document.game_over);
    assert_eq!(document.last_winner, None);
    assert!(document.is_full());
    assert_eq!(document.move_number, 10);

    // the empty winner serializes as ""
    let value: serde_json::Value = serde_json::from_str(&document.to_json()).unwrap();
    assert_eq!(value["last_winner"], "");
}

#[test]
fn test_occupied_cell_rejection_leaves_document_unchanged() {
    let document = play(in_progress(), &[(5, Identity::O)]);
    let before = document.clone();

    assert_eq!(
        document.apply_move(5, Identity::X),
        Err(MoveError::CellOccupied)
    );
    assert_eq!(document, before);
}

#[test]
fn test_out_of_range_rejection() {
    let document = in_progress();
    assert_eq!(
        document.apply_move(0, Identity::O),
        Err(MoveError::InvalidPosition)
    );
    assert_eq!(
        document.apply_move(10, Identity::O),
        Err(MoveError::InvalidPosition)
    );
}

#[test]
fn test_bot_game_reaches_an_outcome() {
    // A bot on each side must always drive a game to win or draw within
    // 9 accepted moves, regardless of seed
    for seed in 0..10 {
        let mut bots = [
            Bot::with_seed(Identity::O, seed),
            Bot::with_seed(Identity::X, seed + 100),
        ];
        let mut document = in_progress();
        let mut moves = 0;

        while !document.is_finished() {
            let player = document.current_player.expect("game in progress");
            let bot = &mut bots[if player == Identity::O { 0 } else { 1 }];
            let position = bot.choose_position(&document).expect("open cell exists");
            document = document
                .apply_move(position.label(), player)
                .expect("bot moves are always legal")
                .document;
            document.validate().unwrap();
            moves += 1;
            assert!(moves <= 9, "seed {} ran past a full board", seed);
        }

        match document.last_winner {
            Some(winner) => assert!(document.winning_line_for(winner).is_some()),
            None => assert!(document.is_full()),
        }
    }
}

#[test]
fn test_legacy_document_joins_cleanly() {
    // A file written by the dice-lobby shell variant
    let legacy = r#"{
        "current_status": "setting_players",
        "current_player": null,
        "move_number": 0,
        "game_over": false,
        "die_roll": null,
        "previous_winner": null,
        "die_guess_1": null,
        "die_guess_2": null,
        "player_1": {"name": "Player 1", "icon": "O", "held_positions": []},
        "player_2": {"name": "Player 2", "icon": "X", "held_positions": []},
        "player_1_assigned": false,
        "player_2_assigned": false
    }"#;

    let document = GameDocument::from_json(legacy).unwrap();
    assert_eq!(document.status, GameStatus::AwaitingPlayers);

    // and the migrated document plays normally
    let document = document.start(Identity::O);
    let outcome = document.apply_move(5, Identity::O).unwrap();
    assert_eq!(outcome.document.move_number, 2);

    // re-serialized form is canonical: the legacy fields are gone
    let value: serde_json::Value =
        serde_json::from_str(&outcome.document.to_json()).unwrap();
    assert!(value.get("die_roll").is_none());
    assert!(value.get("current_status").is_none());
    assert_eq!(value["schema_version"], SCHEMA_VERSION);
}

#[test]
fn test_reset_after_win_preserves_names_and_clears_outcome() {
    let document = play(
        GameDocument::new("Ada", "Grace").start(Identity::O),
        &[
            (1, Identity::O),
            (4, Identity::X),
            (2, Identity::O),
            (5, Identity::X),
            (3, Identity::O),
        ],
    );
    assert_eq!(document.last_winner, Some(Identity::O));

    let fresh = document.reset();
    assert_eq!(fresh.player_1.name, "Ada");
    assert_eq!(fresh.player_2.name, "Grace");
    assert_eq!(fresh.status, GameStatus::AwaitingPlayers);
    assert_eq!(fresh.last_winner, None);
    assert_eq!(fresh.occupied_count(), 0);
    fresh.validate().unwrap();
}

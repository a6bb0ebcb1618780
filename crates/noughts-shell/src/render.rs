//! Text presentation of the shared document.
//!
//! Pure functions from document to strings; no game state lives here.
//! Winning cells are bracketed so the completed line stands out the way
//! the browser shell highlights it.

use noughts_core::{GameDocument, GameEvent, GameStatus, Position, WinningLine};

/// Render one cell: the occupant's marker, or the cell label when open.
/// Cells on the winning line are bracketed.
fn cell_text(document: &GameDocument, position: Position, highlight: Option<&WinningLine>) -> String {
    let glyph = match document.occupant(position) {
        Some(identity) => identity.glyph(),
        None => char::from_digit(position.label() as u32, 10).unwrap_or('?'),
    };
    let highlighted = highlight.map_or(false, |line| line.contains(&position));
    if highlighted {
        format!("[{}]", glyph)
    } else {
        format!(" {} ", glyph)
    }
}

/// The 3x3 board as text.
pub fn board_text(document: &GameDocument, highlight: Option<&WinningLine>) -> String {
    let mut out = String::new();
    for (i, position) in Position::ALL.into_iter().enumerate() {
        out.push_str(&cell_text(document, position, highlight));
        if position.column() < 2 {
            out.push('|');
        } else if i + 1 < Position::ALL.len() {
            out.push_str("\n---+---+---\n");
        }
    }
    out
}

/// One-line summary of where the game stands.
pub fn status_line(document: &GameDocument) -> String {
    match document.status {
        GameStatus::AwaitingPlayers => "New game - make a move to begin.".to_string(),
        GameStatus::InProgress => {
            let player = document
                .current_player
                .map(|p| p.glyph())
                .unwrap_or('?');
            format!("Move {}: {} to play.", document.move_number, player)
        }
        GameStatus::Finished => match document.last_winner {
            Some(winner) => format!("{} ({}) wins!", document.slot(winner).name, winner),
            None => "It's a draw!".to_string(),
        },
    }
}

/// The modal-style notification for an event, if it warrants one.
pub fn notification(document: &GameDocument, event: &GameEvent) -> Option<String> {
    match event {
        GameEvent::GameWon { winner, .. } => {
            Some(format!("{} ({}) wins!", document.slot(*winner).name, winner))
        }
        GameEvent::GameDrawn => Some("It's a draw!".to_string()),
        GameEvent::GameStarted { first_player } => {
            Some(format!("Game on - {} moves first.", first_player))
        }
        GameEvent::GameReset => Some("Board cleared.".to_string()),
        GameEvent::MarkPlaced { .. } | GameEvent::TurnChanged { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noughts_core::{GameDocument, Identity};

    fn won_game() -> (GameDocument, WinningLine) {
        let mut document = GameDocument::new("Player 1", "Player 2").start(Identity::O);
        let mut line = None;
        for &(position, player) in &[
            (1, Identity::O),
            (4, Identity::X),
            (2, Identity::O),
            (5, Identity::X),
            (3, Identity::O),
        ] {
            let outcome = document.apply_move(position, player).unwrap();
            document = outcome.document;
            line = line.or(outcome.winning_line);
        }
        (document, line.unwrap())
    }

    #[test]
    fn test_empty_board_shows_labels() {
        let document = GameDocument::new("Player 1", "Player 2");
        let expected =
            " 1 | 2 | 3 \n---+---+---\n 4 | 5 | 6 \n---+---+---\n 7 | 8 | 9 ";
        assert_eq!(board_text(&document, None), expected);
    }

    #[test]
    fn test_winning_line_is_bracketed() {
        let (document, line) = won_game();
        let text = board_text(&document, Some(&line));
        assert!(text.starts_with("[O]|[O]|[O]"));
        // the losing side's cells render unbracketed
        assert!(text.contains(" X | X | 6 "));
    }

    #[test]
    fn test_status_lines() {
        let document = GameDocument::new("Player 1", "Player 2");
        assert_eq!(status_line(&document), "New game - make a move to begin.");

        let started = document.start(Identity::X);
        assert_eq!(status_line(&started), "Move 1: X to play.");

        let (won, _) = won_game();
        assert_eq!(status_line(&won), "Player 1 (O) wins!");
    }

    #[test]
    fn test_notifications() {
        let (document, line) = won_game();
        let event = GameEvent::GameWon {
            winner: Identity::O,
            line,
        };
        assert_eq!(
            notification(&document, &event),
            Some("Player 1 (O) wins!".to_string())
        );
        assert_eq!(notification(&document, &GameEvent::GameDrawn), Some("It's a draw!".to_string()));
        assert_eq!(
            notification(
                &document,
                &GameEvent::TurnChanged {
                    previous: Identity::O,
                    next: Identity::X
                }
            ),
            None
        );
    }
}

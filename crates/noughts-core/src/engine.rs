//! Move validation, application, and win/draw evaluation.
//!
//! The engine is stateless: it reads one `GameDocument` value and produces
//! the next one. Rejections leave the input untouched, which makes retry
//! and audit trivial and lets observers read the prior state while a
//! persist is in flight.

use crate::actions::GameEvent;
use crate::document::{GameDocument, GameStatus};
use crate::player::Identity;
use crate::position::{Position, WinningLine, WINNING_LINES};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a move request is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum MoveError {
    /// The document already records a win or draw
    #[error("Game is over")]
    GameOver,

    /// The requested cell is outside the 1-9 board
    #[error("Invalid position")]
    InvalidPosition,

    /// The requested cell is already held by one of the sides
    #[error("Cell already occupied")]
    CellOccupied,

    /// The acting side is not the side to move
    #[error("Not your turn")]
    NotYourTurn,
}

/// The result of an accepted move: the next document state, the winning
/// line when this move ended the game, and the events to surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The new document; the input document is never mutated
    pub document: GameDocument,
    /// The completed triple, for highlighting
    pub winning_line: Option<WinningLine>,
    /// What happened, in order
    pub events: Vec<GameEvent>,
}

impl GameDocument {
    /// Validate and apply one move, producing the next document state.
    ///
    /// Preconditions are checked in a fixed order: game over, position
    /// range, cell occupancy, turn ownership. A document awaiting players
    /// has no side to move, so every request against it is `NotYourTurn`.
    pub fn apply_move(&self, position: u8, player: Identity) -> Result<MoveOutcome, MoveError> {
        if self.status == GameStatus::Finished {
            return Err(MoveError::GameOver);
        }

        let position = Position::new(position).ok_or(MoveError::InvalidPosition)?;

        if self.occupant(position).is_some() {
            return Err(MoveError::CellOccupied);
        }

        if self.current_player != Some(player) {
            return Err(MoveError::NotYourTurn);
        }

        let mut document = self.clone();
        let mut events = vec![GameEvent::MarkPlaced { player, position }];

        document.slot_mut(player).held_positions.push(position);
        document.move_number += 1;

        let winning_line = document.winning_line_for(player);

        if let Some(line) = winning_line {
            document.game_over = true;
            document.status = GameStatus::Finished;
            document.last_winner = Some(player);
            events.push(GameEvent::GameWon {
                winner: player,
                line,
            });
        } else if document.is_full() {
            document.game_over = true;
            document.status = GameStatus::Finished;
            document.last_winner = None;
            events.push(GameEvent::GameDrawn);
        } else {
            let next = player.other();
            document.current_player = Some(next);
            events.push(GameEvent::TurnChanged {
                previous: player,
                next,
            });
        }

        Ok(MoveOutcome {
            document,
            winning_line,
            events,
        })
    }

    /// The first winning triple the given side holds, in the fixed scan
    /// order. At most one triple can match on a reachable document, since
    /// the game ends the moment the first one completes.
    pub fn winning_line_for(&self, player: Identity) -> Option<WinningLine> {
        let slot = self.slot(player);
        WINNING_LINES
            .into_iter()
            .find(|line| line.iter().all(|position| slot.holds(*position)))
    }
}

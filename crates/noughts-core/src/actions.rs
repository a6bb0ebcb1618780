//! Actions shells can request and the events that result.
//!
//! Both enums are serializable so terminal and browser shells can share
//! one vocabulary with the engine.

use crate::player::Identity;
use crate::position::{Position, WinningLine};
use serde::{Deserialize, Serialize};

/// All requests a shell can hand to the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameAction {
    /// Claim a cell for one side. Applied by the engine with full
    /// validation; `position` is the raw 1-9 label from the input source.
    PlaceMark { position: u8, player: Identity },

    /// Begin play on an awaiting document
    StartGame { first_player: Identity },

    /// Replace the document with a fresh one, preserving names
    ResetGame,
}

/// Events that occur as a result of actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Play began
    GameStarted { first_player: Identity },

    /// A cell was claimed
    MarkPlaced { player: Identity, position: Position },

    /// The turn passed to the other side
    TurnChanged { previous: Identity, next: Identity },

    /// A side completed a winning line
    GameWon { winner: Identity, line: WinningLine },

    /// All 9 cells filled with no winner
    GameDrawn,

    /// The document was replaced with a fresh one
    GameReset,
}

//! The shared game document.
//!
//! This module contains:
//! - `GameDocument`: the full game state as persisted to storage
//! - `GameStatus`: the document lifecycle enum
//! - Canonical JSON (de)serialization with migration for legacy documents
//!
//! The document is the single source of truth between sessions. Engine code
//! never mutates one in place; every accepted move produces a new value, so
//! observers can keep reading the prior state while a persist is pending.

use crate::player::{Identity, PlayerSlot};
use crate::position::{Position, BOARD_CELLS};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Version written into every canonical document. Documents without the
/// field are treated as legacy and migrated on load.
pub const SCHEMA_VERSION: u32 = 1;

/// Document lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// Created but not started; both boards empty
    AwaitingPlayers,
    /// A game is underway
    InProgress,
    /// A win or draw has been recorded
    Finished,
}

/// Errors from decoding a persisted document.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
pub enum FormatError {
    /// The text is not valid JSON at all
    #[error("malformed document: {0}")]
    Malformed(String),

    /// Valid JSON, but not a valid game document
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),
}

/// The complete persisted game state.
///
/// Field declaration order is the canonical serialized order. Absent
/// identities (`current_player`, `last_winner`) serialize as the empty
/// string rather than null so the schema stays stable across shells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameDocument {
    /// Canonical schema version
    pub schema_version: u32,
    /// Document lifecycle
    pub status: GameStatus,
    /// Side to move; empty while awaiting players
    #[serde(with = "identity_sentinel")]
    pub current_player: Option<Identity>,
    /// Number of the next move; 0 while awaiting, 1 at game start,
    /// +1 per accepted move
    pub move_number: u32,
    /// True once a win or draw is recorded; redundant with
    /// `status == Finished` but kept for shell compatibility
    pub game_over: bool,
    /// Most recent winner; empty on draw or while a game is ongoing
    #[serde(with = "identity_sentinel")]
    pub last_winner: Option<Identity>,
    /// The O side
    pub player_1: PlayerSlot,
    /// The X side
    pub player_2: PlayerSlot,
}

impl GameDocument {
    /// Create a fresh document awaiting its first move
    pub fn new(player_1_name: impl Into<String>, player_2_name: impl Into<String>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            status: GameStatus::AwaitingPlayers,
            current_player: None,
            move_number: 0,
            game_over: false,
            last_winner: None,
            player_1: PlayerSlot::new(player_1_name, Identity::O),
            player_2: PlayerSlot::new(player_2_name, Identity::X),
        }
    }

    /// Begin play: a fresh in-progress document preserving both names,
    /// with the given side to move first
    pub fn start(&self, first_player: Identity) -> GameDocument {
        let mut document = GameDocument::new(self.player_1.name.clone(), self.player_2.name.clone());
        document.status = GameStatus::InProgress;
        document.current_player = Some(first_player);
        document.move_number = 1;
        document
    }

    /// Replace this document with a fresh one, preserving player names
    pub fn reset(&self) -> GameDocument {
        GameDocument::new(self.player_1.name.clone(), self.player_2.name.clone())
    }

    /// The slot holding the given identity's state
    pub fn slot(&self, identity: Identity) -> &PlayerSlot {
        match identity {
            Identity::O => &self.player_1,
            Identity::X => &self.player_2,
        }
    }

    pub(crate) fn slot_mut(&mut self, identity: Identity) -> &mut PlayerSlot {
        match identity {
            Identity::O => &mut self.player_1,
            Identity::X => &mut self.player_2,
        }
    }

    /// Which side occupies the given cell, if any
    pub fn occupant(&self, position: Position) -> Option<Identity> {
        Identity::ALL
            .into_iter()
            .find(|&identity| self.slot(identity).holds(position))
    }

    /// Total number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.player_1.held_count() + self.player_2.held_count()
    }

    /// Whether all 9 cells are occupied
    pub fn is_full(&self) -> bool {
        self.occupied_count() == BOARD_CELLS
    }

    /// Cells nobody occupies yet, in label order
    pub fn open_positions(&self) -> Vec<Position> {
        Position::ALL
            .into_iter()
            .filter(|&position| self.occupant(position).is_none())
            .collect()
    }

    /// Check if the game has ended
    pub fn is_finished(&self) -> bool {
        self.status == GameStatus::Finished
    }

    // ==================== Serialization ====================

    /// Serialize to the canonical JSON form
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("document always serializes")
    }

    /// Decode a persisted document, migrating legacy shapes first.
    ///
    /// Anything produced by [`GameDocument::to_json`] round-trips exactly.
    pub fn from_json(text: &str) -> Result<GameDocument, FormatError> {
        let mut value: Value =
            serde_json::from_str(text).map_err(|e| FormatError::Malformed(e.to_string()))?;

        match value.get("schema_version") {
            None => migrate_legacy(&mut value)?,
            Some(version) => {
                if version.as_u64() != Some(SCHEMA_VERSION as u64) {
                    return Err(FormatError::SchemaMismatch(format!(
                        "unsupported schema_version {}",
                        version
                    )));
                }
            }
        }

        let document: GameDocument =
            serde_json::from_value(value).map_err(|e| FormatError::SchemaMismatch(e.to_string()))?;
        document.validate()?;
        Ok(document)
    }

    /// Reject documents that decode cleanly but violate the game
    /// invariants: overlapping boards, drifted move counters, or a
    /// terminal state that doesn't match the boards.
    pub fn validate(&self) -> Result<(), FormatError> {
        let mismatch = |msg: String| Err(FormatError::SchemaMismatch(msg));

        if self.player_1.icon != Identity::O || self.player_2.icon != Identity::X {
            return mismatch("player_1 must hold O and player_2 must hold X".into());
        }

        for slot in [&self.player_1, &self.player_2] {
            for (i, position) in slot.held_positions.iter().enumerate() {
                if slot.held_positions[..i].contains(position) {
                    return mismatch(format!("{} holds position {} twice", slot.icon, position));
                }
            }
        }

        for position in &self.player_1.held_positions {
            if self.player_2.holds(*position) {
                return mismatch(format!("position {} held by both sides", position));
            }
        }

        let held_1 = self.player_1.held_count();
        let held_2 = self.player_2.held_count();
        if held_1.abs_diff(held_2) > 1 {
            return mismatch(format!(
                "held counts {} and {} cannot come from alternating turns",
                held_1, held_2
            ));
        }

        if self.game_over != (self.status == GameStatus::Finished) {
            return mismatch("game_over must mirror status == finished".into());
        }

        let winner = Identity::ALL
            .into_iter()
            .find(|&identity| self.winning_line_for(identity).is_some());

        match self.status {
            GameStatus::AwaitingPlayers => {
                if held_1 + held_2 != 0 || self.move_number != 0 || self.current_player.is_some() {
                    return mismatch("awaiting_players document must be zeroed".into());
                }
            }
            GameStatus::InProgress => {
                if self.current_player.is_none() {
                    return mismatch("in-progress document needs a current player".into());
                }
                if self.move_number as usize != held_1 + held_2 + 1 {
                    return mismatch(format!(
                        "move_number {} does not match {} held positions",
                        self.move_number,
                        held_1 + held_2
                    ));
                }
                if winner.is_some() || self.is_full() {
                    return mismatch("in-progress document already has an outcome".into());
                }
                if self.last_winner.is_some() {
                    return mismatch("last_winner must be empty while in progress".into());
                }
            }
            GameStatus::Finished => {
                if self.last_winner != winner {
                    return mismatch("last_winner does not match the boards".into());
                }
                if winner.is_none() && !self.is_full() {
                    return mismatch("finished without a winner requires a full board".into());
                }
                if self.move_number as usize != held_1 + held_2 + 1 {
                    return mismatch(format!(
                        "move_number {} does not match {} held positions",
                        self.move_number,
                        held_1 + held_2
                    ));
                }
            }
        }

        Ok(())
    }
}

/// Serialize `Option<Identity>` as `"O"`, `"X"`, or `""`.
mod identity_sentinel {
    use crate::player::Identity;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<Identity>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(identity) => serializer.serialize_str(&identity.to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Identity>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.is_empty() {
            return Ok(None);
        }
        raw.parse::<Identity>().map(Some).map_err(|_| {
            D::Error::custom(format!("identity must be \"O\", \"X\", or \"\", got {:?}", raw))
        })
    }
}

/// Normalize a pre-versioning document in place.
///
/// Two legacy shells wrote this file: one with dice-based player
/// assignment (`die_roll`, `die_guess_*`, `current_status:
/// "setting_players"`), one that recorded the winner by display name.
/// Both are folded into the canonical shape here so the engine only ever
/// sees one schema.
fn migrate_legacy(value: &mut Value) -> Result<(), FormatError> {
    let object = value
        .as_object_mut()
        .ok_or_else(|| FormatError::SchemaMismatch("document must be a JSON object".into()))?;

    if let Some(status) = object.remove("current_status") {
        object.insert("status".into(), status);
    }
    if object.get("status").and_then(Value::as_str) == Some("setting_players") {
        object.insert("status".into(), Value::String("awaiting_players".into()));
    }

    if let Some(winner) = object.remove("previous_winner") {
        object.insert("last_winner".into(), winner);
    }

    // Legacy shells wrote null where the canonical form uses ""
    for key in ["current_player", "last_winner"] {
        let absent = object.get(key).map_or(true, Value::is_null);
        if absent {
            object.insert(key.into(), Value::String(String::new()));
        }
    }

    // One variant recorded the winner by display name instead of icon
    let winner_name = object
        .get("last_winner")
        .and_then(Value::as_str)
        .map(String::from);
    if let Some(winner) = winner_name {
        if !winner.is_empty() && winner != "O" && winner != "X" {
            let icon = ["player_1", "player_2"].into_iter().find_map(|slot| {
                let slot = object.get(slot)?;
                if slot.get("name").and_then(Value::as_str) == Some(winner.as_str()) {
                    slot.get("icon").cloned()
                } else {
                    None
                }
            });
            match icon {
                Some(icon) => {
                    object.insert("last_winner".into(), icon);
                }
                None => {
                    return Err(FormatError::SchemaMismatch(format!(
                        "last_winner {:?} names no player",
                        winner
                    )))
                }
            }
        }
    }

    // Dice-assignment leftovers have no canonical counterpart
    for key in [
        "die_roll",
        "die_guess_1",
        "die_guess_2",
        "player_1_assigned",
        "player_2_assigned",
        "player_assign",
    ] {
        object.remove(key);
    }

    // Legacy move counters started at 0 and drifted from the boards;
    // recompute instead of trusting them
    let held = |slot: &str| -> usize {
        object
            .get(slot)
            .and_then(|s| s.get("held_positions"))
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    };
    let total = held("player_1") + held("player_2");
    let move_number = if object.get("status").and_then(Value::as_str) == Some("awaiting_players") {
        0
    } else {
        total as u64 + 1
    };
    object.insert("move_number".into(), Value::from(move_number));

    object.insert("schema_version".into(), Value::from(SCHEMA_VERSION));
    Ok(())
}

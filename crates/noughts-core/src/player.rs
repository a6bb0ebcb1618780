//! Player identities and per-player state.
//!
//! This module contains:
//! - `Identity`: the two fixed player markers, O and X
//! - `PlayerSlot`: one side's record inside the shared document

use crate::position::Position;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the two fixed player markers.
///
/// By convention `O` occupies the first slot of the document and `X` the
/// second, matching the shared file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Identity {
    O,
    X,
}

impl Identity {
    /// Both identities, slot order
    pub const ALL: [Identity; 2] = [Identity::O, Identity::X];

    /// The opposing identity
    pub const fn other(&self) -> Identity {
        match self {
            Identity::O => Identity::X,
            Identity::X => Identity::O,
        }
    }

    /// The marker character shown on the board
    pub const fn glyph(&self) -> char {
        match self {
            Identity::O => 'O',
            Identity::X => 'X',
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

impl FromStr for Identity {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "O" | "o" => Ok(Identity::O),
            "X" | "x" => Ok(Identity::X),
            _ => Err(()),
        }
    }
}

/// One player's record in the shared document.
///
/// `held_positions` is a set by invariant: the engine never adds a position
/// that either side already holds. Insertion order is kept so the document
/// round-trips byte-stably.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSlot {
    /// Display name
    pub name: String,
    /// Fixed marker for this slot
    pub icon: Identity,
    /// Cells this side occupies, in the order they were claimed
    pub held_positions: Vec<Position>,
}

impl PlayerSlot {
    /// Create an empty slot
    pub fn new(name: impl Into<String>, icon: Identity) -> Self {
        Self {
            name: name.into(),
            icon,
            held_positions: Vec::new(),
        }
    }

    /// Whether this side occupies the given cell
    pub fn holds(&self, position: Position) -> bool {
        self.held_positions.contains(&position)
    }

    /// Number of cells this side occupies
    pub fn held_count(&self) -> usize {
        self.held_positions.len()
    }
}

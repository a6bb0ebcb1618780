//! Board position space for the 3x3 grid.
//!
//! This module provides the foundational types for the board:
//! - `Position`: one of the 9 cells, labeled 1-9 reading left to right,
//!   top to bottom
//! - `WinningLine`: a fixed 3-position combination
//! - `WINNING_LINES`: the 8 triples that constitute a win
//!
//! Positions serialize as decimal-digit strings (`"1"`-`"9"`) because that
//! is how the shared document stores them.

use serde::de::{self, Deserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of cells on the board
pub const BOARD_CELLS: usize = 9;

/// A single cell of the 3x3 board, labeled 1-9.
///
/// The label layout:
///
/// ```text
/// 1 | 2 | 3
/// --+---+--
/// 4 | 5 | 6
/// --+---+--
/// 7 | 8 | 9
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position(u8);

impl Position {
    /// All 9 positions in label order
    pub const ALL: [Position; BOARD_CELLS] = [
        Position(1),
        Position(2),
        Position(3),
        Position(4),
        Position(5),
        Position(6),
        Position(7),
        Position(8),
        Position(9),
    ];

    /// Create a position from its label, rejecting anything outside 1-9
    pub fn new(label: u8) -> Option<Self> {
        if (1..=9).contains(&label) {
            Some(Position(label))
        } else {
            None
        }
    }

    /// The position's label (1-9)
    pub const fn label(&self) -> u8 {
        self.0
    }

    /// Row index (0-2), counting from the top
    pub const fn row(&self) -> u8 {
        (self.0 - 1) / 3
    }

    /// Column index (0-2), counting from the left
    pub const fn column(&self) -> u8 {
        (self.0 - 1) % 3
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Position {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label: u8 = s.parse().map_err(|_| ())?;
        Position::new(label).ok_or(())
    }
}

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PositionVisitor;

        impl Visitor<'_> for PositionVisitor {
            type Value = Position;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a board position string \"1\"-\"9\"")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Position, E> {
                value
                    .parse()
                    .map_err(|_| E::invalid_value(de::Unexpected::Str(value), &self))
            }
        }

        deserializer.deserialize_str(PositionVisitor)
    }
}

/// A 3-position combination that constitutes a win
pub type WinningLine = [Position; 3];

/// The 8 winning triples: three rows, three columns, two diagonals.
///
/// Win evaluation scans these in order and reports the first match, so this
/// order decides which line gets highlighted.
pub const WINNING_LINES: [WinningLine; 8] = [
    [Position(1), Position(2), Position(3)],
    [Position(4), Position(5), Position(6)],
    [Position(7), Position(8), Position(9)],
    [Position(1), Position(4), Position(7)],
    [Position(2), Position(5), Position(8)],
    [Position(3), Position(6), Position(9)],
    [Position(1), Position(5), Position(9)],
    [Position(3), Position(5), Position(7)],
];

//! Noughts - a shared-document tic-tac-toe game engine
//!
//! This crate provides the core game logic for Noughts, including:
//! - Board position space and the 8 winning lines
//! - The shared `GameDocument` with canonical JSON round-tripping
//! - Game state machine with full rule enforcement
//! - A uniform-random computer opponent
//!
//! # Architecture
//!
//! The engine is designed to be platform-agnostic. It can be compiled to:
//! - Native Rust for the terminal shell
//! - WebAssembly for a browser shell sharing the same document
//!
//! The engine never touches storage or presentation; shells feed it move
//! requests and persist the documents it returns.
//!
//! # Modules
//!
//! - [`position`]: the 9-cell board space and winning lines
//! - [`player`]: player identities and per-player slots
//! - [`document`]: the persisted game document and its JSON schema
//! - [`engine`]: move validation and win/draw evaluation
//! - [`actions`]: the action/event vocabulary shared with shells
//! - [`bot`]: the random computer opponent

pub mod actions;
pub mod bot;
pub mod document;
pub mod engine;
pub mod player;
pub mod position;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use actions::{GameAction, GameEvent};
pub use bot::Bot;
pub use document::{FormatError, GameDocument, GameStatus, SCHEMA_VERSION};
pub use engine::{MoveError, MoveOutcome};
pub use player::{Identity, PlayerSlot};
pub use position::{Position, WinningLine, BOARD_CELLS, WINNING_LINES};

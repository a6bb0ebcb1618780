//! WebAssembly bindings for the Noughts game engine.
//!
//! This module exposes the engine to JavaScript through wasm-bindgen so a
//! browser shell can host the same rules as the terminal shell.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use crate::actions::{GameAction, GameEvent};
#[cfg(feature = "wasm")]
use crate::bot::Bot;
#[cfg(feature = "wasm")]
use crate::document::GameDocument;
#[cfg(feature = "wasm")]
use crate::player::Identity;

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

#[cfg(feature = "wasm")]
fn parse_identity(raw: &str) -> Result<Identity, JsValue> {
    raw.parse()
        .map_err(|_| JsValue::from_str(&format!("Unknown player: {}", raw)))
}

/// WASM-exposed game wrapper holding the current document.
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub struct WasmGame {
    document: GameDocument,
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
impl WasmGame {
    /// Create a fresh document awaiting players
    #[wasm_bindgen(constructor)]
    pub fn new(player_1_name: &str, player_2_name: &str) -> WasmGame {
        WasmGame {
            document: GameDocument::new(player_1_name, player_2_name),
        }
    }

    /// Adopt a persisted document (canonical or legacy)
    #[wasm_bindgen(js_name = loadDocument)]
    pub fn load_document(json: &str) -> Result<WasmGame, JsValue> {
        let document =
            GameDocument::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WasmGame { document })
    }

    /// The current document in canonical JSON form
    #[wasm_bindgen(js_name = getDocument)]
    pub fn get_document(&self) -> String {
        self.document.to_json()
    }

    /// Apply an action from JSON, returns events JSON or error
    #[wasm_bindgen(js_name = applyAction)]
    pub fn apply_action(&mut self, action_json: &str) -> Result<String, JsValue> {
        let action: GameAction = serde_json::from_str(action_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid action JSON: {}", e)))?;

        let events = match action {
            GameAction::StartGame { first_player } => {
                self.document = self.document.start(first_player);
                vec![GameEvent::GameStarted { first_player }]
            }
            GameAction::PlaceMark { position, player } => {
                let outcome = self
                    .document
                    .apply_move(position, player)
                    .map_err(|e| JsValue::from_str(&format!("Action failed: {}", e)))?;
                self.document = outcome.document;
                outcome.events
            }
            GameAction::ResetGame => {
                self.document = self.document.reset();
                vec![GameEvent::GameReset]
            }
        };

        Ok(serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string()))
    }

    /// The side to move ("O", "X", or "" while awaiting players)
    #[wasm_bindgen(js_name = getCurrentPlayer)]
    pub fn get_current_player(&self) -> String {
        self.document
            .current_player
            .map(|p| p.to_string())
            .unwrap_or_default()
    }

    /// Check if the game is finished
    #[wasm_bindgen(js_name = isFinished)]
    pub fn is_finished(&self) -> bool {
        self.document.is_finished()
    }

    /// The winner ("O"/"X"), or "" on draw or ongoing game
    #[wasm_bindgen(js_name = getWinner)]
    pub fn get_winner(&self) -> String {
        self.document
            .last_winner
            .map(|p| p.to_string())
            .unwrap_or_default()
    }

    /// Labels of the cells still open, for enabling inputs
    #[wasm_bindgen(js_name = getOpenPositions)]
    pub fn get_open_positions(&self) -> Vec<u8> {
        self.document
            .open_positions()
            .into_iter()
            .map(|p| p.label())
            .collect()
    }

    /// A uniform-random move for the given side, or null when none exist
    #[wasm_bindgen(js_name = getBotMove)]
    pub fn get_bot_move(&self, player: &str) -> Result<Option<u8>, JsValue> {
        let player = parse_identity(player)?;
        let mut bot = Bot::new(player);
        Ok(bot.choose_position(&self.document).map(|p| p.label()))
    }
}

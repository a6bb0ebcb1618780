//! Random opponent for single-player sessions.
//!
//! The computer side has no strategy: it draws uniformly from the open
//! cells and plays through the same validated path as a human. Strategy
//! is out of scope for the coordinator.

use crate::document::GameDocument;
use crate::player::Identity;
use crate::position::Position;
use rand::prelude::*;

/// A computer player that fills one side of the board.
pub struct Bot {
    /// Which side this bot plays
    pub player: Identity,
    rng: StdRng,
}

impl Bot {
    pub fn new(player: Identity) -> Self {
        Self {
            player,
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded constructor for deterministic replays
    pub fn with_seed(player: Identity, seed: u64) -> Self {
        Self {
            player,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Pick a cell uniformly among those still open.
    ///
    /// Returns `None` when the board is full or the game is already over.
    pub fn choose_position(&mut self, document: &GameDocument) -> Option<Position> {
        if document.is_finished() {
            return None;
        }
        document.open_positions().choose(&mut self.rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_progress() -> GameDocument {
        GameDocument::new("Player 1", "Player 2").start(Identity::O)
    }

    #[test]
    fn test_bot_only_picks_open_cells() {
        let mut document = in_progress();
        let mut bot = Bot::with_seed(Identity::X, 7);

        // Fill most of the board by hand
        for label in [1, 2, 3, 4, 5, 6, 7] {
            let position = Position::new(label).unwrap();
            let side = if label % 2 == 1 { Identity::O } else { Identity::X };
            document.slot_mut(side).held_positions.push(position);
        }

        for _ in 0..20 {
            let choice = bot.choose_position(&document).unwrap();
            assert!(document.occupant(choice).is_none());
            assert!([8, 9].contains(&choice.label()));
        }
    }

    #[test]
    fn test_bot_passes_on_finished_games() {
        let document = in_progress()
            .apply_move(1, Identity::O)
            .and_then(|o| o.document.apply_move(4, Identity::X))
            .and_then(|o| o.document.apply_move(2, Identity::O))
            .and_then(|o| o.document.apply_move(5, Identity::X))
            .and_then(|o| o.document.apply_move(3, Identity::O))
            .unwrap()
            .document;

        let mut bot = Bot::with_seed(Identity::X, 1);
        assert_eq!(bot.choose_position(&document), None);
    }

    #[test]
    fn test_seeded_bots_agree() {
        let document = in_progress();
        let mut a = Bot::with_seed(Identity::X, 42);
        let mut b = Bot::with_seed(Identity::X, 42);
        for _ in 0..5 {
            assert_eq!(a.choose_position(&document), b.choose_position(&document));
        }
    }
}

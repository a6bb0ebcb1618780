//! Interactive play session.
//!
//! Wires the input source, engine, storage, and presentation together.
//! All game-logic state lives in the shared document; the session keeps
//! only transient shell state (which side is local, whether the computer
//! plays the other side).
//!
//! Commands are handled strictly one at a time: the next command is not
//! read until the persist for the previous one has completed, so at most
//! one save per document is ever in flight.

use crate::render;
use crate::storage::{DocumentStore, StorageError};
use noughts_core::{
    Bot, FormatError, GameAction, GameDocument, GameStatus, Identity, MoveError, MoveOutcome,
    WinningLine,
};
use thiserror::Error;
use tracing::{info, warn};

/// Why a command could not be carried out.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No open document - use `create` or `open` first")]
    NoDocument,

    #[error("{0}")]
    Move(#[from] MoveError),

    #[error("{0}")]
    Format(#[from] FormatError),

    #[error("{0}")]
    Storage(#[from] StorageError),
}

/// A parsed input command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Create a fresh shared document
    Create,
    /// Join the game in the existing document
    Open,
    /// Begin play, local side first
    Start,
    /// Claim a cell as the local side
    Move(u8),
    /// Fresh document, names preserved
    Reset,
    /// Choose which side this shell plays
    Side(Identity),
    /// Toggle the computer opponent on the other side
    Bot(bool),
    /// Re-render the board
    Show,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line. A bare digit is shorthand for `move`.
    pub fn parse(line: &str) -> Result<Command, String> {
        let mut words = line.split_whitespace();
        let head = words.next().ok_or_else(String::new)?;
        let arg = words.next();

        let parsed = match (head, arg) {
            ("create", None) => Command::Create,
            ("open", None) => Command::Open,
            ("start", None) => Command::Start,
            ("move", Some(raw)) => {
                let position = raw
                    .parse::<u8>()
                    .map_err(|_| format!("`{}` is not a cell label", raw))?;
                Command::Move(position)
            }
            (raw, None) if raw.chars().all(|c| c.is_ascii_digit()) => {
                let position = raw.parse::<u8>().map_err(|_| "cell label too large".to_string())?;
                Command::Move(position)
            }
            ("reset", None) => Command::Reset,
            ("side", Some(raw)) => {
                let side = raw
                    .parse::<Identity>()
                    .map_err(|_| format!("`{}` is not a side; use O or X", raw))?;
                Command::Side(side)
            }
            ("bot", Some("on")) => Command::Bot(true),
            ("bot", Some("off")) => Command::Bot(false),
            ("show", None) => Command::Show,
            ("help", None) => Command::Help,
            ("quit", None) | ("exit", None) => Command::Quit,
            _ => return Err(format!("unrecognized command `{}`; try `help`", line.trim())),
        };
        Ok(parsed)
    }
}

pub const HELP_TEXT: &str = "\
commands:
  create        start a new shared document
  open          join the game in the existing document
  start         begin play, your side moving first
  move <1-9>    claim a cell (a bare digit works too)
  reset         clear the board, keeping player names
  side <O|X>    choose which side you play (default O)
  bot <on|off>  let the computer play the other side
  show          re-render the board
  quit          leave (the document stays in storage)";

/// One shell's view of a shared game.
pub struct GameSession {
    store: DocumentStore,
    document: Option<GameDocument>,
    side: Identity,
    bot: Option<Bot>,
}

impl GameSession {
    pub fn new(store: DocumentStore) -> Self {
        Self {
            store,
            document: None,
            side: Identity::O,
            bot: None,
        }
    }

    pub fn document(&self) -> Option<&GameDocument> {
        self.document.as_ref()
    }

    /// Carry out one command, returning the text to show the user.
    pub async fn handle(&mut self, command: Command) -> Result<String, SessionError> {
        match command {
            Command::Create => self.create().await,
            Command::Open => self.open().await,
            Command::Start => {
                self.apply_action(GameAction::StartGame {
                    first_player: self.side,
                })
                .await
            }
            Command::Move(position) => {
                self.apply_action(GameAction::PlaceMark {
                    position,
                    player: self.side,
                })
                .await
            }
            Command::Reset => self.apply_action(GameAction::ResetGame).await,
            Command::Side(side) => {
                self.side = side;
                if let Some(bot) = &mut self.bot {
                    *bot = Bot::new(side.other());
                }
                Ok(format!("You play {}.", side))
            }
            Command::Bot(enabled) => {
                self.bot = enabled.then(|| Bot::new(self.side.other()));
                Ok(if enabled {
                    format!("Computer plays {}.", self.side.other())
                } else {
                    "Computer off.".to_string()
                })
            }
            Command::Show => {
                let document = self.document.as_ref().ok_or(SessionError::NoDocument)?;
                Ok(view(document, None))
            }
            Command::Help => Ok(HELP_TEXT.to_string()),
            Command::Quit => Ok("Bye.".to_string()),
        }
    }

    async fn create(&mut self) -> Result<String, SessionError> {
        let document = GameDocument::new("Player 1", "Player 2");
        self.store.save(&document.to_json()).await?;
        info!(path = %self.store.path().display(), "created game document");
        let view = view(&document, None);
        self.document = Some(document);
        Ok(format!("Game created successfully!\n{}", view))
    }

    /// Join the game in the existing document. A load or decode failure
    /// aborts the join and leaves no active document.
    async fn open(&mut self) -> Result<String, SessionError> {
        let text = self.store.load().await?;
        let document = GameDocument::from_json(&text)?;
        info!(path = %self.store.path().display(), "joined game document");
        let view = view(&document, None);
        self.document = Some(document);
        Ok(format!("You have joined the game!\n{}", view))
    }

    /// Carry out one game action against the current document.
    async fn apply_action(&mut self, action: GameAction) -> Result<String, SessionError> {
        match action {
            GameAction::StartGame { first_player } => self.start(first_player).await,
            GameAction::PlaceMark { position, player } => self.place(position, player).await,
            GameAction::ResetGame => self.reset().await,
        }
    }

    async fn start(&mut self, first_player: Identity) -> Result<String, SessionError> {
        let document = self.document.as_ref().ok_or(SessionError::NoDocument)?;
        let started = document.start(first_player);
        let message = format!("Game on - {} moves first.", first_player);
        let view = view(&started, None);
        self.persist(started).await;
        Ok(format!("{}\n{}", message, view))
    }

    async fn reset(&mut self) -> Result<String, SessionError> {
        let document = self.document.as_ref().ok_or(SessionError::NoDocument)?;
        let fresh = document.reset();
        let view = view(&fresh, None);
        self.persist(fresh).await;
        Ok(format!("Board cleared.\n{}", view))
    }

    async fn place(&mut self, position: u8, player: Identity) -> Result<String, SessionError> {
        let current = self.document.as_ref().ok_or(SessionError::NoDocument)?;

        // A move against a fresh document starts the game with the acting
        // side to move, the way the first board click used to.
        let current = if current.status == GameStatus::AwaitingPlayers {
            current.start(player)
        } else {
            current.clone()
        };

        let outcome = match current.apply_move(position, player) {
            Ok(outcome) => outcome,
            Err(rejection) => {
                warn!(%rejection, position, side = %player, "move rejected");
                return Err(rejection.into());
            }
        };
        let mut lines = outcome_lines(&outcome);
        let mut document = outcome.document;
        let mut highlight = outcome.winning_line;

        // The computer answers between persists, through the same
        // validated path as everyone else
        if let Some(bot) = &mut self.bot {
            if document.current_player == Some(bot.player) && !document.is_finished() {
                if let Some(reply) = bot.choose_position(&document) {
                    let outcome = document.apply_move(reply.label(), bot.player)?;
                    lines.push(format!("Computer plays {}.", reply));
                    lines.extend(outcome_lines(&outcome));
                    highlight = outcome.winning_line;
                    document = outcome.document;
                }
            }
        }

        lines.insert(0, view(&document, highlight.as_ref()));
        self.persist(document).await;
        Ok(lines.join("\n"))
    }

    /// Adopt the new document and save it. A failed save is surfaced but
    /// does not roll back: the in-memory document remains the source of
    /// truth until the next successful save or reload.
    async fn persist(&mut self, document: GameDocument) {
        let text = document.to_json();
        self.document = Some(document);
        if let Err(failure) = self.store.save(&text).await {
            warn!(%failure, "save failed; continuing in memory");
        }
    }
}

fn outcome_lines(outcome: &MoveOutcome) -> Vec<String> {
    outcome
        .events
        .iter()
        .filter_map(|event| render::notification(&outcome.document, event))
        .collect()
}

fn view(document: &GameDocument, highlight: Option<&WinningLine>) -> String {
    format!(
        "{}\n{}",
        render::board_text(document, highlight),
        render::status_line(document)
    )
}

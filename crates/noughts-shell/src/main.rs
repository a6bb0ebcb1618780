//! Noughts terminal shell.
//!
//! Thin I/O layer around the engine: reads commands from stdin, persists
//! the shared document through [`storage::DocumentStore`], and renders
//! from the document after every change.

use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod render;
mod session;
mod storage;

use session::{Command, GameSession};
use storage::DocumentStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Document path from env or the conventional name
    let path = std::env::var("NOUGHTS_FILE").unwrap_or_else(|_| "game_state.json".into());
    info!("Noughts shell, document at {}", path);

    let mut session = GameSession::new(DocumentStore::new(path));

    println!("Noughts - type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        // Commands run strictly one at a time: the next line is not read
        // until the previous command's persist has completed
        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(reason) => {
                println!("{}", reason);
                continue;
            }
        };

        match session.handle(command).await {
            Ok(output) => println!("{}", output),
            Err(rejection) => println!("{}", rejection),
        }

        if command == Command::Quit {
            break;
        }
    }

    Ok(())
}

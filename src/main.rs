mod cli;
mod error;
mod models;
mod store;

use anyhow::Context;
use cli::{Cli, Config, Console, Session};
use colored::*;
use std::io;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr so they never interleave with the quiz on stdout
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = Config::load(Cli::parse_args());
    info!("Starting flashcards with {:?}", config);

    let stdin = io::stdin();
    let console = Console::new(stdin.lock(), io::stdout());
    let mut session = Session::new(console, &config);

    if let Some(path) = &config.import {
        session
            .import_cards(path)
            .with_context(|| format!("failed to import {}", path.display()))?;
    }

    if let Err(e) = session.run() {
        error!("Session ended with an error: {:?}", e);
        eprintln!("{} {}", "Error:".red(), e.to_string().red());
        return Err(e).context("flashcard session failed");
    }

    info!("Exiting with {} cards in memory", session.store().len());
    Ok(())
}

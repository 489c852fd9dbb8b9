//! Chronicle terminal client.
//!
//! Composition root: loads configuration, sets up logging, assembles the
//! save repository, persistence worker and session, then runs a line-based
//! command loop on stdin.
mod app;
mod config;
mod input;
mod logging;
mod render;

use std::sync::Arc;

use anyhow::{Context, Result};
use game_core::GameConfig;
use runtime::{FileStateRepository, PersistenceHandle, Session, StateRepository};
use tokio::io::{AsyncBufReadExt, BufReader};

use app::{App, Flow};
use config::ClientConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let _log_guard = logging::setup_logging(&config.log_dir)?;

    tracing::info!("Starting Chronicle client");
    tracing::info!("Save directory: {}", config.save_dir.display());
    tracing::info!("Autosave: {}", config.autosave);

    let repo: Arc<dyn StateRepository> = Arc::new(
        FileStateRepository::new(&config.save_dir).with_context(|| {
            format!(
                "Failed to open save directory: {}",
                config.save_dir.display()
            )
        })?,
    );
    let (persistence, worker) = PersistenceHandle::spawn(repo.clone());

    let mut game_config = GameConfig::default();
    if let Some(name) = &config.hero_name {
        game_config.default_name = name.clone();
    }

    let mut session = Session::new(repo, Arc::new(persistence.clone()))
        .with_config(game_config)
        .with_autosave(config.autosave);

    if let Some(code) = &config.save_code {
        match session.set_save_code(code) {
            Ok(code) => println!("Save code: {code}"),
            Err(e) => println!("Ignoring CHRONICLE_SAVE_CODE: {e}"),
        }
    }

    let mut app = App::new(session);
    println!("{}", render::HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let (flow, output) = app.handle_line(&line).await;
        for text in output {
            println!("{text}");
        }
        if flow == Flow::Quit {
            break;
        }
    }

    if let Err(e) = app.shutdown().await {
        tracing::warn!("Pending saves could not be flushed: {}", e);
    }
    persistence.shutdown()?;
    worker.await.context("Persistence worker panicked")?;

    tracing::info!("Client shutdown complete");
    Ok(())
}

use anyhow::{Context, Result};
use clap::Parser;
use retro_deck::game::GameConfig;
use retro_deck::modes::DeskMode;
use retro_deck::player::{LocalComposer, PlayerConfig};
use retro_deck::store::{HighScoreStore, JsonFileStore, MemoryStore};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing::info;

#[derive(Parser)]
#[command(name = "retro_deck")]
#[command(version, about = "Retro desktop with a snake game and a composing music player")]
struct Cli {
    /// Width and height of the snake grid
    #[arg(long, default_value = "20")]
    grid_size: usize,

    /// Milliseconds between snake ticks
    #[arg(long, default_value = "120")]
    tick_ms: u64,

    /// Directory holding the high-score store
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,

    /// Keep the high score in memory only
    #[arg(long)]
    no_persist: bool,

    /// Seed for food placement and composed tracks
    #[arg(long)]
    seed: Option<u64>,

    /// Simulated latency of the offline composer
    #[arg(long, default_value = "1500")]
    compose_latency_ms: u64,

    /// Log file (the terminal is taken by the UI)
    #[arg(long, default_value = "retro_deck.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_file)?;

    let game_config = GameConfig {
        grid_size: cli.grid_size,
        tick_interval_ms: cli.tick_ms,
        ..Default::default()
    };
    game_config
        .validate()
        .map_err(anyhow::Error::msg)
        .context("Invalid game settings")?;

    let player_config = PlayerConfig {
        compose_latency_ms: cli.compose_latency_ms,
        ..Default::default()
    };
    player_config
        .validate()
        .map_err(anyhow::Error::msg)
        .context("Invalid player settings")?;

    let store: Box<dyn HighScoreStore> = if cli.no_persist {
        Box::new(MemoryStore::new())
    } else {
        let path = cli.data_dir.join("retro_deck.json");
        info!(path = %path.display(), "using high-score store");
        Box::new(JsonFileStore::new(path))
    };

    let composer = LocalComposer::new(Duration::from_millis(player_config.compose_latency_ms));

    let mut desk = DeskMode::new(game_config, player_config, store, composer, cli.seed)?;
    desk.run().await
}

fn init_tracing(log_file: &Path) -> Result<()> {
    let file = File::create(log_file)
        .with_context(|| format!("Failed to create log file {:?}", log_file))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();

    Ok(())
}

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tile_snake::game::GameConfig;
use tile_snake::leaderboard::{FileLeaderboard, Leaderboard};
use tile_snake::modes::{HumanMode, Scores};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tile_snake")]
#[command(version, about = "Grid-based Snake in the terminal")]
struct Cli {
    /// Grid width
    #[arg(long, default_value = "30")]
    width: usize,

    /// Grid height
    #[arg(long, default_value = "20")]
    height: usize,

    /// Steps per second (3-20)
    #[arg(long, default_value = "4")]
    speed: u32,

    /// Player name shown on the leaderboard (1-15 characters)
    #[arg(long, default_value = "player")]
    player: String,

    /// Keep the leaderboard in this JSON file instead of in memory
    #[arg(long)]
    leaderboard: Option<PathBuf>,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create log file {:?}", path))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = GameConfig {
        grid_width: cli.width,
        grid_height: cli.height,
        speed: cli.speed,
        player_name: cli.player,
        ..Default::default()
    };

    let scores = match cli.leaderboard {
        Some(path) => Scores::File(FileLeaderboard::open(path)?),
        None => Scores::Memory(Leaderboard::new()),
    };

    let mut human_mode = HumanMode::new(config, scores)?;
    human_mode.run().await?;

    Ok(())
}

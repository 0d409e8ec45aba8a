use anyhow::{Context, Result};
use clap::Parser;
use nokia_snake::game::{GameConfig, GameEngine};
use nokia_snake::modes::HumanMode;
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "nokia_snake")]
#[command(version, about = "Nokia-style Snake in the terminal")]
struct Cli {
    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width, in sprites
    #[arg(long)]
    width: Option<usize>,

    /// Grid height, in sprites
    #[arg(long)]
    height: Option<usize>,

    /// Starting length of the snake
    #[arg(long)]
    length: Option<usize>,

    /// Milliseconds between moves
    #[arg(long)]
    speed: Option<u64>,

    /// The edges are walls instead of wrapping around
    #[arg(long)]
    walls: bool,

    /// Never spawn bonus critters
    #[arg(long)]
    no_bonus: bool,

    /// Seed for food and bonus placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (RUST_LOG sets the level)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(length) = self.length {
            config.initial_snake_length = length;
        }
        if let Some(speed) = self.speed {
            config.tick_ms = speed;
        }
        if self.walls {
            config.wrap_around = false;
        }
        if self.no_bonus {
            config.bonus_enabled = false;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

/// The terminal belongs to the game, so logs only go to a file
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("Failed to initialize logger")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = cli.game_config()?;
    log::info!("starting with {:?}", config);

    let engine = match cli.seed {
        Some(seed) => GameEngine::with_seed(config, seed),
        None => GameEngine::new(config),
    };

    let mut human_mode = HumanMode::with_engine(engine);
    human_mode.run().await?;

    Ok(())
}

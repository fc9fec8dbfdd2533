use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tripwire_core::{CellCount, Coord, GameConfig, GameError};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    Beginner,
    Intermediate,
    Expert,
}

impl Preset {
    fn config(self) -> GameConfig {
        match self {
            Self::Beginner => GameConfig::beginner(),
            Self::Intermediate => GameConfig::intermediate(),
            Self::Expert => GameConfig::expert(),
        }
    }
}

/// Play a game of mines in the terminal.
///
/// Without a preset the board is 30x15 with 75 mines, any of width, height and mines overrides it.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// What log level to use
    #[command(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity,

    /// Start from a standard board
    #[arg(short, long, value_enum)]
    pub preset: Option<Preset>,

    #[arg(long)]
    pub width: Option<Coord>,

    #[arg(long)]
    pub height: Option<Coord>,

    #[arg(long)]
    pub mines: Option<CellCount>,

    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Where best times are kept
    #[arg(long, default_value = ".tripwire")]
    pub data_dir: PathBuf,
}

impl Args {
    pub fn game_config(&self) -> Result<GameConfig, GameError> {
        let base = self.preset.map(Preset::config).unwrap_or_default();
        GameConfig::new(
            self.width.unwrap_or(base.width),
            self.height.unwrap_or(base.height),
            self.mines.unwrap_or(base.mines),
        )
    }
}

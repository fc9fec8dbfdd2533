#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use clock::*;
pub use engine::*;
pub use error::*;
pub use grid::*;
pub use placement::*;
pub use scores::*;
pub use session::*;
pub use snapshot::*;
pub use types::*;

mod cell;
mod clock;
mod engine;
mod error;
mod grid;
mod placement;
mod scores;
mod session;
mod snapshot;
mod types;

/// Board dimensions and mine count, validated so that at least one cell is always safe.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub width: Coord,
    pub height: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub fn new(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GameError::InvalidSize);
        }
        if mines >= mult(width, height) {
            return Err(GameError::TooManyMines);
        }
        Ok(Self {
            width,
            height,
            mines,
        })
    }

    pub const fn beginner() -> Self {
        Self {
            width: 9,
            height: 9,
            mines: 10,
        }
    }

    pub const fn intermediate() -> Self {
        Self {
            width: 16,
            height: 16,
            mines: 40,
        }
    }

    pub const fn expert() -> Self {
        Self {
            width: 30,
            height: 16,
            mines: 99,
        }
    }

    pub const fn size(&self) -> Coord2 {
        (self.width, self.height)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.width, self.height)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 30,
            height: 15,
            mines: 75,
        }
    }
}

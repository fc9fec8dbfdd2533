use alloc::vec::Vec;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// Chooses where mines go once the first cell to reveal is known.
pub trait MinePlacer {
    /// Returns exactly `config.mines` distinct in-bounds coordinates, none of which is `first_click`.
    fn place(&mut self, config: GameConfig, first_click: Coord2) -> Vec<Coord2>;

    /// Seed that reproduces this layout, if the placement is seeded at all.
    fn seed(&self) -> Option<u64> {
        None
    }
}

/// Uniform sampling without replacement from every cell except the first click.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RandomPlacer {
    seed: u64,
}

impl RandomPlacer {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinePlacer for RandomPlacer {
    fn place(&mut self, config: GameConfig, first_click: Coord2) -> Vec<Coord2> {
        let mut pool: Vec<Coord2> = (0..config.width)
            .flat_map(|x| (0..config.height).map(move |y| (x, y)))
            .filter(|&coords| coords != first_click)
            .collect();

        let wanted = usize::from(config.mines);
        if wanted > pool.len() {
            log::warn!(
                "Cannot fit {} mines around the first click, only {} cells available",
                wanted,
                pool.len()
            );
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mines = Vec::with_capacity(wanted);
        while mines.len() < wanted && !pool.is_empty() {
            let index = rng.random_range(0..pool.len());
            mines.push(pool.swap_remove(index));
        }
        mines
    }

    fn seed(&self) -> Option<u64> {
        Some(self.seed)
    }
}

/// Places a predetermined layout, used for replays and tests.
///
/// A mine listed on the first click is dropped so the first reveal stays safe.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FixedPlacer {
    mines: Vec<Coord2>,
}

impl FixedPlacer {
    pub fn new(mines: impl IntoIterator<Item = Coord2>) -> Self {
        let mut mines: Vec<_> = mines.into_iter().collect();
        mines.sort_unstable();
        mines.dedup();
        Self { mines }
    }

    pub fn mines(&self) -> &[Coord2] {
        &self.mines
    }
}

impl MinePlacer for FixedPlacer {
    fn place(&mut self, config: GameConfig, first_click: Coord2) -> Vec<Coord2> {
        let mines: Vec<_> = self
            .mines
            .iter()
            .copied()
            .filter(|&(x, y)| x < config.width && y < config.height)
            .filter(|&coords| {
                if coords == first_click {
                    log::debug!("Dropping fixed mine under first click {:?}", coords);
                    false
                } else {
                    true
                }
            })
            .collect();

        if mines.len() != usize::from(config.mines) {
            log::warn!(
                "Fixed layout has {} usable mines, config declares {}",
                mines.len(),
                config.mines
            );
        }
        mines
    }
}

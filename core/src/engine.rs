use alloc::vec;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl Outcome {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// What ended the game in a loss.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossCause {
    /// The requested cell itself was a mine.
    Detonated(Coord2),
    /// A chord during the cascade opened a hidden mine.
    CascadeDetonated(Coord2),
    /// A chord during the cascade exposed a flag on a safe cell.
    Misflag(Coord2),
}

impl LossCause {
    pub const fn coords(self) -> Coord2 {
        match self {
            Self::Detonated(coords) | Self::CascadeDetonated(coords) | Self::Misflag(coords) => coords,
        }
    }

    const fn mark(self) -> CellMarks {
        match self {
            Self::Detonated(_) | Self::CascadeDetonated(_) => CellMarks::TRIGGER,
            Self::Misflag(_) => CellMarks::FALSE_REVEAL,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    Won,
    Lost(LossCause),
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Flagged,
    Unflagged,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// The board engine: a grid plus the rules for revealing and flagging it.
///
/// Mines are laid lazily by `P` on the first reveal so that the first revealed cell is never a mine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board<P = RandomPlacer> {
    config: GameConfig,
    grid: Grid,
    placer: P,
    mines_placed: bool,
    mine_count: CellCount,
    flagged_count: CellCount,
    hidden_safe: CellCount,
    outcome: Outcome,
    loss_cause: Option<LossCause>,
}

impl Board<RandomPlacer> {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self::with_placer(config, RandomPlacer::new(seed))
    }
}

impl<P: MinePlacer> Board<P> {
    pub fn with_placer(config: GameConfig, placer: P) -> Self {
        Self {
            config,
            grid: Grid::new(config.size()),
            placer,
            mines_placed: false,
            mine_count: config.mines,
            flagged_count: 0,
            hidden_safe: config.safe_cells(),
            outcome: Outcome::InProgress,
            loss_cause: None,
        }
    }

    /// Primary activation: reveal the cell, chording into its neighbors when enough of them are flagged.
    ///
    /// Requests on a flagged cell or after the game ended are ignored. Revealing an already revealed cell re-runs
    /// the chord from it.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.grid.validate_coords(coords)?;

        if !self.mines_placed {
            self.place_mines(coords);
        }

        if self.outcome.is_finished() || self.grid[coords].is_flagged() {
            return Ok(RevealOutcome::NoChange);
        }

        let cell = &mut self.grid[coords];
        let was_hidden = cell.is_hidden();
        cell.state = RevealState::Revealed;

        if cell.is_mine {
            return Ok(self.lose(LossCause::Detonated(coords)));
        }
        if was_hidden {
            self.hidden_safe -= 1;
        }

        match self.cascade(coords) {
            Err(cause) => Ok(self.lose(cause)),
            Ok(_) if self.hidden_safe == 0 => {
                self.win();
                Ok(RevealOutcome::Won)
            }
            Ok(0) if !was_hidden => Ok(RevealOutcome::NoChange),
            Ok(_) => Ok(RevealOutcome::Revealed),
        }
    }

    /// Secondary activation: toggle a flag on a cell that is not revealed yet.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.grid.validate_coords(coords)?;

        if self.outcome.is_finished() {
            return Ok(FlagOutcome::NoChange);
        }

        // before placement every cell is safe and the counter is rebuilt at placement anyway
        let counts_as_safe = self.mines_placed && !self.grid[coords].is_mine;
        let cell = &mut self.grid[coords];
        Ok(match cell.state {
            RevealState::Hidden => {
                cell.state = RevealState::Flagged;
                self.flagged_count += 1;
                if counts_as_safe {
                    self.hidden_safe -= 1;
                }
                FlagOutcome::Flagged
            }
            RevealState::Flagged => {
                cell.state = RevealState::Hidden;
                self.flagged_count -= 1;
                if counts_as_safe {
                    self.hidden_safe += 1;
                }
                FlagOutcome::Unflagged
            }
            RevealState::Revealed => FlagOutcome::NoChange,
        })
    }

    fn place_mines(&mut self, first_click: Coord2) {
        let mines = self.placer.place(self.config, first_click);
        debug_assert!(!mines.contains(&first_click), "mine placed under first click");

        self.grid.lay_mines(&mines);
        self.mines_placed = true;
        self.mine_count = self.grid.mine_count();
        self.hidden_safe = self.grid.count_hidden_safe();

        if self.mine_count != self.config.mines {
            log::warn!(
                "Placed mine count mismatch, actual: {}, requested: {}",
                self.mine_count,
                self.config.mines
            );
        }
        log::debug!(
            "Placed {} mines around first click {:?}",
            self.mine_count,
            first_click
        );
    }

    /// Depth-first chord cascade from an already revealed safe cell.
    ///
    /// Returns how many cells it opened, or the cause of the loss it ran into. Nothing else is opened once a loss is
    /// found, the caller finalizes the board.
    fn cascade(&mut self, start: Coord2) -> core::result::Result<CellCount, LossCause> {
        let mut opened = 0;
        let mut pending = vec![start];

        while let Some(coords) = pending.pop() {
            if !self.chord_satisfied(coords) {
                continue;
            }

            for pos in self.grid.neighbors(coords) {
                let cell = &mut self.grid[pos];
                match (cell.state, cell.is_mine) {
                    (RevealState::Flagged, false) => return Err(LossCause::Misflag(pos)),
                    (RevealState::Hidden, true) => return Err(LossCause::CascadeDetonated(pos)),
                    (RevealState::Hidden, false) => {
                        cell.state = RevealState::Revealed;
                        log::trace!("Cascade opened {:?}, adjacent mines: {}", pos, cell.adjacent_mines);
                        self.hidden_safe -= 1;
                        opened += 1;
                        pending.push(pos);
                    }
                    _ => {}
                }
            }
        }

        Ok(opened)
    }

    fn chord_satisfied(&self, coords: Coord2) -> bool {
        self.grid[coords].adjacent_mines == self.grid.count_neighbors(coords, Cell::is_flagged)
    }

    fn lose(&mut self, cause: LossCause) -> RevealOutcome {
        debug_assert!(!self.outcome.is_finished());
        self.outcome = Outcome::Lost;
        self.loss_cause = Some(cause);
        self.finalize_loss(cause);
        log::debug!("Game lost: {:?}", cause);
        RevealOutcome::Lost(cause)
    }

    fn finalize_loss(&mut self, cause: LossCause) {
        let trigger = cause.coords();
        for coords in self.grid.iter_coords() {
            let cell = &mut self.grid[coords];
            if cell.is_flagged() && !cell.is_mine {
                cell.marks |= CellMarks::MISFLAGGED;
            }
            if cell.is_hidden() && coords != trigger {
                cell.marks |= CellMarks::DIMMED;
            }
            // correct flags stay up
            if !(cell.is_mine && cell.is_flagged()) {
                cell.state = RevealState::Revealed;
            }
        }
        self.grid[trigger].marks |= cause.mark();
        self.hidden_safe = self.grid.count_hidden_safe();
    }

    fn win(&mut self) {
        self.outcome = Outcome::Won;
        for cell in self.grid.iter_mut().filter(|cell| cell.is_mine) {
            cell.state = RevealState::Flagged;
        }
        self.flagged_count = self.grid.count_cells(Cell::is_flagged);
        log::debug!("Game won");
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn placer(&self) -> &P {
        &self.placer
    }

    pub fn cell(&self, coords: Coord2) -> Result<&Cell> {
        let coords = self.grid.validate_coords(coords)?;
        Ok(&self.grid[coords])
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_finished()
    }

    pub fn loss_cause(&self) -> Option<LossCause> {
        self.loss_cause
    }

    pub fn mines_placed(&self) -> bool {
        self.mines_placed
    }

    pub fn total_mines(&self) -> CellCount {
        self.mine_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// Mines minus flags, never below zero. Says nothing about whether the flags are right.
    pub fn mines_remaining(&self) -> CellCount {
        self.mine_count.saturating_sub(self.flagged_count)
    }

    /// Hidden safe cells, the ones still standing between the player and a win.
    pub fn hidden_safe_count(&self) -> CellCount {
        self.hidden_safe
    }

    /// Percentage of safe cells no longer hidden, 0 before the first reveal.
    pub fn progress(&self) -> f64 {
        if !self.mines_placed {
            return 0.0;
        }
        let safe = self.grid.total_cells() - self.mine_count;
        if safe == 0 {
            return 100.0;
        }
        100.0 - 100.0 * f64::from(self.hidden_safe) / f64::from(safe)
    }
}

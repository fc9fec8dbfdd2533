use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Player-facing state of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealState {
    #[default]
    Hidden,
    Flagged,
    Revealed,
}

bitflags! {
    /// Cosmetic annotations applied when the game ends, they never affect play.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct CellMarks: u8 {
        /// Flagged but not a mine.
        const MISFLAGGED   = 1;
        /// Still hidden when the game was lost.
        const DIMMED       = 1 << 1;
        /// The mine whose reveal lost the game.
        const TRIGGER      = 1 << 2;
        /// A misflag exposed by a chord, which lost the game.
        const FALSE_REVEAL = 1 << 3;
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    pub adjacent_mines: u8,
    pub state: RevealState,
    pub marks: CellMarks,
}

impl Cell {
    pub const fn is_hidden(&self) -> bool {
        matches!(self.state, RevealState::Hidden)
    }

    pub const fn is_flagged(&self) -> bool {
        matches!(self.state, RevealState::Flagged)
    }

    pub const fn is_revealed(&self) -> bool {
        matches!(self.state, RevealState::Revealed)
    }

    /// Hidden and safe, i.e. still needed to win.
    pub const fn is_hidden_safe(&self) -> bool {
        self.is_hidden() && !self.is_mine
    }
}

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a renderer should draw for a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Face {
    Hidden,
    Flagged,
    Revealed(u8),
    Mine,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub face: Face,
    pub marks: CellMarks,
}

impl From<Cell> for CellView {
    fn from(cell: Cell) -> Self {
        let face = match cell.state {
            RevealState::Hidden => Face::Hidden,
            RevealState::Flagged => Face::Flagged,
            RevealState::Revealed if cell.is_mine => Face::Mine,
            RevealState::Revealed => Face::Revealed(cell.adjacent_mines),
        };
        Self {
            face,
            marks: cell.marks,
        }
    }
}

/// Read-only copy of everything a front-end needs to draw the board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub size: Coord2,
    pub outcome: Outcome,
    pub mines_remaining: CellCount,
    pub progress: f64,
    pub cells: Array2<CellView>,
}

impl Snapshot {
    pub fn cell(&self, coords: Coord2) -> Option<CellView> {
        self.cells.get(coords.to_nd_index()).copied()
    }
}

impl<P: MinePlacer> Board<P> {
    pub fn snapshot(&self) -> Snapshot {
        let grid = self.grid();
        let cells = Array2::from_shape_fn(self.size().to_nd_index(), |(x, y)| {
            // the shape comes from the grid so indices fit a Coord
            CellView::from(grid[(x as Coord, y as Coord)])
        });

        Snapshot {
            size: self.size(),
            outcome: self.outcome(),
            mines_remaining: self.mines_remaining(),
            progress: self.progress(),
            cells,
        }
    }
}

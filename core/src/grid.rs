use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Fixed-size rectangular array of cells, its dimensions never change after construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Cell>,
}

impl Grid {
    pub fn new(size: Coord2) -> Self {
        Self {
            cells: Array2::default(size.to_nd_index()),
        }
    }

    pub fn size(&self) -> Coord2 {
        let (x, y) = self.cells.dim();
        // dimensions come from a Coord2 so they always fit
        (x as Coord, y as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        let (x, y) = self.size();
        mult(x, y)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn neighbors(&self, coords: Coord2) -> Neighbors {
        neighbors(coords, self.size())
    }

    pub fn count_neighbors(&self, coords: Coord2, pred: impl Fn(&Cell) -> bool) -> u8 {
        // at most 8
        self.neighbors(coords).filter(|&pos| pred(&self[pos])).count() as u8
    }

    /// All coordinates in x-major order.
    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (width, height) = self.size();
        (0..width).flat_map(move |x| (0..height).map(move |y| (x, y)))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }

    pub fn mine_count(&self) -> CellCount {
        self.count_cells(|cell| cell.is_mine)
    }

    pub fn count_hidden_safe(&self) -> CellCount {
        self.count_cells(Cell::is_hidden_safe)
    }

    pub fn count_cells(&self, pred: impl Fn(&Cell) -> bool) -> CellCount {
        // never more than Coord::MAX squared
        self.cells.iter().filter(|&cell| pred(cell)).count() as CellCount
    }

    /// Marks every given coordinate as a mine and bumps the adjacency count of each of its neighbors.
    pub(crate) fn lay_mines(&mut self, mines: &[Coord2]) {
        for &coords in mines {
            debug_assert!(!self[coords].is_mine, "mine laid twice at {coords:?}");
            self[coords].is_mine = true;
            for pos in self.neighbors(coords) {
                self[pos].adjacent_mines += 1;
            }
        }
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Grid {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_all_hidden_and_safe() {
        let grid = Grid::new((4, 3));

        assert_eq!(grid.size(), (4, 3));
        assert_eq!(grid.total_cells(), 12);
        assert_eq!(grid.mine_count(), 0);
        assert!(grid.iter().all(|cell| *cell == Cell::default()));
    }

    #[test]
    fn validate_coords_rejects_out_of_range() {
        let grid = Grid::new((4, 3));

        assert_eq!(grid.validate_coords((3, 2)), Ok((3, 2)));
        assert_eq!(grid.validate_coords((4, 0)), Err(GameError::InvalidCoords));
        assert_eq!(grid.validate_coords((0, 3)), Err(GameError::InvalidCoords));
    }

    #[test]
    fn lay_mines_computes_exact_adjacency() {
        let mut grid = Grid::new((5, 4));
        grid.lay_mines(&[(0, 0), (1, 1), (4, 3)]);

        assert_eq!(grid.mine_count(), 3);
        for coords in grid.iter_coords() {
            let expected = grid.count_neighbors(coords, |cell| cell.is_mine);
            assert_eq!(grid[coords].adjacent_mines, expected, "at {coords:?}");
        }
        assert_eq!(grid[(1, 0)].adjacent_mines, 2);
        assert_eq!(grid[(3, 3)].adjacent_mines, 1);
    }

    #[test]
    fn iter_coords_covers_every_cell_once() {
        let grid = Grid::new((3, 2));

        assert_eq!(grid.iter_coords().count(), 6);
        assert!(grid.iter_coords().all(|coords| grid.validate_coords(coords).is_ok()));
    }
}

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use difficulty::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use gesture::*;
pub use input::*;
pub use reveal::*;
pub use scores::*;
pub use session::*;
pub use tile::*;
pub use timer::*;
pub use types::*;

mod board;
mod difficulty;
mod engine;
mod error;
mod generator;
mod gesture;
mod input;
mod reveal;
mod scores;
mod session;
mod tile;
mod timer;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// `(columns, rows)`
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub(crate) const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Validated configuration: both dimensions positive and at least one safe cell.
    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        Self::new_unchecked(size, mines).validate()
    }

    pub fn validate(self) -> Result<Self> {
        if self.size.0 == 0 || self.size.1 == 0 {
            return Err(GameError::InvalidConfiguration {
                reason: "board needs at least one row and one column",
            });
        }
        if self.mines >= self.total_cells() {
            return Err(GameError::InvalidConfiguration {
                reason: "mine count must be lower than the number of cells",
            });
        }
        Ok(self)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

/// Ground truth of a session: mines and hint counts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineGrid {
    cells: Array2<MineCell>,
    mine_count: CellCount,
}

impl MineGrid {
    /// Builds the grid from a mine mask, computing every hint.
    ///
    /// The mask must fit in `Coord` on both axes.
    pub(crate) fn from_mine_mask(mine_mask: &Array2<bool>) -> Self {
        let mut cells: Array2<MineCell> = Array2::default(mine_mask.dim());
        let mut mine_count: CellCount = 0;

        for ((x, y), &is_mine) in mine_mask.indexed_iter() {
            if is_mine {
                cells[[x, y]] = MineCell::Mine;
                mine_count += 1;
            }
        }

        let size = grid_size(&cells);
        for x in 0..size.0 {
            for y in 0..size.1 {
                let coords = (x, y);
                // hints never overwrite mines
                if cells[coords.to_nd_index()].is_mine() {
                    continue;
                }
                let hint = neighbors(coords, size)
                    .filter(|&pos| cells[pos.to_nd_index()].is_mine())
                    .count();
                cells[coords.to_nd_index()] = MineCell::Hint(hint as u8);
            }
        }

        Self { cells, mine_count }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoordinate);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(&mine_mask))
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoordinate)
        }
    }

    pub fn size(&self) -> Coord2 {
        grid_size(&self.cells)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size().0, self.size().1)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords].is_mine()
    }

    /// Coordinates of every mine, column by column.
    pub fn mine_coords(&self) -> impl Iterator<Item = Coord2> + '_ {
        let (x_end, y_end) = self.size();
        (0..x_end)
            .flat_map(move |x| (0..y_end).map(move |y| (x, y)))
            .filter(|&coords| self.contains_mine(coords))
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }
}

impl Index<Coord2> for MineGrid {
    type Output = MineCell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

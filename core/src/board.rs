use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Both grids of a session: the mines and what the player sees.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    mines: MineGrid,
    display: Array2<DisplayCell>,
}

impl Board {
    pub fn new(mines: MineGrid) -> Self {
        let display = Array2::default(mines.size().to_nd_index());
        Self { mines, display }
    }

    pub fn size(&self) -> Coord2 {
        self.mines.size()
    }

    pub fn mines(&self) -> &MineGrid {
        &self.mines
    }

    pub fn display(&self) -> &Array2<DisplayCell> {
        &self.display
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        self.mines.validate_coords(coords)
    }

    pub fn cell_at(&self, coords: Coord2) -> DisplayCell {
        self.display[coords.to_nd_index()]
    }

    /// Sets every display cell to `cell`.
    pub fn fill(&mut self, cell: DisplayCell) {
        self.display.fill(cell);
    }

    /// Copy of the display grid to compute the next state on.
    pub fn snapshot(&self) -> Array2<DisplayCell> {
        self.display.clone()
    }

    /// Replaces the display grid with a fully computed next state.
    pub fn commit(&mut self, next: Array2<DisplayCell>) {
        debug_assert_eq!(next.dim(), self.display.dim());
        self.display = next;
    }

    /// Installs a new mine grid and hides every cell.
    pub fn replace_mines(&mut self, mines: MineGrid) {
        *self = Self::new(mines);
    }

    pub fn count_display(&self, predicate: impl Fn(DisplayCell) -> bool) -> CellCount {
        self.display.iter().filter(|&&cell| predicate(cell)).count() as CellCount
    }

    /// Whether some safe cell is still hidden or flagged.
    pub fn has_unrevealed_safe_cell(&self) -> bool {
        self.display.indexed_iter().any(|((x, y), cell)| {
            cell.is_unrevealed() && !self.mines.contains_mine((x as Coord, y as Coord))
        })
    }
}

use ndarray::Array2;

/// One axis of a board position or size. Boards are at most 255 cells wide.
pub type Coord = u8;

/// Mines, flags and cell totals.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`, `x` being the column and `y` the row.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Size `(columns, rows)` of a grid.
pub(crate) fn grid_size<T>(grid: &Array2<T>) -> Coord2 {
    let (columns, rows) = grid.dim();
    (
        Coord::try_from(columns).unwrap_or(Coord::MAX),
        Coord::try_from(rows).unwrap_or(Coord::MAX),
    )
}

/// In-bounds Moore neighborhood of `coords` on a board of the given `size`.
///
/// Corners yield 3 cells, edges 5 and everything else 8. The order is fixed: the row above from
/// left to right, then left and right on the same row, then the row below from left to right.
pub fn neighbors(coords: Coord2, size: Coord2) -> NeighborIter {
    NeighborIter::new(coords, size)
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        NeighborIter::new(index, grid_size(self))
    }
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// `coords + delta`, or `None` off the board.
fn apply_delta(coords: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let (x, y) = coords;
    let (dx, dy) = delta;
    let (max_x, max_y) = bounds;

    let next_x = x.checked_add_signed(dx)?;
    if next_x >= max_x {
        return None;
    }

    let next_y = y.checked_add_signed(dy)?;
    if next_y >= max_y {
        return None;
    }

    Some((next_x, next_y))
}

#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let delta = DISPLACEMENTS.get(usize::from(self.index))?;
            self.index += 1;

            if let Some(next_item) = apply_delta(self.center, *delta, self.bounds) {
                return Some(next_item);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(coords: Coord2, size: Coord2) -> Vec<Coord2> {
        neighbors(coords, size).collect()
    }

    #[test]
    fn corner_has_three_neighbors_in_order() {
        assert_eq!(collect((0, 0), (10, 10)), vec![(1, 0), (0, 1), (1, 1)]);
        assert_eq!(collect((9, 9), (10, 10)), vec![(8, 8), (9, 8), (8, 9)]);
    }

    #[test]
    fn interior_has_eight_neighbors_in_order() {
        assert_eq!(
            collect((5, 5), (10, 10)),
            vec![
                (4, 4),
                (5, 4),
                (6, 4),
                (4, 5),
                (6, 5),
                (4, 6),
                (5, 6),
                (6, 6),
            ]
        );
    }

    #[test]
    fn edges_have_five_neighbors() {
        assert_eq!(collect((4, 0), (10, 10)).len(), 5);
        assert_eq!(collect((0, 4), (10, 10)).len(), 5);
        assert_eq!(collect((9, 4), (10, 10)).len(), 5);
        assert_eq!(collect((4, 9), (10, 10)).len(), 5);
    }

    #[test]
    fn single_cell_board_has_no_neighbors() {
        assert!(collect((0, 0), (1, 1)).is_empty());
    }

    #[test]
    fn grid_extension_uses_array_dimensions() {
        let grid: Array2<u8> = Array2::default((16, 30).to_nd_index());
        assert_eq!(grid.iter_neighbors((15, 29)).count(), 3);
        assert_eq!(grid_size(&grid), (16, 30));
    }
}

use ndarray::Array2;

use crate::*;

/// Reveals `coords` and cascades through every connected empty cell.
///
/// Only `Hidden` cells are ever touched: flags, revealed cells and terminal markers stop the
/// cascade, which is also what keeps the fill from looping. The result is the maximal region of
/// zero hints around `coords` plus the numbered cells bordering it. Returns how many cells were
/// revealed.
pub fn flood_reveal(
    coords: Coord2,
    mines: &MineGrid,
    display: &mut Array2<DisplayCell>,
) -> CellCount {
    let mut revealed: CellCount = 0;
    let mut to_visit = vec![coords];

    while let Some(visit_coords) = to_visit.pop() {
        let cell = &mut display[visit_coords.to_nd_index()];
        if *cell != DisplayCell::Hidden {
            continue;
        }

        let MineCell::Hint(hint) = mines[visit_coords] else {
            log::warn!("flood reveal reached a mine at {:?}", visit_coords);
            continue;
        };

        *cell = DisplayCell::Revealed(hint);
        revealed += 1;
        log::trace!("revealed {:?} with hint {}", visit_coords, hint);

        if hint == 0 {
            to_visit.extend(mines.iter_neighbors(visit_coords));
        }
    }

    if revealed > 1 {
        log::debug!("flood reveal from {:?} opened {} cells", coords, revealed);
    }
    revealed
}

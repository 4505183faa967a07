use ndarray::Array2;

use super::*;

/// Uniform placement by rejection sampling: draw a random cell, keep it if it holds no mine yet.
///
/// The seed fully determines the result, so the same seed and config always give the same grid.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMineGridGenerator {
    seed: u64,
}

impl RandomMineGridGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MineGridGenerator for RandomMineGridGenerator {
    fn generate(self, config: GameConfig) -> Result<MineGrid> {
        use rand::prelude::*;

        // a full board would never terminate
        let config = config.validate()?;
        let (size_x, size_y) = config.size;

        let mut mines: Array2<bool> = Array2::default(config.size.to_nd_index());
        let mut mines_placed: CellCount = 0;
        let mut attempts: u32 = 0;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        while mines_placed < config.mines {
            attempts += 1;
            let coords: Coord2 = (rng.random_range(0..size_x), rng.random_range(0..size_y));
            let cell = &mut mines[coords.to_nd_index()];
            if !*cell {
                *cell = true;
                mines_placed += 1;
            }
        }

        log::debug!(
            "placed {} mines on {}x{} in {} draws (seed {})",
            mines_placed,
            size_x,
            size_y,
            attempts,
            self.seed
        );

        Ok(MineGrid::from_mine_mask(&mines))
    }
}

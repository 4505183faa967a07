use crate::*;
pub use random::*;

mod random;

pub trait MineGridGenerator {
    fn generate(self, config: GameConfig) -> Result<MineGrid>;
}

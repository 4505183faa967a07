use serde::{Deserialize, Serialize};

/// Ground-truth content of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MineCell {
    Mine,
    /// Number of mines among the 8 neighbors, `0..=8`.
    Hint(u8),
}

impl MineCell {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }
}

impl Default for MineCell {
    fn default() -> Self {
        Self::Hint(0)
    }
}

/// Player-visible state of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayCell {
    Hidden,
    Flagged,
    Revealed(u8),
    /// The mine that ended the game.
    Exploded,
    /// A mine shown after losing.
    MineShown,
    /// A flagged mine shown after losing.
    MineMarkedCorrect,
    /// A mine shown after winning.
    AllClearSuccess,
}

impl DisplayCell {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

impl Default for DisplayCell {
    fn default() -> Self {
        Self::Hidden
    }
}

use minesweeper_core::{ChordPolicy, Difficulty};
use serde::{Deserialize, Serialize};

/// Preferences kept between runs.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,
    pub chord_policy: ChordPolicy,
}

impl Settings {
    /// Command line values win over stored ones and are remembered.
    pub fn apply_overrides(
        &mut self,
        difficulty: Option<Difficulty>,
        chord_policy: Option<ChordPolicy>,
    ) -> bool {
        let before = *self;
        if let Some(difficulty) = difficulty {
            self.difficulty = difficulty;
        }
        if let Some(chord_policy) = chord_policy {
            self.chord_policy = chord_policy;
        }
        *self != before
    }
}

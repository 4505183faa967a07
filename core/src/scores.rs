use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestTime {
    pub time_in_seconds: u32,
    pub timestamp: DateTime<Utc>,
}

/// Best winning time per difficulty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScores {
    #[serde(default)]
    pub easy: Option<BestTime>,
    #[serde(default)]
    pub medium: Option<BestTime>,
    #[serde(default)]
    pub hard: Option<BestTime>,
}

impl HighScores {
    pub fn best(&self, difficulty: Difficulty) -> Option<BestTime> {
        *self.slot(difficulty)
    }

    /// Stores `secs` if there is no record yet or it beats the current one. Ties keep the older
    /// record. Returns whether anything changed.
    pub fn record(&mut self, difficulty: Difficulty, secs: u32, when: DateTime<Utc>) -> bool {
        let slot = self.slot_mut(difficulty);
        match *slot {
            Some(best) if best.time_in_seconds <= secs => false,
            _ => {
                log::debug!("new best time for {}: {}s", difficulty, secs);
                *slot = Some(BestTime {
                    time_in_seconds: secs,
                    timestamp: when,
                });
                true
            }
        }
    }

    fn slot(&self, difficulty: Difficulty) -> &Option<BestTime> {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }

    fn slot_mut(&mut self, difficulty: Difficulty) -> &mut Option<BestTime> {
        match difficulty {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Medium => &mut self.medium,
            Difficulty::Hard => &mut self.hard,
        }
    }
}

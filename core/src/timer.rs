use serde::{Deserialize, Serialize};

/// Whole-second game clock advanced by an external one-second tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameTimer {
    elapsed_secs: u32,
    active: bool,
}

impl GameTimer {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn start(&mut self) {
        if !self.active {
            log::trace!("timer started at {}s", self.elapsed_secs);
            self.active = true;
        }
    }

    pub fn stop(&mut self) {
        if self.active {
            log::trace!("timer stopped at {}s", self.elapsed_secs);
            self.active = false;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Counts one second when running. Returns whether the clock moved.
    pub fn tick(&mut self) -> bool {
        if self.active {
            self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        }
        self.active
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn formatted(&self) -> String {
        format_elapsed(self.elapsed_secs)
    }
}

/// `MM:SS`, minutes are not capped at 59.
pub fn format_elapsed(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

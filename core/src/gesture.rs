use web_time::{Duration, Instant};

use crate::*;

pub const DEFAULT_HOLD_THRESHOLD: Duration = Duration::from_millis(250);

/// Result of a finished touch gesture.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GestureAction {
    /// Short press, toggles the flag.
    Tap(Coord2),
    /// Press held past the threshold, reveals.
    Hold(Coord2),
}

impl GestureAction {
    /// Session messages for this gesture, in dispatch order.
    ///
    /// A hold mass-reveals first; the plain reveal that follows is a no-op on a revealed hint.
    pub fn messages(self) -> Vec<Msg> {
        match self {
            Self::Tap(coords) => vec![Msg::ToggleFlag(coords)],
            Self::Hold(coords) => vec![Msg::RevealNeighbors(coords), Msg::Reveal(coords)],
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct PendingHold {
    target: Coord2,
    started_at: Instant,
    deadline: Instant,
}

/// Turns raw touch events into taps and holds.
///
/// The pending hold is a plain deadline. Drivers call [`TouchTracker::poll`] when
/// [`TouchTracker::next_deadline`] passes; dropping the pending value is the cancellation.
#[derive(Clone, Debug)]
pub struct TouchTracker {
    threshold: Duration,
    pending: Option<PendingHold>,
    started_at: Option<Instant>,
    cancelled: bool,
}

impl Default for TouchTracker {
    fn default() -> Self {
        Self::new(DEFAULT_HOLD_THRESHOLD)
    }
}

impl TouchTracker {
    pub fn new(threshold: Duration) -> Self {
        Self {
            threshold,
            pending: None,
            started_at: None,
            cancelled: false,
        }
    }

    pub fn threshold(&self) -> Duration {
        self.threshold
    }

    pub fn touch_start(&mut self, touches: usize, target: Coord2, now: Instant) {
        if touches > 1 {
            log::trace!("multi-touch, cancelling gesture");
            self.cancel();
            return;
        }

        self.started_at = Some(now);
        self.pending = Some(PendingHold {
            target,
            started_at: now,
            deadline: now + self.threshold,
        });
    }

    /// The finger moved: treat the gesture as a scroll.
    pub fn touch_move(&mut self) {
        if self.cancelled {
            return;
        }
        log::trace!("touch moved, cancelling gesture");
        self.cancel();
    }

    /// Fires the pending hold once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<GestureAction> {
        let pending = self.pending.filter(|pending| now >= pending.deadline)?;
        self.pending = None;
        Some(GestureAction::Hold(pending.target))
    }

    pub fn touch_end(
        &mut self,
        remaining_touches: usize,
        target: Coord2,
        now: Instant,
    ) -> Option<GestureAction> {
        if self.cancelled {
            if remaining_touches == 0 {
                self.cancelled = false;
            }
            return None;
        }

        self.started_at = None;
        let pending = self.pending.take()?;
        if now.saturating_duration_since(pending.started_at) < self.threshold {
            Some(GestureAction::Tap(target))
        } else {
            // released late but nothing polled in between
            Some(GestureAction::Hold(pending.target))
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.map(|pending| pending.deadline)
    }

    /// A finger is down on the board.
    pub fn is_pressing(&self) -> bool {
        self.started_at.is_some() && !self.cancelled
    }

    fn cancel(&mut self) {
        self.pending = None;
        self.started_at = None;
        self.cancelled = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn quick_release_is_a_tap_on_the_release_cell() {
        let t0 = Instant::now();
        let mut tracker = TouchTracker::default();

        tracker.touch_start(1, (2, 3), t0);
        assert!(tracker.is_pressing());
        assert_eq!(tracker.poll(t0 + ms(100)), None);

        assert_eq!(
            tracker.touch_end(0, (2, 3), t0 + ms(120)),
            Some(GestureAction::Tap((2, 3)))
        );
        assert!(!tracker.is_pressing());
        assert_eq!(tracker.next_deadline(), None);
    }

    #[test]
    fn hold_fires_once_at_the_deadline() {
        let t0 = Instant::now();
        let mut tracker = TouchTracker::default();

        tracker.touch_start(1, (1, 1), t0);
        assert_eq!(tracker.next_deadline(), Some(t0 + ms(250)));
        assert_eq!(tracker.poll(t0 + ms(249)), None);
        assert_eq!(tracker.poll(t0 + ms(250)), Some(GestureAction::Hold((1, 1))));
        assert_eq!(tracker.poll(t0 + ms(400)), None);
        assert!(tracker.is_pressing());

        assert_eq!(tracker.touch_end(0, (1, 1), t0 + ms(600)), None);
        assert!(!tracker.is_pressing());
    }

    #[test]
    fn late_release_without_poll_still_holds() {
        let t0 = Instant::now();
        let mut tracker = TouchTracker::default();

        tracker.touch_start(1, (0, 4), t0);
        assert_eq!(
            tracker.touch_end(0, (0, 4), t0 + ms(300)),
            Some(GestureAction::Hold((0, 4)))
        );
    }

    #[test]
    fn moving_cancels_until_all_fingers_lift() {
        let t0 = Instant::now();
        let mut tracker = TouchTracker::default();

        tracker.touch_start(1, (1, 1), t0);
        tracker.touch_move();
        assert_eq!(tracker.next_deadline(), None);
        assert_eq!(tracker.poll(t0 + ms(500)), None);
        assert_eq!(tracker.touch_end(0, (1, 1), t0 + ms(50)), None);

        // the next gesture works again
        tracker.touch_start(1, (1, 1), t0 + ms(1000));
        assert_eq!(
            tracker.touch_end(0, (1, 1), t0 + ms(1010)),
            Some(GestureAction::Tap((1, 1)))
        );
    }

    #[test]
    fn multi_touch_cancels_pending_hold() {
        let t0 = Instant::now();
        let mut tracker = TouchTracker::default();

        tracker.touch_start(1, (3, 3), t0);
        tracker.touch_start(2, (4, 4), t0 + ms(10));
        assert_eq!(tracker.poll(t0 + ms(300)), None);
        assert!(!tracker.is_pressing());

        assert_eq!(tracker.touch_end(1, (4, 4), t0 + ms(320)), None);
        assert_eq!(tracker.touch_end(0, (3, 3), t0 + ms(330)), None);

        tracker.touch_start(1, (3, 3), t0 + ms(400));
        assert_eq!(tracker.poll(t0 + ms(650)), Some(GestureAction::Hold((3, 3))));
    }

    #[test]
    fn gestures_map_to_session_messages() {
        assert_eq!(
            GestureAction::Tap((1, 2)).messages(),
            vec![Msg::ToggleFlag((1, 2))]
        );
        assert_eq!(
            GestureAction::Hold((1, 2)).messages(),
            vec![Msg::RevealNeighbors((1, 2)), Msg::Reveal((1, 2))]
        );
    }
}

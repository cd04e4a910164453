use std::time::Duration;

/// Leading-edge sampler with a single trailing slot.
///
/// A sample is applied when the window since the last applied sample has
/// elapsed. Dropped samples are not queued: only the most recent one is kept
/// so the caller can flush it when the gesture ends.
#[derive(Debug, Clone)]
pub struct Throttle<T> {
    window: Duration,
    last_applied: Option<Duration>,
    pending: Option<T>,
}

impl<T: Copy> Throttle<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_applied: None,
            pending: None,
        }
    }

    /// Returns `true` if `value` should be applied now. Otherwise it replaces
    /// the pending slot.
    pub fn offer(&mut self, now: Duration, value: T) -> bool {
        let open = match self.last_applied {
            None => true,
            Some(last) => now.saturating_sub(last) >= self.window,
        };

        if open {
            self.last_applied = Some(now);
            self.pending = None;
        } else {
            self.pending = Some(value);
        }
        open
    }

    /// Takes the last dropped sample, if it was never superseded.
    pub fn take_pending(&mut self) -> Option<T> {
        self.pending.take()
    }

    pub fn reset(&mut self) {
        self.last_applied = None;
        self.pending = None;
    }
}

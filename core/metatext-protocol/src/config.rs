use core::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Default sampling window for enter events (~60 Hz).
pub const DEFAULT_THROTTLE_WINDOW_MS: u64 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SelectionConfig {
    /// Minimum interval between applied enter updates. Zero disables throttling.
    pub throttle_window_ms: u64,
}

impl SelectionConfig {
    pub fn with_throttle_window_ms(throttle_window_ms: u64) -> Self {
        Self { throttle_window_ms }
    }

    pub fn throttle_window(&self) -> Duration {
        Duration::from_millis(self.throttle_window_ms)
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            throttle_window_ms: DEFAULT_THROTTLE_WINDOW_MS,
        }
    }
}

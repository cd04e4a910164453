use metatext_protocol::SelectionConfig;
use thiserror::Error;

/// Anything slower than this makes drags visibly lag behind the pointer.
pub const MAX_THROTTLE_WINDOW_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("throttle window of {window_ms}ms exceeds the {max_ms}ms limit")]
    ThrottleWindowTooLarge { window_ms: u64, max_ms: u64 },
}

pub fn validate(config: &SelectionConfig) -> Result<(), ConfigError> {
    if config.throttle_window_ms > MAX_THROTTLE_WINDOW_MS {
        return Err(ConfigError::ThrottleWindowTooLarge {
            window_ms: config.throttle_window_ms,
            max_ms: MAX_THROTTLE_WINDOW_MS,
        });
    }
    Ok(())
}

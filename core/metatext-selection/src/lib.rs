//! Word selection engine: turns per-word pointer events into a normalized,
//! finalized selection for tool dispatch.

pub mod clock;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod throttle;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::{validate, ConfigError, MAX_THROTTLE_WINDOW_MS};
pub use dispatch::applicable_tools;
pub use engine::SelectionEngine;
pub use throttle::Throttle;

pub use metatext_protocol::{
    FinalizedSelection, PointerEvent, SelectionConfig, SelectionPhase, SelectionRange, ToolRequest,
    ToolSet,
};

#[cfg(test)]
mod tests;

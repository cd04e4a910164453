#![no_std] // Shared with the wasm bridge; keep allocation-only

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod ids;
pub mod selection;
pub mod event;
pub mod tools;
pub mod config;

pub use ids::ChunkId;
pub use selection::*;
pub use event::PointerEvent;
pub use tools::{ToolRequest, ToolSet};
pub use config::SelectionConfig;

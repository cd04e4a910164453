#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// A pointer event already resolved to word indices by the host.
///
/// Touch hosts hit-test the touch point on every `touchmove` and emit
/// `Enter` with the resulting index; the engine never sees coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum PointerEvent {
    /// mousedown / touchstart on a word.
    Press { index: usize },
    /// mouseenter / resolved touchmove over a word.
    Enter { index: usize },
    /// mouseup / touchend.
    Release,
    /// Pointer left the rendering surface.
    Leave,
    /// Host dismissed the selection (popover closed, unmount).
    Clear,
}

impl PointerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            PointerEvent::Press { .. } => "press",
            PointerEvent::Enter { .. } => "enter",
            PointerEvent::Release => "release",
            PointerEvent::Leave => "leave",
            PointerEvent::Clear => "clear",
        }
    }
}

use alloc::string::String;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Coarse interaction state of a selection engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub enum SelectionPhase {
    /// No range exists.
    #[default]
    Idle,
    /// A press is active and enters extend the range.
    Selecting,
    /// The gesture ended; finalized text is available.
    Finalized,
}

/// Raw start/end pair recorded during a drag.
///
/// `start` and `end` are in gesture order, not sorted. Use
/// [`SelectionRange::normalized`] before indexing tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct SelectionRange {
    pub start: usize,
    pub end: usize,
    pub in_progress: bool,
}

impl SelectionRange {
    /// A fresh single-word range, as created by a press.
    pub fn pressed(index: usize) -> Self {
        Self {
            start: index,
            end: index,
            in_progress: true,
        }
    }

    /// Returns `(min, max)` of the two endpoints.
    pub fn normalized(&self) -> (usize, usize) {
        if self.start <= self.end {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        let (from, to) = self.normalized();
        (from..=to).contains(&index)
    }
}

/// The display string produced when a gesture ends.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct FinalizedSelection {
    pub text: String,
    pub from: usize,
    pub to: usize,
}

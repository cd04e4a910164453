use alloc::string::String;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use bitflags::bitflags;

use crate::ids::ChunkId;

bitflags! {
    /// Contextual tools a finalized selection can open.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    #[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
    pub struct ToolSet: u8 {
        /// Split the chunk after the selected word.
        const SPLIT = 1;
        /// Look up a single word.
        const DEFINE = 2;
        /// Explain a word or phrase in context.
        const EXPLAIN = 4;
    }
}

/// Input contract handed to tool dispatch once a gesture is finalized.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct ToolRequest {
    pub chunk: ChunkId,
    pub text: String,
    pub from: usize,
    pub to: usize,
    /// Byte range in the chunk text, from the first selected token's start
    /// to the last one's end (untrimmed).
    pub byte_start: usize,
    pub byte_end: usize,
    pub tools: ToolSet,
}

impl ToolRequest {
    pub fn is_phrase(&self) -> bool {
        self.to > self.from
    }
}

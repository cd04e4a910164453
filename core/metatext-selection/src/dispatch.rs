use metatext_protocol::{FinalizedSelection, ToolSet};

/// Tools a finalized selection can open.
///
/// One word can be defined, explained, and split after (unless it is the
/// chunk's last word). A phrase can only be explained. Selections that trim
/// down to nothing (pure punctuation) offer no tools.
pub fn applicable_tools(selection: &FinalizedSelection, token_count: usize) -> ToolSet {
    if selection.text.is_empty() {
        return ToolSet::empty();
    }

    if selection.from == selection.to {
        let mut tools = ToolSet::DEFINE | ToolSet::EXPLAIN;
        if selection.to + 1 < token_count {
            tools |= ToolSet::SPLIT;
        }
        tools
    } else {
        ToolSet::EXPLAIN
    }
}

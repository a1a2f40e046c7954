//! Drag-and-drop reordering
//!
//! The UI layer reduces pointer events to a [`DragGesture`] and hands it to
//! [`reorder`], which computes the next block list from the current one. The
//! function is total: stale or nonsensical gestures yield an unchanged list
//! or a best-effort append, never a panic.
//!
//! Drops always insert *above* the hovered block. Direction-dependent
//! half-row thresholds belong to the rendering layer and are not modelled.

use std::collections::HashMap;

use pagewright_core::Block;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// One drop of a dragged block onto a hover target
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DragGesture {
    pub dragged_id: String,
    /// Block the pointer is over. `None` means the section container itself.
    #[serde(default)]
    pub hover_id: Option<String>,
    pub dragged_section: String,
    pub hover_section: String,
}

impl DragGesture {
    /// An empty `hover_id` is treated the same as `None`.
    pub fn new(
        dragged_id: impl Into<String>,
        hover_id: Option<&str>,
        dragged_section: impl Into<String>,
        hover_section: impl Into<String>,
    ) -> Self {
        Self {
            dragged_id: dragged_id.into(),
            hover_id: hover_id.filter(|h| !h.is_empty()).map(str::to_string),
            dragged_section: dragged_section.into(),
            hover_section: hover_section.into(),
        }
    }

    fn hover_target(&self) -> Option<&str> {
        self.hover_id.as_deref().filter(|h| !h.is_empty())
    }

    /// Dropping a block back onto itself in the same section
    pub fn is_self_drop(&self) -> bool {
        self.hover_target() == Some(self.dragged_id.as_str())
            && self.dragged_section == self.hover_section
    }
}

/// Compute the block list that results from applying `gesture`.
pub fn reorder(blocks: &[Block], gesture: &DragGesture) -> Vec<Block> {
    if gesture.is_self_drop() {
        return blocks.to_vec();
    }

    let Some(pos) = blocks.iter().position(|b| b.id == gesture.dragged_id) else {
        trace!("Drag of unknown block {}, ignoring", gesture.dragged_id);
        return blocks.to_vec();
    };

    let mut working = blocks.to_vec();
    let mut dragged = working.remove(pos);
    dragged.section = gesture.hover_section.clone();

    let index = insertion_index(&working, gesture);
    working.insert(index, dragged);
    normalize_orders(&mut working);
    working
}

/// Where the dragged block lands in the list that no longer contains it
fn insertion_index(remaining: &[Block], gesture: &DragGesture) -> usize {
    if let Some(hover) = gesture.hover_target() {
        if let Some(i) = remaining.iter().position(|b| b.id == hover) {
            return i;
        }
    }

    remaining
        .iter()
        .rposition(|b| b.section == gesture.hover_section)
        .map_or(remaining.len(), |last| last + 1)
}

/// Assign each block its position among same-section blocks, in one pass.
pub fn normalize_orders(blocks: &mut [Block]) {
    let mut next: HashMap<String, u32> = HashMap::new();
    for block in blocks.iter_mut() {
        let slot = next.entry(block.section.clone()).or_insert(0);
        block.order = *slot;
        *slot += 1;
    }
}

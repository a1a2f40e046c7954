//! Message types for the application (TEA pattern)

use pagewright_core::{Block, ObjectMetadata, SectionKind, Width};

use crate::layout::DragGesture;

/// All possible messages/actions in the layout editor
#[derive(Debug, Clone)]
pub enum Message {
    // ─────────────────────────────────────────────────────────
    // Object Selection
    // ─────────────────────────────────────────────────────────
    /// Operator picked an object; load its layout and metadata
    SelectObject { object_key: String },
    /// Persisted layout and metadata arrived
    LayoutLoaded {
        object_key: String,
        blocks: Vec<Block>,
        metadata: ObjectMetadata,
    },
    /// Loading the layout failed; `fatal` means a retry cannot succeed
    LayoutLoadFailed {
        object_key: String,
        error: String,
        fatal: bool,
    },
    /// Discard local edits and load the persisted layout again
    ReloadLayout,

    // ─────────────────────────────────────────────────────────
    // Layout Editing
    // ─────────────────────────────────────────────────────────
    /// Drop a pool field into a section
    PlaceField { field_id: String, section: String },
    /// Drop a pool related list into a section
    PlaceRelatedList {
        related_list_id: String,
        section: String,
    },
    /// Take a block off the layout (the field itself is kept)
    RemoveBlock { block_id: String },
    /// Drag gesture from the layout canvas
    MoveBlock(DragGesture),
    /// Change a block's rendering width
    SetBlockWidth { block_id: String, width: Width },

    // ─────────────────────────────────────────────────────────
    // Section Lifecycle
    // ─────────────────────────────────────────────────────────
    CreateSection { name: String, kind: SectionKind },
    RenameSection { old_name: String, new_name: String },
    /// Remove a section, moving its blocks to the default section
    RemoveSection { name: String },

    // ─────────────────────────────────────────────────────────
    // Pool
    // ─────────────────────────────────────────────────────────
    SetPoolFilter { query: String },

    // ─────────────────────────────────────────────────────────
    // Persistence
    // ─────────────────────────────────────────────────────────
    /// Save the current layout
    SaveLayout,
    /// Save succeeded; `blocks` is the authoritative persisted set
    LayoutSaved { object_key: String, blocks: Vec<Block> },
    /// Save failed; local state is kept for a retry
    LayoutSaveFailed {
        object_key: String,
        error: String,
        fatal: bool,
    },
}

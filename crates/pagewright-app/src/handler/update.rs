//! Main update function - handles state transitions (TEA pattern)

use crate::message::Message;
use crate::state::EditorState;

use super::{editing, persistence, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut EditorState, message: Message) -> UpdateResult {
    match message {
        // ─────────────────────────────────────────────────────────
        // Object Selection
        // ─────────────────────────────────────────────────────────
        Message::SelectObject { object_key } => persistence::handle_select_object(state, object_key),
        Message::LayoutLoaded {
            object_key,
            blocks,
            metadata,
        } => persistence::handle_layout_loaded(state, object_key, blocks, metadata),
        Message::LayoutLoadFailed {
            object_key,
            error,
            fatal,
        } => persistence::handle_layout_load_failed(state, object_key, error, fatal),
        Message::ReloadLayout => persistence::handle_reload(state),

        // ─────────────────────────────────────────────────────────
        // Layout Editing
        // ─────────────────────────────────────────────────────────
        Message::PlaceField { field_id, section } => {
            editing::handle_place_field(state, &field_id, &section)
        }
        Message::PlaceRelatedList {
            related_list_id,
            section,
        } => editing::handle_place_related_list(state, &related_list_id, &section),
        Message::RemoveBlock { block_id } => editing::handle_remove_block(state, &block_id),
        Message::MoveBlock(gesture) => editing::handle_move_block(state, &gesture),
        Message::SetBlockWidth { block_id, width } => {
            editing::handle_set_block_width(state, &block_id, width)
        }

        // ─────────────────────────────────────────────────────────
        // Section Lifecycle
        // ─────────────────────────────────────────────────────────
        Message::CreateSection { name, kind } => editing::handle_create_section(state, &name, kind),
        Message::RenameSection { old_name, new_name } => {
            editing::handle_rename_section(state, &old_name, &new_name)
        }
        Message::RemoveSection { name } => editing::handle_remove_section(state, &name),

        // ─────────────────────────────────────────────────────────
        // Pool
        // ─────────────────────────────────────────────────────────
        Message::SetPoolFilter { query } => editing::handle_set_pool_filter(state, query),

        // ─────────────────────────────────────────────────────────
        // Persistence
        // ─────────────────────────────────────────────────────────
        Message::SaveLayout => persistence::handle_save(state),
        Message::LayoutSaved { object_key, blocks } => {
            persistence::handle_layout_saved(state, object_key, blocks)
        }
        Message::LayoutSaveFailed {
            object_key,
            error,
            fatal,
        } => persistence::handle_layout_save_failed(state, object_key, error, fatal),
    }
}

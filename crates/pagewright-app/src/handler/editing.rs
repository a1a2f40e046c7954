//! Layout editing handlers: placement, moves, widths and sections

use pagewright_core::{BlockType, SectionKind, Width};
use tracing::trace;

use crate::layout::{DragGesture, LayoutRejection};
use crate::state::EditorState;

use super::UpdateResult;

/// Record the outcome of a model operation on the state
fn apply<T>(state: &mut EditorState, result: Result<T, LayoutRejection>) -> UpdateResult {
    match result {
        Ok(_) => state.record_edit(),
        Err(rejection) => state.record_rejection(rejection),
    }
    UpdateResult::none()
}

pub fn handle_place_field(state: &mut EditorState, field_id: &str, section: &str) -> UpdateResult {
    let width = state.default_width(BlockType::Field);
    let result = state
        .model
        .place_field(&state.metadata, field_id, section, width);
    apply(state, result)
}

pub fn handle_place_related_list(
    state: &mut EditorState,
    related_list_id: &str,
    section: &str,
) -> UpdateResult {
    let width = state.default_width(BlockType::RelatedList);
    let result = state
        .model
        .place_related_list(&state.metadata, related_list_id, section, width);
    apply(state, result)
}

pub fn handle_remove_block(state: &mut EditorState, block_id: &str) -> UpdateResult {
    let result = state.model.remove_block(block_id);
    apply(state, result)
}

/// Drag gestures never reject; stale ones are silent no-ops
pub fn handle_move_block(state: &mut EditorState, gesture: &DragGesture) -> UpdateResult {
    if state.model.move_block(gesture) {
        state.record_edit();
    } else {
        trace!("Drag of {} changed nothing", gesture.dragged_id);
    }
    UpdateResult::none()
}

pub fn handle_set_block_width(state: &mut EditorState, block_id: &str, width: Width) -> UpdateResult {
    let result = state.model.set_block_width(block_id, width);
    apply(state, result)
}

pub fn handle_create_section(state: &mut EditorState, name: &str, kind: SectionKind) -> UpdateResult {
    let result = state.model.create_section(name, kind);
    apply(state, result)
}

pub fn handle_rename_section(state: &mut EditorState, old_name: &str, new_name: &str) -> UpdateResult {
    match state.model.rename_section(old_name, new_name) {
        Ok(false) => {
            trace!("Section '{}' already has that name", old_name);
            UpdateResult::none()
        }
        result => apply(state, result),
    }
}

pub fn handle_remove_section(state: &mut EditorState, name: &str) -> UpdateResult {
    let result = state.model.remove_section(name);
    apply(state, result)
}

pub fn handle_set_pool_filter(state: &mut EditorState, query: String) -> UpdateResult {
    state.pool_filter = query;
    UpdateResult::none()
}

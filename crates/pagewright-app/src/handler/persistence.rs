//! Object selection, loading and save handlers

use pagewright_core::{Block, ObjectMetadata};
use tracing::{debug, error, info, warn};

use crate::message::Message;
use crate::reconciler::{SaveOutcome, SaveStatus};
use crate::state::{EditorState, LoadStatus};

use super::{UpdateAction, UpdateResult};

pub fn handle_select_object(state: &mut EditorState, object_key: String) -> UpdateResult {
    let object_key = object_key.trim().to_string();
    if object_key.is_empty() {
        warn!("Ignoring selection of an empty object key");
        return UpdateResult::none();
    }

    info!("Selecting object {}", object_key);
    state.reset_object(object_key.clone());
    UpdateResult::action(UpdateAction::LoadObject { object_key })
}

pub fn handle_reload(state: &EditorState) -> UpdateResult {
    match state.object_key.clone() {
        Some(object_key) => UpdateResult::message(Message::SelectObject { object_key }),
        None => UpdateResult::none(),
    }
}

pub fn handle_layout_loaded(
    state: &mut EditorState,
    object_key: String,
    blocks: Vec<Block>,
    metadata: ObjectMetadata,
) -> UpdateResult {
    if !state.is_current(&object_key) {
        debug!("Dropping layout for {}, no longer selected", object_key);
        return UpdateResult::none();
    }

    debug!(
        "Loaded {} block(s) and {} field(s) for {}",
        blocks.len(),
        metadata.fields.len(),
        object_key
    );
    state.model.reset();
    state.model.replace_blocks(blocks);
    state.metadata = metadata;
    state.load_status = LoadStatus::Loaded;
    state.dirty = false;
    state.revision += 1;
    UpdateResult::none()
}

pub fn handle_layout_load_failed(
    state: &mut EditorState,
    object_key: String,
    error: String,
    fatal: bool,
) -> UpdateResult {
    if !state.is_current(&object_key) {
        return UpdateResult::none();
    }

    error!("Failed to load layout for {} (fatal: {}): {}", object_key, fatal, error);
    state.load_status = LoadStatus::Failed {
        message: error,
        fatal,
    };
    UpdateResult::none()
}

pub fn handle_save(state: &mut EditorState) -> UpdateResult {
    let Some(object_key) = state.object_key.clone() else {
        warn!("Save requested with no object selected");
        return UpdateResult::none();
    };
    if state.save_status.is_saving() {
        warn!("Save already in progress, ignoring");
        return UpdateResult::none();
    }
    if state.load_status != LoadStatus::Loaded {
        warn!("Layout for {} is not loaded, refusing to save", object_key);
        return UpdateResult::none();
    }

    state.save_status = SaveStatus::Saving {
        object_key: object_key.clone(),
    };
    UpdateResult::action(UpdateAction::SaveLayout {
        object_key,
        blocks: state.model.blocks().to_vec(),
    })
}

/// Move the save protocol back to idle if `object_key` was the one in flight
fn finish_save(state: &mut EditorState, object_key: &str) {
    if matches!(&state.save_status, SaveStatus::Saving { object_key: k } if k == object_key) {
        state.save_status = SaveStatus::Idle;
        state.completed_saves += 1;
    }
}

pub fn handle_layout_saved(
    state: &mut EditorState,
    object_key: String,
    blocks: Vec<Block>,
) -> UpdateResult {
    finish_save(state, &object_key);
    info!("Saved layout for {} ({} block(s))", object_key, blocks.len());
    state.last_save = Some(SaveOutcome::Saved {
        block_count: blocks.len(),
    });
    if !state.is_current(&object_key) {
        debug!("Dropping save result for {}, no longer selected", object_key);
        return UpdateResult::none();
    }

    state.model.replace_blocks(blocks);
    state.dirty = false;
    state.revision += 1;
    UpdateResult::none()
}

pub fn handle_layout_save_failed(
    state: &mut EditorState,
    object_key: String,
    error: String,
    fatal: bool,
) -> UpdateResult {
    finish_save(state, &object_key);
    error!("Failed to save layout for {} (fatal: {}): {}", object_key, fatal, error);
    state.last_save = Some(SaveOutcome::Failed {
        message: error,
        fatal,
    });
    UpdateResult::none()
}

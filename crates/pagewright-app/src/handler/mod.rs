//! Handler module - TEA update function and message handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `editing`: Block placement, moves and section lifecycle
//! - `persistence`: Object selection, loading and saving

pub(crate) mod editing;
pub(crate) mod persistence;
pub(crate) mod update;


use pagewright_core::Block;

use crate::message::Message;

// Re-export main entry point
pub use update::update;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone)]
pub enum UpdateAction {
    /// Fetch persisted blocks and placeable metadata for an object
    LoadObject { object_key: String },

    /// Submit the block list to the store.
    ///
    /// `blocks` is a snapshot taken when the save was requested. Edits made
    /// while the save is in flight are replaced by its result.
    SaveLayout {
        object_key: String,
        blocks: Vec<Block>,
    },
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}

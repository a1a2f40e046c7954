//! Domain events emitted by the Engine for external consumers
//!
//! Events are broadcast after each message processing cycle via
//! `Engine::subscribe()`, so subscribers always observe a settled state.

use serde::Serialize;

/// Domain events emitted by the Engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EngineEvent {
    // ─────────────────────────────────────────────────────────
    // Loading
    // ─────────────────────────────────────────────────────────
    /// Persisted layout for the selected object is in place
    LayoutLoaded {
        object_key: String,
        block_count: usize,
        section_count: usize,
    },

    /// `fatal` is set when retrying cannot succeed, e.g. a corrupt store
    LoadFailed {
        object_key: String,
        error: String,
        fatal: bool,
    },

    // ─────────────────────────────────────────────────────────
    // Editing
    // ─────────────────────────────────────────────────────────
    /// Block list or section registry changed locally
    LayoutChanged { revision: u64, dirty: bool },

    /// An operation was refused; the layout is unchanged
    Rejected { code: String, reason: String },

    // ─────────────────────────────────────────────────────────
    // Saving
    // ─────────────────────────────────────────────────────────
    SaveStarted { object_key: String },

    SaveCompleted {
        object_key: String,
        block_count: usize,
    },

    SaveFailed {
        object_key: String,
        error: String,
        fatal: bool,
    },
}

impl EngineEvent {
    /// Short name of the event type, for logging
    pub fn event_type(&self) -> &'static str {
        match self {
            EngineEvent::LayoutLoaded { .. } => "layout_loaded",
            EngineEvent::LoadFailed { .. } => "load_failed",
            EngineEvent::LayoutChanged { .. } => "layout_changed",
            EngineEvent::Rejected { .. } => "rejected",
            EngineEvent::SaveStarted { .. } => "save_started",
            EngineEvent::SaveCompleted { .. } => "save_completed",
            EngineEvent::SaveFailed { .. } => "save_failed",
        }
    }
}

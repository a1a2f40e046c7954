//! Headless mode - NDJSON commands in, NDJSON events out
//!
//! Drives a layout editing session without any UI. Commands are read from
//! stdin one JSON object per line (see [`command`]), events are written to
//! stdout one JSON object per line. Logs never go to stdout.
//!
//! # Example Session
//!
//! ```text
//! > {"cmd":"select","object":"account"}
//! {"event":"layout_loaded","object_key":"account","block_count":2,"section_count":1,"timestamp":1704700001000}
//! > {"cmd":"place_field","field_id":"f_phone"}
//! {"event":"layout_changed","revision":3,"dirty":true,"timestamp":1704700002000}
//! > {"cmd":"save"}
//! {"event":"save_started","object_key":"account","timestamp":1704700003000}
//! {"event":"saved","object_key":"account","block_count":3,"timestamp":1704700003005}
//! ```

pub mod command;
pub mod runner;

use chrono::Utc;
use serde::Serialize;
use std::io::{self, Write};
use tracing::error;

use pagewright_app::{EditorState, EngineEvent};
use pagewright_core::{Block, FieldMeta, RelatedListMeta, SectionKind};

/// One section of the layout as reported by `show`
#[derive(Debug, Clone, Serialize)]
pub struct SectionView {
    pub name: String,
    pub kind: SectionKind,
    pub blocks: Vec<Block>,
}

/// Events emitted in headless mode
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    LayoutLoaded {
        object_key: String,
        block_count: usize,
        section_count: usize,
        timestamp: i64,
    },

    /// Local edit applied
    LayoutChanged {
        revision: u64,
        dirty: bool,
        timestamp: i64,
    },

    /// Operation refused, layout unchanged
    Rejected {
        code: String,
        reason: String,
        timestamp: i64,
    },

    SaveStarted { object_key: String, timestamp: i64 },

    Saved {
        object_key: String,
        block_count: usize,
        timestamp: i64,
    },

    SaveFailed {
        object_key: String,
        error: String,
        fatal: bool,
        timestamp: i64,
    },

    /// Unplaced fields and related lists matching the current filter
    Pool {
        filter: String,
        fields: Vec<FieldMeta>,
        related_lists: Vec<RelatedListMeta>,
        timestamp: i64,
    },

    /// Full layout snapshot, sections in render order
    Layout {
        object_key: Option<String>,
        dirty: bool,
        sections: Vec<SectionView>,
        timestamp: i64,
    },

    Error {
        message: String,
        fatal: bool,
        timestamp: i64,
    },
}

impl HeadlessEvent {
    /// Emit this event to stdout as JSON
    pub fn emit(&self) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize headless event: {}", e);
                return;
            }
        };

        // NDJSON: one event per line, flushed immediately
        let mut stdout = io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", json) {
            error!("Failed to write headless event to stdout: {}", e);
            return;
        }
        if let Err(e) = stdout.flush() {
            error!("Failed to flush headless stdout: {}", e);
        }
    }

    /// Get current timestamp in milliseconds
    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    // ─────────────────────────────────────────────────────────
    // Convenience constructors
    // ─────────────────────────────────────────────────────────

    /// Map an engine event onto its headless form
    pub fn from_engine(event: EngineEvent) -> Self {
        let timestamp = Self::now();
        match event {
            EngineEvent::LayoutLoaded {
                object_key,
                block_count,
                section_count,
            } => Self::LayoutLoaded {
                object_key,
                block_count,
                section_count,
                timestamp,
            },
            EngineEvent::LoadFailed {
                object_key,
                error,
                fatal,
            } => Self::Error {
                message: format!("failed to load {}: {}", object_key, error),
                fatal,
                timestamp,
            },
            EngineEvent::LayoutChanged { revision, dirty } => Self::LayoutChanged {
                revision,
                dirty,
                timestamp,
            },
            EngineEvent::Rejected { code, reason } => Self::Rejected {
                code,
                reason,
                timestamp,
            },
            EngineEvent::SaveStarted { object_key } => Self::SaveStarted {
                object_key,
                timestamp,
            },
            EngineEvent::SaveCompleted {
                object_key,
                block_count,
            } => Self::Saved {
                object_key,
                block_count,
                timestamp,
            },
            EngineEvent::SaveFailed {
                object_key,
                error,
                fatal,
            } => Self::SaveFailed {
                object_key,
                error,
                fatal,
                timestamp,
            },
        }
    }

    pub fn pool(state: &EditorState) -> Self {
        let pool = state.pool();
        Self::Pool {
            filter: state.pool_filter.clone(),
            fields: pool.fields.into_iter().cloned().collect(),
            related_lists: pool.related_lists.into_iter().cloned().collect(),
            timestamp: Self::now(),
        }
    }

    pub fn layout(state: &EditorState) -> Self {
        let sections = state
            .model
            .registry()
            .sections()
            .iter()
            .map(|section| SectionView {
                name: section.name.clone(),
                kind: section.kind,
                blocks: state
                    .model
                    .blocks_in_section(&section.name)
                    .into_iter()
                    .cloned()
                    .collect(),
            })
            .collect();

        Self::Layout {
            object_key: state.object_key.clone(),
            dirty: state.dirty,
            sections,
            timestamp: Self::now(),
        }
    }

    pub fn error(message: String, fatal: bool) -> Self {
        Self::Error {
            message,
            fatal,
            timestamp: Self::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagewright_core::{BlockRef, ObjectMetadata};

    #[test]
    fn test_saved_serialization() {
        let event = HeadlessEvent::from_engine(EngineEvent::SaveCompleted {
            object_key: "account".to_string(),
            block_count: 4,
        });
        let json = serde_json::to_string(&event).expect("serialization failed");

        let value: serde_json::Value = serde_json::from_str(&json).expect("invalid JSON");

        assert_eq!(value["event"], "saved");
        assert_eq!(value["object_key"], "account");
        assert_eq!(value["block_count"], 4);
        assert!(value["timestamp"].is_number());
    }

    #[test]
    fn test_load_failure_becomes_error_event() {
        let event = HeadlessEvent::from_engine(EngineEvent::LoadFailed {
            object_key: "ghost".to_string(),
            error: "Object not found: ghost".to_string(),
            fatal: false,
        });
        let value = serde_json::to_value(&event).expect("serialization failed");

        assert_eq!(value["event"], "error");
        assert_eq!(value["fatal"], false);
    }

    #[test]
    fn test_corrupt_store_failure_is_fatal() {
        let event = HeadlessEvent::from_engine(EngineEvent::LoadFailed {
            object_key: "account".to_string(),
            error: "Layout store is corrupt: layouts.json".to_string(),
            fatal: true,
        });
        let value = serde_json::to_value(&event).expect("serialization failed");
        assert_eq!(value["event"], "error");
        assert_eq!(value["fatal"], true);

        let event = HeadlessEvent::from_engine(EngineEvent::SaveFailed {
            object_key: "account".to_string(),
            error: "Layout store is corrupt: layouts.json".to_string(),
            fatal: true,
        });
        let value = serde_json::to_value(&event).expect("serialization failed");
        assert_eq!(value["event"], "save_failed");
        assert_eq!(value["fatal"], true);
    }

    #[test]
    fn test_layout_lists_sections_in_order() {
        let mut state = EditorState::new();
        state.model.replace_blocks(vec![
            Block::new("b2", BlockRef::related_list("rl_cases"), "Cases", "Related"),
            Block::new("b1", BlockRef::field("f_name"), "Name", "details"),
        ]);

        let value = serde_json::to_value(HeadlessEvent::layout(&state)).expect("serialization failed");

        assert_eq!(value["event"], "layout");
        assert_eq!(value["sections"][0]["name"], "details");
        assert_eq!(value["sections"][1]["name"], "Related");
        assert_eq!(value["sections"][1]["kind"], "RELATED_SECTION");
        assert_eq!(value["sections"][1]["blocks"][0]["block_type"], "RELATED_LIST");
    }

    #[test]
    fn test_pool_serialization() {
        let mut state = EditorState::new();
        state.metadata = ObjectMetadata {
            fields: vec![FieldMeta::new("f_name", "Name", "name")],
            related_lists: vec![],
        };

        let value = serde_json::to_value(HeadlessEvent::pool(&state)).expect("serialization failed");

        assert_eq!(value["event"], "pool");
        assert_eq!(value["fields"][0]["id"], "f_name");
        assert_eq!(value["related_lists"].as_array().map(Vec::len), Some(0));
    }
}

//! Stdin command parsing for headless mode
//!
//! One JSON object per line, tagged by `cmd`:
//!
//! ```json
//! {"cmd":"select","object":"account"}
//! {"cmd":"move","dragged_id":"b3","hover_id":"b1","dragged_section":"details","hover_section":"details"}
//! {"cmd":"create_section","name":"Contact","kind":"FIELD_SECTION"}
//! ```
//!
//! `section` may be omitted from placement commands; the block then goes to
//! the default section.

use serde::Deserialize;

use pagewright_app::{DragGesture, Message};
use pagewright_core::{SectionKind, Width};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum HeadlessCommand {
    Select {
        object: String,
    },
    Reload,
    PlaceField {
        field_id: String,
        #[serde(default)]
        section: Option<String>,
    },
    PlaceRelatedList {
        related_list_id: String,
        #[serde(default)]
        section: Option<String>,
    },
    RemoveBlock {
        block_id: String,
    },
    Move(DragGesture),
    SetWidth {
        block_id: String,
        width: Width,
    },
    CreateSection {
        name: String,
        #[serde(default)]
        kind: SectionKind,
    },
    RenameSection {
        old_name: String,
        new_name: String,
    },
    RemoveSection {
        name: String,
    },
    Filter {
        #[serde(default)]
        query: String,
    },
    Save,
    /// Report the current layout
    Show,
    /// Report the current pool
    Pool,
}

impl HeadlessCommand {
    pub fn parse(line: &str) -> serde_json::Result<Self> {
        serde_json::from_str(line)
    }

    /// Translate into an editor message.
    ///
    /// Returns `None` for read-only commands the runner answers itself.
    pub fn into_message(self, default_section: &str) -> Option<Message> {
        let or_default = |section: Option<String>| section.unwrap_or_else(|| default_section.to_string());

        let message = match self {
            HeadlessCommand::Select { object } => Message::SelectObject { object_key: object },
            HeadlessCommand::Reload => Message::ReloadLayout,
            HeadlessCommand::PlaceField { field_id, section } => Message::PlaceField {
                field_id,
                section: or_default(section),
            },
            HeadlessCommand::PlaceRelatedList {
                related_list_id,
                section,
            } => Message::PlaceRelatedList {
                related_list_id,
                section: or_default(section),
            },
            HeadlessCommand::RemoveBlock { block_id } => Message::RemoveBlock { block_id },
            HeadlessCommand::Move(gesture) => Message::MoveBlock(gesture),
            HeadlessCommand::SetWidth { block_id, width } => {
                Message::SetBlockWidth { block_id, width }
            }
            HeadlessCommand::CreateSection { name, kind } => Message::CreateSection { name, kind },
            HeadlessCommand::RenameSection { old_name, new_name } => {
                Message::RenameSection { old_name, new_name }
            }
            HeadlessCommand::RemoveSection { name } => Message::RemoveSection { name },
            HeadlessCommand::Filter { query } => Message::SetPoolFilter { query },
            HeadlessCommand::Save => Message::SaveLayout,
            HeadlessCommand::Show | HeadlessCommand::Pool => return None,
        };
        Some(message)
    }
}

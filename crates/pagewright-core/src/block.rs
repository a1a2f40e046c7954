//! Placed layout blocks and their save-request representation

use serde::{Deserialize, Serialize};

/// Prefix reserved for client-generated block ids that have not been saved yet
pub const TEMP_ID_PREFIX: &str = "temp-";

/// Check whether a block id is a client-side temporary id
pub fn is_temporary_id(id: &str) -> bool {
    id.starts_with(TEMP_ID_PREFIX)
}

/// Kind of widget a block places on the record page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockType {
    Field,
    RelatedList,
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlockType::Field => write!(f, "field"),
            BlockType::RelatedList => write!(f, "related list"),
        }
    }
}

/// Rendering width hint. Not used by ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Width {
    #[default]
    Half,
    Full,
}

/// Foreign reference into field or related-list metadata.
///
/// Serialized flat next to the block's other fields as
/// `"block_type": "FIELD", "field_ref": "..."` or
/// `"block_type": "RELATED_LIST", "related_list_ref": "..."`, so exactly one
/// reference is ever present and it always matches the block type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(tag = "block_type")]
pub enum BlockRef {
    #[serde(rename = "FIELD")]
    Field { field_ref: String },
    #[serde(rename = "RELATED_LIST")]
    RelatedList { related_list_ref: String },
}

impl BlockRef {
    pub fn field(id: impl Into<String>) -> Self {
        Self::Field {
            field_ref: id.into(),
        }
    }

    pub fn related_list(id: impl Into<String>) -> Self {
        Self::RelatedList {
            related_list_ref: id.into(),
        }
    }

    pub fn block_type(&self) -> BlockType {
        match self {
            BlockRef::Field { .. } => BlockType::Field,
            BlockRef::RelatedList { .. } => BlockType::RelatedList,
        }
    }

    /// Id of the referenced field or related list
    pub fn target_id(&self) -> &str {
        match self {
            BlockRef::Field { field_ref } => field_ref,
            BlockRef::RelatedList { related_list_ref } => related_list_ref,
        }
    }
}

/// One placed field or related-list widget inside a section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Block {
    /// Durable server id, or a `temp-` id for blocks created since the last save
    pub id: String,

    #[serde(flatten)]
    pub reference: BlockRef,

    /// Label copied from the referenced metadata at placement time
    pub label: String,

    /// Key into the section registry
    pub section: String,

    /// Dense 0-based position within the section
    #[serde(default)]
    pub order: u32,

    #[serde(default)]
    pub width: Width,
}

impl Block {
    pub fn new(
        id: impl Into<String>,
        reference: BlockRef,
        label: impl Into<String>,
        section: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            reference,
            label: label.into(),
            section: section.into(),
            order: 0,
            width: Width::default(),
        }
    }

    pub fn with_order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }

    pub fn with_width(mut self, width: Width) -> Self {
        self.width = width;
        self
    }

    pub fn block_type(&self) -> BlockType {
        self.reference.block_type()
    }

    pub fn is_temporary(&self) -> bool {
        is_temporary_id(&self.id)
    }
}

/// A block as submitted to the persistence collaborator.
///
/// `id` is `None` for blocks that only carry a temporary id (create) and the
/// durable id otherwise (update).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BlockSaveRecord {
    pub id: Option<String>,

    #[serde(flatten)]
    pub reference: BlockRef,

    pub label: String,
    pub section: String,
    pub order: u32,
    pub width: Width,
}

impl BlockSaveRecord {
    /// Whether the server should create a new block for this record
    pub fn is_create(&self) -> bool {
        self.id.is_none()
    }
}

impl From<&Block> for BlockSaveRecord {
    fn from(block: &Block) -> Self {
        Self {
            id: (!block.is_temporary()).then(|| block.id.clone()),
            reference: block.reference.clone(),
            label: block.label.clone(),
            section: block.section.clone(),
            order: block.order,
            width: block.width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temporary_id_detection() {
        assert!(is_temporary_id("temp-3fa9c2"));
        assert!(!is_temporary_id("srv-1"));
        assert!(!is_temporary_id("attempt-1"));
    }

    #[test]
    fn test_block_serializes_flat_reference() {
        let block = Block::new("b1", BlockRef::field("name"), "Name", "details").with_order(2);
        let json = serde_json::to_value(&block).unwrap();

        assert_eq!(json["block_type"], "FIELD");
        assert_eq!(json["field_ref"], "name");
        assert!(json.get("related_list_ref").is_none());
        assert_eq!(json["order"], 2);
        assert_eq!(json["width"], "half");
    }

    #[test]
    fn test_block_deserializes_related_list() {
        let json = r#"{
            "id": "srv-9",
            "block_type": "RELATED_LIST",
            "related_list_ref": "contacts",
            "label": "Contacts",
            "section": "related",
            "order": 0,
            "width": "full"
        }"#;
        let block: Block = serde_json::from_str(json).unwrap();

        assert_eq!(block.block_type(), BlockType::RelatedList);
        assert_eq!(block.reference.target_id(), "contacts");
        assert_eq!(block.width, Width::Full);
    }

    #[test]
    fn test_save_record_create_vs_update() {
        let temp = Block::new("temp-1", BlockRef::field("email"), "Email", "details");
        let durable = Block::new("srv-4", BlockRef::field("phone"), "Phone", "details");

        let create = BlockSaveRecord::from(&temp);
        let update = BlockSaveRecord::from(&durable);

        assert!(create.is_create());
        assert_eq!(create.reference, BlockRef::field("email"));
        assert_eq!(update.id.as_deref(), Some("srv-4"));

        let json = serde_json::to_value(&create).unwrap();
        assert!(json["id"].is_null());
    }
}

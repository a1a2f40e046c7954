//! Externally owned field and related-list metadata
//!
//! The layout engine never owns these entities, it only places references to
//! them. They come from the persistence collaborator alongside the blocks.

use serde::{Deserialize, Serialize};

/// A column of the object's table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FieldMeta {
    pub id: String,
    pub label: String,
    /// Column name as used by the schema
    pub api_name: String,
}

impl FieldMeta {
    pub fn new(id: impl Into<String>, label: impl Into<String>, api_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            api_name: api_name.into(),
        }
    }
}

/// A list of child records shown on the parent's detail page
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RelatedListMeta {
    pub id: String,
    pub label: String,
    /// Name of the child object the list is drawn from
    pub api_name: String,
}

impl RelatedListMeta {
    pub fn new(id: impl Into<String>, label: impl Into<String>, api_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            api_name: api_name.into(),
        }
    }
}

/// All placeable metadata for one object
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ObjectMetadata {
    #[serde(default)]
    pub fields: Vec<FieldMeta>,
    #[serde(default)]
    pub related_lists: Vec<RelatedListMeta>,
}

impl ObjectMetadata {
    pub fn field(&self, id: &str) -> Option<&FieldMeta> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn related_list(&self, id: &str) -> Option<&RelatedListMeta> {
        self.related_lists.iter().find(|r| r.id == id)
    }
}

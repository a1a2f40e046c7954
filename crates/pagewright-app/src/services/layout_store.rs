//! Persistence collaborator for page layouts
//!
//! The editor core never talks to a backend directly. Everything it needs
//! from the outside world goes through [`LayoutStore`].

use pagewright_core::prelude::*;
use pagewright_core::{Block, BlockSaveRecord, ObjectMetadata};
use serde::{Deserialize, Serialize};

/// Layout persistence operations
///
/// `save_layout_blocks` returns `Ok(None)` when the backend accepted the save
/// but sent no body. Callers must not assume local state is authoritative in
/// that case.
#[trait_variant::make(LayoutStore: Send)]
pub trait LocalLayoutStore {
    /// Currently persisted blocks of an object
    async fn fetch_layout_blocks(&self, object_key: &str) -> Result<Vec<Block>>;

    /// Persist the full ordered block list of an object
    async fn save_layout_blocks(
        &self,
        object_key: &str,
        records: Vec<BlockSaveRecord>,
    ) -> Result<Option<Vec<Block>>>;

    /// Fields and related lists that may be placed on the object's page
    async fn fetch_metadata(&self, object_key: &str) -> Result<ObjectMetadata>;
}

/// One object's persisted layout and metadata, as kept by the bundled stores
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct StoredObject {
    #[serde(default)]
    pub metadata: ObjectMetadata,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl StoredObject {
    pub fn new(metadata: ObjectMetadata) -> Self {
        Self {
            metadata,
            blocks: Vec::new(),
        }
    }

    /// Replace the persisted layout with `records`.
    ///
    /// Create records get a fresh `srv-<n>` id from `next_id`. Update records
    /// must name a block that is currently persisted. Blocks absent from
    /// `records` are deleted. Nothing changes if any record is invalid.
    pub fn apply_save(&mut self, records: Vec<BlockSaveRecord>, next_id: &mut u64) -> Result<Vec<Block>> {
        for record in &records {
            if let Some(id) = &record.id {
                if !self.blocks.iter().any(|b| &b.id == id) {
                    return Err(Error::persistence(format!("block '{}' does not exist", id)));
                }
            }
        }

        let saved: Vec<Block> = records
            .into_iter()
            .map(|record| {
                let id = record.id.unwrap_or_else(|| {
                    *next_id += 1;
                    format!("srv-{}", next_id)
                });
                Block {
                    id,
                    reference: record.reference,
                    label: record.label,
                    section: record.section,
                    order: record.order,
                    width: record.width,
                }
            })
            .collect();

        self.blocks = saved.clone();
        Ok(saved)
    }
}

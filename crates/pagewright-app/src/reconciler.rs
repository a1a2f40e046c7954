//! Layout persistence and reconciliation
//!
//! A save submits the whole ordered block list. Blocks with temporary ids go
//! out as creates (no id), everything else as updates. The store answers with
//! the authoritative persisted set, which replaces local state wholesale;
//! that replacement is what retires temporary ids.
//!
//! If the answer has no body, or still carries temporary ids, local state is
//! not trusted and the persisted set is fetched again instead.
//!
//! Per save: `Idle -> Saving -> (state replaced | error surfaced) -> Idle`.
//! On failure local state is left as it was so the operator can retry.

use std::sync::Arc;

use pagewright_core::prelude::*;
use pagewright_core::{Block, BlockSaveRecord, ObjectMetadata};

use crate::services::LayoutStore;

/// Where the editor is in the save protocol
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SaveStatus {
    #[default]
    Idle,
    /// A save for `object_key` is in flight
    Saving { object_key: String },
}

impl SaveStatus {
    pub fn is_saving(&self) -> bool {
        matches!(self, SaveStatus::Saving { .. })
    }
}

/// Result of the most recent completed save
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved { block_count: usize },
    Failed { message: String, fatal: bool },
}

/// Convert local blocks into save records
pub fn to_save_records(blocks: &[Block]) -> Vec<BlockSaveRecord> {
    blocks.iter().map(BlockSaveRecord::from).collect()
}

/// Runs the fetch/save protocol against an injected store
pub struct Reconciler<S> {
    store: Arc<S>,
}

impl<S> Clone for Reconciler<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> std::fmt::Debug for Reconciler<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler").finish_non_exhaustive()
    }
}

impl<S: LayoutStore + Sync> Reconciler<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Currently persisted blocks
    pub async fn fetch(&self, object_key: &str) -> Result<Vec<Block>> {
        let blocks = self.store.fetch_layout_blocks(object_key).await?;
        debug!("Fetched {} block(s) for {}", blocks.len(), object_key);
        Ok(blocks)
    }

    pub async fn fetch_metadata(&self, object_key: &str) -> Result<ObjectMetadata> {
        self.store.fetch_metadata(object_key).await
    }

    /// Save `blocks` and return the set that should replace local state.
    ///
    /// The returned blocks never carry temporary ids.
    pub async fn save(&self, object_key: &str, blocks: &[Block]) -> Result<Vec<Block>> {
        let records = to_save_records(blocks);
        let creates = records.iter().filter(|r| r.is_create()).count();
        info!(
            "Saving {} block(s) for {} ({} new)",
            records.len(),
            object_key,
            creates
        );

        let response = self
            .store
            .save_layout_blocks(object_key, records)
            .await
            .map_err(|e| match e {
                Error::Persistence { .. }
                | Error::ObjectNotFound { .. }
                | Error::StoreCorrupt { .. } => e,
                other => Error::persistence(other.to_string()),
            })?;

        match response {
            Some(saved) if !saved.iter().any(Block::is_temporary) => Ok(saved),
            Some(_) => {
                warn!("Save response for {} still has temporary ids, re-fetching", object_key);
                self.refetch(object_key).await
            }
            None => {
                debug!("Save response for {} had no body, re-fetching", object_key);
                self.refetch(object_key).await
            }
        }
    }

    async fn refetch(&self, object_key: &str) -> Result<Vec<Block>> {
        let blocks = self
            .store
            .fetch_layout_blocks(object_key)
            .await
            .map_err(|e| Error::fetch(e.to_string()))?;

        if blocks.iter().any(Block::is_temporary) {
            return Err(Error::fetch(format!(
                "persisted layout for {} contains unsaved blocks",
                object_key
            )));
        }
        Ok(blocks)
    }
}

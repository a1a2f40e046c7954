//! In-process layout store

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Mutex;

use pagewright_core::prelude::*;
use pagewright_core::{Block, BlockSaveRecord, ObjectMetadata};

use super::layout_store::{LayoutStore, StoredObject};

#[derive(Debug, Default)]
struct Inner {
    objects: HashMap<String, StoredObject>,
    next_id: u64,
}

/// Layout store held entirely in memory.
///
/// Durable ids are `srv-<n>`. Failure switches let callers exercise the
/// error and missing-body paths of the save protocol.
#[derive(Debug, Default)]
pub struct MemoryLayoutStore {
    inner: Mutex<Inner>,
    fail_saves: AtomicBool,
    omit_save_body: AtomicBool,
}

impl MemoryLayoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an object with its placeable metadata
    pub fn with_object(mut self, object_key: impl Into<String>, metadata: ObjectMetadata) -> Self {
        self.inner
            .get_mut()
            .objects
            .insert(object_key.into(), StoredObject::new(metadata));
        self
    }

    /// Seed already-persisted blocks for a registered object
    pub fn with_blocks(mut self, object_key: &str, blocks: Vec<Block>) -> Self {
        let inner = self.inner.get_mut();
        // Seeded `srv-<n>` ids must never be handed out again
        let highest = blocks
            .iter()
            .filter_map(|b| b.id.strip_prefix("srv-")?.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        inner.next_id = inner.next_id.max(highest);
        inner
            .objects
            .entry(object_key.to_string())
            .or_default()
            .blocks = blocks;
        self
    }

    /// Make every subsequent save fail
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Accept saves but answer without a body
    pub fn set_omit_save_body(&self, omit: bool) {
        self.omit_save_body.store(omit, Ordering::SeqCst);
    }

    /// Snapshot of what is persisted for an object
    pub async fn persisted(&self, object_key: &str) -> Option<Vec<Block>> {
        let inner = self.inner.lock().await;
        inner.objects.get(object_key).map(|o| o.blocks.clone())
    }
}

impl LayoutStore for MemoryLayoutStore {
    async fn fetch_layout_blocks(&self, object_key: &str) -> Result<Vec<Block>> {
        let inner = self.inner.lock().await;
        inner
            .objects
            .get(object_key)
            .map(|o| o.blocks.clone())
            .ok_or_else(|| Error::object_not_found(object_key))
    }

    async fn save_layout_blocks(
        &self,
        object_key: &str,
        records: Vec<BlockSaveRecord>,
    ) -> Result<Option<Vec<Block>>> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(Error::persistence("store unavailable"));
        }

        let mut inner = self.inner.lock().await;
        let Inner { objects, next_id } = &mut *inner;
        let object = objects
            .get_mut(object_key)
            .ok_or_else(|| Error::object_not_found(object_key))?;

        let saved = object.apply_save(records, next_id)?;
        debug!("Saved {} block(s) for {}", saved.len(), object_key);

        if self.omit_save_body.load(Ordering::SeqCst) {
            return Ok(None);
        }
        Ok(Some(saved))
    }

    async fn fetch_metadata(&self, object_key: &str) -> Result<ObjectMetadata> {
        let inner = self.inner.lock().await;
        inner
            .objects
            .get(object_key)
            .map(|o| o.metadata.clone())
            .ok_or_else(|| Error::object_not_found(object_key))
    }
}

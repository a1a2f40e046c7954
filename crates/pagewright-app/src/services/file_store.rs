//! JSON file backed layout store
//!
//! The whole store is one JSON document:
//!
//! ```json
//! {
//!   "next_id": 3,
//!   "objects": {
//!     "account": {
//!       "metadata": { "fields": [...], "related_lists": [...] },
//!       "blocks": [ { "id": "srv-1", "block_type": "FIELD", ... } ]
//!     }
//!   }
//! }
//! ```
//!
//! Writes go to a sibling temp file that is renamed over the original.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use pagewright_core::prelude::*;
use pagewright_core::{Block, BlockSaveRecord, ObjectMetadata};

use super::layout_store::{LayoutStore, StoredObject};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StoreDocument {
    #[serde(default)]
    pub next_id: u64,
    #[serde(default)]
    pub objects: BTreeMap<String, StoredObject>,
}

/// Layout store persisted to a single JSON file
#[derive(Debug)]
pub struct JsonFileLayoutStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles
    write_lock: Mutex<()>,
}

impl JsonFileLayoutStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the document. A missing file is an empty store.
    pub async fn load(&self) -> Result<StoreDocument> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No layout store at {:?}, starting empty", self.path);
                return Ok(StoreDocument::default());
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&content).map_err(|e| {
            warn!("Failed to parse layout store {:?}: {}", self.path, e);
            Error::store_corrupt(&self.path)
        })
    }

    async fn write(&self, document: &StoreDocument) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(document)?;
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, json).await?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .with_context(|| format!("Failed to replace {:?}", self.path))?;
        Ok(())
    }

    async fn object(&self, object_key: &str) -> Result<StoredObject> {
        let mut document = self.load().await?;
        document
            .objects
            .remove(object_key)
            .ok_or_else(|| Error::object_not_found(object_key))
    }
}

impl LayoutStore for JsonFileLayoutStore {
    async fn fetch_layout_blocks(&self, object_key: &str) -> Result<Vec<Block>> {
        self.object(object_key)
            .await
            .map(|o| o.blocks)
            .map_err(|e| match e {
                Error::ObjectNotFound { .. } | Error::StoreCorrupt { .. } => e,
                other => Error::fetch(other.to_string()),
            })
    }

    async fn save_layout_blocks(
        &self,
        object_key: &str,
        records: Vec<BlockSaveRecord>,
    ) -> Result<Option<Vec<Block>>> {
        let _guard = self.write_lock.lock().await;

        let mut document = self.load().await?;
        let StoreDocument { next_id, objects } = &mut document;
        let object = objects
            .get_mut(object_key)
            .ok_or_else(|| Error::object_not_found(object_key))?;
        let saved = object.apply_save(records, next_id)?;

        self.write(&document)
            .await
            .map_err(|e| Error::persistence(e.to_string()))?;
        info!("Saved {} block(s) for {} to {:?}", saved.len(), object_key, self.path);
        Ok(Some(saved))
    }

    async fn fetch_metadata(&self, object_key: &str) -> Result<ObjectMetadata> {
        self.object(object_key).await.map(|o| o.metadata)
    }
}

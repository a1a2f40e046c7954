//! Editor state (Model in TEA pattern)

use pagewright_core::prelude::*;
use pagewright_core::{BlockType, ObjectMetadata, Width};

use crate::config::Settings;
use crate::layout::{LayoutModel, LayoutRejection, Pool};
use crate::reconciler::{SaveOutcome, SaveStatus};

/// Progress of loading the selected object's layout
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadStatus {
    /// No object selected yet
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed { message: String, fatal: bool },
}

/// Complete layout editor state for a single operator session
#[derive(Debug)]
pub struct EditorState {
    pub settings: Settings,

    /// Object whose layout is being edited
    pub object_key: Option<String>,

    pub model: LayoutModel,

    /// Placeable fields and related lists of the selected object
    pub metadata: ObjectMetadata,

    /// Text filter applied to the pool
    pub pool_filter: String,

    pub load_status: LoadStatus,

    pub save_status: SaveStatus,

    /// Outcome of the most recent completed save
    pub last_save: Option<SaveOutcome>,

    /// Number of saves that have resolved, successfully or not
    pub completed_saves: u64,

    /// Most recent refused operation, cleared by the next successful edit
    pub last_rejection: Option<LayoutRejection>,

    /// Local edits exist that the store has not seen
    pub dirty: bool,

    /// Bumped whenever the block list or section registry changes
    pub revision: u64,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorState {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        let model = LayoutModel::new(settings.layout.registry());
        Self {
            settings,
            object_key: None,
            model,
            metadata: ObjectMetadata::default(),
            pool_filter: String::new(),
            load_status: LoadStatus::Idle,
            save_status: SaveStatus::Idle,
            last_save: None,
            completed_saves: 0,
            last_rejection: None,
            dirty: false,
            revision: 0,
        }
    }

    /// Unplaced metadata matching the current filter
    pub fn pool(&self) -> Pool<'_> {
        Pool::compute(&self.metadata, self.model.blocks(), &self.pool_filter)
    }

    /// Whether `object_key` is the object being edited
    pub fn is_current(&self, object_key: &str) -> bool {
        self.object_key.as_deref() == Some(object_key)
    }

    /// A fetch or save is in flight
    pub fn is_busy(&self) -> bool {
        self.save_status.is_saving() || self.load_status == LoadStatus::Loading
    }

    pub fn default_width(&self, block_type: BlockType) -> Width {
        match block_type {
            BlockType::Field => self.settings.layout.field_width,
            BlockType::RelatedList => self.settings.layout.related_list_width,
        }
    }

    pub fn take_rejection(&mut self) -> Option<LayoutRejection> {
        self.last_rejection.take()
    }

    pub(crate) fn record_edit(&mut self) {
        self.revision += 1;
        self.dirty = true;
        self.last_rejection = None;
    }

    pub(crate) fn record_rejection(&mut self, rejection: LayoutRejection) {
        warn!("Layout operation rejected: {}", rejection);
        self.last_rejection = Some(rejection);
    }

    /// Clear everything tied to the previously selected object
    pub(crate) fn reset_object(&mut self, object_key: String) {
        self.object_key = Some(object_key);
        self.model.reset();
        self.metadata = ObjectMetadata::default();
        self.load_status = LoadStatus::Loading;
        self.last_rejection = None;
        self.dirty = false;
        self.revision += 1;
    }
}

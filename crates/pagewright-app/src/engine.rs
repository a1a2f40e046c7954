//! Engine - orchestration state shared by every frontend
//!
//! The Engine owns the editor state, the message channel, the reconciler
//! wrapping the injected layout store, and the event broadcaster.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tracing::{debug, warn};

use crate::config::{self, Settings};
use crate::engine_event::EngineEvent;
use crate::message::Message;
use crate::process;
use crate::reconciler::{Reconciler, SaveOutcome, SaveStatus};
use crate::services::{JsonFileLayoutStore, LayoutStore};
use crate::state::{EditorState, LoadStatus};

/// Lightweight snapshot of state for change detection.
///
/// Captured before message processing, compared after to detect
/// what changed and emit appropriate EngineEvents.
#[derive(Debug, Clone)]
struct StateSnapshot {
    object_key: Option<String>,
    revision: u64,
    load_status: LoadStatus,
    save_status: SaveStatus,
    completed_saves: u64,
}

impl StateSnapshot {
    fn capture(state: &EditorState) -> Self {
        Self {
            object_key: state.object_key.clone(),
            revision: state.revision,
            load_status: state.load_status.clone(),
            save_status: state.save_status.clone(),
            completed_saves: state.completed_saves,
        }
    }
}

/// Orchestration engine for a layout editing session.
pub struct Engine<S> {
    /// Editor state (the Model)
    pub state: EditorState,

    /// Sender half of the message channel. Clone this for input sources.
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the message channel, drained by the frontend loop.
    pub msg_rx: mpsc::Receiver<Message>,

    reconciler: Reconciler<S>,

    event_tx: broadcast::Sender<EngineEvent>,
}

impl Engine<JsonFileLayoutStore> {
    /// Open an engine on the JSON file store configured for `project_path`.
    ///
    /// `store_path` overrides the configured location.
    pub fn open(project_path: &Path, store_path: Option<PathBuf>) -> Self {
        // Non-fatal: the store file can still live elsewhere
        if let Err(e) = config::init_config_dir(project_path) {
            warn!("Failed to initialize .pagewright directory: {}", e);
        }

        let settings = config::load_settings(project_path);
        let store_path =
            store_path.unwrap_or_else(|| config::resolve_store_path(project_path, &settings));
        debug!("Using layout store at {:?}", store_path);

        Self::new(settings, Arc::new(JsonFileLayoutStore::new(store_path)))
    }
}

impl<S> Engine<S>
where
    S: LayoutStore + Send + Sync + 'static,
{
    pub fn new(settings: Settings, store: Arc<S>) -> Self {
        let state = EditorState::with_settings(settings);
        let (msg_tx, msg_rx) = mpsc::channel::<Message>(256);
        let (event_tx, _) = broadcast::channel(256);

        Self {
            state,
            msg_tx,
            msg_rx,
            reconciler: Reconciler::new(store),
            event_tx,
        }
    }

    /// Subscribe to engine events.
    ///
    /// A subscriber that falls behind loses the oldest events and sees
    /// `RecvError::Lagged`.
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.event_tx.subscribe()
    }

    pub fn store(&self) -> &Arc<S> {
        self.reconciler.store()
    }

    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    /// Process a single message through the TEA update cycle and emit
    /// events for whatever changed.
    pub fn process_message(&mut self, msg: Message) {
        let pre = StateSnapshot::capture(&self.state);

        process::process_message(&mut self.state, msg, &self.msg_tx, &self.reconciler);

        let post = StateSnapshot::capture(&self.state);
        self.emit_events(&pre, &post);
    }

    /// Drain and process all pending messages. Returns how many were handled.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    /// Wait for the next message from a background task and process it.
    ///
    /// Returns `false` once the channel is closed.
    pub async fn process_next(&mut self) -> bool {
        match self.msg_rx.recv().await {
            Some(msg) => {
                self.process_message(msg);
                true
            }
            None => false,
        }
    }

    /// Process messages until no fetch or save is in flight
    pub async fn settle(&mut self) {
        while self.state.is_busy() {
            if !self.process_next().await {
                break;
            }
        }
    }

    fn emit_events(&mut self, pre: &StateSnapshot, post: &StateSnapshot) {
        let object_key = post.object_key.clone().unwrap_or_default();

        let just_loaded =
            pre.load_status != LoadStatus::Loaded && post.load_status == LoadStatus::Loaded;
        if just_loaded {
            self.emit(EngineEvent::LayoutLoaded {
                object_key: object_key.clone(),
                block_count: self.state.model.blocks().len(),
                section_count: self.state.model.registry().len(),
            });
        }

        if let LoadStatus::Failed { message, fatal } = &post.load_status {
            if pre.load_status != post.load_status {
                self.emit(EngineEvent::LoadFailed {
                    object_key: object_key.clone(),
                    error: message.clone(),
                    fatal: *fatal,
                });
            }
        }

        if !pre.save_status.is_saving() {
            if let SaveStatus::Saving { object_key } = &post.save_status {
                self.emit(EngineEvent::SaveStarted {
                    object_key: object_key.clone(),
                });
            }
        }

        if post.completed_saves > pre.completed_saves {
            let saved_key = match &pre.save_status {
                SaveStatus::Saving { object_key } => object_key.clone(),
                SaveStatus::Idle => object_key.clone(),
            };
            match &self.state.last_save {
                Some(SaveOutcome::Saved { block_count }) => self.emit(EngineEvent::SaveCompleted {
                    object_key: saved_key,
                    block_count: *block_count,
                }),
                Some(SaveOutcome::Failed { message, fatal }) => self.emit(EngineEvent::SaveFailed {
                    object_key: saved_key,
                    error: message.clone(),
                    fatal: *fatal,
                }),
                None => {}
            }
        }

        if !just_loaded && post.revision != pre.revision && post.load_status == LoadStatus::Loaded {
            self.emit(EngineEvent::LayoutChanged {
                revision: post.revision,
                dirty: self.state.dirty,
            });
        }

        if let Some(rejection) = self.state.take_rejection() {
            self.emit(EngineEvent::Rejected {
                code: rejection.code().to_string(),
                reason: rejection.to_string(),
            });
        }
    }

    /// send() only fails when nobody is subscribed, which is fine.
    fn emit(&self, event: EngineEvent) {
        let _ = self.event_tx.send(event);
    }
}

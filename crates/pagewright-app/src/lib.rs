//! pagewright-app - Layout engine and editor orchestration for pagewright
//!
//! This crate implements the page-layout engine (block model, section
//! registry, pool, reordering, section lifecycle), the persistence
//! collaborator and reconciler, configuration loading, and the TEA (The Elm
//! Architecture) editor loop driven by the Engine.

pub mod actions;
pub mod config;
pub mod engine;
pub mod engine_event;
pub mod handler;
pub mod layout;
pub mod message;
pub mod process;
pub mod reconciler;
pub mod services;
pub mod state;

// Re-export primary types
pub use engine::Engine;
pub use engine_event::EngineEvent;
pub use handler::{UpdateAction, UpdateResult};
pub use layout::{DragGesture, LayoutModel, LayoutRejection, SectionRegistry};
pub use message::Message;
pub use reconciler::{Reconciler, SaveOutcome, SaveStatus};
pub use services::{JsonFileLayoutStore, LayoutStore, MemoryLayoutStore};
pub use state::{EditorState, LoadStatus};

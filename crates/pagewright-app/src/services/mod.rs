//! Service layer for pagewright
//!
//! Persistence collaborators the editor talks to through the
//! [`LayoutStore`] trait.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐    actions    ┌──────────────┐
//! │  TEA update  │ ────────────▶ │  Reconciler  │
//! └──────────────┘               └──────┬───────┘
//!                                       │
//!                                ┌──────▼───────┐
//!                                │ LayoutStore  │
//!                                │   (trait)    │
//!                                └──────┬───────┘
//!                          ┌────────────┴────────────┐
//!                   ┌──────▼───────┐          ┌──────▼───────┐
//!                   │    Memory    │          │  JSON file   │
//!                   └──────────────┘          └──────────────┘
//! ```
//!
//! ## Key Components
//!
//! - [`LayoutStore`]: fetch/save blocks and fetch placeable metadata
//! - [`MemoryLayoutStore`]: in-process store with failure switches
//! - [`JsonFileLayoutStore`]: single JSON document on disk

mod file_store;
mod layout_store;
mod memory_store;

pub use file_store::{JsonFileLayoutStore, StoreDocument};
pub use layout_store::{LayoutStore, LocalLayoutStore, StoredObject};
pub use memory_store::MemoryLayoutStore;

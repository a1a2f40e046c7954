//! Page-layout editing engine
//!
//! Submodules:
//! - `model`: block list and section registry state container
//! - `reorder`: pure drag-gesture reordering and order normalization
//! - `pool`: unplaced field/related-list computation and text filter
//! - `sections`: validated section create/rename/remove
//! - `placement`: placing pool items as new blocks, width changes
//!
//! Nothing in this module performs I/O. Every operation either mutates the
//! in-memory model or returns a [`LayoutRejection`] and leaves it untouched.

pub mod model;
pub mod placement;
pub mod pool;
pub mod reorder;
pub mod sections;

use pagewright_core::BlockType;
use thiserror::Error;

pub use model::{LayoutModel, SectionRegistry};
pub use pool::{available_fields, available_related_lists, filter_pool, Pool, PoolItem};
pub use reorder::{normalize_orders, reorder, DragGesture};

/// Reason a layout operation was refused.
///
/// Rejections are local validation outcomes, not failures: the model is left
/// exactly as it was and the editor session carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutRejection {
    #[error("A section named '{name}' already exists")]
    DuplicateName { name: String },

    #[error("Section name cannot be empty")]
    EmptyName,

    #[error("Section '{name}' does not exist")]
    SectionNotFound { name: String },

    #[error("Section '{name}' is protected")]
    ProtectedSection { name: String },

    #[error("Block '{id}' is not in the layout")]
    BlockNotFound { id: String },

    #[error("Block id '{id}' is already in use")]
    DuplicateBlockId { id: String },

    #[error("The {block_type} '{id}' is already placed")]
    AlreadyPlaced { block_type: BlockType, id: String },

    #[error("Unknown {block_type} '{id}'")]
    UnknownReference { block_type: BlockType, id: String },
}

impl LayoutRejection {
    /// Stable machine-readable reason code
    pub fn code(&self) -> &'static str {
        match self {
            LayoutRejection::DuplicateName { .. } => "duplicate_name",
            LayoutRejection::EmptyName => "empty_name",
            LayoutRejection::SectionNotFound { .. } => "section_not_found",
            LayoutRejection::ProtectedSection { .. } => "protected_section",
            LayoutRejection::BlockNotFound { .. } => "block_not_found",
            LayoutRejection::DuplicateBlockId { .. } => "duplicate_block_id",
            LayoutRejection::AlreadyPlaced { .. } => "already_placed",
            LayoutRejection::UnknownReference { .. } => "unknown_reference",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_codes_and_messages() {
        let r = LayoutRejection::DuplicateName {
            name: "Contact".to_string(),
        };
        assert_eq!(r.code(), "duplicate_name");
        assert!(r.to_string().contains("Contact"));

        let r = LayoutRejection::AlreadyPlaced {
            block_type: BlockType::RelatedList,
            id: "contacts".to_string(),
        };
        assert_eq!(r.to_string(), "The related list 'contacts' is already placed");
    }
}

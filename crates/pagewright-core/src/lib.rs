//! # pagewright-core - Core Domain Types
//!
//! Foundation crate for pagewright. Provides the layout domain types, error
//! handling, and logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Blocks (`block`)
//! - [`Block`] - A placed field or related-list widget
//! - [`BlockRef`] - Reference into field/related-list metadata
//! - [`BlockSaveRecord`] - Block as submitted to the persistence layer
//! - [`is_temporary_id()`] - Detect client-generated ids
//!
//! ### Sections (`section`)
//! - [`Section`], [`SectionKind`] - Named buckets of blocks
//! - [`DEFAULT_SECTION`] - The protected `details` section
//!
//! ### Metadata (`metadata`)
//! - [`FieldMeta`], [`RelatedListMeta`], [`ObjectMetadata`] - Pool sources
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use pagewright_core::prelude::*;
//! ```

pub mod block;
pub mod error;
pub mod logging;
pub mod metadata;
pub mod prelude;
pub mod section;

// Re-export commonly used types at crate root for convenience
pub use block::{is_temporary_id, Block, BlockRef, BlockSaveRecord, BlockType, Width, TEMP_ID_PREFIX};
pub use error::{Error, Result, ResultExt};
pub use metadata::{FieldMeta, ObjectMetadata, RelatedListMeta};
pub use section::{names_collide, Section, SectionKind, DEFAULT_SECTION};

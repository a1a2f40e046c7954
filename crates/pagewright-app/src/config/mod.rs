//! Configuration file parsing for pagewright
//!
//! Supports:
//! - `.pagewright/config.toml` - Layout editor and store settings

pub mod settings;
pub mod types;

pub use settings::{
    init_config_dir, load_settings, resolve_store_path, CONFIG_FILENAME, PAGEWRIGHT_DIR,
};
pub use types::*;

//! Settings loading and directory initialization

use std::path::{Path, PathBuf};

use pagewright_core::prelude::*;
use pagewright_core::DEFAULT_SECTION;

use super::types::Settings;

/// Project-local configuration directory
pub const PAGEWRIGHT_DIR: &str = ".pagewright";

/// Settings file inside [`PAGEWRIGHT_DIR`]
pub const CONFIG_FILENAME: &str = "config.toml";

/// Load settings from `.pagewright/config.toml`
///
/// Returns default settings if the file doesn't exist or can't be parsed.
pub fn load_settings(project_path: &Path) -> Settings {
    let config_path = project_path.join(PAGEWRIGHT_DIR).join(CONFIG_FILENAME);

    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    let settings = match std::fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    };

    validate(settings)
}

/// Repair values the editor cannot work with
fn validate(mut settings: Settings) -> Settings {
    let layout = &mut settings.layout;
    if layout.default_section.trim().is_empty() {
        warn!("Empty default_section in config, using '{}'", DEFAULT_SECTION);
        layout.default_section = DEFAULT_SECTION.to_string();
    } else {
        layout.default_section = layout.default_section.trim().to_string();
    }
    layout.protected_sections.retain(|s| !s.trim().is_empty());
    settings
}

/// Absolute location of the JSON layout store
pub fn resolve_store_path(project_path: &Path, settings: &Settings) -> PathBuf {
    if settings.store.path.is_absolute() {
        settings.store.path.clone()
    } else {
        project_path.join(&settings.store.path)
    }
}

/// Create default config file in .pagewright/ directory
pub fn init_config_dir(project_path: &Path) -> Result<()> {
    let dir = project_path.join(PAGEWRIGHT_DIR);

    if !dir.exists() {
        std::fs::create_dir_all(&dir)
            .map_err(|e| Error::config(format!("Failed to create .pagewright dir: {}", e)))?;
    }

    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        let default_content = r#"# pagewright configuration

[layout]
# Section that receives the blocks of removed sections
default_section = "details"

# Sections that cannot be removed or renamed
protected_sections = ["details"]

# Width of newly placed blocks: "half" or "full"
field_width = "half"
related_list_width = "full"

[store]
# JSON layout store, relative to this project
path = ".pagewright/layouts.json"
"#;
        std::fs::write(&config_path, default_content)
            .map_err(|e| Error::config(format!("Failed to write config.toml: {}", e)))?;
        debug!("Created default config at {:?}", config_path);
    }

    Ok(())
}

//! Configuration types for pagewright
//!
//! Defines:
//! - `Settings` - Global application settings (.pagewright/config.toml)
//! - `LayoutSettings` - Section and width defaults for the layout editor
//! - `StoreSettings` - Location of the JSON layout store

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use pagewright_core::{Width, DEFAULT_SECTION};

use crate::layout::SectionRegistry;

/// Application settings (.pagewright/config.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub layout: LayoutSettings,

    #[serde(default)]
    pub store: StoreSettings,
}

/// Layout editor settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LayoutSettings {
    /// Section that receives blocks of removed sections
    #[serde(default = "default_section")]
    pub default_section: String,

    /// Section names that cannot be removed or renamed
    #[serde(default = "default_protected_sections")]
    pub protected_sections: Vec<String>,

    /// Width given to newly placed fields
    #[serde(default = "default_field_width")]
    pub field_width: Width,

    /// Width given to newly placed related lists
    #[serde(default = "default_related_list_width")]
    pub related_list_width: Width,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            default_section: default_section(),
            protected_sections: default_protected_sections(),
            field_width: default_field_width(),
            related_list_width: default_related_list_width(),
        }
    }
}

impl LayoutSettings {
    /// Fresh registry holding only the default section
    pub fn registry(&self) -> SectionRegistry {
        SectionRegistry::new(self.default_section.clone(), self.protected_sections.clone())
    }
}

fn default_section() -> String {
    DEFAULT_SECTION.to_string()
}

fn default_protected_sections() -> Vec<String> {
    vec![DEFAULT_SECTION.to_string()]
}

fn default_field_width() -> Width {
    Width::Half
}

fn default_related_list_width() -> Width {
    Width::Full
}

/// Layout store settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreSettings {
    /// JSON store file, relative to the project directory unless absolute
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from(".pagewright").join("layouts.json")
}

//! Named sections of a record detail page

use serde::{Deserialize, Serialize};

/// Name of the section every layout starts with
pub const DEFAULT_SECTION: &str = "details";

/// Informational section kind. Does not restrict which blocks a section holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SectionKind {
    #[default]
    FieldSection,
    RelatedSection,
}

/// A named, ordered bucket of blocks
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Section {
    pub name: String,
    #[serde(default)]
    pub kind: SectionKind,
}

impl Section {
    pub fn new(name: impl Into<String>, kind: SectionKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Case-insensitive name comparison used for create/rename collisions
    pub fn name_matches(&self, other: &str) -> bool {
        names_collide(&self.name, other)
    }
}

/// Whether two section names collide under case-insensitive comparison
pub fn names_collide(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_collide_ignores_case() {
        assert!(names_collide("Contact", "contact"));
        assert!(names_collide("DETAILS", "details"));
        assert!(!names_collide("contact", "contacts"));
    }

    #[test]
    fn test_section_kind_serialization() {
        let section = Section::new("related", SectionKind::RelatedSection);
        let json = serde_json::to_string(&section).unwrap();
        assert!(json.contains("RELATED_SECTION"));
    }
}

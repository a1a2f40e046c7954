//! Section lifecycle: validated create, rename and remove

use pagewright_core::prelude::*;
use pagewright_core::{Section, SectionKind};

use super::model::LayoutModel;
use super::LayoutRejection;

impl LayoutModel {
    /// Register a new, empty section at the end of the registry.
    ///
    /// The name is trimmed. Blank names and names that collide with an
    /// existing section (case-insensitive) are rejected.
    pub fn create_section(&mut self, name: &str, kind: SectionKind) -> Result<(), LayoutRejection> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LayoutRejection::EmptyName);
        }
        if let Some(existing) = self.registry().find_colliding(name) {
            return Err(LayoutRejection::DuplicateName {
                name: existing.name.clone(),
            });
        }

        debug!("Creating section '{}' ({:?})", name, kind);
        self.registry_mut().insert(Section::new(name, kind));
        Ok(())
    }

    /// Rename a section and every block that references it.
    ///
    /// Changing only the letter case of a section's own name is allowed.
    /// Protected sections keep their names, and no section may take a
    /// protected name. Returns `false` when the name is unchanged.
    pub fn rename_section(&mut self, old: &str, new: &str) -> Result<bool, LayoutRejection> {
        let new = new.trim();
        if new.is_empty() {
            return Err(LayoutRejection::EmptyName);
        }
        if !self.registry().contains(old) {
            return Err(LayoutRejection::SectionNotFound {
                name: old.to_string(),
            });
        }
        if new == old {
            return Ok(false);
        }
        if self.registry().is_protected(old) {
            return Err(LayoutRejection::ProtectedSection {
                name: old.to_string(),
            });
        }
        if let Some(existing) = self.registry().find_colliding(new) {
            if existing.name != old {
                return Err(LayoutRejection::DuplicateName {
                    name: existing.name.clone(),
                });
            }
        }
        if self.registry().is_protected(new) {
            return Err(LayoutRejection::ProtectedSection {
                name: new.to_string(),
            });
        }

        debug!("Renaming section '{}' to '{}'", old, new);
        self.rename_section_key(old, new);
        Ok(true)
    }

    /// Remove a section, moving its blocks to the end of the default section.
    ///
    /// Returns the ids of the moved blocks.
    pub fn remove_section(&mut self, name: &str) -> Result<Vec<String>, LayoutRejection> {
        if !self.registry().contains(name) {
            return Err(LayoutRejection::SectionNotFound {
                name: name.to_string(),
            });
        }
        if self.registry().is_protected(name) {
            return Err(LayoutRejection::ProtectedSection {
                name: name.to_string(),
            });
        }

        let fallback = self.registry().default_section().to_string();
        self.remove_section_into(name, &fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{DragGesture, SectionRegistry};
    use pagewright_core::{Block, BlockRef};

    fn model() -> LayoutModel {
        let mut model = LayoutModel::new(SectionRegistry::new("details", ["system"]));
        model.create_section("system", SectionKind::FieldSection).unwrap();
        for id in ["f1", "f2"] {
            model
                .add_block(Block::new(id, BlockRef::field(id), id, "details"))
                .unwrap();
        }
        model
    }

    #[test]
    fn test_create_section_trims_name() {
        let mut model = model();
        model.create_section("  Contact ", SectionKind::FieldSection).unwrap();
        assert!(model.registry().contains("Contact"));
    }

    #[test]
    fn test_create_duplicate_section_case_insensitive() {
        let mut model = model();
        model.create_section("Contact", SectionKind::FieldSection).unwrap();

        let err = model
            .create_section("CONTACT", SectionKind::RelatedSection)
            .unwrap_err();

        assert_eq!(
            err,
            LayoutRejection::DuplicateName {
                name: "Contact".into()
            }
        );
        assert_eq!(model.registry().len(), 3);
    }

    #[test]
    fn test_create_blank_section_rejected() {
        let mut model = model();
        assert_eq!(
            model.create_section("   ", SectionKind::FieldSection),
            Err(LayoutRejection::EmptyName)
        );
    }

    #[test]
    fn test_rename_section_validations() {
        let mut model = model();
        model.create_section("contact", SectionKind::FieldSection).unwrap();
        model.create_section("billing", SectionKind::FieldSection).unwrap();

        assert_eq!(
            model.rename_section("contact", " "),
            Err(LayoutRejection::EmptyName)
        );
        assert!(matches!(
            model.rename_section("contact", "Billing"),
            Err(LayoutRejection::DuplicateName { .. })
        ));
        assert!(matches!(
            model.rename_section("missing", "other"),
            Err(LayoutRejection::SectionNotFound { .. })
        ));
        assert!(matches!(
            model.rename_section("details", "main"),
            Err(LayoutRejection::ProtectedSection { .. })
        ));
        assert!(model.registry().contains("contact"));
    }

    #[test]
    fn test_rename_section_case_only_change() {
        let mut model = model();
        model.create_section("contact", SectionKind::FieldSection).unwrap();
        assert_eq!(model.rename_section("contact", "Contact"), Ok(true));
        assert!(model.registry().contains("Contact"));
    }

    #[test]
    fn test_rename_to_unplaced_protected_name_rejected() {
        let mut model = LayoutModel::new(SectionRegistry::new("details", ["system"]));
        model.create_section("promo", SectionKind::FieldSection).unwrap();

        assert_eq!(
            model.rename_section("promo", " System "),
            Err(LayoutRejection::ProtectedSection {
                name: "System".into()
            })
        );
        assert!(model.registry().contains("promo"));
        assert!(!model.registry().contains("System"));
    }

    #[test]
    fn test_rename_to_same_name_changes_nothing() {
        let mut model = model();
        model.create_section("promo", SectionKind::FieldSection).unwrap();
        model.move_block(&DragGesture::new("f1", None, "details", "promo"));
        let before = model.blocks().to_vec();

        assert_eq!(model.rename_section("promo", "promo "), Ok(false));
        assert_eq!(model.rename_section("details", "details"), Ok(false));

        assert_eq!(model.blocks(), before.as_slice());
        assert_eq!(model.registry().position("promo"), Some(2));
    }

    #[test]
    fn test_rename_moves_member_blocks() {
        let mut model = model();
        model.create_section("promo", SectionKind::FieldSection).unwrap();
        model.move_block(&DragGesture::new("f1", None, "details", "promo"));

        model.rename_section("promo", "offers").unwrap();

        assert_eq!(model.block("f1").unwrap().section, "offers");
        assert_eq!(model.blocks_in_section("offers").len(), 1);
        assert!(model.blocks_in_section("promo").is_empty());
    }

    #[test]
    fn test_remove_section_reassigns_three_blocks() {
        let mut model = model();
        model.create_section("promo", SectionKind::FieldSection).unwrap();
        for id in ["p1", "p2", "p3"] {
            model
                .add_block(Block::new(id, BlockRef::field(id), id, "promo"))
                .unwrap();
        }

        let moved = model.remove_section("promo").unwrap();

        assert_eq!(moved.len(), 3);
        assert!(!model.registry().contains("promo"));
        let details: Vec<(&str, u32)> = model
            .blocks_in_section("details")
            .into_iter()
            .map(|b| (b.id.as_str(), b.order))
            .collect();
        assert_eq!(
            details,
            vec![("f1", 0), ("f2", 1), ("p1", 2), ("p2", 3), ("p3", 4)]
        );
    }

    #[test]
    fn test_remove_protected_sections_rejected() {
        let mut model = model();
        assert!(matches!(
            model.remove_section("details"),
            Err(LayoutRejection::ProtectedSection { .. })
        ));
        assert!(matches!(
            model.remove_section("System"),
            Err(LayoutRejection::SectionNotFound { .. })
        ));
        assert!(matches!(
            model.remove_section("system"),
            Err(LayoutRejection::ProtectedSection { .. })
        ));
    }
}

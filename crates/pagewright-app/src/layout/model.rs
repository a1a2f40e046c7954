//! Block list and section registry
//!
//! [`LayoutModel`] is the in-memory state container for one object's page
//! layout. The block vector is the source of truth for render sequence; every
//! block's `order` is recomputed from vector position after each mutation so
//! orders within a section are always `0..n`.

use pagewright_core::prelude::*;
use pagewright_core::{names_collide, Block, BlockRef, BlockType, Section, SectionKind, DEFAULT_SECTION};

use super::reorder::{normalize_orders, reorder, DragGesture};
use super::LayoutRejection;

/// Ordered set of named sections.
///
/// The default section is always present and always first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRegistry {
    sections: Vec<Section>,
    default_section: String,
    /// Extra names that cannot be removed or renamed
    protected: Vec<String>,
}

impl Default for SectionRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_SECTION, Vec::<String>::new())
    }
}

impl SectionRegistry {
    /// Create a registry holding only the default section
    pub fn new<I, S>(default_section: impl Into<String>, protected: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let default_section = default_section.into();
        Self {
            sections: vec![Section::new(default_section.clone(), SectionKind::FieldSection)],
            default_section,
            protected: protected.into_iter().map(Into::into).collect(),
        }
    }

    pub fn default_section(&self) -> &str {
        &self.default_section
    }

    /// Sections in render order
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Exact-key lookup, as used by block `section` references
    pub fn get(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.name == name)
    }

    /// Section whose name collides with `name` under case-insensitive comparison
    pub fn find_colliding(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name_matches(name))
    }

    pub fn is_default(&self, name: &str) -> bool {
        names_collide(name, &self.default_section)
    }

    /// The default section plus any configured reserved names
    pub fn is_protected(&self, name: &str) -> bool {
        self.is_default(name) || self.protected.iter().any(|p| names_collide(p, name))
    }

    pub(crate) fn insert(&mut self, section: Section) {
        self.sections.push(section);
    }

    pub(crate) fn rename(&mut self, old: &str, new: &str) -> bool {
        let Some(section) = self.sections.iter_mut().find(|s| s.name == old) else {
            return false;
        };
        section.name = new.to_string();
        if self.default_section == old {
            self.default_section = new.to_string();
        }
        true
    }

    pub(crate) fn remove(&mut self, name: &str) -> Option<Section> {
        let pos = self.position(name)?;
        Some(self.sections.remove(pos))
    }

    /// Drop every section except the default one
    pub(crate) fn clear_custom(&mut self) {
        let default_section = self.default_section.clone();
        self.sections.retain(|s| s.name == default_section);
    }
}

/// Blocks of one object's layout plus the sections they live in
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutModel {
    blocks: Vec<Block>,
    registry: SectionRegistry,
}

impl LayoutModel {
    pub fn new(registry: SectionRegistry) -> Self {
        Self {
            blocks: Vec::new(),
            registry,
        }
    }

    /// Build a model from persisted blocks, registering their sections
    pub fn from_blocks(registry: SectionRegistry, blocks: Vec<Block>) -> Self {
        let mut model = Self::new(registry);
        model.replace_blocks(blocks);
        model
    }

    /// All blocks in vector order
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn registry(&self) -> &SectionRegistry {
        &self.registry
    }

    pub(crate) fn registry_mut(&mut self) -> &mut SectionRegistry {
        &mut self.registry
    }

    pub fn block(&self, id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub(crate) fn block_mut(&mut self, id: &str) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|b| b.id == id)
    }

    /// Whether some block already references the same field or related list
    pub fn is_placed(&self, reference: &BlockRef) -> bool {
        self.blocks.iter().any(|b| &b.reference == reference)
    }

    pub fn has_temporary_blocks(&self) -> bool {
        self.blocks.iter().any(Block::is_temporary)
    }

    /// Append a block to the end of its section
    pub fn add_block(&mut self, mut block: Block) -> Result<(), LayoutRejection> {
        if !self.registry.contains(&block.section) {
            return Err(LayoutRejection::SectionNotFound {
                name: block.section,
            });
        }
        if self.block(&block.id).is_some() {
            return Err(LayoutRejection::DuplicateBlockId { id: block.id });
        }

        block.order = self.section_len(&block.section) as u32;
        debug!(
            "Adding {} block {} to '{}' at {}",
            block.block_type(),
            block.id,
            block.section,
            block.order
        );
        self.blocks.push(block);
        Ok(())
    }

    /// Remove a block's placement. The referenced field or related list is untouched.
    pub fn remove_block(&mut self, id: &str) -> Result<Block, LayoutRejection> {
        let pos = self
            .blocks
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| LayoutRejection::BlockNotFound { id: id.to_string() })?;

        let removed = self.blocks.remove(pos);
        normalize_orders(&mut self.blocks);
        debug!("Removed block {} from '{}'", removed.id, removed.section);
        Ok(removed)
    }

    /// Blocks of one section in render order
    pub fn blocks_in_section(&self, section: &str) -> Vec<&Block> {
        let mut blocks: Vec<&Block> = self.blocks.iter().filter(|b| b.section == section).collect();
        blocks.sort_by_key(|b| b.order);
        blocks
    }

    pub fn section_len(&self, section: &str) -> usize {
        self.blocks.iter().filter(|b| b.section == section).count()
    }

    /// Rewrite the registry key and every member block's `section` together.
    ///
    /// No validation beyond existence; see `rename_section` for the checked
    /// operation. Returns `false` if `old` is not registered.
    pub fn rename_section_key(&mut self, old: &str, new: &str) -> bool {
        if !self.registry.rename(old, new) {
            return false;
        }
        for block in self.blocks.iter_mut().filter(|b| b.section == old) {
            block.section = new.to_string();
        }
        true
    }

    /// Move every block of `name` to the end of `fallback`, then drop `name`.
    ///
    /// Returns the ids of the reassigned blocks. The default section cannot be
    /// removed.
    pub fn remove_section_into(
        &mut self,
        name: &str,
        fallback: &str,
    ) -> Result<Vec<String>, LayoutRejection> {
        if !self.registry.contains(name) {
            return Err(LayoutRejection::SectionNotFound {
                name: name.to_string(),
            });
        }
        if self.registry.default_section() == name || name == fallback {
            return Err(LayoutRejection::ProtectedSection {
                name: name.to_string(),
            });
        }
        if !self.registry.contains(fallback) {
            return Err(LayoutRejection::SectionNotFound {
                name: fallback.to_string(),
            });
        }

        let (moved, mut kept): (Vec<Block>, Vec<Block>) =
            self.blocks.drain(..).partition(|b| b.section == name);
        let moved_ids: Vec<String> = moved.iter().map(|b| b.id.clone()).collect();

        let insert_at = kept
            .iter()
            .rposition(|b| b.section == fallback)
            .map_or(kept.len(), |i| i + 1);
        kept.splice(
            insert_at..insert_at,
            moved.into_iter().map(|mut b| {
                b.section = fallback.to_string();
                b
            }),
        );
        normalize_orders(&mut kept);

        self.blocks = kept;
        self.registry.remove(name);
        debug!(
            "Removed section '{}', {} block(s) reassigned to '{}'",
            name,
            moved_ids.len(),
            fallback
        );
        Ok(moved_ids)
    }

    /// Apply a drag gesture. Returns whether the layout changed.
    ///
    /// A gesture targeting an unregistered section is stale and ignored.
    pub fn move_block(&mut self, gesture: &DragGesture) -> bool {
        if !self.registry.contains(&gesture.hover_section) {
            warn!(
                "Ignoring drag of {} into unknown section '{}'",
                gesture.dragged_id, gesture.hover_section
            );
            return false;
        }

        let next = reorder(&self.blocks, gesture);
        if next == self.blocks {
            return false;
        }
        self.blocks = next;
        true
    }

    /// Replace every block with an authoritative set.
    ///
    /// Sections referenced by the new blocks are registered when missing.
    /// Blocks are grouped by section in registry order, keeping each
    /// section's incoming `order` (vector position breaks ties), then
    /// renormalized.
    pub fn replace_blocks(&mut self, mut blocks: Vec<Block>) {
        let mut missing: Vec<String> = Vec::new();
        for block in &blocks {
            if !self.registry.contains(&block.section) && !missing.contains(&block.section) {
                missing.push(block.section.clone());
            }
        }
        for name in missing {
            let kind = infer_section_kind(&blocks, &name);
            debug!("Registering section '{}' ({:?}) from persisted blocks", name, kind);
            self.registry.insert(Section::new(name, kind));
        }

        let registry = &self.registry;
        blocks.sort_by_key(|b| (registry.position(&b.section).unwrap_or(usize::MAX), b.order));
        normalize_orders(&mut blocks);
        self.blocks = blocks;
    }

    /// Forget all blocks and custom sections
    pub fn reset(&mut self) {
        self.blocks.clear();
        self.registry.clear_custom();
    }
}

fn infer_section_kind(blocks: &[Block], section: &str) -> SectionKind {
    let all_related = blocks
        .iter()
        .filter(|b| b.section == section)
        .all(|b| b.block_type() == BlockType::RelatedList);
    if all_related {
        SectionKind::RelatedSection
    } else {
        SectionKind::FieldSection
    }
}

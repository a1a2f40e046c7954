//! Placing pool items into the layout

use pagewright_core::prelude::*;
use pagewright_core::{Block, BlockRef, BlockType, ObjectMetadata, Width, TEMP_ID_PREFIX};
use rand::Rng;

use super::model::LayoutModel;
use super::LayoutRejection;

impl LayoutModel {
    /// Place a field from the pool at the end of `section`.
    ///
    /// Returns the new block's temporary id.
    pub fn place_field(
        &mut self,
        metadata: &ObjectMetadata,
        field_id: &str,
        section: &str,
        width: Width,
    ) -> Result<String, LayoutRejection> {
        let field = metadata
            .field(field_id)
            .ok_or_else(|| LayoutRejection::UnknownReference {
                block_type: BlockType::Field,
                id: field_id.to_string(),
            })?;
        self.place(BlockRef::field(&field.id), &field.label, section, width)
    }

    /// Place a related list from the pool at the end of `section`.
    pub fn place_related_list(
        &mut self,
        metadata: &ObjectMetadata,
        related_list_id: &str,
        section: &str,
        width: Width,
    ) -> Result<String, LayoutRejection> {
        let list = metadata
            .related_list(related_list_id)
            .ok_or_else(|| LayoutRejection::UnknownReference {
                block_type: BlockType::RelatedList,
                id: related_list_id.to_string(),
            })?;
        self.place(BlockRef::related_list(&list.id), &list.label, section, width)
    }

    fn place(
        &mut self,
        reference: BlockRef,
        label: &str,
        section: &str,
        width: Width,
    ) -> Result<String, LayoutRejection> {
        if self.is_placed(&reference) {
            return Err(LayoutRejection::AlreadyPlaced {
                block_type: reference.block_type(),
                id: reference.target_id().to_string(),
            });
        }

        let id = self.next_temporary_id();
        let block = Block::new(id.clone(), reference, label, section).with_width(width);
        self.add_block(block)?;
        Ok(id)
    }

    /// Change a block's rendering width
    pub fn set_block_width(&mut self, id: &str, width: Width) -> Result<(), LayoutRejection> {
        let block = self
            .block_mut(id)
            .ok_or_else(|| LayoutRejection::BlockNotFound { id: id.to_string() })?;
        block.width = width;
        Ok(())
    }

    /// A `temp-` id not used by any current block
    fn next_temporary_id(&self) -> String {
        let mut rng = rand::thread_rng();
        loop {
            let id = format!("{}{:012x}", TEMP_ID_PREFIX, rng.gen::<u64>() & 0xffff_ffff_ffff);
            if self.block(&id).is_none() {
                return id;
            }
            trace!("Temporary id {} collided, regenerating", id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagewright_core::{is_temporary_id, FieldMeta, RelatedListMeta};

    fn metadata() -> ObjectMetadata {
        ObjectMetadata {
            fields: vec![
                FieldMeta::new("f_name", "Name", "name"),
                FieldMeta::new("f_email", "Email", "email"),
            ],
            related_lists: vec![RelatedListMeta::new("rl_contacts", "Contacts", "contacts")],
        }
    }

    #[test]
    fn test_place_field_creates_temporary_block() {
        let meta = metadata();
        let mut model = LayoutModel::default();

        let id = model
            .place_field(&meta, "f_email", "details", Width::Half)
            .unwrap();

        assert!(is_temporary_id(&id));
        let block = model.block(&id).unwrap();
        assert_eq!(block.label, "Email");
        assert_eq!(block.reference, BlockRef::field("f_email"));
        assert_eq!(block.order, 0);
    }

    #[test]
    fn test_place_related_list_uses_width() {
        let meta = metadata();
        let mut model = LayoutModel::default();

        let id = model
            .place_related_list(&meta, "rl_contacts", "details", Width::Full)
            .unwrap();

        assert_eq!(model.block(&id).unwrap().width, Width::Full);
        assert_eq!(model.block(&id).unwrap().block_type(), BlockType::RelatedList);
    }

    #[test]
    fn test_place_twice_rejected() {
        let meta = metadata();
        let mut model = LayoutModel::default();
        model.place_field(&meta, "f_name", "details", Width::Half).unwrap();

        let err = model
            .place_field(&meta, "f_name", "details", Width::Half)
            .unwrap_err();

        assert_eq!(err.code(), "already_placed");
        assert_eq!(model.blocks().len(), 1);
    }

    #[test]
    fn test_place_unknown_field_rejected() {
        let meta = metadata();
        let mut model = LayoutModel::default();
        let err = model
            .place_field(&meta, "f_missing", "details", Width::Half)
            .unwrap_err();
        assert_eq!(err.code(), "unknown_reference");
    }

    #[test]
    fn test_place_into_missing_section_rejected() {
        let meta = metadata();
        let mut model = LayoutModel::default();
        let err = model
            .place_field(&meta, "f_name", "nowhere", Width::Half)
            .unwrap_err();
        assert_eq!(err.code(), "section_not_found");
        assert!(model.blocks().is_empty());
    }

    #[test]
    fn test_temporary_ids_are_unique() {
        let meta = metadata();
        let mut model = LayoutModel::default();
        let a = model.place_field(&meta, "f_name", "details", Width::Half).unwrap();
        let b = model.place_field(&meta, "f_email", "details", Width::Half).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_set_block_width() {
        let meta = metadata();
        let mut model = LayoutModel::default();
        let id = model.place_field(&meta, "f_name", "details", Width::Half).unwrap();

        model.set_block_width(&id, Width::Full).unwrap();

        assert_eq!(model.block(&id).unwrap().width, Width::Full);
        assert!(model.set_block_width("nope", Width::Full).is_err());
    }
}

//! Unplaced metadata available for dragging into the layout

use std::collections::HashSet;

use pagewright_core::{Block, BlockType, FieldMeta, ObjectMetadata, RelatedListMeta};

/// Metadata that can be placed as a block
pub trait PoolItem {
    const BLOCK_TYPE: BlockType;

    fn id(&self) -> &str;
    fn label(&self) -> &str;
    fn api_name(&self) -> &str;
}

impl PoolItem for FieldMeta {
    const BLOCK_TYPE: BlockType = BlockType::Field;

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn api_name(&self) -> &str {
        &self.api_name
    }
}

impl PoolItem for RelatedListMeta {
    const BLOCK_TYPE: BlockType = BlockType::RelatedList;

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn api_name(&self) -> &str {
        &self.api_name
    }
}

/// Items of `all` not referenced by any placed block of the same type
pub fn available<'a, T: PoolItem>(all: &'a [T], placed: &[Block]) -> Vec<&'a T> {
    let placed_ids: HashSet<&str> = placed
        .iter()
        .filter(|b| b.block_type() == T::BLOCK_TYPE)
        .map(|b| b.reference.target_id())
        .collect();

    all.iter()
        .filter(|item| !placed_ids.contains(item.id()))
        .collect()
}

pub fn available_fields<'a>(all_fields: &'a [FieldMeta], placed: &[Block]) -> Vec<&'a FieldMeta> {
    available(all_fields, placed)
}

pub fn available_related_lists<'a>(
    all_related_lists: &'a [RelatedListMeta],
    placed: &[Block],
) -> Vec<&'a RelatedListMeta> {
    available(all_related_lists, placed)
}

/// Case-insensitive substring match over label and api name.
///
/// A blank query keeps everything.
pub fn filter_pool<'a, T: PoolItem>(items: Vec<&'a T>, query: &str) -> Vec<&'a T> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return items;
    }

    items
        .into_iter()
        .filter(|item| {
            item.label().to_lowercase().contains(&query)
                || item.api_name().to_lowercase().contains(&query)
        })
        .collect()
}

/// The filtered pool shown next to the layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pool<'a> {
    pub fields: Vec<&'a FieldMeta>,
    pub related_lists: Vec<&'a RelatedListMeta>,
}

impl<'a> Pool<'a> {
    pub fn compute(metadata: &'a ObjectMetadata, placed: &[Block], query: &str) -> Self {
        Self {
            fields: filter_pool(available_fields(&metadata.fields, placed), query),
            related_lists: filter_pool(
                available_related_lists(&metadata.related_lists, placed),
                query,
            ),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.related_lists.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagewright_core::BlockRef;

    fn metadata() -> ObjectMetadata {
        ObjectMetadata {
            fields: vec![
                FieldMeta::new("f_name", "Name", "name"),
                FieldMeta::new("f_email", "Email Address", "email"),
                FieldMeta::new("f_phone", "Phone", "phone_number"),
            ],
            related_lists: vec![
                RelatedListMeta::new("rl_contacts", "Contacts", "contacts"),
                RelatedListMeta::new("rl_invoices", "Invoices", "billing_invoices"),
            ],
        }
    }

    #[test]
    fn test_placed_items_are_excluded() {
        let meta = metadata();
        let placed = vec![
            Block::new("b1", BlockRef::field("f_email"), "Email Address", "details"),
            Block::new("b2", BlockRef::related_list("rl_contacts"), "Contacts", "details"),
        ];

        let fields = available_fields(&meta.fields, &placed);
        let lists = available_related_lists(&meta.related_lists, &placed);

        let field_ids: Vec<&str> = fields.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(field_ids, vec!["f_name", "f_phone"]);
        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].id, "rl_invoices");
    }

    #[test]
    fn test_reference_type_must_match() {
        let fields = vec![FieldMeta::new("shared", "Shared", "shared")];
        let placed = vec![Block::new("b1", BlockRef::related_list("shared"), "Shared", "details")];

        assert_eq!(available_fields(&fields, &placed).len(), 1);
    }

    #[test]
    fn test_filter_matches_label_or_api_name() {
        let meta = metadata();
        let by_label = filter_pool(available_fields(&meta.fields, &[]), "ADDRESS");
        assert_eq!(by_label.len(), 1);
        assert_eq!(by_label[0].id, "f_email");

        let by_api = filter_pool(available_fields(&meta.fields, &[]), "number");
        assert_eq!(by_api.len(), 1);
        assert_eq!(by_api[0].id, "f_phone");
    }

    #[test]
    fn test_blank_filter_keeps_everything() {
        let meta = metadata();
        let all = filter_pool(available_fields(&meta.fields, &[]), "   ");
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_filter_applies_after_placement() {
        let meta = metadata();
        let placed = vec![Block::new("b1", BlockRef::related_list("rl_invoices"), "Invoices", "details")];

        let pool = Pool::compute(&meta, &placed, "invoice");

        assert!(pool.is_empty());
    }
}

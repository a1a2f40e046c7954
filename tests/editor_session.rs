//! Integration tests for a full layout editing session

use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;

use pagewright_app::config::Settings;
use pagewright_app::services::{JsonFileLayoutStore, StoreDocument, StoredObject};
use pagewright_app::{DragGesture, Engine, LayoutStore, LoadStatus, MemoryLayoutStore, Message};
use pagewright_core::{Block, BlockRef, FieldMeta, ObjectMetadata, RelatedListMeta, SectionKind};

fn account_metadata() -> ObjectMetadata {
    ObjectMetadata {
        fields: vec![
            FieldMeta::new("f_name", "Account Name", "name"),
            FieldMeta::new("f_phone", "Phone", "phone"),
            FieldMeta::new("f_city", "Billing City", "billing_city"),
        ],
        related_lists: vec![RelatedListMeta::new("rl_contacts", "Contacts", "contacts")],
    }
}

fn persisted_blocks() -> Vec<Block> {
    vec![
        Block::new("srv-1", BlockRef::field("f_name"), "Account Name", "details").with_order(0),
        Block::new("srv-2", BlockRef::field("f_phone"), "Phone", "details").with_order(1),
    ]
}

/// Helper to wait until no fetch or save is in flight
async fn settle<S>(engine: &mut Engine<S>)
where
    S: LayoutStore + Send + Sync + 'static,
{
    tokio::time::timeout(Duration::from_secs(5), engine.settle())
        .await
        .expect("engine did not settle");
}

fn ids_in<S>(engine: &Engine<S>, section: &str) -> Vec<String>
where
    S: LayoutStore + Send + Sync + 'static,
{
    engine
        .state
        .model
        .blocks_in_section(section)
        .into_iter()
        .map(|b| b.id.clone())
        .collect()
}

fn select(object_key: &str) -> Message {
    Message::SelectObject {
        object_key: object_key.to_string(),
    }
}

#[tokio::test]
async fn test_edit_and_save_session() {
    let store = Arc::new(
        MemoryLayoutStore::new()
            .with_object("account", account_metadata())
            .with_blocks("account", persisted_blocks()),
    );
    let mut engine = Engine::new(Settings::default(), Arc::clone(&store));

    engine.process_message(select("account"));
    settle(&mut engine).await;
    assert_eq!(engine.state.load_status, LoadStatus::Loaded);

    // Pool excludes what is already placed
    let pool_fields: Vec<_> = engine.state.pool().fields.iter().map(|f| f.id.clone()).collect();
    assert_eq!(pool_fields, vec!["f_city"]);

    engine.process_message(Message::CreateSection {
        name: "Address".to_string(),
        kind: SectionKind::FieldSection,
    });
    engine.process_message(Message::PlaceField {
        field_id: "f_city".to_string(),
        section: "Address".to_string(),
    });
    engine.process_message(Message::MoveBlock(DragGesture::new(
        "srv-2",
        None,
        "details",
        "Address",
    )));

    assert_eq!(ids_in(&engine, "details"), vec!["srv-1"]);
    let address = ids_in(&engine, "Address");
    assert_eq!(address.len(), 2);
    assert!(address[0].starts_with("temp-"));
    assert_eq!(address[1], "srv-2");
    assert!(engine.state.dirty);

    engine.process_message(Message::SaveLayout);
    settle(&mut engine).await;

    assert!(!engine.state.dirty);
    assert!(!engine.state.model.has_temporary_blocks());

    let persisted = store.persisted("account").await.expect("object exists");
    assert_eq!(persisted.len(), 3);
    assert!(persisted.iter().all(|b| !b.is_temporary()));
    assert_eq!(persisted, engine.state.model.blocks().to_vec());
}

#[tokio::test]
async fn test_failed_save_can_be_retried() {
    let store = Arc::new(
        MemoryLayoutStore::new()
            .with_object("account", account_metadata())
            .with_blocks("account", persisted_blocks()),
    );
    let mut engine = Engine::new(Settings::default(), Arc::clone(&store));
    engine.process_message(select("account"));
    settle(&mut engine).await;

    engine.process_message(Message::RemoveBlock {
        block_id: "srv-1".to_string(),
    });
    store.set_fail_saves(true);
    engine.process_message(Message::SaveLayout);
    settle(&mut engine).await;

    assert!(engine.state.dirty);
    assert_eq!(ids_in(&engine, "details"), vec!["srv-2"]);
    assert_eq!(store.persisted("account").await.map(|b| b.len()), Some(2));

    store.set_fail_saves(false);
    engine.process_message(Message::SaveLayout);
    settle(&mut engine).await;

    assert!(!engine.state.dirty);
    assert_eq!(store.persisted("account").await.map(|b| b.len()), Some(1));
}

#[tokio::test]
async fn test_save_without_response_body_refetches() {
    let store = Arc::new(
        MemoryLayoutStore::new()
            .with_object("account", account_metadata())
            .with_blocks("account", persisted_blocks()),
    );
    store.set_omit_save_body(true);
    let mut engine = Engine::new(Settings::default(), Arc::clone(&store));
    engine.process_message(select("account"));
    settle(&mut engine).await;

    engine.process_message(Message::PlaceRelatedList {
        related_list_id: "rl_contacts".to_string(),
        section: "details".to_string(),
    });
    engine.process_message(Message::SaveLayout);
    settle(&mut engine).await;

    assert!(!engine.state.model.has_temporary_blocks());
    assert_eq!(engine.state.model.blocks().len(), 3);
}

#[tokio::test]
async fn test_json_file_store_survives_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("layouts.json");

    let mut document = StoreDocument::default();
    document.objects.insert(
        "account".to_string(),
        StoredObject::new(account_metadata()),
    );
    std::fs::write(&path, serde_json::to_string_pretty(&document).unwrap()).unwrap();

    {
        let store = Arc::new(JsonFileLayoutStore::new(&path));
        let mut engine = Engine::new(Settings::default(), store);
        engine.process_message(select("account"));
        settle(&mut engine).await;

        engine.process_message(Message::CreateSection {
            name: "Related".to_string(),
            kind: SectionKind::RelatedSection,
        });
        engine.process_message(Message::PlaceRelatedList {
            related_list_id: "rl_contacts".to_string(),
            section: "Related".to_string(),
        });
        engine.process_message(Message::SaveLayout);
        settle(&mut engine).await;
        assert!(!engine.state.dirty);
    }

    let store = Arc::new(JsonFileLayoutStore::new(&path));
    let mut engine = Engine::new(Settings::default(), store);
    engine.process_message(select("account"));
    settle(&mut engine).await;

    let related = engine
        .state
        .model
        .registry()
        .get("Related")
        .expect("section rebuilt from persisted blocks");
    assert_eq!(related.kind, SectionKind::RelatedSection);
    assert_eq!(ids_in(&engine, "Related").len(), 1);
    assert!(engine.state.pool().related_lists.is_empty());
}

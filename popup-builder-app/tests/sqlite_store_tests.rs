#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests for `SqliteStore` as a `PopupRepository`.

use chrono::{TimeZone, Utc};
use popup_builder_app::adapters::SqliteStore;
use popup_builder_core::traits::PopupRepository;
use popup_builder_core::types::{NewPopup, PopupChanges, PopupListQuery};

// ===== Helpers =====

async fn create_test_store() -> (SqliteStore, tempfile::TempDir) {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let db_path = tmp.path().join("nested").join("popups.db");
    let store = SqliteStore::new(&db_path)
        .await
        .expect("failed to create SqliteStore");
    (store, tmp)
}

fn make_popup(name: &str, headline: &str) -> NewPopup {
    NewPopup::with_defaults(name, headline, "Go")
}

fn day(date: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, date, 0, 0, 0).unwrap()
}

// ===== Tests =====

#[tokio::test]
async fn empty_store_has_no_popups() {
    let (store, _tmp) = create_test_store().await;
    assert_eq!(store.count().await.unwrap(), 0);
    assert!(store.list(&PopupListQuery::default()).await.unwrap().is_empty());
    assert!(store.find_by_id(1).await.unwrap().is_none());
}

#[tokio::test]
async fn insert_applies_column_defaults() {
    let (store, _tmp) = create_test_store().await;
    let record = store.insert(make_popup("Spring", "Hello")).await.unwrap();
    assert_eq!(record.id, 1);

    let found = store.find_by_id(record.id).await.unwrap().unwrap();
    assert_eq!(found, record);
    assert_eq!(found.background_color, "#ffffff");
    assert_eq!(found.text_color, "#000000");
    assert_eq!(found.button_color, "#6366f1");
    assert_eq!(found.border_radius, 12);
    assert!(found.show_image && found.show_overlay && found.animation_enabled);
    assert!(!found.is_published);
    assert_eq!(found.animation_style, "fade");
    assert!(found.flow_data.is_none());
}

#[tokio::test]
async fn list_orders_newest_first_and_pages() {
    let (store, _tmp) = create_test_store().await;
    store.insert_at(make_popup("Old", "a"), day(5)).await.unwrap();
    store.insert_at(make_popup("Newest", "b"), day(25)).await.unwrap();
    store.insert_at(make_popup("Middle", "c"), day(15)).await.unwrap();

    let all = store.list(&PopupListQuery::default()).await.unwrap();
    let names: Vec<_> = all.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Newest", "Middle", "Old"]);

    let page = store
        .list(&PopupListQuery {
            limit: 1,
            offset: 2,
            search: None,
        })
        .await
        .unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].name, "Old");
}

#[tokio::test]
async fn list_searches_name_and_headline() {
    let (store, _tmp) = create_test_store().await;
    store.insert(make_popup("Cart Reminder", "Come back")).await.unwrap();
    store.insert(make_popup("Welcome", "Get 10% off your cart")).await.unwrap();
    store.insert(make_popup("Newsletter", "Stay updated")).await.unwrap();

    let found = store
        .list(&PopupListQuery {
            search: Some("cart".to_string()),
            ..PopupListQuery::default()
        })
        .await
        .unwrap();
    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|r| r.name != "Newsletter"));
}

#[tokio::test]
async fn update_changes_only_given_columns() {
    let (store, _tmp) = create_test_store().await;
    let record = store
        .insert_at(
            NewPopup {
                subheadline: Some("Sub".to_string()),
                ..make_popup("Spring", "Hello")
            },
            day(5),
        )
        .await
        .unwrap();

    let changes = PopupChanges {
        headline: Some("Changed".to_string()),
        subheadline: Some(None),
        is_published: Some(true),
        flow_data: Some(Some(r#"{"name":"x","steps":[]}"#.to_string())),
        ..PopupChanges::default()
    };
    let updated = store.update(record.id, &changes).await.unwrap().unwrap();
    assert_eq!(updated.headline, "Changed");
    assert_eq!(updated.name, "Spring");
    assert!(updated.subheadline.is_none());
    assert!(updated.is_published);
    assert_eq!(updated.created_at, day(5));
    assert!(updated.updated_at > record.updated_at);

    let reloaded = store.find_by_id(record.id).await.unwrap().unwrap();
    assert_eq!(reloaded, updated);
}

#[tokio::test]
async fn update_missing_popup_returns_none() {
    let (store, _tmp) = create_test_store().await;
    let result = store.update(42, &PopupChanges::default()).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn delete_returns_removed_record() {
    let (store, _tmp) = create_test_store().await;
    let record = store.insert(make_popup("Gone", "Bye")).await.unwrap();

    let deleted = store.delete(record.id).await.unwrap().unwrap();
    assert_eq!(deleted, record);
    assert!(store.find_by_id(record.id).await.unwrap().is_none());
    assert!(store.delete(record.id).await.unwrap().is_none());
}

#[tokio::test]
async fn data_survives_reopen() {
    let tmp = tempfile::tempdir().unwrap();
    let db_path = tmp.path().join("popups.db");
    let id = {
        let store = SqliteStore::new(&db_path).await.unwrap();
        store.insert(make_popup("Persistent", "Still here")).await.unwrap().id
    };

    let store = SqliteStore::new(&db_path).await.unwrap();
    let found = store.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(found.headline, "Still here");
}

//! Popup record persistence trait

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::error::CoreResult;
use crate::types::{NewPopup, PopupChanges, PopupListQuery, PopupRecord};

/// Popup repository trait
///
/// Implementations:
/// - `InMemoryPopupRepository` (this crate, tests and demos)
/// - `SqliteStore` (`popup-builder-app`, `SeaORM`)
#[async_trait]
pub trait PopupRepository: Send + Sync {
    /// Get one record
    ///
    /// # Returns
    /// * `Some(record)` - found
    /// * `None` - no record with this id
    async fn find_by_id(&self, id: i32) -> CoreResult<Option<PopupRecord>>;

    /// List records, newest first
    async fn list(&self, query: &PopupListQuery) -> CoreResult<Vec<PopupRecord>>;

    /// Insert a record; the id is assigned by the repository and both
    /// timestamps are set to `created_at`
    async fn insert_at(&self, popup: NewPopup, created_at: DateTime<Utc>)
        -> CoreResult<PopupRecord>;

    /// Insert a record created now
    async fn insert(&self, popup: NewPopup) -> CoreResult<PopupRecord> {
        self.insert_at(popup, Utc::now()).await
    }

    /// Apply a partial update and refresh `updated_at`
    ///
    /// Returns `None` when the record does not exist.
    async fn update(&self, id: i32, changes: &PopupChanges) -> CoreResult<Option<PopupRecord>>;

    /// Delete a record, returning it as it was before deletion
    async fn delete(&self, id: i32) -> CoreResult<Option<PopupRecord>>;

    /// Number of stored records
    async fn count(&self) -> CoreResult<u64>;
}

#[derive(Default)]
struct Table {
    rows: Vec<PopupRecord>,
    next_id: i32,
}

/// In-memory popup repository
#[derive(Clone, Default)]
pub struct InMemoryPopupRepository {
    table: Arc<RwLock<Table>>,
}

impl InMemoryPopupRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches_search(record: &PopupRecord, search: Option<&str>) -> bool {
    match search {
        Some(term) if !term.is_empty() => {
            let term = term.to_lowercase();
            record.name.to_lowercase().contains(&term)
                || record.headline.to_lowercase().contains(&term)
        }
        _ => true,
    }
}

#[async_trait]
impl PopupRepository for InMemoryPopupRepository {
    async fn find_by_id(&self, id: i32) -> CoreResult<Option<PopupRecord>> {
        Ok(self.table.read().await.rows.iter().find(|r| r.id == id).cloned())
    }

    async fn list(&self, query: &PopupListQuery) -> CoreResult<Vec<PopupRecord>> {
        let table = self.table.read().await;
        let mut rows: Vec<&PopupRecord> = table
            .rows
            .iter()
            .filter(|r| matches_search(r, query.search.as_deref()))
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        let offset = usize::try_from(query.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.limit).unwrap_or(usize::MAX);
        Ok(rows.into_iter().skip(offset).take(limit).cloned().collect())
    }

    async fn insert_at(
        &self,
        popup: NewPopup,
        created_at: DateTime<Utc>,
    ) -> CoreResult<PopupRecord> {
        let mut table = self.table.write().await;
        table.next_id += 1;
        let record = popup.into_record(table.next_id, created_at);
        table.rows.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: i32, changes: &PopupChanges) -> CoreResult<Option<PopupRecord>> {
        let mut table = self.table.write().await;
        let Some(record) = table.rows.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        changes.apply(record, Utc::now());
        Ok(Some(record.clone()))
    }

    async fn delete(&self, id: i32) -> CoreResult<Option<PopupRecord>> {
        let mut table = self.table.write().await;
        let Some(index) = table.rows.iter().position(|r| r.id == id) else {
            return Ok(None);
        };
        Ok(Some(table.rows.remove(index)))
    }

    async fn count(&self) -> CoreResult<u64> {
        Ok(self.table.read().await.rows.len() as u64)
    }
}

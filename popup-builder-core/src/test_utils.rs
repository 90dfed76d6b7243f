//! Test helpers
//!
//! Mock repositories for exercising error paths.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::traits::{InMemoryPopupRepository, PopupRepository};
use crate::types::{NewPopup, PopupChanges, PopupListQuery, PopupRecord};

// ===== FailingPopupRepository =====

/// In-memory repository that can be told to fail every call.
pub struct FailingPopupRepository {
    inner: InMemoryPopupRepository,
    /// If Some, every call returns this as a storage error
    error: RwLock<Option<String>>,
}

impl FailingPopupRepository {
    pub fn new() -> Self {
        Self {
            inner: InMemoryPopupRepository::new(),
            error: RwLock::new(None),
        }
    }

    pub async fn set_error(&self, err: Option<String>) {
        *self.error.write().await = err;
    }

    async fn check(&self) -> CoreResult<()> {
        match *self.error.read().await {
            Some(ref msg) => Err(CoreError::StorageError(msg.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PopupRepository for FailingPopupRepository {
    async fn find_by_id(&self, id: i32) -> CoreResult<Option<PopupRecord>> {
        self.check().await?;
        self.inner.find_by_id(id).await
    }

    async fn list(&self, query: &PopupListQuery) -> CoreResult<Vec<PopupRecord>> {
        self.check().await?;
        self.inner.list(query).await
    }

    async fn insert_at(
        &self,
        popup: NewPopup,
        created_at: DateTime<Utc>,
    ) -> CoreResult<PopupRecord> {
        self.check().await?;
        self.inner.insert_at(popup, created_at).await
    }

    async fn update(&self, id: i32, changes: &PopupChanges) -> CoreResult<Option<PopupRecord>> {
        self.check().await?;
        self.inner.update(id, changes).await
    }

    async fn delete(&self, id: i32) -> CoreResult<Option<PopupRecord>> {
        self.check().await?;
        self.inner.delete(id).await
    }

    async fn count(&self) -> CoreResult<u64> {
        self.check().await?;
        self.inner.count().await
    }
}

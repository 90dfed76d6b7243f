//! Application bootstrap for Popup Builder.
//!
//! Provides `AppState` (service container), `AppStateBuilder` (adapter injection),
//! and `StartupHooks` (callbacks around the startup seeding step).

pub mod adapters;
pub mod seed;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use popup_builder_core::error::{CoreError, CoreResult};
use popup_builder_core::services::{FlowPersistenceService, PopupService, ServiceContext};
use popup_builder_core::traits::PopupRepository;

/// Outcome of the seeding step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedResult {
    /// Seeding was turned off
    Disabled,
    /// The table already had records
    NotNeeded,
    /// Sample popups were inserted
    Inserted(usize),
}

/// Frontend hooks for the startup sequence.
///
/// Use `NoopStartupHooks` when nothing needs to happen.
#[async_trait::async_trait]
pub trait StartupHooks: Send + Sync {
    /// Called after sample popups were written.
    async fn seeded(&self, _inserted: usize) {}

    /// Called when seeding fails. Startup continues with whatever was written.
    async fn seed_failed(&self, _error: &str) {}
}

/// No-op startup hooks.
pub struct NoopStartupHooks;

#[async_trait::async_trait]
impl StartupHooks for NoopStartupHooks {}

/// Application state.
///
/// Holds the services and the `ServiceContext`. Every frontend constructs this
/// once at startup via `AppStateBuilder`.
pub struct AppState {
    /// Service context (holds the storage adapter)
    pub ctx: Arc<ServiceContext>,
    /// Popup record service behind the REST surface
    pub popup_service: PopupService,
    /// Whole-flow save and load
    pub flow_persistence_service: FlowPersistenceService,
    /// Whether the startup sequence has completed
    pub startup_completed: AtomicBool,
}

impl AppState {
    /// Run the startup sequence. Seeding errors are reported to `hooks` and
    /// logged, never returned.
    pub async fn run_startup(&self, seed: bool, hooks: &dyn StartupHooks) -> CoreResult<()> {
        match self.seed_if_empty(seed).await {
            Ok(SeedResult::Inserted(count)) => {
                log::info!("Seeded {count} sample popups");
                hooks.seeded(count).await;
            }
            Ok(SeedResult::NotNeeded) => log::info!("Popups table not empty, skipping seed"),
            Ok(SeedResult::Disabled) => log::debug!("Seeding disabled"),
            Err(e) => {
                log::error!("Failed to seed popups: {e}");
                hooks.seed_failed(&e.to_string()).await;
            }
        }
        self.startup_completed.store(true, Ordering::SeqCst);
        Ok(())
    }

    /// Insert the sample popups when `enabled` and the table is empty.
    pub async fn seed_if_empty(&self, enabled: bool) -> CoreResult<SeedResult> {
        if !enabled {
            return Ok(SeedResult::Disabled);
        }
        let repo = self.ctx.popup_repository.as_ref();
        if repo.count().await? > 0 {
            return Ok(SeedResult::NotNeeded);
        }

        let samples = seed::sample_popups();
        let total = samples.len();
        for (popup, created_at) in samples {
            repo.insert_at(popup, created_at).await?;
        }
        Ok(SeedResult::Inserted(total))
    }
}

/// Builder for constructing `AppState` with a storage adapter.
///
/// # Required adapters
/// - `popup_repository`: where popup records are stored
#[derive(Default)]
pub struct AppStateBuilder {
    popup_repository: Option<Arc<dyn PopupRepository>>,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn popup_repository(mut self, repo: Arc<dyn PopupRepository>) -> Self {
        self.popup_repository = Some(repo);
        self
    }

    /// Build the `AppState`.
    ///
    /// # Errors
    /// Returns `CoreError::StorageError` if no repository was provided.
    pub fn build(self) -> CoreResult<AppState> {
        let popup_repository = self.popup_repository.ok_or_else(|| {
            CoreError::StorageError("popup_repository is required".to_string())
        })?;

        let ctx = Arc::new(ServiceContext::new(popup_repository));
        let popup_service = ctx.popup_service();
        let flow_persistence_service = ctx.flow_persistence_service();

        Ok(AppState {
            ctx,
            popup_service,
            flow_persistence_service,
            startup_completed: AtomicBool::new(false),
        })
    }
}

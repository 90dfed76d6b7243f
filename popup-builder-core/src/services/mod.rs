//! Business logic service layer

mod flow_persistence_service;
mod popup_service;

pub use flow_persistence_service::{flow_from_record, flow_payload, FlowPersistenceService};
pub use popup_service::{list_query, parse_id, validate_changes, validate_new, PopupService};

use std::sync::Arc;

use crate::traits::PopupRepository;

/// Service context, holding every dependency
///
/// The platform layer creates it and injects its storage implementation.
#[derive(Clone)]
pub struct ServiceContext {
    /// Popup record repository
    pub popup_repository: Arc<dyn PopupRepository>,
}

impl ServiceContext {
    #[must_use]
    pub fn new(popup_repository: Arc<dyn PopupRepository>) -> Self {
        Self { popup_repository }
    }

    #[must_use]
    pub fn popup_service(&self) -> PopupService {
        PopupService::new(Arc::clone(&self.popup_repository))
    }

    #[must_use]
    pub fn flow_persistence_service(&self) -> FlowPersistenceService {
        FlowPersistenceService::new(Arc::clone(&self.popup_repository))
    }
}

//! Saving and loading whole popup flows through the popup record store

use std::sync::Arc;

use serde_json::{Map, Value};

use super::popup_service::PopupService;
use crate::error::{CoreError, CoreResult};
use crate::traits::PopupRepository;
use crate::types::{
    initial_step, PopupFlow, PopupPayload, PopupRecord, Step, StepBody, StepContent, StepStyle,
};

/// Flow persistence service
///
/// A flow is stored as one popup record: the first step's content and style
/// fill the flat columns and the whole flow goes into `flowData` as JSON.
pub struct FlowPersistenceService {
    popups: PopupService,
}

impl FlowPersistenceService {
    #[must_use]
    pub fn new(repository: Arc<dyn PopupRepository>) -> Self {
        Self {
            popups: PopupService::new(repository),
        }
    }

    /// Create a record, or update `existing_id` when given.
    ///
    /// The caller's flow is never modified; on error nothing was written.
    pub async fn save(&self, flow: &PopupFlow, existing_id: Option<i32>) -> CoreResult<PopupRecord> {
        let payload = flow_payload(flow)?;
        match existing_id {
            Some(id) => self.popups.update(id, &payload).await,
            None => self.popups.create(&payload).await,
        }
    }

    /// Rebuild the flow stored in a record.
    pub async fn load(&self, id: i32) -> CoreResult<PopupFlow> {
        let record = self.popups.get(id).await?;
        flow_from_record(&record)
    }
}

/// Flatten the first step and the flow name into a request body.
pub fn flow_payload(flow: &PopupFlow) -> CoreResult<PopupPayload> {
    let to_json_err = |e: serde_json::Error| CoreError::SerializationError(e.to_string());

    let mut body = match flow.first_step() {
        Some(step) => match serde_json::to_value(step).map_err(to_json_err)? {
            Value::Object(map) => map,
            _ => Map::new(),
        },
        None => Map::new(),
    };
    for key in ["id", "type", "formFields", "followUps"] {
        body.remove(key);
    }
    body.insert("name".to_string(), Value::String(flow.name.clone()));
    let flow_json = serde_json::to_string(flow).map_err(to_json_err)?;
    body.insert("flowData".to_string(), Value::String(flow_json));
    Ok(PopupPayload(body))
}

/// Flow stored in `flowData`, or a single-step flow built from the flat columns.
pub fn flow_from_record(record: &PopupRecord) -> CoreResult<PopupFlow> {
    if let Some(ref data) = record.flow_data {
        let flow: PopupFlow = serde_json::from_str(data).map_err(|e| {
            CoreError::SerializationError(format!("Invalid flow data in popup {}: {e}", record.id))
        })?;
        if !flow.steps.is_empty() {
            return Ok(flow);
        }
        log::warn!("Popup {} has a flow without steps, rebuilding from columns", record.id);
    }

    let base = initial_step();
    let step = Step {
        template: record.template.clone(),
        body: StepBody {
            content: StepContent {
                headline: record.headline.clone(),
                subheadline: record.subheadline.clone().unwrap_or_default(),
                button_text: record.button_text.clone(),
                button_url: None,
            },
            style: StepStyle {
                background_color: record.background_color.clone(),
                text_color: record.text_color.clone(),
                button_color: record.button_color.clone(),
                border_radius: record.border_radius,
                background_image: None,
                show_image: record.show_image,
            },
            form_fields: Vec::new(),
        },
        ..base
    };
    Ok(PopupFlow {
        name: record.name.clone(),
        steps: vec![step],
        ..PopupFlow::default()
    })
}

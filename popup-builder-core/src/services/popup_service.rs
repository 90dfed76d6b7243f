//! Popup record service: request validation and CRUD

use std::sync::Arc;

use serde_json::Value;

use crate::error::{CoreError, CoreResult, ValidationCode};
use crate::traits::PopupRepository;
use crate::types::{
    DeletedPopup, NewPopup, PopupChanges, PopupListQuery, PopupPayload, PopupRecord,
    DEFAULT_ANIMATION_STYLE, DEFAULT_BACKGROUND_COLOR, DEFAULT_BORDER_RADIUS,
    DEFAULT_BUTTON_COLOR, DEFAULT_TEXT_COLOR,
};
use crate::utils::lenient::{
    int_like, is_truthy, non_blank_string, parse_int_prefix, strict_bool, strict_int,
};

/// Parse a record id the way clients send it (`"12"`, `"12abc"`).
pub fn parse_id(raw: Option<&str>) -> CoreResult<i32> {
    raw.and_then(parse_int_prefix)
        .and_then(|id| i32::try_from(id).ok())
        .ok_or_else(|| CoreError::validation(ValidationCode::InvalidId, "Valid ID is required"))
}

/// Build listing parameters from raw query values.
///
/// Unparseable or negative numbers fall back to the defaults; `limit` is
/// capped at 100.
#[must_use]
pub fn list_query(limit: Option<&str>, offset: Option<&str>, search: Option<&str>) -> PopupListQuery {
    let non_negative = |raw: Option<&str>| {
        raw.and_then(parse_int_prefix)
            .and_then(|n| u64::try_from(n).ok())
    };
    PopupListQuery {
        limit: non_negative(limit)
            .unwrap_or(PopupListQuery::DEFAULT_LIMIT)
            .min(PopupListQuery::MAX_LIMIT),
        offset: non_negative(offset).unwrap_or(0),
        search: search.filter(|s| !s.is_empty()).map(str::to_string),
    }
}

/// Trimmed string when the value is a non-empty string, else `None`.
fn truthy_trimmed(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

fn flow_data(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(v @ (Value::Object(_) | Value::Array(_))) => Some(v.to_string()),
        _ => None,
    }
}

fn required(payload: &PopupPayload, key: &str, code: ValidationCode, message: &str) -> CoreResult<String> {
    non_blank_string(payload.get(key)).ok_or_else(|| CoreError::validation(code, message))
}

/// Validate a create request. Missing or wrongly typed optional values take
/// the column defaults.
pub fn validate_new(payload: &PopupPayload) -> CoreResult<NewPopup> {
    let name = required(
        payload,
        "name",
        ValidationCode::MissingName,
        "Name is required and must be a non-empty string",
    )?;
    let headline = required(
        payload,
        "headline",
        ValidationCode::MissingHeadline,
        "Headline is required and must be a non-empty string",
    )?;
    let button_text = required(
        payload,
        "buttonText",
        ValidationCode::MissingButtonText,
        "Button text is required and must be a non-empty string",
    )?;

    let text_or = |key: &str, default: &str| {
        non_blank_string(payload.get(key)).unwrap_or_else(|| default.to_string())
    };
    let bool_or = |key: &str, default: bool| strict_bool(payload.get(key)).unwrap_or(default);

    Ok(NewPopup {
        name,
        template: truthy_trimmed(payload.get("template")),
        headline,
        subheadline: truthy_trimmed(payload.get("subheadline")),
        button_text,
        background_color: text_or("backgroundColor", DEFAULT_BACKGROUND_COLOR),
        text_color: text_or("textColor", DEFAULT_TEXT_COLOR),
        button_color: text_or("buttonColor", DEFAULT_BUTTON_COLOR),
        border_radius: strict_int(payload.get("borderRadius")).unwrap_or(DEFAULT_BORDER_RADIUS),
        show_image: bool_or("showImage", true),
        show_close_button: bool_or("showCloseButton", true),
        show_overlay: bool_or("showOverlay", true),
        close_on_outside_click: bool_or("closeOnOutsideClick", true),
        animation_enabled: bool_or("animationEnabled", true),
        animation_style: text_or("animationStyle", DEFAULT_ANIMATION_STYLE),
        embed_code: truthy_trimmed(payload.get("embedCode")),
        is_published: bool_or("isPublished", false),
        flow_data: flow_data(payload.get("flowData")),
    })
}

/// Validate an update request. Only keys present in the body are changed.
pub fn validate_changes(payload: &PopupPayload) -> CoreResult<PopupChanges> {
    let present = |key: &str| payload.contains(key).then(|| payload.get(key));

    let non_blank = |key: &str, code: ValidationCode, message: &str| -> CoreResult<Option<String>> {
        match present(key) {
            Some(value) => non_blank_string(value)
                .map(Some)
                .ok_or_else(|| CoreError::validation(code, message)),
            None => Ok(None),
        }
    };
    // Non-string values for plain text columns are ignored.
    let text = |key: &str| {
        present(key).and_then(|value| match value {
            Some(Value::String(s)) => Some(s.trim().to_string()),
            _ => None,
        })
    };
    let flag = |key: &str| present(key).map(|value| value.is_some_and(is_truthy));

    let border_radius = match present("borderRadius") {
        Some(value) => Some(value.and_then(int_like).ok_or_else(|| {
            CoreError::validation(
                ValidationCode::InvalidBorderRadius,
                "Border radius must be a valid number",
            )
        })?),
        None => None,
    };

    Ok(PopupChanges {
        name: non_blank(
            "name",
            ValidationCode::InvalidName,
            "Name must be a non-empty string",
        )?,
        template: present("template").map(truthy_trimmed),
        headline: non_blank(
            "headline",
            ValidationCode::InvalidHeadline,
            "Headline must be a non-empty string",
        )?,
        subheadline: present("subheadline").map(truthy_trimmed),
        button_text: non_blank(
            "buttonText",
            ValidationCode::InvalidButtonText,
            "Button text must be a non-empty string",
        )?,
        background_color: text("backgroundColor"),
        text_color: text("textColor"),
        button_color: text("buttonColor"),
        border_radius,
        show_image: flag("showImage"),
        show_close_button: flag("showCloseButton"),
        show_overlay: flag("showOverlay"),
        close_on_outside_click: flag("closeOnOutsideClick"),
        animation_enabled: flag("animationEnabled"),
        animation_style: text("animationStyle"),
        embed_code: present("embedCode").map(truthy_trimmed),
        is_published: flag("isPublished"),
        flow_data: present("flowData").map(flow_data),
    })
}

/// Popup record service
pub struct PopupService {
    repository: Arc<dyn PopupRepository>,
}

impl PopupService {
    #[must_use]
    pub fn new(repository: Arc<dyn PopupRepository>) -> Self {
        Self { repository }
    }

    /// Validate and insert a new record.
    pub async fn create(&self, payload: &PopupPayload) -> CoreResult<PopupRecord> {
        let popup = validate_new(payload)?;
        let record = self.repository.insert(popup).await?;
        log::info!("Popup {} created: {}", record.id, record.name);
        Ok(record)
    }

    pub async fn get(&self, id: i32) -> CoreResult<PopupRecord> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(CoreError::PopupNotFound(id))
    }

    pub async fn list(&self, query: &PopupListQuery) -> CoreResult<Vec<PopupRecord>> {
        self.repository.list(query).await
    }

    /// Partial update. A missing record is reported before the body is validated.
    pub async fn update(&self, id: i32, payload: &PopupPayload) -> CoreResult<PopupRecord> {
        if self.repository.find_by_id(id).await?.is_none() {
            return Err(CoreError::PopupNotFound(id));
        }
        let changes = validate_changes(payload)?;
        let record = self
            .repository
            .update(id, &changes)
            .await?
            .ok_or(CoreError::PopupNotFound(id))?;
        log::info!("Popup {id} updated");
        Ok(record)
    }

    pub async fn delete(&self, id: i32) -> CoreResult<DeletedPopup> {
        let record = self
            .repository
            .delete(id)
            .await?
            .ok_or(CoreError::PopupNotFound(id))?;
        log::info!("Popup {id} deleted");
        Ok(DeletedPopup::new(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FailingPopupRepository;
    use crate::traits::InMemoryPopupRepository;
    use serde_json::json;

    fn payload(value: Value) -> PopupPayload {
        PopupPayload::from(value)
    }

    fn service() -> PopupService {
        PopupService::new(Arc::new(InMemoryPopupRepository::new()))
    }

    fn valid_body() -> Value {
        json!({"name": "Promo", "headline": "Hello", "buttonText": "Go"})
    }

    #[test]
    fn blank_name_is_missing_name() {
        let err = validate_new(&payload(json!({
            "name": "   ",
            "headline": "Hello",
            "buttonText": "Go"
        })))
        .unwrap_err();
        assert_eq!(err.code(), "MISSING_NAME");
    }

    #[test]
    fn required_fields_checked_in_order() {
        let err = validate_new(&payload(json!({"name": "x", "buttonText": "Go"}))).unwrap_err();
        assert_eq!(err.code(), "MISSING_HEADLINE");
        let err = validate_new(&payload(json!({"name": "x", "headline": "y", "buttonText": 3})))
            .unwrap_err();
        assert_eq!(err.code(), "MISSING_BUTTON_TEXT");
    }

    #[test]
    fn create_trims_and_defaults_wrong_types() {
        let popup = validate_new(&payload(json!({
            "name": "  Promo ",
            "headline": " Hello ",
            "buttonText": "Go",
            "template": " offer ",
            "subheadline": "",
            "backgroundColor": "   ",
            "borderRadius": "20",
            "showImage": "false",
            "isPublished": true,
            "embedCode": null
        })))
        .unwrap();
        assert_eq!(popup.name, "Promo");
        assert_eq!(popup.headline, "Hello");
        assert_eq!(popup.template.as_deref(), Some("offer"));
        assert_eq!(popup.subheadline, None);
        assert_eq!(popup.background_color, "#ffffff");
        assert_eq!(popup.border_radius, 12);
        assert!(popup.show_image);
        assert!(popup.is_published);
        assert_eq!(popup.embed_code, None);
        assert_eq!(popup.animation_style, "fade");
    }

    #[test]
    fn update_validation_codes() {
        let err = validate_changes(&payload(json!({"name": ""}))).unwrap_err();
        assert_eq!(err.code(), "INVALID_NAME");
        let err = validate_changes(&payload(json!({"headline": null}))).unwrap_err();
        assert_eq!(err.code(), "INVALID_HEADLINE");
        let err = validate_changes(&payload(json!({"buttonText": 5}))).unwrap_err();
        assert_eq!(err.code(), "INVALID_BUTTON_TEXT");
        let err = validate_changes(&payload(json!({"borderRadius": "round"}))).unwrap_err();
        assert_eq!(err.code(), "INVALID_BORDER_RADIUS");
    }

    #[test]
    fn update_only_touches_present_keys() {
        let changes = validate_changes(&payload(json!({
            "borderRadius": "24px",
            "showOverlay": 0,
            "subheadline": null
        })))
        .unwrap();
        assert_eq!(
            changes,
            PopupChanges {
                border_radius: Some(24),
                show_overlay: Some(false),
                subheadline: Some(None),
                ..PopupChanges::default()
            }
        );
    }

    #[test]
    fn ids_and_list_params() {
        assert_eq!(parse_id(Some("12")).unwrap(), 12);
        assert_eq!(parse_id(Some("7abc")).unwrap(), 7);
        assert_eq!(parse_id(Some("abc")).unwrap_err().code(), "INVALID_ID");
        assert_eq!(parse_id(None).unwrap_err().code(), "INVALID_ID");

        assert_eq!(list_query(None, None, None), PopupListQuery::default());
        let query = list_query(Some("500"), Some("20"), Some("sale"));
        assert_eq!(query.limit, 100);
        assert_eq!(query.offset, 20);
        assert_eq!(query.search.as_deref(), Some("sale"));
        assert_eq!(list_query(Some("x"), Some("-4"), Some("")).limit, 10);
    }

    #[tokio::test]
    async fn crud_round_trip() {
        let service = service();
        let created = service.create(&payload(valid_body())).await.unwrap();
        assert_eq!(service.get(created.id).await.unwrap(), created);

        let updated = service
            .update(created.id, &payload(json!({"headline": "Changed"})))
            .await
            .unwrap();
        assert_eq!(updated.headline, "Changed");
        assert!(updated.updated_at >= created.updated_at);

        let deleted = service.delete(created.id).await.unwrap();
        assert_eq!(deleted.message, "Popup deleted successfully");
        assert_eq!(deleted.popup.headline, "Changed");
        assert!(matches!(
            service.get(created.id).await,
            Err(CoreError::PopupNotFound(_))
        ));
    }

    #[tokio::test]
    async fn update_of_missing_record_is_not_found_even_with_bad_body() {
        let err = service()
            .update(42, &payload(json!({"name": ""})))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn storage_failures_surface_as_unexpected() {
        let repo = Arc::new(FailingPopupRepository::new());
        repo.set_error(Some("disk full".to_string())).await;
        let service = PopupService::new(repo);
        let err = service.create(&payload(valid_body())).await.unwrap_err();
        assert!(!err.is_expected());
        assert_eq!(err.to_string(), "Storage error: disk full");
    }
}

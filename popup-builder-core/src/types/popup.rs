//! Persisted popup record and its request types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_BACKGROUND_COLOR: &str = "#ffffff";
pub const DEFAULT_TEXT_COLOR: &str = "#000000";
pub const DEFAULT_BUTTON_COLOR: &str = "#6366f1";
pub const DEFAULT_BORDER_RADIUS: i32 = 12;
pub const DEFAULT_ANIMATION_STYLE: &str = "fade";

/// A popup as stored in the `popups` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopupRecord {
    pub id: i32,
    pub name: String,
    pub template: Option<String>,
    pub headline: String,
    pub subheadline: Option<String>,
    pub button_text: String,
    pub background_color: String,
    pub text_color: String,
    pub button_color: String,
    pub border_radius: i32,
    pub show_image: bool,
    pub show_close_button: bool,
    pub show_overlay: bool,
    pub close_on_outside_click: bool,
    pub animation_enabled: bool,
    pub animation_style: String,
    pub embed_code: Option<String>,
    pub is_published: bool,
    /// Serialized `PopupFlow`; absent for records created outside the builder
    pub flow_data: Option<String>,
    #[serde(with = "crate::utils::datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::utils::datetime")]
    pub updated_at: DateTime<Utc>,
}

/// Validated values for a new record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPopup {
    pub name: String,
    pub template: Option<String>,
    pub headline: String,
    pub subheadline: Option<String>,
    pub button_text: String,
    pub background_color: String,
    pub text_color: String,
    pub button_color: String,
    pub border_radius: i32,
    pub show_image: bool,
    pub show_close_button: bool,
    pub show_overlay: bool,
    pub close_on_outside_click: bool,
    pub animation_enabled: bool,
    pub animation_style: String,
    pub embed_code: Option<String>,
    pub is_published: bool,
    pub flow_data: Option<String>,
}

impl NewPopup {
    /// New popup with the column defaults for everything but the required text.
    #[must_use]
    pub fn with_defaults(
        name: impl Into<String>,
        headline: impl Into<String>,
        button_text: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            template: None,
            headline: headline.into(),
            subheadline: None,
            button_text: button_text.into(),
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
            text_color: DEFAULT_TEXT_COLOR.to_string(),
            button_color: DEFAULT_BUTTON_COLOR.to_string(),
            border_radius: DEFAULT_BORDER_RADIUS,
            show_image: true,
            show_close_button: true,
            show_overlay: true,
            close_on_outside_click: true,
            animation_enabled: true,
            animation_style: DEFAULT_ANIMATION_STYLE.to_string(),
            embed_code: None,
            is_published: false,
            flow_data: None,
        }
    }

    /// Materialize into a record; both timestamps are set to `now`.
    #[must_use]
    pub fn into_record(self, id: i32, now: DateTime<Utc>) -> PopupRecord {
        PopupRecord {
            id,
            name: self.name,
            template: self.template,
            headline: self.headline,
            subheadline: self.subheadline,
            button_text: self.button_text,
            background_color: self.background_color,
            text_color: self.text_color,
            button_color: self.button_color,
            border_radius: self.border_radius,
            show_image: self.show_image,
            show_close_button: self.show_close_button,
            show_overlay: self.show_overlay,
            close_on_outside_click: self.close_on_outside_click,
            animation_enabled: self.animation_enabled,
            animation_style: self.animation_style,
            embed_code: self.embed_code,
            is_published: self.is_published,
            flow_data: self.flow_data,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Validated partial update. `None` leaves the column untouched.
///
/// Nullable columns use `Some(None)` to clear the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopupChanges {
    pub name: Option<String>,
    pub template: Option<Option<String>>,
    pub headline: Option<String>,
    pub subheadline: Option<Option<String>>,
    pub button_text: Option<String>,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub button_color: Option<String>,
    pub border_radius: Option<i32>,
    pub show_image: Option<bool>,
    pub show_close_button: Option<bool>,
    pub show_overlay: Option<bool>,
    pub close_on_outside_click: Option<bool>,
    pub animation_enabled: Option<bool>,
    pub animation_style: Option<String>,
    pub embed_code: Option<Option<String>>,
    pub is_published: Option<bool>,
    pub flow_data: Option<Option<String>>,
}

fn set<T: Clone>(slot: &mut T, value: Option<&T>) {
    if let Some(value) = value {
        slot.clone_from(value);
    }
}

impl PopupChanges {
    /// Apply to a record in place and refresh `updated_at`.
    pub fn apply(&self, record: &mut PopupRecord, now: DateTime<Utc>) {
        set(&mut record.name, self.name.as_ref());
        set(&mut record.template, self.template.as_ref());
        set(&mut record.headline, self.headline.as_ref());
        set(&mut record.subheadline, self.subheadline.as_ref());
        set(&mut record.button_text, self.button_text.as_ref());
        set(&mut record.background_color, self.background_color.as_ref());
        set(&mut record.text_color, self.text_color.as_ref());
        set(&mut record.button_color, self.button_color.as_ref());
        set(&mut record.border_radius, self.border_radius.as_ref());
        set(&mut record.show_image, self.show_image.as_ref());
        set(&mut record.show_close_button, self.show_close_button.as_ref());
        set(&mut record.show_overlay, self.show_overlay.as_ref());
        set(
            &mut record.close_on_outside_click,
            self.close_on_outside_click.as_ref(),
        );
        set(&mut record.animation_enabled, self.animation_enabled.as_ref());
        set(&mut record.animation_style, self.animation_style.as_ref());
        set(&mut record.embed_code, self.embed_code.as_ref());
        set(&mut record.is_published, self.is_published.as_ref());
        set(&mut record.flow_data, self.flow_data.as_ref());
        record.updated_at = now;
    }
}

/// Raw JSON body of a create or update request.
///
/// Kept as a map so that an absent key and an explicit `null` stay distinct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PopupPayload(pub Map<String, Value>);

impl PopupPayload {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }
}

impl From<Value> for PopupPayload {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }
}

/// Listing parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupListQuery {
    pub limit: u64,
    pub offset: u64,
    /// Substring matched against name or headline
    pub search: Option<String>,
}

impl PopupListQuery {
    pub const DEFAULT_LIMIT: u64 = 10;
    pub const MAX_LIMIT: u64 = 100;
}

impl Default for PopupListQuery {
    fn default() -> Self {
        Self {
            limit: Self::DEFAULT_LIMIT,
            offset: 0,
            search: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_uses_camel_case_and_nulls() {
        let now = Utc::now();
        let record = NewPopup::with_defaults("Promo", "Hi", "Go").into_record(1, now);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["buttonText"], "Go");
        assert_eq!(json["backgroundColor"], "#ffffff");
        assert_eq!(json["borderRadius"], 12);
        assert_eq!(json["animationStyle"], "fade");
        assert!(json["template"].is_null());
        assert!(json["flowData"].is_null());
        assert_eq!(json["isPublished"], false);
    }

    #[test]
    fn changes_apply_only_given_columns() {
        let created = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let later = DateTime::from_timestamp(1_700_000_100, 0).unwrap();
        let mut record = NewPopup {
            subheadline: Some("Sub".to_string()),
            ..NewPopup::with_defaults("Promo", "Hi", "Go")
        }
        .into_record(3, created);

        PopupChanges {
            headline: Some("Hello".to_string()),
            subheadline: Some(None),
            is_published: Some(true),
            ..PopupChanges::default()
        }
        .apply(&mut record, later);

        assert_eq!(record.headline, "Hello");
        assert_eq!(record.subheadline, None);
        assert!(record.is_published);
        assert_eq!(record.name, "Promo");
        assert_eq!(record.created_at, created);
        assert_eq!(record.updated_at, later);
    }

    #[test]
    fn payload_distinguishes_null_from_absent() {
        let payload: PopupPayload =
            serde_json::from_str(r#"{"name": null, "headline": "x"}"#).unwrap();
        assert!(payload.contains("name"));
        assert!(payload.get("name").unwrap().is_null());
        assert!(!payload.contains("buttonText"));
    }
}

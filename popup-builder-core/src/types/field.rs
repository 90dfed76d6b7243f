//! Form field types
//!
//! Fields are a sum type keyed by `type`. Column layouts nest exactly one
//! level: a top-level field may be `columns`, a field inside a column may not.
//! The nesting level is a type parameter, so the rule holds by construction
//! and is checked again when deserializing.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Field kind as chosen from the builder palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Textarea,
    Url,
    Image,
    Video,
    Button,
    Socials,
    Checkbox,
    Radio,
    Dropdown,
    Heading,
    Textblock,
    Link,
    Linkbox,
    Imagebox,
    Map,
    Icon,
    Columns,
}

impl FieldType {
    /// Wire name of the field type.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Url => "url",
            Self::Image => "image",
            Self::Video => "video",
            Self::Button => "button",
            Self::Socials => "socials",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Dropdown => "dropdown",
            Self::Heading => "heading",
            Self::Textblock => "textblock",
            Self::Link => "link",
            Self::Linkbox => "linkbox",
            Self::Imagebox => "imagebox",
            Self::Map => "map",
            Self::Icon => "icon",
            Self::Columns => "columns",
        }
    }

    /// Wire name with the first letter upper-cased, used for default labels.
    #[must_use]
    pub fn display_name(self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Text inputs carry a placeholder that merge tags can be inserted into.
    #[must_use]
    pub fn is_text_like(self) -> bool {
        matches!(self, Self::Text | Self::Textarea | Self::Url)
    }
}

/// Width distribution of a two-column layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnVariant {
    #[default]
    Equal,
    LeftLarge,
    RightLarge,
}

/// Payload of a field, keyed by its type.
///
/// `C` is the payload of the `columns` variant: [`ColumnsBlock`] at the top
/// level and the uninhabited [`NoColumns`] inside a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum FieldKind<C> {
    Text {
        #[serde(default)]
        placeholder: String,
    },
    Textarea {
        #[serde(default)]
        placeholder: String,
    },
    Url {
        #[serde(default)]
        placeholder: String,
    },
    Image {
        #[serde(default)]
        file_url: String,
    },
    Video {
        #[serde(default)]
        file_url: String,
    },
    Button {
        #[serde(default)]
        content: String,
        #[serde(default)]
        href: String,
    },
    Socials {},
    Checkbox {
        #[serde(default)]
        content: String,
    },
    Radio {
        #[serde(default)]
        options: Vec<String>,
    },
    Dropdown {
        #[serde(default)]
        options: Vec<String>,
    },
    Heading {
        #[serde(default)]
        content: String,
    },
    Textblock {
        #[serde(default)]
        content: String,
    },
    Link {
        #[serde(default)]
        content: String,
        #[serde(default)]
        href: String,
    },
    Linkbox {
        #[serde(default)]
        content: String,
        #[serde(default)]
        href: String,
    },
    Imagebox {
        #[serde(default)]
        file_url: String,
        #[serde(default)]
        content: String,
    },
    Map {
        #[serde(default)]
        map_url: String,
    },
    Icon {
        #[serde(default)]
        content: String,
    },
    Columns(C),
}

/// Column layout holding one level of child fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnsBlock {
    pub column_count: u8,
    #[serde(default)]
    pub column_variant: ColumnVariant,
    #[serde(default)]
    pub fields: Vec<ColumnChildField>,
}

impl Default for ColumnsBlock {
    fn default() -> Self {
        Self {
            column_count: 2,
            column_variant: ColumnVariant::Equal,
            fields: Vec::new(),
        }
    }
}

impl ColumnsBlock {
    pub const MAX_COLUMNS: u8 = 4;

    /// Change the column count (clamped to 1..=4).
    ///
    /// Only two-column layouts keep an uneven variant.
    pub fn set_column_count(&mut self, count: u8) {
        self.column_count = count.clamp(1, Self::MAX_COLUMNS);
        if self.column_count != 2 {
            self.column_variant = ColumnVariant::Equal;
        }
    }
}

/// Uninhabited `columns` payload for fields that live inside a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoColumns {}

impl Serialize for NoColumns {
    fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
        match *self {}
    }
}

impl<'de> Deserialize<'de> for NoColumns {
    fn deserialize<D: Deserializer<'de>>(_deserializer: D) -> Result<Self, D::Error> {
        Err(D::Error::custom(
            "a columns field cannot be nested inside another columns field",
        ))
    }
}

/// Column-specific part of a [`FieldPatch`].
pub trait ColumnSlot {
    /// Apply column count / variant changes, if this level has columns.
    fn apply_column_patch(&mut self, patch: &FieldPatch);
}

impl ColumnSlot for ColumnsBlock {
    fn apply_column_patch(&mut self, patch: &FieldPatch) {
        if let Some(count) = patch.column_count {
            self.set_column_count(count);
        }
        if let Some(variant) = patch.column_variant {
            if self.column_count == 2 {
                self.column_variant = variant;
            }
        }
    }
}

impl ColumnSlot for NoColumns {
    fn apply_column_patch(&mut self, _patch: &FieldPatch) {
        match *self {}
    }
}

/// A content block inside a step or follow-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField<C> {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(flatten)]
    pub kind: FieldKind<C>,
}

/// Field placed directly in a step's `formFields`.
pub type TopLevelField = FormField<ColumnsBlock>;

/// Field placed inside a `columns` field.
pub type ColumnChildField = FormField<NoColumns>;

const DEFAULT_PLACEHOLDER: &str = "Enter value...";

fn default_options(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("Option {i}")).collect()
}

impl<C> FieldKind<C> {
    fn with_defaults(field_type: FieldType, option_count: usize, columns: impl FnOnce() -> Option<C>) -> Option<Self> {
        let placeholder = || DEFAULT_PLACEHOLDER.to_string();
        let kind = match field_type {
            FieldType::Text => Self::Text {
                placeholder: placeholder(),
            },
            FieldType::Textarea => Self::Textarea {
                placeholder: placeholder(),
            },
            FieldType::Url => Self::Url {
                placeholder: placeholder(),
            },
            FieldType::Image => Self::Image {
                file_url: String::new(),
            },
            FieldType::Video => Self::Video {
                file_url: String::new(),
            },
            FieldType::Button => Self::Button {
                content: String::new(),
                href: String::new(),
            },
            FieldType::Socials => Self::Socials {},
            FieldType::Checkbox => Self::Checkbox {
                content: String::new(),
            },
            FieldType::Radio => Self::Radio {
                options: default_options(option_count),
            },
            FieldType::Dropdown => Self::Dropdown {
                options: default_options(option_count),
            },
            FieldType::Heading => Self::Heading {
                content: String::new(),
            },
            FieldType::Textblock => Self::Textblock {
                content: String::new(),
            },
            FieldType::Link => Self::Link {
                content: String::new(),
                href: String::new(),
            },
            FieldType::Linkbox => Self::Linkbox {
                content: String::new(),
                href: String::new(),
            },
            FieldType::Imagebox => Self::Imagebox {
                file_url: String::new(),
                content: String::new(),
            },
            FieldType::Map => Self::Map {
                map_url: String::new(),
            },
            FieldType::Icon => Self::Icon {
                content: String::new(),
            },
            FieldType::Columns => Self::Columns(columns()?),
        };
        Some(kind)
    }

    /// Type tag of this payload.
    #[must_use]
    pub fn field_type(&self) -> FieldType {
        match self {
            Self::Text { .. } => FieldType::Text,
            Self::Textarea { .. } => FieldType::Textarea,
            Self::Url { .. } => FieldType::Url,
            Self::Image { .. } => FieldType::Image,
            Self::Video { .. } => FieldType::Video,
            Self::Button { .. } => FieldType::Button,
            Self::Socials {} => FieldType::Socials,
            Self::Checkbox { .. } => FieldType::Checkbox,
            Self::Radio { .. } => FieldType::Radio,
            Self::Dropdown { .. } => FieldType::Dropdown,
            Self::Heading { .. } => FieldType::Heading,
            Self::Textblock { .. } => FieldType::Textblock,
            Self::Link { .. } => FieldType::Link,
            Self::Linkbox { .. } => FieldType::Linkbox,
            Self::Imagebox { .. } => FieldType::Imagebox,
            Self::Map { .. } => FieldType::Map,
            Self::Icon { .. } => FieldType::Icon,
            Self::Columns(_) => FieldType::Columns,
        }
    }

    /// Placeholder of a text-like input.
    pub fn placeholder_mut(&mut self) -> Option<&mut String> {
        match self {
            Self::Text { placeholder } | Self::Textarea { placeholder } | Self::Url { placeholder } => {
                Some(placeholder)
            }
            _ => None,
        }
    }

    /// Option list of a radio group or dropdown.
    pub fn options_mut(&mut self) -> Option<&mut Vec<String>> {
        match self {
            Self::Radio { options } | Self::Dropdown { options } => Some(options),
            _ => None,
        }
    }

    fn content_mut(&mut self) -> Option<&mut String> {
        match self {
            Self::Button { content, .. }
            | Self::Checkbox { content }
            | Self::Heading { content }
            | Self::Textblock { content }
            | Self::Link { content, .. }
            | Self::Linkbox { content, .. }
            | Self::Imagebox { content, .. }
            | Self::Icon { content } => Some(content),
            _ => None,
        }
    }

    fn href_mut(&mut self) -> Option<&mut String> {
        match self {
            Self::Button { href, .. } | Self::Link { href, .. } | Self::Linkbox { href, .. } => {
                Some(href)
            }
            _ => None,
        }
    }

    fn file_url_mut(&mut self) -> Option<&mut String> {
        match self {
            Self::Image { file_url } | Self::Video { file_url } | Self::Imagebox { file_url, .. } => {
                Some(file_url)
            }
            _ => None,
        }
    }
}

impl TopLevelField {
    /// New top-level field with the builder defaults for `field_type`.
    #[must_use]
    pub fn with_type(id: impl Into<String>, field_type: FieldType) -> Self {
        let kind = FieldKind::with_defaults(field_type, 3, || Some(ColumnsBlock::default()))
            .unwrap_or(FieldKind::Columns(ColumnsBlock::default()));
        Self {
            id: id.into(),
            label: format!("{} Field", field_type.display_name()),
            kind,
        }
    }

    /// Column layout payload, if this is a `columns` field.
    pub fn columns_mut(&mut self) -> Option<&mut ColumnsBlock> {
        match &mut self.kind {
            FieldKind::Columns(block) => Some(block),
            _ => None,
        }
    }
}

impl ColumnChildField {
    /// New field for a column, or `None` for `columns` which cannot nest.
    #[must_use]
    pub fn with_type(id: impl Into<String>, field_type: FieldType) -> Option<Self> {
        let kind = FieldKind::with_defaults(field_type, 2, || None)?;
        Some(Self {
            id: id.into(),
            label: field_type.display_name(),
            kind,
        })
    }
}

impl<C> FormField<C> {
    #[must_use]
    pub fn field_type(&self) -> FieldType {
        self.kind.field_type()
    }
}

impl<C: ColumnSlot> FormField<C> {
    /// Merge a partial update; properties the field type lacks are ignored.
    pub fn apply_patch(&mut self, patch: &FieldPatch) {
        if let Some(ref label) = patch.label {
            self.label.clone_from(label);
        }
        if let (Some(value), Some(slot)) = (&patch.placeholder, self.kind.placeholder_mut()) {
            slot.clone_from(value);
        }
        if let (Some(value), Some(slot)) = (&patch.options, self.kind.options_mut()) {
            slot.clone_from(value);
        }
        if let (Some(value), Some(slot)) = (&patch.content, self.kind.content_mut()) {
            slot.clone_from(value);
        }
        if let (Some(value), Some(slot)) = (&patch.href, self.kind.href_mut()) {
            slot.clone_from(value);
        }
        if let (Some(value), Some(slot)) = (&patch.file_url, self.kind.file_url_mut()) {
            slot.clone_from(value);
        }
        if let (Some(value), FieldKind::Map { map_url }) = (&patch.map_url, &mut self.kind) {
            map_url.clone_from(value);
        }
        if let FieldKind::Columns(slot) = &mut self.kind {
            slot.apply_column_patch(patch);
        }
    }
}

/// Partial update of a form field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_count: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_variant: Option<ColumnVariant>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_level_defaults_follow_field_type() {
        let text = TopLevelField::with_type("f1", FieldType::Text);
        assert_eq!(text.label, "Text Field");
        assert_eq!(
            text.kind,
            FieldKind::Text {
                placeholder: "Enter value...".to_string()
            }
        );

        let radio = TopLevelField::with_type("f2", FieldType::Radio);
        assert_eq!(
            radio.kind,
            FieldKind::Radio {
                options: vec![
                    "Option 1".to_string(),
                    "Option 2".to_string(),
                    "Option 3".to_string()
                ]
            }
        );

        let columns = TopLevelField::with_type("f3", FieldType::Columns);
        assert_eq!(columns.kind, FieldKind::Columns(ColumnsBlock::default()));
    }

    #[test]
    fn column_children_use_short_labels_and_two_options() {
        let child = ColumnChildField::with_type("c1", FieldType::Dropdown).unwrap();
        assert_eq!(child.label, "Dropdown");
        assert_eq!(
            child.kind,
            FieldKind::Dropdown {
                options: vec!["Option 1".to_string(), "Option 2".to_string()]
            }
        );
    }

    #[test]
    fn columns_cannot_be_built_inside_a_column() {
        assert!(ColumnChildField::with_type("c1", FieldType::Columns).is_none());
    }

    #[test]
    fn nested_columns_are_rejected_on_deserialize() {
        let json = r#"{
            "id": "outer",
            "label": "Columns",
            "type": "columns",
            "columnCount": 2,
            "columnVariant": "equal",
            "fields": [
                {"id": "inner", "label": "Columns", "type": "columns", "columnCount": 2}
            ]
        }"#;
        let parsed: Result<TopLevelField, _> = serde_json::from_str(json);
        assert!(parsed.is_err());
    }

    #[test]
    fn column_layout_deserializes_with_children() {
        let json = r#"{
            "id": "outer",
            "label": "Two columns",
            "type": "columns",
            "columnCount": 2,
            "columnVariant": "left-large",
            "fields": [
                {"id": "a", "label": "Email", "type": "text", "placeholder": "you@example.com"},
                {"id": "b", "label": "Plan", "type": "radio", "options": ["Basic", "Pro"]}
            ]
        }"#;
        let field: TopLevelField = serde_json::from_str(json).unwrap();
        let FieldKind::Columns(block) = &field.kind else {
            panic!("expected columns");
        };
        assert_eq!(block.column_variant, ColumnVariant::LeftLarge);
        assert_eq!(block.fields.len(), 2);
        assert_eq!(block.fields[1].field_type(), FieldType::Radio);
    }

    #[test]
    fn patch_ignores_properties_the_type_lacks() {
        let mut field = TopLevelField::with_type("f1", FieldType::Heading);
        field.apply_patch(&FieldPatch {
            content: Some("Big news".to_string()),
            placeholder: Some("ignored".to_string()),
            ..FieldPatch::default()
        });
        assert_eq!(
            field.kind,
            FieldKind::Heading {
                content: "Big news".to_string()
            }
        );
    }

    #[test]
    fn column_count_change_resets_uneven_variant() {
        let mut field = TopLevelField::with_type("f1", FieldType::Columns);
        field.apply_patch(&FieldPatch {
            column_variant: Some(ColumnVariant::RightLarge),
            ..FieldPatch::default()
        });
        assert_eq!(
            field.columns_mut().unwrap().column_variant,
            ColumnVariant::RightLarge
        );

        field.apply_patch(&FieldPatch {
            column_count: Some(3),
            ..FieldPatch::default()
        });
        let block = field.columns_mut().unwrap();
        assert_eq!(block.column_count, 3);
        assert_eq!(block.column_variant, ColumnVariant::Equal);
    }

    #[test]
    fn serialized_field_is_flat_with_type_tag() {
        let field = TopLevelField::with_type("f1", FieldType::Url);
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["type"], "url");
        assert_eq!(json["id"], "f1");
        assert_eq!(json["placeholder"], "Enter value...");
    }
}

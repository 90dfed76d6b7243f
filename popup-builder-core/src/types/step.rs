//! Step and follow-up types

use serde::{Deserialize, Serialize};

use super::condition::TriggerCondition;
use super::field::TopLevelField;

/// Purpose of a step within the flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepKind {
    #[default]
    Offer,
    EmailCapture,
    Confirmation,
    Custom,
}

/// Copy shown by a step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepContent {
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub subheadline: String,
    #[serde(default)]
    pub button_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_url: Option<String>,
}

/// Visual settings of a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepStyle {
    pub background_color: String,
    pub text_color: String,
    pub button_color: String,
    pub border_radius: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(default)]
    pub show_image: bool,
}

impl Default for StepStyle {
    fn default() -> Self {
        Self {
            background_color: "#FFFFFF".to_string(),
            text_color: "#493D34".to_string(),
            button_color: "#EC5B31".to_string(),
            border_radius: 12,
            background_image: None,
            show_image: true,
        }
    }
}

/// Content, style and fields shared by steps and follow-ups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepBody {
    #[serde(flatten)]
    pub content: StepContent,
    #[serde(flatten)]
    pub style: StepStyle,
    #[serde(default)]
    pub form_fields: Vec<TopLevelField>,
}

/// One screen of the popup flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: StepKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(flatten)]
    pub body: StepBody,
    #[serde(default)]
    pub follow_ups: Vec<FollowUp>,
}

impl Step {
    pub fn find_follow_up(&self, follow_up_id: &str) -> Option<&FollowUp> {
        self.follow_ups.iter().find(|f| f.id == follow_up_id)
    }

    pub fn find_follow_up_mut(&mut self, follow_up_id: &str) -> Option<&mut FollowUp> {
        self.follow_ups.iter_mut().find(|f| f.id == follow_up_id)
    }
}

/// Conditional branch revealed after a step interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUp {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub body: StepBody,
    /// Unset means the follow-up is never revealed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<TriggerCondition>,
}

/// Partial update of a step or follow-up.
///
/// `kind` and `template` only apply to steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepPatch {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<StepKind>,
    pub template: Option<String>,
    pub headline: Option<String>,
    pub subheadline: Option<String>,
    pub button_text: Option<String>,
    pub button_url: Option<String>,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub button_color: Option<String>,
    pub border_radius: Option<i32>,
    pub background_image: Option<String>,
    pub show_image: Option<bool>,
}

fn merge<T: Clone>(slot: &mut T, value: Option<&T>) {
    if let Some(value) = value {
        slot.clone_from(value);
    }
}

impl StepPatch {
    fn apply_body(&self, body: &mut StepBody) {
        let content = &mut body.content;
        merge(&mut content.headline, self.headline.as_ref());
        merge(&mut content.subheadline, self.subheadline.as_ref());
        merge(&mut content.button_text, self.button_text.as_ref());
        if let Some(ref url) = self.button_url {
            content.button_url = Some(url.clone());
        }

        let style = &mut body.style;
        merge(&mut style.background_color, self.background_color.as_ref());
        merge(&mut style.text_color, self.text_color.as_ref());
        merge(&mut style.button_color, self.button_color.as_ref());
        merge(&mut style.border_radius, self.border_radius.as_ref());
        merge(&mut style.show_image, self.show_image.as_ref());
        if let Some(ref image) = self.background_image {
            style.background_image = Some(image.clone());
        }
    }

    pub fn apply_to_step(&self, step: &mut Step) {
        merge(&mut step.name, self.name.as_ref());
        merge(&mut step.kind, self.kind.as_ref());
        if let Some(ref template) = self.template {
            step.template = Some(template.clone());
        }
        self.apply_body(&mut step.body);
    }

    pub fn apply_to_follow_up(&self, follow_up: &mut FollowUp) {
        merge(&mut follow_up.name, self.name.as_ref());
        self.apply_body(&mut follow_up.body);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_step() -> Step {
        Step {
            id: "1".to_string(),
            name: "Offer".to_string(),
            kind: StepKind::Offer,
            template: Some("offer".to_string()),
            body: StepBody {
                content: StepContent {
                    headline: "Hello".to_string(),
                    button_text: "Go".to_string(),
                    ..StepContent::default()
                },
                ..StepBody::default()
            },
            follow_ups: Vec::new(),
        }
    }

    #[test]
    fn step_serializes_flat_like_the_saved_flow() {
        let json = serde_json::to_value(sample_step()).unwrap();
        assert_eq!(json["type"], "offer");
        assert_eq!(json["headline"], "Hello");
        assert_eq!(json["buttonText"], "Go");
        assert_eq!(json["backgroundColor"], "#FFFFFF");
        assert_eq!(json["borderRadius"], 12);
        assert!(json["formFields"].as_array().unwrap().is_empty());
        assert!(json.get("buttonUrl").is_none());
    }

    #[test]
    fn step_round_trips_through_json() {
        let step = sample_step();
        let text = serde_json::to_string(&step).unwrap();
        let back: Step = serde_json::from_str(&text).unwrap();
        assert_eq!(back, step);
    }

    #[test]
    fn patch_only_touches_given_properties() {
        let mut step = sample_step();
        StepPatch {
            headline: Some("New".to_string()),
            border_radius: Some(4),
            ..StepPatch::default()
        }
        .apply_to_step(&mut step);
        assert_eq!(step.body.content.headline, "New");
        assert_eq!(step.body.content.button_text, "Go");
        assert_eq!(step.body.style.border_radius, 4);
        assert_eq!(step.name, "Offer");
    }

    #[test]
    fn follow_up_patch_ignores_step_only_properties() {
        let mut follow_up = FollowUp {
            id: "fu".to_string(),
            name: "Follow-up".to_string(),
            body: StepBody::default(),
            condition: None,
        };
        StepPatch {
            name: Some("Thanks".to_string()),
            kind: Some(StepKind::Confirmation),
            ..StepPatch::default()
        }
        .apply_to_follow_up(&mut follow_up);
        assert_eq!(follow_up.name, "Thanks");
    }
}

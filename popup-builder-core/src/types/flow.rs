//! Popup flow aggregate

use serde::{Deserialize, Serialize};

use super::step::{Step, StepBody, StepContent, StepKind, StepStyle};

/// Font settings for one text role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSpec {
    pub font: String,
    pub weight: String,
    pub size: String,
}

impl FontSpec {
    fn sora(weight: &str, size: &str) -> Self {
        Self {
            font: "Sora".to_string(),
            weight: weight.to_string(),
            size: size.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Typography {
    pub heading: FontSpec,
    pub subheading: FontSpec,
    pub body: FontSpec,
    pub button: FontSpec,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            heading: FontSpec::sora("700", "24"),
            subheading: FontSpec::sora("400", "14"),
            body: FontSpec::sora("400", "14"),
            button: FontSpec::sora("600", "14"),
        }
    }
}

/// Palette hint shown in the style panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteColor {
    pub name: String,
    pub value: String,
    pub percentage: u8,
}

fn default_palette() -> Vec<PaletteColor> {
    [
        ("Primary", "#493D34", 100),
        ("Background", "#FFFFFF", 30),
        ("Accent", "#F0E7E1", 97),
        ("Button", "#EC5B31", 100),
        ("Border", "#CCCCCC", 100),
    ]
    .into_iter()
    .map(|(name, value, percentage)| PaletteColor {
        name: name.to_string(),
        value: value.to_string(),
        percentage,
    })
    .collect()
}

/// The whole multi-step popup being edited.
///
/// `steps` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopupFlow {
    pub name: String,
    pub steps: Vec<Step>,
    #[serde(default)]
    pub typography: Typography,
    #[serde(default = "default_palette")]
    pub colors: Vec<PaletteColor>,
}

pub const DEFAULT_FLOW_NAME: &str = "Sitewide Email Capture | Free Shipping";

/// The step every new flow starts with.
#[must_use]
pub fn initial_step() -> Step {
    Step {
        id: "1".to_string(),
        name: "Offer".to_string(),
        kind: StepKind::Offer,
        template: Some("offer".to_string()),
        body: StepBody {
            content: StepContent {
                headline: String::new(),
                subheadline: String::new(),
                button_text: "Claim Offer".to_string(),
                button_url: Some(String::new()),
            },
            style: StepStyle::default(),
            form_fields: Vec::new(),
        },
        follow_ups: Vec::new(),
    }
}

impl Default for PopupFlow {
    fn default() -> Self {
        Self {
            name: DEFAULT_FLOW_NAME.to_string(),
            steps: vec![initial_step()],
            typography: Typography::default(),
            colors: default_palette(),
        }
    }
}

impl PopupFlow {
    pub fn find_step(&self, step_id: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.id == step_id)
    }

    pub fn find_step_mut(&mut self, step_id: &str) -> Option<&mut Step> {
        self.steps.iter_mut().find(|s| s.id == step_id)
    }

    /// First step, the one flattened into the persisted record.
    pub fn first_step(&self) -> Option<&Step> {
        self.steps.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_flow_has_single_offer_step() {
        let flow = PopupFlow::default();
        assert_eq!(flow.name, DEFAULT_FLOW_NAME);
        assert_eq!(flow.steps.len(), 1);
        let step = &flow.steps[0];
        assert_eq!(step.id, "1");
        assert_eq!(step.name, "Offer");
        assert_eq!(step.body.content.button_text, "Claim Offer");
        assert_eq!(flow.typography.heading.weight, "700");
        assert_eq!(flow.colors.len(), 5);
        assert_eq!(flow.colors[3].value, "#EC5B31");
    }

    #[test]
    fn missing_typography_and_colors_use_defaults() {
        let json = serde_json::json!({
            "name": "Minimal",
            "steps": [{
                "id": "a",
                "name": "Only",
                "type": "custom",
                "headline": "Hi",
                "buttonText": "Ok",
                "backgroundColor": "#fff",
                "textColor": "#000",
                "buttonColor": "#111",
                "borderRadius": 0
            }]
        });
        let flow: PopupFlow = serde_json::from_value(json).unwrap();
        assert_eq!(flow.typography, Typography::default());
        assert_eq!(flow.colors.len(), 5);
        assert_eq!(flow.steps[0].kind, StepKind::Custom);
    }
}

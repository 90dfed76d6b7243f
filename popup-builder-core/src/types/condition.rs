//! Trigger condition types gating follow-up visibility

use serde::{Deserialize, Serialize};

/// Interaction that must happen for a follow-up to be revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerType {
    ButtonClick,
    FormSubmit,
    FieldInteraction,
    CheckboxCheck,
    ElementClick,
}

/// Kind of element a trigger condition targets.
///
/// Also used as the role of the element that emitted an interaction event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetType {
    Button,
    Headline,
    Subheadline,
    FormField,
    Checkbox,
    Radio,
    Dropdown,
}

/// Default target type for a trigger type.
///
/// This is the only place the coupling between the two is defined; it is
/// applied when the trigger type changes and never the other way round.
#[must_use]
pub const fn default_target_type_for(trigger_type: TriggerType) -> TargetType {
    match trigger_type {
        TriggerType::ButtonClick => TargetType::Button,
        TriggerType::FormSubmit => TargetType::FormField,
        TriggerType::CheckboxCheck => TargetType::Checkbox,
        TriggerType::FieldInteraction | TriggerType::ElementClick => TargetType::Button,
    }
}

/// Declarative rule deciding when a follow-up appears.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerCondition {
    /// Older flows store this under `type`
    #[serde(alias = "type")]
    pub trigger_type: TriggerType,
    pub target_type: TargetType,
    /// Label or id of the element; empty matches any element of the target type
    #[serde(default)]
    pub target_element: String,
}

impl TriggerCondition {
    /// Create a condition with the default target for `trigger_type`.
    #[must_use]
    pub fn new(trigger_type: TriggerType) -> Self {
        Self {
            trigger_type,
            target_type: default_target_type_for(trigger_type),
            target_element: String::new(),
        }
    }

    /// Create a condition targeting a specific element.
    #[must_use]
    pub fn targeting(
        trigger_type: TriggerType,
        target_type: TargetType,
        target_element: impl Into<String>,
    ) -> Self {
        Self {
            trigger_type,
            target_type,
            target_element: target_element.into(),
        }
    }

    /// Switch the trigger type.
    ///
    /// Re-derives the target type and clears the element identifier.
    pub fn set_trigger_type(&mut self, trigger_type: TriggerType) {
        self.trigger_type = trigger_type;
        self.target_type = default_target_type_for(trigger_type);
        self.target_element.clear();
    }

    /// Switch the target type, keeping the trigger type.
    pub fn set_target_type(&mut self, target_type: TargetType) {
        self.target_type = target_type;
    }

    /// Human readable description shown next to the condition editor.
    #[must_use]
    pub fn summary(&self) -> String {
        let or = |fallback| target_or(&self.target_element, fallback);
        match self.trigger_type {
            TriggerType::ButtonClick => {
                format!("Show this follow-up when user clicks on {}", or("the button"))
            }
            TriggerType::FormSubmit => {
                format!("Show this follow-up when user submits {}", or("the form"))
            }
            TriggerType::FieldInteraction => {
                format!("Show this follow-up when user interacts with {}", or("a field"))
            }
            TriggerType::CheckboxCheck => {
                format!("Show this follow-up when user checks {}", or("a checkbox"))
            }
            TriggerType::ElementClick => {
                format!("Show this follow-up when user clicks {}", or("an element"))
            }
        }
    }
}

fn target_or<'a>(target: &'a str, fallback: &'a str) -> &'a str {
    if target.is_empty() {
        fallback
    } else {
        target
    }
}

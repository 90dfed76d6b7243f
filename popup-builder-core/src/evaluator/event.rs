//! Interaction events reported by a rendered popup

use serde::{Deserialize, Serialize};

use crate::types::TargetType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    Click,
    Submit,
    Focus,
    Change,
    Check,
    Uncheck,
}

/// One user interaction with an element of the current step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionEvent {
    /// Kind of element that emitted the event
    pub role: TargetType,
    /// Label or id of the element
    pub identifier: String,
    pub kind: InteractionKind,
}

impl InteractionEvent {
    pub fn new(role: TargetType, identifier: impl Into<String>, kind: InteractionKind) -> Self {
        Self {
            role,
            identifier: identifier.into(),
            kind,
        }
    }

    pub fn click(role: TargetType, identifier: impl Into<String>) -> Self {
        Self::new(role, identifier, InteractionKind::Click)
    }
}

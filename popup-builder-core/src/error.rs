//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

/// Stable machine-readable code attached to a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationCode {
    MissingName,
    MissingHeadline,
    MissingButtonText,
    InvalidId,
    InvalidName,
    InvalidHeadline,
    InvalidButtonText,
    InvalidBorderRadius,
}

impl ValidationCode {
    /// The code as it appears on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingName => "MISSING_NAME",
            Self::MissingHeadline => "MISSING_HEADLINE",
            Self::MissingButtonText => "MISSING_BUTTON_TEXT",
            Self::InvalidId => "INVALID_ID",
            Self::InvalidName => "INVALID_NAME",
            Self::InvalidHeadline => "INVALID_HEADLINE",
            Self::InvalidButtonText => "INVALID_BUTTON_TEXT",
            Self::InvalidBorderRadius => "INVALID_BORDER_RADIUS",
        }
    }
}

impl std::fmt::Display for ValidationCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Request input rejected before touching storage
    #[error("{message}")]
    Validation {
        code: ValidationCode,
        message: String,
    },

    /// Persisted popup record not found
    #[error("Popup not found: {0}")]
    PopupNotFound(i32),

    /// Step not found in the flow
    #[error("Step not found: {0}")]
    StepNotFound(String),

    /// Follow-up not found under the addressed step
    #[error("Follow-up not found: {0}")]
    FollowUpNotFound(String),

    /// The last remaining step of a flow cannot be removed
    #[error("Cannot delete the only step")]
    CannotDeleteOnlyStep,

    /// serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Storage layer error
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl CoreError {
    /// Shorthand for building a validation failure.
    #[must_use]
    pub fn validation(code: ValidationCode, message: impl Into<String>) -> Self {
        Self::Validation {
            code,
            message: message.into(),
        }
    }

    /// Stable code string used by API responses.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { code, .. } => code.as_str(),
            Self::PopupNotFound(_) | Self::StepNotFound(_) | Self::FollowUpNotFound(_) => {
                "NOT_FOUND"
            }
            Self::CannotDeleteOnlyStep => "CANNOT_DELETE_ONLY_STEP",
            Self::SerializationError(_) => "SERIALIZATION_ERROR",
            Self::StorageError(_) => "STORAGE_ERROR",
        }
    }

    /// Whether it is expected behavior (user input, resource does not exist, etc.) is used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added. **
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Validation { .. }
            | Self::PopupNotFound(_)
            | Self::StepNotFound(_)
            | Self::FollowUpNotFound(_)
            | Self::CannotDeleteOnlyStep => true,
            Self::SerializationError(_) | Self::StorageError(_) => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;

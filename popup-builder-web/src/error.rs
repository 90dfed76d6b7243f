//! HTTP mapping of core errors

use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use popup_builder_core::CoreError;
use popup_builder_core::types::ErrorBody;

/// Error returned from handlers.
///
/// Validation and guard failures are 400 with their code, missing records
/// are 404 `NOT_FOUND`, anything else is a 500 without a code.
#[derive(Debug)]
pub struct ApiError(pub CoreError);

pub type ApiResult<T> = Result<T, ApiError>;

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        if err.is_expected() {
            tracing::warn!(code = err.code(), "{err}");
        } else {
            tracing::error!(code = err.code(), "{err}");
        }
        Self(err)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl ApiError {
    fn body(&self) -> ErrorBody {
        let err = &self.0;
        match err {
            CoreError::Validation { message, .. } => ErrorBody {
                error: message.clone(),
                code: Some(err.code().to_string()),
            },
            CoreError::PopupNotFound(_) => ErrorBody {
                error: "Popup not found".to_string(),
                code: Some(err.code().to_string()),
            },
            CoreError::StepNotFound(_)
            | CoreError::FollowUpNotFound(_)
            | CoreError::CannotDeleteOnlyStep => ErrorBody {
                error: err.to_string(),
                code: Some(err.code().to_string()),
            },
            CoreError::SerializationError(_) | CoreError::StorageError(_) => ErrorBody {
                error: format!("Internal server error: {err}"),
                code: None,
            },
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self.0 {
            CoreError::Validation { .. } | CoreError::CannotDeleteOnlyStep => {
                StatusCode::BAD_REQUEST
            }
            CoreError::PopupNotFound(_)
            | CoreError::StepNotFound(_)
            | CoreError::FollowUpNotFound(_) => StatusCode::NOT_FOUND,
            CoreError::SerializationError(_) | CoreError::StorageError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.body())
    }
}

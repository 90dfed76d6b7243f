//! API response types

use serde::Serialize;

use super::popup::PopupRecord;

/// Body returned after a popup is deleted.
#[derive(Debug, Clone, Serialize)]
pub struct DeletedPopup {
    pub message: String,
    pub popup: PopupRecord,
}

impl DeletedPopup {
    #[must_use]
    pub fn new(popup: PopupRecord) -> Self {
        Self {
            message: "Popup deleted successfully".to_string(),
            popup,
        }
    }
}

/// Error body returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

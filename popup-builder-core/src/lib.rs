//! Popup Builder Core Library
//!
//! The popup flow model and everything that works on it without I/O:
//! - Flow store, undo/redo history and the editor reducer (`editor`)
//! - Follow-up trigger evaluation (`evaluator`)
//! - Popup record validation and flow persistence (`services`)
//!
//! Storage is abstracted behind `PopupRepository`; the SQLite implementation
//! lives in `popup-builder-app`.

pub mod editor;
pub mod error;
pub mod evaluator;
pub mod services;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult, ValidationCode};
pub use services::ServiceContext;
pub use traits::{InMemoryPopupRepository, PopupRepository};

//! Popup flow editor
//!
//! - `store`: pure structural operations on a `PopupFlow`
//! - `history`: linear undo/redo log
//! - `session`: the `Editor` reducer tying actions, history and selection together
//! - `templates` / `merge_tag`: catalogs offered by the builder

mod action;
mod history;
mod ids;
pub mod merge_tag;
mod session;
pub mod store;
mod templates;

pub use action::{DragSource, DropTarget, EditorAction};
pub use history::History;
pub use ids::{IdGenerator, SequentialIds, TimestampIds};
pub use merge_tag::{MergeTag, MERGE_TAGS};
pub use session::{DragState, Editor, Selection};
pub use store::{EditTarget, TextSlot};
pub use templates::{blank_canvas, find_template, StepTemplate, TEMPLATES};

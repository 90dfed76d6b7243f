//! Editor actions
//!
//! Each user intent in the builder is one `EditorAction`. Structural actions
//! map one-to-one onto flow store operations; the rest only move the
//! selection or track a drag gesture.

use super::store::TextSlot;
use crate::types::{FieldPatch, FieldType, StepPatch, TargetType, TriggerType};

/// What is being dragged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragSource {
    /// A new field from the palette
    Palette(FieldType),
    /// An existing field of the active step, by index
    Field(usize),
}

/// Where a drag gesture ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// Anywhere on the canvas; new fields are appended
    Canvas,
    /// Before the field at this index
    Index(usize),
    /// Into a `columns` field
    Column(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditorAction {
    // selection
    SelectStep(String),
    SelectFollowUp {
        step_id: String,
        follow_up_id: String,
    },
    ClearFollowUpSelection,
    StartEditing {
        slot: TextSlot,
        cursor: Option<usize>,
    },
    MoveCursor(Option<usize>),
    StopEditing,

    // flow
    RenameFlow(String),
    AddStep {
        template: String,
    },
    ApplyTemplate {
        step_id: String,
        template: String,
    },
    DuplicateStep(String),
    DeleteStep(String),
    AddFollowUp(String),
    DeleteFollowUp {
        step_id: String,
        follow_up_id: String,
    },
    DuplicateFollowUp {
        step_id: String,
        follow_up_id: String,
    },
    UpdateActive(StepPatch),

    // fields of the active step or follow-up
    AddField(FieldType),
    InsertFieldAt {
        index: usize,
        field_type: FieldType,
    },
    RemoveField(String),
    UpdateField {
        field_id: String,
        patch: FieldPatch,
    },
    ReorderField {
        from: usize,
        to: usize,
    },
    AddFieldToColumn {
        column_field_id: String,
        field_type: FieldType,
    },
    RemoveFieldFromColumn {
        column_field_id: String,
        field_id: String,
    },
    UpdateColumnField {
        column_field_id: String,
        field_id: String,
        patch: FieldPatch,
    },
    AddOption {
        field_id: String,
    },
    RemoveOption {
        field_id: String,
        index: usize,
    },
    UpdateOption {
        field_id: String,
        index: usize,
        value: String,
    },

    // follow-up conditions
    SetTriggerType {
        step_id: String,
        follow_up_id: String,
        trigger_type: TriggerType,
    },
    SetTargetType {
        step_id: String,
        follow_up_id: String,
        target_type: TargetType,
    },
    SetTargetElement {
        step_id: String,
        follow_up_id: String,
        target_element: String,
    },
    ClearCondition {
        step_id: String,
        follow_up_id: String,
    },

    InsertMergeTag(String),

    // drag and drop
    DragStart(DragSource),
    DragOver(Option<usize>),
    Drop(DropTarget),
    DragCancel,

    Undo,
    Redo,
}

impl EditorAction {
    /// Whether applying the action can change the flow.
    #[must_use]
    pub fn is_structural(&self) -> bool {
        !matches!(
            self,
            Self::SelectStep(_)
                | Self::SelectFollowUp { .. }
                | Self::ClearFollowUpSelection
                | Self::StartEditing { .. }
                | Self::MoveCursor(_)
                | Self::StopEditing
                | Self::DragStart(_)
                | Self::DragOver(_)
                | Self::DragCancel
                | Self::Undo
                | Self::Redo
        )
    }
}

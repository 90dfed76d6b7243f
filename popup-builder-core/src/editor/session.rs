//! Editing session: flow, history and selection driven by `EditorAction`s

use super::action::{DragSource, DropTarget, EditorAction};
use super::history::History;
use super::ids::{IdGenerator, TimestampIds};
use super::store::{self, EditTarget, TextSlot};
use super::templates::{blank_canvas, find_template, StepTemplate};
use crate::error::CoreResult;
use crate::types::PopupFlow;

/// What the user is looking at and typing into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub active_step_id: String,
    pub active_follow_up_id: Option<String>,
    pub editing: Option<TextSlot>,
    /// Character offset inside the text being edited
    pub cursor: Option<usize>,
}

impl Selection {
    fn first_step_of(flow: &PopupFlow) -> Self {
        Self {
            active_step_id: flow.steps.first().map(|s| s.id.clone()).unwrap_or_default(),
            active_follow_up_id: None,
            editing: None,
            cursor: None,
        }
    }

    /// The step or follow-up edits apply to.
    #[must_use]
    pub fn target(&self) -> EditTarget {
        EditTarget {
            step_id: self.active_step_id.clone(),
            follow_up_id: self.active_follow_up_id.clone(),
        }
    }

    fn activate_step(&mut self, step_id: String) {
        self.active_step_id = step_id;
        self.active_follow_up_id = None;
        self.editing = None;
        self.cursor = None;
    }
}

/// Drag gesture in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragState {
    pub source: DragSource,
    /// Index currently hovered, for the drop indicator
    pub hover: Option<usize>,
}

/// A single-owner editing session over one popup flow.
///
/// The snapshot at the history cursor always equals `flow()`.
#[derive(Debug)]
pub struct Editor<G: IdGenerator = TimestampIds> {
    flow: PopupFlow,
    history: History<PopupFlow>,
    selection: Selection,
    drag: Option<DragState>,
    ids: G,
}

impl Editor<TimestampIds> {
    /// Session over the default flow.
    #[must_use]
    pub fn new() -> Self {
        Self::with_flow(PopupFlow::default(), TimestampIds::default())
    }
}

impl Default for Editor<TimestampIds> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: IdGenerator> Editor<G> {
    /// Session over `flow`; the initial snapshot is recorded here.
    pub fn with_flow(flow: PopupFlow, ids: G) -> Self {
        Self {
            selection: Selection::first_step_of(&flow),
            history: History::with_initial(flow.clone()),
            flow,
            drag: None,
            ids,
        }
    }

    pub fn flow(&self) -> &PopupFlow {
        &self.flow
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn history(&self) -> &History<PopupFlow> {
        &self.history
    }

    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Apply one action.
    ///
    /// Only the delete-step guard fails; the session is unchanged then.
    pub fn dispatch(&mut self, action: EditorAction) -> CoreResult<()> {
        log::debug!("editor action: {action:?}");
        match action {
            EditorAction::SelectStep(step_id) => {
                if self.flow.find_step(&step_id).is_some() {
                    self.selection.activate_step(step_id);
                }
            }
            EditorAction::SelectFollowUp {
                step_id,
                follow_up_id,
            } => {
                let exists = self
                    .flow
                    .find_step(&step_id)
                    .and_then(|s| s.find_follow_up(&follow_up_id))
                    .is_some();
                if exists {
                    self.selection.activate_step(step_id);
                    self.selection.active_follow_up_id = Some(follow_up_id);
                }
            }
            EditorAction::ClearFollowUpSelection => {
                self.selection.active_follow_up_id = None;
                self.selection.editing = None;
            }
            EditorAction::StartEditing { slot, cursor } => {
                self.selection.editing = Some(slot);
                self.selection.cursor = cursor;
            }
            EditorAction::MoveCursor(cursor) => self.selection.cursor = cursor,
            EditorAction::StopEditing => {
                self.selection.editing = None;
                self.selection.cursor = None;
            }

            EditorAction::RenameFlow(name) => {
                let next = store::rename_flow(&self.flow, &name);
                self.commit(next);
            }
            EditorAction::AddStep { template } => {
                let next = store::add_step(&self.flow, resolve_template(&template), &mut self.ids);
                let new_id = next.steps.last().map(|s| s.id.clone());
                self.commit(next);
                if let Some(id) = new_id {
                    self.selection.activate_step(id);
                }
            }
            EditorAction::ApplyTemplate { step_id, template } => {
                let next = store::apply_template(&self.flow, &step_id, resolve_template(&template));
                self.commit(next);
            }
            EditorAction::DuplicateStep(step_id) => {
                let before = self.flow.steps.len();
                let next = store::duplicate_step(&self.flow, &step_id, &mut self.ids);
                let new_id = (next.steps.len() > before)
                    .then(|| next.steps.last().map(|s| s.id.clone()))
                    .flatten();
                self.commit(next);
                if let Some(id) = new_id {
                    self.selection.activate_step(id);
                }
            }
            EditorAction::DeleteStep(step_id) => {
                let next = store::delete_step(&self.flow, &step_id)?;
                self.commit(next);
                if self.selection.active_step_id == step_id {
                    self.selection = Selection::first_step_of(&self.flow);
                }
            }
            EditorAction::AddFollowUp(parent_step_id) => {
                let next = store::add_follow_up(&self.flow, &parent_step_id, &mut self.ids);
                self.commit(next);
            }
            EditorAction::DeleteFollowUp {
                step_id,
                follow_up_id,
            } => {
                let next = store::delete_follow_up(&self.flow, &step_id, &follow_up_id);
                self.commit(next);
                if self.selection.active_follow_up_id.as_deref() == Some(follow_up_id.as_str()) {
                    self.selection.active_follow_up_id = None;
                    self.selection.editing = None;
                }
            }
            EditorAction::DuplicateFollowUp {
                step_id,
                follow_up_id,
            } => {
                let next =
                    store::duplicate_follow_up(&self.flow, &step_id, &follow_up_id, &mut self.ids);
                self.commit(next);
            }
            EditorAction::UpdateActive(patch) => {
                let next =
                    store::update_step_or_follow_up(&self.flow, &self.selection.target(), &patch);
                self.commit(next);
            }

            EditorAction::AddField(field_type) => {
                let next =
                    store::add_field(&self.flow, &self.selection.target(), field_type, &mut self.ids);
                self.commit(next);
            }
            EditorAction::InsertFieldAt { index, field_type } => {
                let next = store::insert_field_at(
                    &self.flow,
                    &self.selection.target(),
                    index,
                    field_type,
                    &mut self.ids,
                );
                self.commit(next);
            }
            EditorAction::RemoveField(field_id) => {
                let next = store::remove_field(&self.flow, &self.selection.target(), &field_id);
                self.commit(next);
                if self.selection.editing == Some(TextSlot::Field(field_id)) {
                    self.selection.editing = None;
                }
            }
            EditorAction::UpdateField { field_id, patch } => {
                let next =
                    store::update_field(&self.flow, &self.selection.target(), &field_id, &patch);
                self.commit(next);
            }
            EditorAction::ReorderField { from, to } => {
                let next = store::reorder_field(&self.flow, &self.selection.target(), from, to);
                self.commit(next);
            }
            EditorAction::AddFieldToColumn {
                column_field_id,
                field_type,
            } => {
                let next = store::add_field_to_column(
                    &self.flow,
                    &self.selection.target(),
                    &column_field_id,
                    field_type,
                    &mut self.ids,
                );
                self.commit(next);
            }
            EditorAction::RemoveFieldFromColumn {
                column_field_id,
                field_id,
            } => {
                let next = store::remove_field_from_column(
                    &self.flow,
                    &self.selection.target(),
                    &column_field_id,
                    &field_id,
                );
                self.commit(next);
            }
            EditorAction::UpdateColumnField {
                column_field_id,
                field_id,
                patch,
            } => {
                let next = store::update_column_field(
                    &self.flow,
                    &self.selection.target(),
                    &column_field_id,
                    &field_id,
                    &patch,
                );
                self.commit(next);
            }
            EditorAction::AddOption { field_id } => {
                let next = store::add_option(&self.flow, &self.selection.target(), &field_id);
                self.commit(next);
            }
            EditorAction::RemoveOption { field_id, index } => {
                let next =
                    store::remove_option(&self.flow, &self.selection.target(), &field_id, index);
                self.commit(next);
            }
            EditorAction::UpdateOption {
                field_id,
                index,
                value,
            } => {
                let next = store::update_option(
                    &self.flow,
                    &self.selection.target(),
                    &field_id,
                    index,
                    &value,
                );
                self.commit(next);
            }

            EditorAction::SetTriggerType {
                step_id,
                follow_up_id,
                trigger_type,
            } => {
                let next =
                    store::set_trigger_type(&self.flow, &step_id, &follow_up_id, trigger_type);
                self.commit(next);
            }
            EditorAction::SetTargetType {
                step_id,
                follow_up_id,
                target_type,
            } => {
                let next = store::set_target_type(&self.flow, &step_id, &follow_up_id, target_type);
                self.commit(next);
            }
            EditorAction::SetTargetElement {
                step_id,
                follow_up_id,
                target_element,
            } => {
                let next = store::set_target_element(
                    &self.flow,
                    &step_id,
                    &follow_up_id,
                    &target_element,
                );
                self.commit(next);
            }
            EditorAction::ClearCondition {
                step_id,
                follow_up_id,
            } => {
                let next = store::clear_condition(&self.flow, &step_id, &follow_up_id);
                self.commit(next);
            }

            EditorAction::InsertMergeTag(tag) => {
                let next = store::insert_merge_tag(
                    &self.flow,
                    &self.selection.target(),
                    self.selection.editing.as_ref(),
                    &tag,
                    self.selection.cursor,
                );
                self.commit(next);
            }

            EditorAction::DragStart(source) => {
                self.drag = Some(DragState {
                    source,
                    hover: None,
                });
            }
            EditorAction::DragOver(hover) => {
                if let Some(drag) = self.drag.as_mut() {
                    drag.hover = hover;
                }
            }
            EditorAction::Drop(target) => {
                if let Some(drag) = self.drag.take() {
                    self.finish_drag(drag.source, target);
                }
            }
            EditorAction::DragCancel => self.drag = None,

            EditorAction::Undo => {
                if let Some(snapshot) = self.history.undo() {
                    self.flow = snapshot.clone();
                    self.repair_selection();
                }
            }
            EditorAction::Redo => {
                if let Some(snapshot) = self.history.redo() {
                    self.flow = snapshot.clone();
                    self.repair_selection();
                }
            }
        }
        Ok(())
    }

    /// Apply a completed drag gesture as a single structural change.
    fn finish_drag(&mut self, source: DragSource, target: DropTarget) {
        let edit_target = self.selection.target();
        let next = match (source, target) {
            (DragSource::Palette(field_type), DropTarget::Canvas) => {
                store::add_field(&self.flow, &edit_target, field_type, &mut self.ids)
            }
            (DragSource::Palette(field_type), DropTarget::Index(index)) => {
                store::insert_field_at(&self.flow, &edit_target, index, field_type, &mut self.ids)
            }
            (DragSource::Palette(field_type), DropTarget::Column(column_id)) => {
                store::add_field_to_column(
                    &self.flow,
                    &edit_target,
                    &column_id,
                    field_type,
                    &mut self.ids,
                )
            }
            (DragSource::Field(from), DropTarget::Index(to)) if from != to => {
                store::reorder_field(&self.flow, &edit_target, from, to)
            }
            (DragSource::Field(_), _) => return,
        };
        self.commit(next);
    }

    /// Adopt `next` and record it, unless nothing changed.
    fn commit(&mut self, next: PopupFlow) {
        if next != self.flow {
            self.history.record(next.clone());
            self.flow = next;
        }
    }

    /// Keep the selection pointing at something that exists after undo/redo.
    fn repair_selection(&mut self) {
        let Some(step) = self.flow.find_step(&self.selection.active_step_id) else {
            self.selection = Selection::first_step_of(&self.flow);
            return;
        };
        let follow_up_gone = self
            .selection
            .active_follow_up_id
            .as_deref()
            .is_some_and(|id| step.find_follow_up(id).is_none());
        if follow_up_gone {
            self.selection.active_follow_up_id = None;
            self.selection.editing = None;
        }
    }
}

fn resolve_template(key: &str) -> &'static StepTemplate {
    find_template(key).unwrap_or_else(|| {
        log::warn!("unknown step template {key:?}, using blank canvas");
        blank_canvas()
    })
}

//! Flow store: structural mutations of a `PopupFlow`.
//!
//! Every operation takes the current flow by reference and returns the next
//! one. Addressing an unknown step, follow-up or field returns an unchanged
//! copy. Fresh ids come from the `IdGenerator` argument.

use serde::{Deserialize, Serialize};

use super::ids::IdGenerator;
use super::merge_tag;
use super::templates::StepTemplate;
use crate::error::{CoreError, CoreResult};
use crate::types::{
    ColumnChildField, FieldPatch, FieldType, FollowUp, PopupFlow, Step, StepBody, StepPatch,
    TargetType, TopLevelField, TriggerCondition, TriggerType,
};

/// The step, or one of its follow-ups, an operation applies to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditTarget {
    pub step_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up_id: Option<String>,
}

impl EditTarget {
    pub fn step(step_id: impl Into<String>) -> Self {
        Self {
            step_id: step_id.into(),
            follow_up_id: None,
        }
    }

    pub fn follow_up(step_id: impl Into<String>, follow_up_id: impl Into<String>) -> Self {
        Self {
            step_id: step_id.into(),
            follow_up_id: Some(follow_up_id.into()),
        }
    }
}

/// Text property a merge tag can be inserted into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "element", content = "fieldId")]
pub enum TextSlot {
    Headline,
    Subheadline,
    ButtonText,
    /// Placeholder of a text-like field
    Field(String),
}

fn body_mut<'a>(flow: &'a mut PopupFlow, target: &EditTarget) -> Option<&'a mut StepBody> {
    let step = flow.find_step_mut(&target.step_id)?;
    match target.follow_up_id {
        Some(ref fu_id) => step.find_follow_up_mut(fu_id).map(|fu| &mut fu.body),
        None => Some(&mut step.body),
    }
}

fn field_mut<'a>(
    flow: &'a mut PopupFlow,
    target: &EditTarget,
    field_id: &str,
) -> Option<&'a mut TopLevelField> {
    body_mut(flow, target)?
        .form_fields
        .iter_mut()
        .find(|f| f.id == field_id)
}

fn column_fields_mut<'a>(
    flow: &'a mut PopupFlow,
    target: &EditTarget,
    column_field_id: &str,
) -> Option<&'a mut Vec<ColumnChildField>> {
    field_mut(flow, target, column_field_id)?
        .columns_mut()
        .map(|block| &mut block.fields)
}

fn follow_up_mut<'a>(
    flow: &'a mut PopupFlow,
    step_id: &str,
    follow_up_id: &str,
) -> Option<&'a mut FollowUp> {
    flow.find_step_mut(step_id)?.find_follow_up_mut(follow_up_id)
}

/// Clone `flow`, run `edit` on the clone, return it.
fn edited(flow: &PopupFlow, edit: impl FnOnce(&mut PopupFlow)) -> PopupFlow {
    let mut next = flow.clone();
    edit(&mut next);
    next
}

// ─── Steps ───────────────────────────────────────────────

/// Append a step built from `template`.
pub fn add_step(flow: &PopupFlow, template: &StepTemplate, ids: &mut dyn IdGenerator) -> PopupFlow {
    let step = template.to_step(ids.step_id());
    edited(flow, |next| next.steps.push(step))
}

/// Append a deep copy of a step with fresh ids for it and its follow-ups.
pub fn duplicate_step(flow: &PopupFlow, step_id: &str, ids: &mut dyn IdGenerator) -> PopupFlow {
    let Some(original) = flow.find_step(step_id) else {
        return flow.clone();
    };
    let mut copy = original.clone();
    copy.id = ids.step_id();
    copy.name = format!("{} (Copy)", original.name);
    for follow_up in &mut copy.follow_ups {
        follow_up.id = ids.follow_up_id(&copy.id);
    }
    edited(flow, |next| next.steps.push(copy))
}

/// Remove a step. A flow's only step cannot be removed.
pub fn delete_step(flow: &PopupFlow, step_id: &str) -> CoreResult<PopupFlow> {
    if flow.steps.len() <= 1 {
        return Err(CoreError::CannotDeleteOnlyStep);
    }
    Ok(edited(flow, |next| next.steps.retain(|s| s.id != step_id)))
}

/// Replace a step's content with a template, keeping its id and follow-ups.
pub fn apply_template(flow: &PopupFlow, step_id: &str, template: &StepTemplate) -> PopupFlow {
    edited(flow, |next| {
        if let Some(step) = next.find_step_mut(step_id) {
            let fresh = template.to_step(step.id.clone());
            *step = Step {
                follow_ups: std::mem::take(&mut step.follow_ups),
                ..fresh
            };
        }
    })
}

/// Rename the flow.
pub fn rename_flow(flow: &PopupFlow, name: &str) -> PopupFlow {
    edited(flow, |next| name.clone_into(&mut next.name))
}

// ─── Follow-ups ──────────────────────────────────────────

/// Add a follow-up cloned from the parent's content, style and fields.
pub fn add_follow_up(
    flow: &PopupFlow,
    parent_step_id: &str,
    ids: &mut dyn IdGenerator,
) -> PopupFlow {
    let Some(parent) = flow.find_step(parent_step_id) else {
        return flow.clone();
    };
    let follow_up = FollowUp {
        id: ids.follow_up_id(parent_step_id),
        name: "Follow-up".to_string(),
        body: parent.body.clone(),
        condition: None,
    };
    edited(flow, |next| {
        if let Some(step) = next.find_step_mut(parent_step_id) {
            step.follow_ups.push(follow_up);
        }
    })
}

pub fn delete_follow_up(flow: &PopupFlow, step_id: &str, follow_up_id: &str) -> PopupFlow {
    edited(flow, |next| {
        if let Some(step) = next.find_step_mut(step_id) {
            step.follow_ups.retain(|f| f.id != follow_up_id);
        }
    })
}

pub fn duplicate_follow_up(
    flow: &PopupFlow,
    step_id: &str,
    follow_up_id: &str,
    ids: &mut dyn IdGenerator,
) -> PopupFlow {
    let Some(original) = flow
        .find_step(step_id)
        .and_then(|s| s.find_follow_up(follow_up_id))
    else {
        return flow.clone();
    };
    let copy = FollowUp {
        id: ids.follow_up_id(step_id),
        name: format!("{} (Copy)", original.name),
        ..original.clone()
    };
    edited(flow, |next| {
        if let Some(step) = next.find_step_mut(step_id) {
            step.follow_ups.push(copy);
        }
    })
}

/// Merge a patch into the follow-up named by `target`, else into the step.
pub fn update_step_or_follow_up(flow: &PopupFlow, target: &EditTarget, patch: &StepPatch) -> PopupFlow {
    edited(flow, |next| {
        let Some(step) = next.find_step_mut(&target.step_id) else {
            return;
        };
        match target.follow_up_id {
            Some(ref fu_id) => {
                if let Some(follow_up) = step.find_follow_up_mut(fu_id) {
                    patch.apply_to_follow_up(follow_up);
                }
            }
            None => patch.apply_to_step(step),
        }
    })
}

// ─── Form fields ─────────────────────────────────────────

pub fn add_field(
    flow: &PopupFlow,
    target: &EditTarget,
    field_type: FieldType,
    ids: &mut dyn IdGenerator,
) -> PopupFlow {
    let field = TopLevelField::with_type(ids.field_id(), field_type);
    edited(flow, |next| {
        if let Some(body) = body_mut(next, target) {
            body.form_fields.push(field);
        }
    })
}

/// Insert a new field before `index` (clamped to the end).
pub fn insert_field_at(
    flow: &PopupFlow,
    target: &EditTarget,
    index: usize,
    field_type: FieldType,
    ids: &mut dyn IdGenerator,
) -> PopupFlow {
    let field = TopLevelField::with_type(ids.field_id(), field_type);
    edited(flow, |next| {
        if let Some(body) = body_mut(next, target) {
            let at = index.min(body.form_fields.len());
            body.form_fields.insert(at, field);
        }
    })
}

pub fn remove_field(flow: &PopupFlow, target: &EditTarget, field_id: &str) -> PopupFlow {
    edited(flow, |next| {
        if let Some(body) = body_mut(next, target) {
            body.form_fields.retain(|f| f.id != field_id);
        }
    })
}

pub fn update_field(
    flow: &PopupFlow,
    target: &EditTarget,
    field_id: &str,
    patch: &FieldPatch,
) -> PopupFlow {
    edited(flow, |next| {
        if let Some(field) = field_mut(next, target, field_id) {
            field.apply_patch(patch);
        }
    })
}

/// Move the field at `from` so that it ends up at `to`.
pub fn reorder_field(flow: &PopupFlow, target: &EditTarget, from: usize, to: usize) -> PopupFlow {
    edited(flow, |next| {
        let Some(body) = body_mut(next, target) else {
            return;
        };
        if from >= body.form_fields.len() {
            return;
        }
        let field = body.form_fields.remove(from);
        let at = to.min(body.form_fields.len());
        body.form_fields.insert(at, field);
    })
}

/// Add a child field to a `columns` field. `columns` itself cannot be nested.
pub fn add_field_to_column(
    flow: &PopupFlow,
    target: &EditTarget,
    column_field_id: &str,
    field_type: FieldType,
    ids: &mut dyn IdGenerator,
) -> PopupFlow {
    let Some(child) = ColumnChildField::with_type(ids.field_id(), field_type) else {
        return flow.clone();
    };
    edited(flow, |next| {
        if let Some(fields) = column_fields_mut(next, target, column_field_id) {
            fields.push(child);
        }
    })
}

pub fn remove_field_from_column(
    flow: &PopupFlow,
    target: &EditTarget,
    column_field_id: &str,
    field_id: &str,
) -> PopupFlow {
    edited(flow, |next| {
        if let Some(fields) = column_fields_mut(next, target, column_field_id) {
            fields.retain(|f| f.id != field_id);
        }
    })
}

pub fn update_column_field(
    flow: &PopupFlow,
    target: &EditTarget,
    column_field_id: &str,
    field_id: &str,
    patch: &FieldPatch,
) -> PopupFlow {
    edited(flow, |next| {
        if let Some(field) = column_fields_mut(next, target, column_field_id)
            .and_then(|fields| fields.iter_mut().find(|f| f.id == field_id))
        {
            field.apply_patch(patch);
        }
    })
}

// ─── Radio / dropdown options ────────────────────────────

/// Append "Option N+1".
pub fn add_option(flow: &PopupFlow, target: &EditTarget, field_id: &str) -> PopupFlow {
    edited(flow, |next| {
        if let Some(options) = field_mut(next, target, field_id).and_then(|f| f.kind.options_mut()) {
            options.push(format!("Option {}", options.len() + 1));
        }
    })
}

pub fn remove_option(flow: &PopupFlow, target: &EditTarget, field_id: &str, index: usize) -> PopupFlow {
    edited(flow, |next| {
        if let Some(options) = field_mut(next, target, field_id).and_then(|f| f.kind.options_mut()) {
            if index < options.len() {
                options.remove(index);
            }
        }
    })
}

pub fn update_option(
    flow: &PopupFlow,
    target: &EditTarget,
    field_id: &str,
    index: usize,
    value: &str,
) -> PopupFlow {
    edited(flow, |next| {
        if let Some(slot) = field_mut(next, target, field_id)
            .and_then(|f| f.kind.options_mut())
            .and_then(|options| options.get_mut(index))
        {
            value.clone_into(slot);
        }
    })
}

// ─── Trigger conditions ──────────────────────────────────

/// Set the trigger type, creating the condition if the follow-up has none.
pub fn set_trigger_type(
    flow: &PopupFlow,
    step_id: &str,
    follow_up_id: &str,
    trigger_type: TriggerType,
) -> PopupFlow {
    edited(flow, |next| {
        if let Some(follow_up) = follow_up_mut(next, step_id, follow_up_id) {
            match follow_up.condition {
                Some(ref mut condition) => condition.set_trigger_type(trigger_type),
                None => follow_up.condition = Some(TriggerCondition::new(trigger_type)),
            }
        }
    })
}

/// Change the target type of an existing condition.
pub fn set_target_type(
    flow: &PopupFlow,
    step_id: &str,
    follow_up_id: &str,
    target_type: TargetType,
) -> PopupFlow {
    edited(flow, |next| {
        if let Some(condition) =
            follow_up_mut(next, step_id, follow_up_id).and_then(|f| f.condition.as_mut())
        {
            condition.set_target_type(target_type);
        }
    })
}

/// Change the target element of an existing condition.
pub fn set_target_element(
    flow: &PopupFlow,
    step_id: &str,
    follow_up_id: &str,
    target_element: &str,
) -> PopupFlow {
    edited(flow, |next| {
        if let Some(condition) =
            follow_up_mut(next, step_id, follow_up_id).and_then(|f| f.condition.as_mut())
        {
            target_element.clone_into(&mut condition.target_element);
        }
    })
}

pub fn clear_condition(flow: &PopupFlow, step_id: &str, follow_up_id: &str) -> PopupFlow {
    edited(flow, |next| {
        if let Some(follow_up) = follow_up_mut(next, step_id, follow_up_id) {
            follow_up.condition = None;
        }
    })
}

// ─── Merge tags ──────────────────────────────────────────

/// Insert a merge tag into the text being edited.
///
/// With nothing being edited the tag is appended to the headline. Fields
/// that are not text-like are left alone.
pub fn insert_merge_tag(
    flow: &PopupFlow,
    target: &EditTarget,
    editing: Option<&TextSlot>,
    tag: &str,
    cursor: Option<usize>,
) -> PopupFlow {
    edited(flow, |next| {
        let Some(body) = body_mut(next, target) else {
            return;
        };
        let content = &mut body.content;
        match editing {
            Some(TextSlot::Headline) => {
                content.headline = merge_tag::insert_at(&content.headline, tag, cursor);
            }
            Some(TextSlot::Subheadline) => {
                content.subheadline = merge_tag::insert_at(&content.subheadline, tag, cursor);
            }
            Some(TextSlot::ButtonText) => {
                content.button_text = merge_tag::insert_at(&content.button_text, tag, cursor);
            }
            Some(TextSlot::Field(field_id)) => {
                if let Some(placeholder) = body
                    .form_fields
                    .iter_mut()
                    .find(|f| &f.id == field_id)
                    .and_then(|f| f.kind.placeholder_mut())
                {
                    *placeholder = merge_tag::insert_at(placeholder, tag, cursor);
                }
            }
            None => content.headline = merge_tag::append(&content.headline, tag),
        }
    })
}

//! Type definitions

mod condition;
mod field;
mod flow;
mod popup;
mod response;
mod step;

pub use condition::{default_target_type_for, TargetType, TriggerCondition, TriggerType};
pub use field::{
    ColumnChildField, ColumnSlot, ColumnVariant, ColumnsBlock, FieldKind, FieldPatch, FieldType,
    FormField, NoColumns, TopLevelField,
};
pub use flow::{initial_step, FontSpec, PaletteColor, PopupFlow, Typography, DEFAULT_FLOW_NAME};
pub use popup::{
    NewPopup, PopupChanges, PopupListQuery, PopupPayload, PopupRecord, DEFAULT_ANIMATION_STYLE,
    DEFAULT_BACKGROUND_COLOR, DEFAULT_BORDER_RADIUS, DEFAULT_BUTTON_COLOR, DEFAULT_TEXT_COLOR,
};
pub use response::{DeletedPopup, ErrorBody};
pub use step::{FollowUp, Step, StepBody, StepContent, StepKind, StepPatch, StepStyle};

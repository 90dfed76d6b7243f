//! Follow-up condition evaluation
//!
//! A step visit starts `Idle`. Each interaction event is checked against the
//! step's follow-ups in order; the first follow-up whose condition matches is
//! revealed and the visit stays on it for good. Follow-ups without a
//! condition never match.

mod event;

pub use event::{InteractionEvent, InteractionKind};

use crate::types::{FollowUp, TargetType, TriggerCondition, TriggerType};

/// Whether an interaction of `kind` on an element of `role` is what a
/// trigger type listens for.
///
/// `button_click` only hears clicks on buttons; `element_click` hears
/// clicks on any role.
#[must_use]
pub fn kind_matches(trigger_type: TriggerType, kind: InteractionKind, role: TargetType) -> bool {
    match trigger_type {
        TriggerType::ButtonClick => kind == InteractionKind::Click && role == TargetType::Button,
        TriggerType::ElementClick => kind == InteractionKind::Click,
        TriggerType::FormSubmit => kind == InteractionKind::Submit,
        TriggerType::FieldInteraction => {
            matches!(kind, InteractionKind::Focus | InteractionKind::Change)
        }
        TriggerType::CheckboxCheck => kind == InteractionKind::Check,
    }
}

/// Whether `event` satisfies `condition`.
///
/// Element identifiers compare exactly and case-sensitively; an empty
/// target element accepts any identifier.
#[must_use]
pub fn condition_matches(condition: &TriggerCondition, event: &InteractionEvent) -> bool {
    kind_matches(condition.trigger_type, event.kind, event.role)
        && event.role == condition.target_type
        && (condition.target_element.is_empty() || condition.target_element == event.identifier)
}

/// First follow-up, in order, whose condition matches `event`.
#[must_use]
pub fn first_match<'a>(follow_ups: &'a [FollowUp], event: &InteractionEvent) -> Option<&'a FollowUp> {
    follow_ups.iter().find(|follow_up| {
        follow_up
            .condition
            .as_ref()
            .is_some_and(|condition| condition_matches(condition, event))
    })
}

/// State of one visit to a step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RevealState {
    #[default]
    Idle,
    /// Terminal for the visit
    Revealed(String),
}

/// Tracks which follow-up, if any, a step visit has revealed.
#[derive(Debug, Clone, Default)]
pub struct StepVisit {
    state: RevealState,
}

impl StepVisit {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &RevealState {
        &self.state
    }

    /// Feed one event; returns the revealed follow-up id once there is one.
    pub fn observe(&mut self, follow_ups: &[FollowUp], event: &InteractionEvent) -> Option<&str> {
        if self.state == RevealState::Idle {
            if let Some(follow_up) = first_match(follow_ups, event) {
                log::debug!(
                    "follow-up {} revealed by {:?} on {:?} {:?}",
                    follow_up.id,
                    event.kind,
                    event.role,
                    event.identifier
                );
                self.state = RevealState::Revealed(follow_up.id.clone());
            }
        }
        match self.state {
            RevealState::Revealed(ref id) => Some(id.as_str()),
            RevealState::Idle => None,
        }
    }

    /// Start a new visit.
    pub fn reset(&mut self) {
        self.state = RevealState::Idle;
    }
}

/// Run a whole event sequence through a fresh visit.
#[must_use]
pub fn evaluate(follow_ups: &[FollowUp], events: &[InteractionEvent]) -> RevealState {
    let mut visit = StepVisit::new();
    for event in events {
        if visit.observe(follow_ups, event).is_some() {
            break;
        }
    }
    visit.state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StepBody;

    fn follow_up(id: &str, condition: Option<TriggerCondition>) -> FollowUp {
        FollowUp {
            id: id.to_string(),
            name: "Follow-up".to_string(),
            body: StepBody::default(),
            condition,
        }
    }

    fn claim_offer() -> FollowUp {
        follow_up(
            "fu-1",
            Some(TriggerCondition::targeting(
                TriggerType::ButtonClick,
                TargetType::Button,
                "claim-offer",
            )),
        )
    }

    #[test]
    fn button_click_on_named_button_reveals() {
        let follow_ups = [claim_offer()];
        let event = InteractionEvent::click(TargetType::Button, "claim-offer");
        assert_eq!(
            evaluate(&follow_ups, &[event]),
            RevealState::Revealed("fu-1".to_string())
        );
    }

    #[test]
    fn click_on_other_element_stays_idle() {
        let follow_ups = [claim_offer()];
        let events = [
            InteractionEvent::click(TargetType::Button, "no-thanks"),
            InteractionEvent::click(TargetType::Headline, "claim-offer"),
            InteractionEvent::new(TargetType::Button, "claim-offer", InteractionKind::Focus),
        ];
        assert_eq!(evaluate(&follow_ups, &events), RevealState::Idle);
    }

    #[test]
    fn button_click_ignores_clicks_on_other_roles() {
        // retargeting keeps the trigger type, so the role can disagree with it
        let mut cond = TriggerCondition::new(TriggerType::ButtonClick);
        cond.set_target_type(TargetType::Headline);
        let follow_ups = [follow_up("fu", Some(cond))];
        let event = InteractionEvent::click(TargetType::Headline, "title");
        assert_eq!(evaluate(&follow_ups, &[event]), RevealState::Idle);
        assert!(!kind_matches(
            TriggerType::ButtonClick,
            InteractionKind::Click,
            TargetType::Headline
        ));
    }

    #[test]
    fn element_click_accepts_any_role() {
        let cond = TriggerCondition::targeting(TriggerType::ElementClick, TargetType::Headline, "");
        let event = InteractionEvent::click(TargetType::Headline, "title");
        assert!(condition_matches(&cond, &event));
    }

    #[test]
    fn identifiers_are_case_sensitive() {
        let follow_ups = [claim_offer()];
        let event = InteractionEvent::click(TargetType::Button, "Claim-Offer");
        assert_eq!(evaluate(&follow_ups, &[event]), RevealState::Idle);
    }

    #[test]
    fn empty_target_matches_any_identifier() {
        let follow_ups = [follow_up("fu", Some(TriggerCondition::new(TriggerType::FormSubmit)))];
        let event = InteractionEvent::new(TargetType::FormField, "whatever", InteractionKind::Submit);
        assert!(matches!(evaluate(&follow_ups, &[event]), RevealState::Revealed(_)));
    }

    #[test]
    fn first_matching_follow_up_wins() {
        let follow_ups = [
            follow_up("a", Some(TriggerCondition::new(TriggerType::ElementClick))),
            follow_up("b", Some(TriggerCondition::new(TriggerType::ButtonClick))),
        ];
        let event = InteractionEvent::click(TargetType::Button, "x");
        assert_eq!(
            evaluate(&follow_ups, &[event]),
            RevealState::Revealed("a".to_string())
        );
    }

    #[test]
    fn follow_ups_without_condition_never_reveal() {
        let follow_ups = [follow_up("a", None)];
        let events = [
            InteractionEvent::click(TargetType::Button, "x"),
            InteractionEvent::new(TargetType::FormField, "x", InteractionKind::Submit),
            InteractionEvent::new(TargetType::Checkbox, "x", InteractionKind::Check),
        ];
        assert_eq!(evaluate(&follow_ups, &events), RevealState::Idle);
    }

    #[test]
    fn uncheck_does_not_satisfy_checkbox_check() {
        let cond = TriggerCondition::targeting(TriggerType::CheckboxCheck, TargetType::Checkbox, "terms");
        let uncheck = InteractionEvent::new(TargetType::Checkbox, "terms", InteractionKind::Uncheck);
        let check = InteractionEvent::new(TargetType::Checkbox, "terms", InteractionKind::Check);
        assert!(!condition_matches(&cond, &uncheck));
        assert!(condition_matches(&cond, &check));
    }

    #[test]
    fn field_interaction_accepts_focus_and_change() {
        assert!(kind_matches(TriggerType::FieldInteraction, InteractionKind::Focus, TargetType::FormField));
        assert!(kind_matches(TriggerType::FieldInteraction, InteractionKind::Change, TargetType::FormField));
        assert!(!kind_matches(TriggerType::FieldInteraction, InteractionKind::Click, TargetType::FormField));
    }

    #[test]
    fn revealed_is_terminal_until_reset() {
        let follow_ups = [
            claim_offer(),
            follow_up("fu-2", Some(TriggerCondition::new(TriggerType::FormSubmit))),
        ];
        let mut visit = StepVisit::new();
        let click = InteractionEvent::click(TargetType::Button, "claim-offer");
        let submit = InteractionEvent::new(TargetType::FormField, "", InteractionKind::Submit);

        assert_eq!(visit.observe(&follow_ups, &click), Some("fu-1"));
        assert_eq!(visit.observe(&follow_ups, &submit), Some("fu-1"));

        visit.reset();
        assert_eq!(visit.state(), &RevealState::Idle);
        assert_eq!(visit.observe(&follow_ups, &submit), Some("fu-2"));
    }
}

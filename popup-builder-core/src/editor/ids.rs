//! Identifier generation for steps, follow-ups and fields

use chrono::Utc;

/// Source of fresh identifier tokens.
///
/// Store operations take the generator as an argument, so a generator in a
/// known state always yields the same flow.
pub trait IdGenerator {
    /// A token not returned before by this generator.
    fn next_token(&mut self) -> String;

    fn step_id(&mut self) -> String {
        self.next_token()
    }

    fn follow_up_id(&mut self, parent_step_id: &str) -> String {
        format!("{parent_step_id}-fu-{}", self.next_token())
    }

    fn field_id(&mut self) -> String {
        format!("field-{}", self.next_token())
    }
}

/// Millisecond timestamps, bumped when two calls land in the same millisecond.
#[derive(Debug, Default)]
pub struct TimestampIds {
    last: i64,
}

impl IdGenerator for TimestampIds {
    fn next_token(&mut self) -> String {
        let now = Utc::now().timestamp_millis();
        self.last = if now > self.last { now } else { self.last + 1 };
        self.last.to_string()
    }
}

/// Counter-based ids for deterministic tests and replays.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    #[must_use]
    pub fn starting_at(next: u64) -> Self {
        Self { next }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::starting_at(100)
    }
}

impl IdGenerator for SequentialIds {
    fn next_token(&mut self) -> String {
        let token = self.next;
        self.next += 1;
        token.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_ids_never_repeat() {
        let mut ids = TimestampIds::default();
        let tokens: Vec<_> = (0..50).map(|_| ids.next_token()).collect();
        let mut unique = tokens.clone();
        unique.dedup();
        assert_eq!(unique.len(), tokens.len());
    }

    #[test]
    fn composed_ids_follow_naming() {
        let mut ids = SequentialIds::starting_at(7);
        assert_eq!(ids.step_id(), "7");
        assert_eq!(ids.follow_up_id("7"), "7-fu-8");
        assert_eq!(ids.field_id(), "field-9");
    }
}

//! Linear undo/redo log

/// Snapshots plus a cursor pointing at the current one.
///
/// `cursor` is `None` only while the log is empty. Recording after an undo
/// drops the redo branch.
#[derive(Debug, Clone)]
pub struct History<T> {
    snapshots: Vec<T>,
    cursor: Option<usize>,
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self {
            snapshots: Vec::new(),
            cursor: None,
        }
    }
}

impl<T> History<T> {
    /// Log holding `initial` as its only snapshot.
    #[must_use]
    pub fn with_initial(initial: T) -> Self {
        Self {
            snapshots: vec![initial],
            cursor: Some(0),
        }
    }

    /// Truncate anything after the cursor, append, and advance.
    pub fn record(&mut self, snapshot: T) {
        let keep = self.cursor.map_or(0, |c| c + 1);
        self.snapshots.truncate(keep);
        self.snapshots.push(snapshot);
        self.cursor = Some(self.snapshots.len() - 1);
    }

    /// Step back; `None` (and no change) when already at the oldest snapshot.
    pub fn undo(&mut self) -> Option<&T> {
        match self.cursor {
            Some(c) if c > 0 => {
                self.cursor = Some(c - 1);
                self.snapshots.get(c - 1)
            }
            _ => None,
        }
    }

    /// Step forward; `None` (and no change) when at the newest snapshot.
    pub fn redo(&mut self) -> Option<&T> {
        match self.cursor {
            Some(c) if c + 1 < self.snapshots.len() => {
                self.cursor = Some(c + 1);
                self.snapshots.get(c + 1)
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<&T> {
        self.cursor.and_then(|c| self.snapshots.get(c))
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 < self.snapshots.len())
    }

    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_log_has_nothing_to_undo() {
        let mut history: History<u32> = History::default();
        assert!(history.is_empty());
        assert_eq!(history.cursor(), None);
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
        assert!(history.current().is_none());
    }

    #[test]
    fn undo_at_first_snapshot_is_noop() {
        let mut history = History::with_initial("a");
        assert!(!history.can_undo());
        assert!(history.undo().is_none());
        assert_eq!(history.cursor(), Some(0));
        assert_eq!(history.current(), Some(&"a"));
    }

    #[test]
    fn n_undos_then_n_redos_returns_to_latest() {
        let mut history = History::with_initial(0);
        for n in 1..=5 {
            history.record(n);
        }
        for expected in (0..5).rev() {
            assert_eq!(history.undo(), Some(&expected));
        }
        assert!(!history.can_undo());
        for expected in 1..=5 {
            assert_eq!(history.redo(), Some(&expected));
        }
        assert!(!history.can_redo());
        assert_eq!(history.current(), Some(&5));
    }

    #[test]
    fn record_after_undo_drops_redo_branch() {
        let mut history = History::with_initial('a');
        history.record('b');
        history.record('c');
        history.undo();
        history.undo();
        history.record('x');
        assert_eq!(history.len(), 2);
        assert!(!history.can_redo());
        assert_eq!(history.current(), Some(&'x'));
        assert_eq!(history.undo(), Some(&'a'));
    }
}

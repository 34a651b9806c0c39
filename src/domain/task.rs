//! Task domain model
//!
//! A task is a single line of text with two independent flags: `done` and
//! `archived`. Neither flag blocks changes to the other.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::TaskId;

/// A to-do entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique, immutable identifier
    pub id: TaskId,

    /// Display text (trimmed, never empty)
    pub text: String,

    /// Completion flag
    pub done: bool,

    /// Archive flag
    pub archived: bool,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new, active task. Callers guarantee `text` is already trimmed
    /// and non-empty.
    pub(crate) fn new(id: TaskId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            done: false,
            archived: false,
            created_at: Utc::now(),
        }
    }

    /// Flips the completion flag
    pub(crate) fn toggle_done(&mut self) {
        self.done = !self.done;
    }

    /// Marks the task archived; archiving twice is harmless
    pub(crate) fn archive(&mut self) {
        self.archived = true;
    }

    /// Case-insensitive substring match against the text.
    /// `needle_lower` must already be lowercased.
    pub(crate) fn matches_lowercase(&self, needle_lower: &str) -> bool {
        needle_lower.is_empty() || self.text.to_lowercase().contains(needle_lower)
    }

    /// Badge shown next to the task
    pub fn status_label(&self) -> &'static str {
        if self.done {
            "Done"
        } else {
            "Active"
        }
    }

    /// Caption for the done toggle
    pub fn toggle_label(&self) -> &'static str {
        if self.done {
            "Undo"
        } else {
            "Mark as Done"
        }
    }

    /// Whether the archive action is offered for this task
    pub fn can_archive(&self) -> bool {
        !self.archived
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::id::IdGenerator;

    fn make_task(text: &str) -> Task {
        let mut ids = IdGenerator::new();
        Task::new(ids.next_id(), text)
    }

    #[test]
    fn new_task_is_active() {
        let task = make_task("Buy milk");

        assert!(!task.done);
        assert!(!task.archived);
        assert_eq!(task.status_label(), "Active");
        assert_eq!(task.toggle_label(), "Mark as Done");
        assert!(task.can_archive());
    }

    #[test]
    fn done_and_archived_are_independent() {
        let mut task = make_task("Buy milk");

        task.archive();
        task.toggle_done();
        assert!(task.done);
        assert!(task.archived);

        task.toggle_done();
        assert!(!task.done);
        assert!(task.archived);
    }

    #[test]
    fn labels_follow_done_flag() {
        let mut task = make_task("Buy milk");
        task.toggle_done();

        assert_eq!(task.status_label(), "Done");
        assert_eq!(task.toggle_label(), "Undo");
    }

    #[test]
    fn archived_task_cannot_be_archived_again() {
        let mut task = make_task("Buy milk");
        task.archive();
        assert!(!task.can_archive());
    }

    #[test]
    fn text_match_is_case_insensitive() {
        let task = make_task("Buy Milk");

        assert!(task.matches_lowercase("ilk"));
        assert!(task.matches_lowercase("buy m"));
        assert!(task.matches_lowercase(""));
        assert!(!task.matches_lowercase("bread"));
    }

    #[test]
    fn serde_roundtrip() {
        let mut task = make_task("Write report");
        task.toggle_done();

        let json = serde_json::to_string(&task).unwrap();
        let parsed: Task = serde_json::from_str(&json).unwrap();

        assert_eq!(task, parsed);
    }
}

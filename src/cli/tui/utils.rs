//! Shared utilities for TUI views

use crate::domain::Task;

/// Truncate a string to max_len characters, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncate_at = max_len.saturating_sub(3);
        let truncated: String = s.chars().take(truncate_at).collect();
        format!("{}...", truncated)
    }
}

/// Checkbox shown in front of a row: `[x]` when selected, `[ ]` otherwise.
/// Empty when bulk selection is off.
pub fn select_box(bulk_selection: bool, selected: bool) -> &'static str {
    match (bulk_selection, selected) {
        (false, _) => "",
        (true, true) => "[x] ",
        (true, false) => "[ ] ",
    }
}

/// One-line rendering of a task row without the checkbox
pub fn task_line(task: &Task, max_len: usize) -> String {
    let badge = format!("{:<6}", task.status_label());
    let suffix = if task.archived { " (archived)" } else { "" };
    format!("{} {}{}", badge, truncate_str(&task.text, max_len), suffix)
}

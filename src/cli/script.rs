//! Scripted sessions
//!
//! Reads one intent per line and forwards it to a fresh [`TaskStore`], the
//! same way the interactive UI forwards key presses. Useful for demos,
//! shell pipelines and tests.
//!
//! ```text
//! add Buy milk
//! add Walk dog
//! toggle t-1
//! filter active
//! show
//! ```

use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

use anyhow::{Context, Result};
use thiserror::Error;

use super::output::Output;
use crate::domain::{Filter, IdError, StoreError, TaskId, TaskStore};

#[derive(Debug, Error, PartialEq)]
pub enum IntentError {
    #[error("Unknown command '{0}'")]
    UnknownVerb(String),

    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),

    #[error("'{verb}' takes no argument, got '{arg}'")]
    UnexpectedArgument { verb: &'static str, arg: String },

    #[error(transparent)]
    Id(#[from] IdError),

    #[error(transparent)]
    Filter(#[from] StoreError),
}

/// A single user intent
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Add(String),
    Toggle(TaskId),
    Archive(TaskId),
    Delete(TaskId),
    Confirm,
    Cancel,
    Filter(Filter),
    Search(String),
    Select(TaskId),
    SelectAll,
    ArchiveSelected,
    DeleteSelected,
    Show,
}

impl FromStr for Intent {
    type Err = IntentError;

    /// Parses `verb [argument]`. Everything after the first whitespace
    /// character is the argument, kept verbatim for `add` and `search`.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        let (verb, arg) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest),
            None => (line.trim_end(), ""),
        };

        let id = |name: &'static str| -> Result<TaskId, IntentError> {
            if arg.trim().is_empty() {
                return Err(IntentError::MissingArgument(name));
            }
            Ok(arg.parse()?)
        };
        let bare = |name: &'static str, intent: Intent| -> Result<Intent, IntentError> {
            if arg.trim().is_empty() {
                Ok(intent)
            } else {
                Err(IntentError::UnexpectedArgument {
                    verb: name,
                    arg: arg.trim().to_string(),
                })
            }
        };

        match verb.to_lowercase().as_str() {
            "add" => {
                if arg.trim().is_empty() && !line.contains(char::is_whitespace) {
                    return Err(IntentError::MissingArgument("add"));
                }
                Ok(Intent::Add(arg.to_string()))
            }
            "toggle" | "done" => Ok(Intent::Toggle(id("toggle")?)),
            "archive" => Ok(Intent::Archive(id("archive")?)),
            "delete" => Ok(Intent::Delete(id("delete")?)),
            "select" => Ok(Intent::Select(id("select")?)),
            "filter" => {
                if arg.trim().is_empty() {
                    return Err(IntentError::MissingArgument("filter"));
                }
                Ok(Intent::Filter(arg.parse()?))
            }
            "search" => Ok(Intent::Search(arg.to_string())),
            "confirm" => bare("confirm", Intent::Confirm),
            "cancel" => bare("cancel", Intent::Cancel),
            "select-all" => bare("select-all", Intent::SelectAll),
            "archive-selected" => bare("archive-selected", Intent::ArchiveSelected),
            "delete-selected" => bare("delete-selected", Intent::DeleteSelected),
            "show" => bare("show", Intent::Show),
            _ => Err(IntentError::UnknownVerb(verb.to_string())),
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intent::Add(text) => write!(f, "add {:?}", text),
            Intent::Toggle(id) => write!(f, "toggle {}", id),
            Intent::Archive(id) => write!(f, "archive {}", id),
            Intent::Delete(id) => write!(f, "delete {}", id),
            Intent::Confirm => f.write_str("confirm"),
            Intent::Cancel => f.write_str("cancel"),
            Intent::Filter(filter) => write!(f, "filter {}", filter),
            Intent::Search(query) => write!(f, "search {:?}", query),
            Intent::Select(id) => write!(f, "select {}", id),
            Intent::SelectAll => f.write_str("select-all"),
            Intent::ArchiveSelected => f.write_str("archive-selected"),
            Intent::DeleteSelected => f.write_str("delete-selected"),
            Intent::Show => f.write_str("show"),
        }
    }
}

/// Applies one intent to the store. Returns a short note describing the
/// effect, for verbose output.
pub fn apply(store: &mut TaskStore, intent: Intent) -> String {
    match intent {
        Intent::Add(text) => match store.add_task(&text) {
            Some(id) => format!("added {}", id),
            None => "ignored blank task".to_string(),
        },
        Intent::Toggle(id) => {
            store.toggle_done(id);
            match store.get(id) {
                Some(task) => format!("{} is now {}", id, task.status_label().to_lowercase()),
                None => format!("no task {}", id),
            }
        }
        Intent::Archive(id) => {
            store.archive_task(id);
            format!("archive {}", id)
        }
        Intent::Delete(id) => {
            store.request_deletion(id);
            match store.pending_deletion() {
                Some(task) if task.id == id => format!("awaiting confirmation for {}", id),
                _ => format!("no task {}", id),
            }
        }
        Intent::Confirm => match store.confirm_deletion() {
            Some(task) => format!("deleted {}", task.id),
            None => "nothing to confirm".to_string(),
        },
        Intent::Cancel => {
            store.cancel_deletion();
            "deletion cancelled".to_string()
        }
        Intent::Filter(filter) => {
            store.set_filter(filter);
            format!("filter set to {}", filter)
        }
        Intent::Search(query) => {
            store.set_search_query(query);
            format!("{} task(s) match", store.visible_tasks().len())
        }
        Intent::Select(id) => {
            store.toggle_select(id);
            format!("{} task(s) selected", store.selected().len())
        }
        Intent::SelectAll => {
            store.toggle_select_all_visible();
            format!("{} task(s) selected", store.selected().len())
        }
        Intent::ArchiveSelected => format!("archived {} task(s)", store.archive_selected()),
        Intent::DeleteSelected => format!("deleted {} task(s)", store.delete_selected()),
        Intent::Show => "show".to_string(),
    }
}

/// Runs every intent from `source` against `store`, printing the view on
/// `show` and once more at the end
pub fn run<R: BufRead>(output: &Output, store: &mut TaskStore, source: R) -> Result<()> {
    for (index, line) in source.lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("Failed to read line {}", line_no))?;

        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }

        let intent: Intent = line
            .parse()
            .with_context(|| format!("line {}: {}", line_no, line.trim()))?;

        if intent == Intent::Show {
            print_view(output, store);
            continue;
        }

        let label = intent.to_string();
        let note = apply(store, intent);
        output.verbose_ctx("script", &format!("line {}: {} -> {}", line_no, label, note));
    }

    print_view(output, store);
    Ok(())
}

/// Prints the store's current view
pub fn print_view(output: &Output, store: &TaskStore) {
    if output.is_json() {
        output.data(&store.snapshot());
        return;
    }

    let visible = store.visible_tasks();
    let bulk = store.capabilities().bulk_selection;

    if visible.is_empty() {
        println!("No tasks");
    } else {
        println!("{:<2}{:<8} {:<8} TEXT", "", "ID", "STATUS");
        println!("{}", "-".repeat(50));

        for task in &visible {
            let marker = if bulk && store.is_selected(task.id) { "*" } else { "" };
            let suffix = if task.archived { " (archived)" } else { "" };
            println!(
                "{:<2}{:<8} {:<8} {}{}",
                marker,
                task.id.to_string(),
                task.status_label(),
                task.text,
                suffix
            );
        }
    }

    let mut summary = format!(
        "{} of {} task(s) shown [filter: {}",
        visible.len(),
        store.tasks().len(),
        store.filter()
    );
    if !store.search_query().is_empty() {
        summary.push_str(&format!(", search: {:?}", store.search_query()));
    }
    summary.push(']');
    if bulk && !store.selected().is_empty() {
        summary.push_str(&format!(", {} selected", store.selected().len()));
    }
    println!("{}", summary);

    if let Some(task) = store.pending_deletion() {
        println!(
            "Are you sure you want to delete the task \"{}\"? (confirm/cancel)",
            task.text
        );
    }
}

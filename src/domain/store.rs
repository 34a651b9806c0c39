//! In-memory task store
//!
//! [`TaskStore`] owns the task list together with the transient list state
//! (filter, search query, bulk selection, pending deletion). Presentation
//! layers call its commands and re-read its queries after every change; they
//! hold no task logic of their own.
//!
//! Commands never fail. Text that trims to nothing and IDs that no longer
//! exist are ignored.

use std::collections::BTreeSet;

use serde::Serialize;

use super::filter::Filter;
use super::id::{IdGenerator, TaskId};
use super::task::Task;

/// Optional feature set of a store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Enables selection and the bulk archive/delete commands
    pub bulk_selection: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            bulk_selection: true,
        }
    }
}

/// How the current selection relates to the visible tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectionSummary {
    pub selected: usize,
    pub visible: usize,
    pub all_visible_selected: bool,
}

/// Number of tasks each filter tab would show, ignoring the search query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FilterCounts {
    pub all: usize,
    pub active: usize,
    pub done: usize,
    pub archived: usize,
}

impl FilterCounts {
    pub fn get(&self, filter: Filter) -> usize {
        match filter {
            Filter::All => self.all,
            Filter::Active => self.active,
            Filter::Done => self.done,
            Filter::Archived => self.archived,
        }
    }
}

/// Serializable picture of what a presentation layer should render
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreSnapshot {
    pub filter: Filter,
    pub search: String,
    pub total: usize,
    pub tasks: Vec<Task>,
    pub selected: Vec<TaskId>,
    pub pending_deletion: Option<Task>,
}

/// Authoritative task list plus list state for one session
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    ids: IdGenerator,
    filter: Filter,
    search_query: String,
    selected: BTreeSet<TaskId>,
    pending_deletion: Option<TaskId>,
    capabilities: Capabilities,
}

impl TaskStore {
    /// Creates an empty store with every capability enabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store with the given capabilities
    pub fn with_capabilities(capabilities: Capabilities) -> Self {
        Self {
            capabilities,
            ..Self::default()
        }
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Appends a task with the trimmed text. Returns `None` (and changes
    /// nothing) when the text trims to empty.
    pub fn add_task(&mut self, raw: &str) -> Option<TaskId> {
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }

        let id = self.ids.next_id();
        self.tasks.push(Task::new(id, text));
        Some(id)
    }

    pub fn toggle_done(&mut self, id: TaskId) {
        if let Some(task) = self.get_mut(id) {
            task.toggle_done();
        }
    }

    pub fn archive_task(&mut self, id: TaskId) {
        if let Some(task) = self.get_mut(id) {
            task.archive();
        }
    }

    /// Opens the deletion gate for `id`. Replaces any earlier request.
    pub fn request_deletion(&mut self, id: TaskId) {
        if self.get(id).is_some() {
            self.pending_deletion = Some(id);
        }
    }

    /// Removes the task waiting behind the deletion gate and closes the gate
    pub fn confirm_deletion(&mut self) -> Option<Task> {
        let id = self.pending_deletion.take()?;
        let index = self.tasks.iter().position(|t| t.id == id)?;
        let removed = self.tasks.remove(index);
        self.selected.remove(&id);
        Some(removed)
    }

    pub fn cancel_deletion(&mut self) {
        self.pending_deletion = None;
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// Replaces the search query verbatim
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn toggle_select(&mut self, id: TaskId) {
        if !self.capabilities.bulk_selection {
            return;
        }
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    /// Clears the selection if it is exactly the visible set, otherwise
    /// selects exactly the visible set
    pub fn toggle_select_all_visible(&mut self) {
        if !self.capabilities.bulk_selection {
            return;
        }

        let visible: BTreeSet<TaskId> = self.visible_tasks().iter().map(|t| t.id).collect();
        if self.selected == visible {
            self.selected.clear();
        } else {
            self.selected = visible;
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Archives every selected task and clears the selection.
    /// Returns how many tasks were found.
    pub fn archive_selected(&mut self) -> usize {
        if !self.capabilities.bulk_selection {
            return 0;
        }

        let selected = std::mem::take(&mut self.selected);
        let mut archived = 0;
        for task in self.tasks.iter_mut().filter(|t| selected.contains(&t.id)) {
            task.archive();
            archived += 1;
        }
        archived
    }

    /// Removes every selected task and clears the selection.
    /// Returns how many tasks were removed.
    pub fn delete_selected(&mut self) -> usize {
        if !self.capabilities.bulk_selection {
            return 0;
        }

        let selected = std::mem::take(&mut self.selected);
        let before = self.tasks.len();
        self.tasks.retain(|t| !selected.contains(&t.id));

        if self
            .pending_deletion
            .is_some_and(|id| selected.contains(&id))
        {
            self.pending_deletion = None;
        }

        before - self.tasks.len()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Tasks passing the filter and the search query, in insertion order
    pub fn visible_tasks(&self) -> Vec<&Task> {
        let needle = self.search_query.to_lowercase();
        self.tasks
            .iter()
            .filter(|t| self.filter.matches(t))
            .filter(|t| t.matches_lowercase(&needle))
            .collect()
    }

    /// Tasks matching the search query under any filter
    pub fn search_results(&self) -> Vec<&Task> {
        let needle = self.search_query.to_lowercase();
        self.tasks
            .iter()
            .filter(|t| t.matches_lowercase(&needle))
            .collect()
    }

    /// All tasks in insertion order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn selected(&self) -> &BTreeSet<TaskId> {
        &self.selected
    }

    pub fn is_selected(&self, id: TaskId) -> bool {
        self.selected.contains(&id)
    }

    /// The task waiting for deletion confirmation, if it still exists
    pub fn pending_deletion(&self) -> Option<&Task> {
        self.pending_deletion.and_then(|id| self.get(id))
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn selection_summary(&self) -> SelectionSummary {
        let visible: BTreeSet<TaskId> = self.visible_tasks().iter().map(|t| t.id).collect();
        SelectionSummary {
            selected: self.selected.len(),
            visible: visible.len(),
            all_visible_selected: !visible.is_empty() && self.selected == visible,
        }
    }

    pub fn counts(&self) -> FilterCounts {
        let count = |filter: Filter| self.tasks.iter().filter(|t| filter.matches(t)).count();
        FilterCounts {
            all: self.tasks.len(),
            active: count(Filter::Active),
            done: count(Filter::Done),
            archived: count(Filter::Archived),
        }
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            filter: self.filter,
            search: self.search_query.clone(),
            total: self.tasks.len(),
            tasks: self.visible_tasks().into_iter().cloned().collect(),
            selected: self.selected.iter().copied().collect(),
            pending_deletion: self.pending_deletion().cloned(),
        }
    }

    fn get_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(texts: &[&str]) -> (TaskStore, Vec<TaskId>) {
        let mut store = TaskStore::new();
        let ids = texts
            .iter()
            .map(|text| store.add_task(text).unwrap())
            .collect();
        (store, ids)
    }

    fn visible_texts(store: &TaskStore) -> Vec<&str> {
        store.visible_tasks().iter().map(|t| t.text.as_str()).collect()
    }

    // =========================================================================
    // add / toggle / archive
    // =========================================================================

    #[test]
    fn new_store_is_empty() {
        let store = TaskStore::new();

        assert!(store.tasks().is_empty());
        assert_eq!(store.filter(), Filter::All);
        assert_eq!(store.search_query(), "");
        assert!(store.selected().is_empty());
        assert!(store.pending_deletion().is_none());
        assert!(store.capabilities().bulk_selection);
    }

    #[test]
    fn blank_text_is_ignored() {
        let mut store = TaskStore::new();

        assert_eq!(store.add_task("Buy milk").map(|id| id.to_string()), Some("t-1".to_string()));
        assert!(store.add_task("  ").is_none());
        assert!(store.add_task("").is_none());
        assert!(store.add_task("\t\n").is_none());

        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.tasks()[0].text, "Buy milk");
    }

    #[test]
    fn added_text_is_trimmed() {
        let (store, _) = store_with(&["  Call mom  "]);
        assert_eq!(store.tasks()[0].text, "Call mom");
    }

    #[test]
    fn ids_are_never_reused_after_delete() {
        let (mut store, ids) = store_with(&["A", "B"]);

        store.request_deletion(ids[1]);
        store.confirm_deletion();
        let next = store.add_task("C").unwrap();

        assert!(!ids.contains(&next));
        assert_eq!(next.sequence(), 3);
    }

    #[test]
    fn toggle_done_is_its_own_inverse() {
        let (mut store, ids) = store_with(&["A"]);

        store.toggle_done(ids[0]);
        assert!(store.get(ids[0]).unwrap().done);
        store.toggle_done(ids[0]);
        assert!(!store.get(ids[0]).unwrap().done);
    }

    #[test]
    fn toggle_done_leaves_archived_alone() {
        let (mut store, ids) = store_with(&["A"]);

        store.archive_task(ids[0]);
        store.toggle_done(ids[0]);

        let task = store.get(ids[0]).unwrap();
        assert!(task.done);
        assert!(task.archived);
    }

    #[test]
    fn archive_is_idempotent() {
        let (mut store, ids) = store_with(&["A", "B"]);

        store.archive_task(ids[0]);
        let once = store.tasks().to_vec();
        store.archive_task(ids[0]);

        assert_eq!(store.tasks(), once.as_slice());
        assert!(!store.get(ids[1]).unwrap().archived);
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let (mut store, _) = store_with(&["A"]);
        let before = store.tasks().to_vec();
        let ghost: TaskId = "t-99".parse().unwrap();

        store.toggle_done(ghost);
        store.archive_task(ghost);
        store.request_deletion(ghost);

        assert_eq!(store.tasks(), before.as_slice());
        assert!(store.pending_deletion().is_none());
    }

    #[test]
    fn archive_keeps_done_flag() {
        let (mut store, ids) = store_with(&["A", "B"]);

        store.toggle_done(ids[0]);
        store.archive_task(ids[0]);
        store.archive_task(ids[1]);

        let done = store.get(ids[0]).unwrap();
        assert!(done.done && done.archived);
        let active = store.get(ids[1]).unwrap();
        assert!(!active.done && active.archived);
    }

    // =========================================================================
    // Deletion gate
    // =========================================================================

    #[test]
    fn unknown_request_keeps_pending_deletion() {
        let (mut store, ids) = store_with(&["A", "B"]);
        let ghost: TaskId = "t-99".parse().unwrap();

        store.request_deletion(ids[0]);
        store.request_deletion(ghost);

        assert_eq!(store.pending_deletion().map(|t| t.id), Some(ids[0]));
        assert_eq!(store.confirm_deletion().map(|t| t.id), Some(ids[0]));
        assert_eq!(store.tasks().len(), 1);
    }

    #[test]
    fn request_then_confirm_removes_task() {
        let (mut store, ids) = store_with(&["A", "B", "C"]);

        store.request_deletion(ids[1]);
        assert_eq!(store.tasks().len(), 3);
        assert_eq!(store.pending_deletion().map(|t| t.id), Some(ids[1]));

        let removed = store.confirm_deletion().unwrap();
        assert_eq!(removed.text, "B");
        assert!(store.pending_deletion().is_none());
        assert_eq!(visible_texts(&store), vec!["A", "C"]);
    }

    #[test]
    fn request_then_cancel_changes_nothing() {
        let (mut store, ids) = store_with(&["A", "B"]);
        let before = store.tasks().to_vec();

        store.request_deletion(ids[0]);
        store.cancel_deletion();

        assert_eq!(store.tasks(), before.as_slice());
        assert!(store.pending_deletion().is_none());
    }

    #[test]
    fn confirm_without_request_is_noop() {
        let (mut store, _) = store_with(&["A"]);

        assert!(store.confirm_deletion().is_none());
        assert_eq!(store.tasks().len(), 1);
    }

    #[test]
    fn later_request_replaces_earlier_one() {
        let (mut store, ids) = store_with(&["A", "B"]);

        store.request_deletion(ids[0]);
        store.request_deletion(ids[1]);
        store.confirm_deletion();

        assert_eq!(visible_texts(&store), vec!["A"]);
    }

    #[test]
    fn confirm_drops_id_from_selection() {
        let (mut store, ids) = store_with(&["A", "B"]);

        store.toggle_select(ids[0]);
        store.request_deletion(ids[0]);
        store.confirm_deletion();

        assert!(store.selected().is_empty());
    }

    #[test]
    fn bulk_delete_closes_gate_for_removed_task() {
        let (mut store, ids) = store_with(&["A", "B"]);

        store.request_deletion(ids[0]);
        store.toggle_select(ids[0]);
        store.delete_selected();

        assert!(store.pending_deletion().is_none());
        assert!(store.confirm_deletion().is_none());
        assert_eq!(visible_texts(&store), vec!["B"]);
    }

    // =========================================================================
    // Filter and search
    // =========================================================================

    #[test]
    fn archived_and_active_filters() {
        let (mut store, ids) = store_with(&["A", "B", "C"]);

        store.archive_task(ids[1]);

        store.set_filter(Filter::Archived);
        assert_eq!(visible_texts(&store), vec!["B"]);

        store.set_filter(Filter::Active);
        assert_eq!(visible_texts(&store), vec!["A", "C"]);
    }

    #[test]
    fn done_filter_excludes_archived() {
        let (mut store, ids) = store_with(&["A", "B", "C"]);

        store.toggle_done(ids[0]);
        store.toggle_done(ids[1]);
        store.archive_task(ids[1]);
        store.set_filter(Filter::Done);

        assert_eq!(visible_texts(&store), vec!["A"]);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let (mut store, _) = store_with(&["Buy milk", "Walk dog"]);

        store.set_search_query("ILK");
        assert_eq!(visible_texts(&store), vec!["Buy milk"]);

        store.set_search_query("");
        assert_eq!(visible_texts(&store), vec!["Buy milk", "Walk dog"]);
    }

    #[test]
    fn search_query_is_not_trimmed() {
        let (mut store, _) = store_with(&["Buy milk", "Milkshake"]);

        store.set_search_query(" milk");
        assert_eq!(store.search_query(), " milk");
        assert_eq!(visible_texts(&store), vec!["Buy milk"]);
    }

    #[test]
    fn filter_and_search_combine() {
        let (mut store, ids) = store_with(&["Buy milk", "Buy bread", "Sell milk"]);

        store.toggle_done(ids[0]);
        store.set_filter(Filter::Active);
        store.set_search_query("milk");

        assert_eq!(visible_texts(&store), vec!["Sell milk"]);
    }

    #[test]
    fn search_results_ignore_filter() {
        let (mut store, ids) = store_with(&["Buy milk", "Milk the cow", "Walk dog"]);

        store.archive_task(ids[1]);
        store.set_filter(Filter::Active);
        store.set_search_query("milk");

        assert_eq!(visible_texts(&store), vec!["Buy milk"]);
        let results: Vec<&str> = store.search_results().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(results, vec!["Buy milk", "Milk the cow"]);
    }

    #[test]
    fn counts_ignore_search() {
        let (mut store, ids) = store_with(&["A", "B", "C", "D"]);

        store.toggle_done(ids[0]);
        store.archive_task(ids[1]);
        store.toggle_done(ids[2]);
        store.archive_task(ids[2]);
        store.set_search_query("zzz");

        let counts = store.counts();
        assert_eq!(counts.all, 4);
        assert_eq!(counts.active, 1);
        assert_eq!(counts.done, 1);
        assert_eq!(counts.archived, 2);
        assert_eq!(counts.get(Filter::Archived), 2);
    }

    // =========================================================================
    // Selection
    // =========================================================================

    #[test]
    fn toggle_select_adds_and_removes() {
        let (mut store, ids) = store_with(&["A"]);

        store.toggle_select(ids[0]);
        assert!(store.is_selected(ids[0]));
        store.toggle_select(ids[0]);
        assert!(!store.is_selected(ids[0]));
    }

    #[test]
    fn select_all_visible_toggles() {
        let (mut store, ids) = store_with(&["A", "B"]);

        store.toggle_select(ids[0]);
        store.toggle_select(ids[1]);

        store.toggle_select_all_visible();
        assert!(store.selected().is_empty());

        store.toggle_select_all_visible();
        assert_eq!(store.selected().iter().copied().collect::<Vec<_>>(), ids);
    }

    #[test]
    fn select_all_uses_current_visible_set() {
        let (mut store, ids) = store_with(&["Buy milk", "Walk dog", "Buy eggs"]);

        store.toggle_select_all_visible();
        assert_eq!(store.selected().len(), 3);

        // Narrowing the view makes the selection a superset, not equal
        store.set_search_query("buy");
        store.toggle_select_all_visible();
        assert_eq!(
            store.selected().iter().copied().collect::<Vec<_>>(),
            vec![ids[0], ids[2]]
        );

        store.toggle_select_all_visible();
        assert!(store.selected().is_empty());
    }

    #[test]
    fn select_all_with_nothing_visible_clears() {
        let (mut store, ids) = store_with(&["A"]);

        store.toggle_select(ids[0]);
        store.set_filter(Filter::Archived);
        store.toggle_select_all_visible();

        assert!(store.selected().is_empty());
    }

    #[test]
    fn archive_selected_then_clears() {
        let (mut store, ids) = store_with(&["A", "B", "C"]);

        store.toggle_select(ids[0]);
        store.toggle_select(ids[2]);
        assert_eq!(store.archive_selected(), 2);

        assert!(store.selected().is_empty());
        store.set_filter(Filter::Archived);
        assert_eq!(visible_texts(&store), vec!["A", "C"]);
    }

    #[test]
    fn archive_selected_ignores_deleted_ids() {
        let (mut store, ids) = store_with(&["A", "B"]);

        store.toggle_select(ids[0]);
        store.toggle_select("t-42".parse().unwrap());

        assert_eq!(store.archive_selected(), 1);
        assert!(store.get(ids[0]).unwrap().archived);
    }

    #[test]
    fn delete_selected_keeps_survivor_order() {
        let (mut store, ids) = store_with(&["A", "B", "C"]);

        store.toggle_select(ids[0]);
        store.toggle_select(ids[2]);
        assert_eq!(store.delete_selected(), 2);

        assert_eq!(visible_texts(&store), vec!["B"]);
        assert!(store.selected().is_empty());
    }

    #[test]
    fn selection_summary_tracks_visible_set() {
        let (mut store, ids) = store_with(&["A", "B"]);

        let summary = store.selection_summary();
        assert_eq!(summary.selected, 0);
        assert_eq!(summary.visible, 2);
        assert!(!summary.all_visible_selected);

        store.toggle_select(ids[0]);
        store.toggle_select(ids[1]);
        assert!(store.selection_summary().all_visible_selected);

        store.set_search_query("A");
        let summary = store.selection_summary();
        assert_eq!(summary.visible, 1);
        assert!(!summary.all_visible_selected);
    }

    #[test]
    fn disabled_bulk_selection_is_inert() {
        let mut store = TaskStore::with_capabilities(Capabilities {
            bulk_selection: false,
        });
        let a = store.add_task("A").unwrap();

        store.toggle_select(a);
        store.toggle_select_all_visible();
        assert!(store.selected().is_empty());

        assert_eq!(store.archive_selected(), 0);
        assert_eq!(store.delete_selected(), 0);
        assert_eq!(store.tasks().len(), 1);
        assert!(!store.get(a).unwrap().archived);
    }

    // =========================================================================
    // Snapshot
    // =========================================================================

    #[test]
    fn snapshot_reflects_view_state() {
        let (mut store, ids) = store_with(&["Buy milk", "Walk dog"]);

        store.set_search_query("milk");
        store.toggle_select(ids[0]);
        store.request_deletion(ids[1]);

        let snap = store.snapshot();
        assert_eq!(snap.filter, Filter::All);
        assert_eq!(snap.search, "milk");
        assert_eq!(snap.total, 2);
        assert_eq!(snap.tasks.len(), 1);
        assert_eq!(snap.selected, vec![ids[0]]);
        assert_eq!(snap.pending_deletion.map(|t| t.text), Some("Walk dog".to_string()));
    }

    #[test]
    fn snapshot_serializes_ids_as_strings() {
        let (mut store, ids) = store_with(&["A"]);
        store.toggle_select(ids[0]);

        let json = serde_json::to_value(store.snapshot()).unwrap();
        assert_eq!(json["filter"], "all");
        assert_eq!(json["tasks"][0]["id"], "t-1");
        assert_eq!(json["selected"][0], "t-1");
        assert!(json["pending_deletion"].is_null());
    }
}

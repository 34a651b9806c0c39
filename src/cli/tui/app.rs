//! TUI application state and key handling

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;

use anyhow::Result;

use super::event::{Event, EventHandler};
use super::ui::Terminal;
use super::views;
use super::ViewMode;
use crate::domain::{Filter, Task, TaskId, TaskStore};

const HELP: &str =
    "j/k:move n:new d:done a:archive x:delete /:search 1-4/Tab:filter space:select v:all A/X:bulk b:view q:quit";

/// Input mode
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Editing the search query; the store is updated on every key
    Search(String),
    /// Typing the text of a new task
    NewTask(String),
}

/// Application state
pub struct App {
    /// The session's tasks and list state
    store: TaskStore,

    /// Current view mode
    view_mode: ViewMode,

    /// Input mode
    input_mode: InputMode,

    /// Row under the cursor, as an index into the visible tasks
    cursor: usize,

    /// Status message to display
    status_message: Option<String>,

    /// Whether to quit
    should_quit: bool,
}

impl App {
    pub fn new(store: TaskStore, view_mode: ViewMode) -> Self {
        Self {
            store,
            view_mode,
            input_mode: InputMode::Normal,
            cursor: 0,
            status_message: None,
            should_quit: false,
        }
    }

    /// Run the main application loop
    pub fn run(&mut self, terminal: &mut Terminal, events: &EventHandler) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;

            match events.next()? {
                Event::Key(key) => self.handle_key(key),
                Event::Resize | Event::Tick => {}
            }
        }

        Ok(())
    }

    /// Ends the session and returns the store
    pub fn into_store(self) -> TaskStore {
        self.store
    }

    fn draw(&self, frame: &mut Frame) {
        match self.view_mode {
            ViewMode::List => views::list::draw(frame, self),
            ViewMode::Board => views::board::draw(frame, self),
        }
    }

    /// Handle key events
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        // The deletion prompt is modal
        if self.store.pending_deletion().is_some() {
            self.handle_confirm_key(key);
            return;
        }

        match &self.input_mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::Search(_) => self.handle_search_key(key),
            InputMode::NewTask(_) => self.handle_new_task_key(key),
        }
        self.clamp_cursor();
    }

    /// Handle keys in normal mode
    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }

            // Navigation
            KeyCode::Char('j') | KeyCode::Down => self.move_cursor_down(),
            KeyCode::Char('k') | KeyCode::Up => self.move_cursor_up(),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.store.visible_tasks().len().saturating_sub(1),

            // Filters
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                self.set_filter(Filter::ALL[index]);
            }
            KeyCode::Tab => self.set_filter(self.store.filter().next()),
            KeyCode::BackTab => self.set_filter(self.store.filter().prev()),

            // Single-task actions
            KeyCode::Char('n') => {
                self.input_mode = InputMode::NewTask(String::new());
            }
            KeyCode::Char('d') => self.toggle_done(),
            KeyCode::Char('a') => self.archive(),
            KeyCode::Char('x') | KeyCode::Delete => self.request_deletion(),

            // Bulk actions
            KeyCode::Char(' ') => self.toggle_select(),
            KeyCode::Char('v') => self.toggle_select_all(),
            KeyCode::Char('A') => self.archive_selected(),
            KeyCode::Char('X') => self.delete_selected(),

            // Search
            KeyCode::Char('/') => {
                self.input_mode = InputMode::Search(self.store.search_query().to_string());
            }
            KeyCode::Esc => self.clear_search_or_selection(),

            KeyCode::Char('b') => {
                self.view_mode = self.view_mode.toggle();
            }
            KeyCode::Char('?') => {
                self.status_message = Some(HELP.to_string());
            }

            _ => {}
        }
    }

    /// Handle keys while editing the search query
    fn handle_search_key(&mut self, key: KeyEvent) {
        let InputMode::Search(ref query) = self.input_mode else {
            return;
        };
        let mut query = query.clone();

        match key.code {
            KeyCode::Esc => {
                self.store.set_search_query("");
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Backspace => {
                query.pop();
                self.store.set_search_query(query.clone());
                self.input_mode = InputMode::Search(query);
            }
            KeyCode::Char(c) => {
                query.push(c);
                self.store.set_search_query(query.clone());
                self.input_mode = InputMode::Search(query);
            }
            _ => {}
        }
    }

    /// Handle keys while typing a new task
    fn handle_new_task_key(&mut self, key: KeyEvent) {
        let InputMode::NewTask(ref text) = self.input_mode else {
            return;
        };
        let mut text = text.clone();

        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Enter => {
                if let Some(id) = self.store.add_task(&text) {
                    self.status_message = self.store.get(id).map(|t| format!("Added: {}", t.text));
                    self.move_cursor_to(id);
                }
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Backspace => {
                text.pop();
                self.input_mode = InputMode::NewTask(text);
            }
            KeyCode::Char(c) => {
                text.push(c);
                self.input_mode = InputMode::NewTask(text);
            }
            _ => {}
        }
    }

    /// Handle keys while the deletion prompt is open
    fn handle_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                if let Some(task) = self.store.confirm_deletion() {
                    self.status_message = Some(format!("Deleted: {}", task.text));
                }
                self.clamp_cursor();
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                self.store.cancel_deletion();
                self.status_message = Some("Deletion cancelled".to_string());
            }
            _ => {}
        }
    }

    fn set_filter(&mut self, filter: Filter) {
        self.store.set_filter(filter);
        self.cursor = 0;
    }

    fn toggle_done(&mut self) {
        if let Some(id) = self.cursor_task_id() {
            self.store.toggle_done(id);
            self.status_message = self
                .store
                .get(id)
                .map(|t| format!("{}: {}", t.status_label(), t.text));
        }
    }

    fn archive(&mut self) {
        let Some(task) = self.cursor_task() else {
            return;
        };
        if !task.can_archive() {
            self.status_message = Some("Already archived".to_string());
            return;
        }

        let (id, text) = (task.id, task.text.clone());
        self.store.archive_task(id);
        self.status_message = Some(format!("Archived: {}", text));
    }

    fn request_deletion(&mut self) {
        if let Some(id) = self.cursor_task_id() {
            self.store.request_deletion(id);
        }
    }

    fn toggle_select(&mut self) {
        if !self.bulk_enabled() {
            return;
        }
        if let Some(id) = self.cursor_task_id() {
            self.store.toggle_select(id);
            // Advance without wrapping
            let last = self.store.visible_tasks().len().saturating_sub(1);
            self.cursor = (self.cursor + 1).min(last);
        }
    }

    fn toggle_select_all(&mut self) {
        if !self.bulk_enabled() {
            return;
        }
        self.store.toggle_select_all_visible();
        self.status_message = Some(format!("{} selected", self.store.selected().len()));
    }

    fn archive_selected(&mut self) {
        if !self.bulk_enabled() {
            return;
        }
        let count = self.store.archive_selected();
        self.status_message = Some(format!("Archived {} task(s)", count));
    }

    fn delete_selected(&mut self) {
        if !self.bulk_enabled() {
            return;
        }
        let count = self.store.delete_selected();
        self.status_message = Some(format!("Deleted {} task(s)", count));
    }

    fn clear_search_or_selection(&mut self) {
        if !self.store.search_query().is_empty() {
            self.store.set_search_query("");
            self.status_message = Some("Search cleared".to_string());
        } else if !self.store.selected().is_empty() {
            self.store.clear_selection();
            self.status_message = Some("Selection cleared".to_string());
        }
    }

    fn bulk_enabled(&mut self) -> bool {
        let enabled = self.store.capabilities().bulk_selection;
        if !enabled {
            self.status_message = Some("Bulk selection is disabled".to_string());
        }
        enabled
    }

    fn move_cursor_down(&mut self) {
        let len = self.store.visible_tasks().len();
        if len > 0 {
            self.cursor = (self.cursor + 1) % len;
        }
    }

    fn move_cursor_up(&mut self) {
        let len = self.store.visible_tasks().len();
        if len > 0 {
            self.cursor = if self.cursor == 0 { len - 1 } else { self.cursor - 1 };
        }
    }

    fn move_cursor_to(&mut self, id: TaskId) {
        if let Some(pos) = self.store.visible_tasks().iter().position(|t| t.id == id) {
            self.cursor = pos;
        }
    }

    /// Keep the cursor on a visible row after the list shrinks
    fn clamp_cursor(&mut self) {
        let len = self.store.visible_tasks().len();
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
    }

    fn cursor_task_id(&self) -> Option<TaskId> {
        self.cursor_task().map(|t| t.id)
    }

    // Public accessors for views

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cursor_task(&self) -> Option<&Task> {
        self.store.visible_tasks().get(self.cursor).copied()
    }

    pub fn input_mode(&self) -> &InputMode {
        &self.input_mode
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }
}

//! Interactive TUI for the to-do list
//!
//! Renders a [`TaskStore`] with ratatui and turns key presses into store
//! commands. All task state lives in the store; the TUI only tracks the
//! cursor, the input mode and a status line.

mod app;
mod event;
mod ui;
mod utils;
mod views;

use std::panic::{self, AssertUnwindSafe};
use std::str::FromStr;

use anyhow::{anyhow, Result};

use super::Output;
use crate::domain::TaskStore;
use app::App;
use event::EventHandler;

/// View mode for the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    List,
    Board,
}

impl ViewMode {
    fn toggle(self) -> Self {
        match self {
            ViewMode::List => ViewMode::Board,
            ViewMode::Board => ViewMode::List,
        }
    }
}

impl FromStr for ViewMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "list" | "l" => Ok(ViewMode::List),
            "board" | "b" | "kanban" => Ok(ViewMode::Board),
            _ => Err(()),
        }
    }
}

/// Launch the TUI. Hands the store back when the session ends.
pub fn run(output: &Output, store: TaskStore, view: &str, tick_rate_ms: u64) -> Result<TaskStore> {
    output.verbose_ctx("tui", "Initializing TUI application");

    let view_mode = view.parse().unwrap_or_else(|_| {
        output.verbose_ctx("tui", &format!("Unknown view '{}', using list", view));
        ViewMode::default()
    });

    let mut terminal = ui::init_terminal()?;
    let mut app = App::new(store, view_mode);
    let event_handler = EventHandler::new(tick_rate_ms);

    // Restore the terminal even if the app panics
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        app.run(&mut terminal, &event_handler)
    }));

    let restore_result = ui::restore_terminal();

    match result {
        Ok(inner_result) => {
            restore_result?;
            inner_result?;
            Ok(app.into_store())
        }
        Err(panic_payload) => {
            let _ = restore_result;
            if let Some(s) = panic_payload.downcast_ref::<&str>() {
                Err(anyhow!("TUI panicked: {}", s))
            } else if let Some(s) = panic_payload.downcast_ref::<String>() {
                Err(anyhow!("TUI panicked: {}", s))
            } else {
                Err(anyhow!("TUI panicked with unknown error"))
            }
        }
    }
}

//! todo-list - A keyboard-driven, in-memory to-do list
//!
//! The core is [`TaskStore`]: an ordered list of tasks plus the transient list
//! state (status filter, search query, bulk selection, deletion prompt). The
//! terminal UI and the script runner in [`cli`] only forward user intents to
//! it and render what it reports. Nothing is persisted; a session's tasks are
//! gone when it ends.

pub mod cli;
pub mod config;
pub mod domain;

pub use domain::{Filter, Task, TaskId, TaskStore};

//! TUI views

pub mod board;
mod chrome;
pub mod list;

//! # Command-Line Interface
//!
//! Presentation layers over the in-memory [`TaskStore`](crate::domain::TaskStore).
//! Neither keeps any task logic; both forward user intents to the store and
//! render what it reports back.
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `tui` (default) | Interactive terminal session |
//! | `script [FILE]` | Apply intents line by line, print the resulting view |
//!
//! ## Output Formats
//!
//! `script` honours the `--format` flag:
//! - `text` (default) - Human-readable table
//! - `json` - One snapshot object per `show` and at the end
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output on stderr:
//! ```bash
//! todo --verbose script session.txt
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
pub mod script;
mod tui;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};

//! Domain models for the to-do list
//!
//! Contains the task store and its rules without any terminal or file I/O.

mod error;
mod filter;
mod id;
mod store;
mod task;

pub use error::{IdError, StoreError};
pub use filter::Filter;
pub use id::{IdGenerator, TaskId};
pub use store::{Capabilities, FilterCounts, SelectionSummary, StoreSnapshot, TaskStore};
pub use task::Task;

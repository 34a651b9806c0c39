//! Status filters for the task list

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::StoreError;
use super::task::Task;

/// Which tasks the list shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    #[default]
    All,
    Active,
    Done,
    Archived,
}

impl Filter {
    /// All filters in tab order
    pub const ALL: [Filter; 4] = [Filter::All, Filter::Active, Filter::Done, Filter::Archived];

    /// Returns true if `task` passes this filter
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !task.done && !task.archived,
            Filter::Done => task.done && !task.archived,
            Filter::Archived => task.archived,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Active => "active",
            Filter::Done => "done",
            Filter::Archived => "archived",
        }
    }

    /// Tab caption
    pub fn label(&self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Active => "Active",
            Filter::Done => "Done",
            Filter::Archived => "Archived",
        }
    }

    /// Position in [`Filter::ALL`]
    pub fn index(&self) -> usize {
        match self {
            Filter::All => 0,
            Filter::Active => 1,
            Filter::Done => 2,
            Filter::Archived => 3,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Filter::All => Filter::Active,
            Filter::Active => Filter::Done,
            Filter::Done => Filter::Archived,
            Filter::Archived => Filter::All,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Filter::All => Filter::Archived,
            Filter::Active => Filter::All,
            Filter::Done => Filter::Active,
            Filter::Archived => Filter::Done,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Filter {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "active" => Ok(Filter::Active),
            "done" => Ok(Filter::Done),
            "archived" => Ok(Filter::Archived),
            _ => Err(StoreError::InvalidFilter(s.to_string())),
        }
    }
}

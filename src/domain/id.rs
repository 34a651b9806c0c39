//! Task identifiers
//!
//! ID Format: `t-{sequence}` (e.g., `t-1`, `t-42`)
//!
//! Sequences come from a per-store [`IdGenerator`] that only ever counts up,
//! so two tasks created back to back can never share an ID, and an ID freed
//! by a deletion is never handed out again.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::IdError;

/// Task ID in the format `t-{sequence}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskId(u64);

impl TaskId {
    /// Returns the sequence number behind this ID
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t-{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = IdError;

    /// Accepts `t-7` as well as the bare sequence `7`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits = s.strip_prefix("t-").unwrap_or(s);

        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(IdError::InvalidTaskId(s.to_string()));
        }

        match digits.parse::<u64>() {
            Ok(0) | Err(_) => Err(IdError::InvalidTaskId(s.to_string())),
            Ok(seq) => Ok(Self(seq)),
        }
    }
}

impl TryFrom<String> for TaskId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TaskId> for String {
    fn from(id: TaskId) -> Self {
        id.to_string()
    }
}

/// Monotonic source of task IDs
#[derive(Debug, Clone)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Hands out the next unused ID
    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next += 1;
        id
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

//! Domain error types

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("Invalid task ID format: expected 't-{{sequence}}' or '{{sequence}}', got '{0}'")]
    InvalidTaskId(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("Invalid filter '{0}': expected one of all, active, done, archived")]
    InvalidFilter(String),
}

//! Error types for diagram edit commands.
//!
//! Most failure modes of the data model are not errors: unresolvable or
//! stale symbols are skipped, illegal edits are reported to the user through
//! the [`Prompter`](crate::edit::Prompter), and declined confirmations simply
//! abort. What remains is a failing refactoring transaction, which the
//! command layer passes through without retrying.

use thiserror::Error;

/// Failure reported by the host while applying a refactoring command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("refactoring '{command}' failed: {message}")]
pub struct RefactoringError {
    /// Name of the command that failed.
    pub command: String,
    /// Host-provided reason.
    pub message: String,
}

impl RefactoringError {
    pub fn new(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            message: message.into(),
        }
    }
}

/// Errors surfaced by the data model.
#[derive(Debug, Error)]
pub enum UmlError {
    /// The refactoring transaction behind an edge gesture failed.
    #[error(transparent)]
    Refactoring(#[from] RefactoringError),

    /// Configuration could not be parsed.
    #[cfg(feature = "serde")]
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

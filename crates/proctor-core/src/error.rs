//! Domain error types.
//!
//! Two failure families exist in this crate: rejected constructor arguments
//! (`ValidationError`, surfaced synchronously, never silently corrected) and
//! degraded audit appends (`AuditError`, non-fatal by contract — the
//! in-memory state a failed append accompanies is still valid). Absent
//! results (a journal miss, a missing audit log) are `Option` values or
//! `io::ErrorKind::NotFound` at the caller, not error variants here.

use thiserror::Error;

/// Errors raised when constructing a question from invalid arguments.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The question header was empty or whitespace.
    #[error("question header must not be empty")]
    EmptyHeader,

    /// The question body was empty or whitespace.
    #[error("question body must not be empty")]
    EmptyBody,

    /// Marks must be strictly positive.
    #[error("marks must be greater than zero")]
    ZeroMarks,

    /// A choice question was given no options at all.
    #[error("choice question must offer at least one option")]
    NoOptions,

    /// An option at the given position was empty or whitespace.
    #[error("option {index} must not be empty")]
    BlankOption { index: usize },

    /// A correct-answer index pointed outside the option list.
    #[error("correct index {index} is out of range for {count} option(s)")]
    ChoiceOutOfRange { index: usize, count: usize },

    /// A multi-choice question marked no option as correct.
    #[error("multi-choice question must mark at least one option correct")]
    NoCorrectChoices,
}

/// Failure to echo a catalog addition to its audit sink.
///
/// Always recoverable: the catalog append this error accompanies has already
/// succeeded in memory, and no retry is attempted.
#[derive(Debug, Error)]
#[error("audit append to '{sink}' failed: {source}")]
pub struct AuditError {
    /// Name of the sink that rejected the entry.
    pub sink: String,
    /// The underlying I/O failure.
    #[source]
    pub source: std::io::Error,
}

impl AuditError {
    /// Builds an audit error for the named sink.
    pub fn new(sink: impl Into<String>, source: std::io::Error) -> Self {
        Self {
            sink: sink.into(),
            source,
        }
    }
}

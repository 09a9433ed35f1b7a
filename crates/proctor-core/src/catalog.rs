//! The question catalog: an ordered, append-only collection that mirrors
//! every addition to an audit sink.
//!
//! The sink is injected at construction and owned by the catalog; a failed
//! echo never rolls back the in-memory append. Insertion order is
//! significant and duplicates (by the narrow question identity) are
//! permitted.

use std::fmt;
use std::io::{self, BufRead};

use chrono::Utc;

use crate::error::AuditError;
use crate::question::Question;
use crate::traits::{AuditSink, DisplaySurface};

pub struct QuestionCatalog {
    questions: Vec<Question>,
    sink: Box<dyn AuditSink>,
}

impl QuestionCatalog {
    /// Creates an empty catalog wired to its audit sink.
    pub fn new(sink: Box<dyn AuditSink>) -> Self {
        Self {
            questions: Vec::new(),
            sink,
        }
    }

    /// Appends a question, then echoes a timestamped audit entry to the
    /// sink.
    ///
    /// The in-memory append always succeeds; `Err` reports only that the
    /// audit echo failed. No retry is attempted.
    pub fn append(&mut self, question: Question) -> Result<(), AuditError> {
        let entry = format!("[{}] {question}", Utc::now().format("%Y-%m-%d %H:%M:%S"));
        self.questions.push(question);
        if let Err(error) = self.sink.append(&entry) {
            tracing::warn!(sink = self.sink.name(), %error, "audit echo failed");
            return Err(error);
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Position of the first question equal to `question` under the narrow
    /// (header, body) identity.
    pub fn position_of(&self, question: &Question) -> Option<usize> {
        self.questions.iter().position(|q| q == question)
    }

    /// Sum of marks across the catalog.
    pub fn total_marks(&self) -> u32 {
        self.questions.iter().map(Question::marks).sum()
    }

    /// Name of the audit sink this catalog echoes to.
    pub fn sink_name(&self) -> &str {
        self.sink.name()
    }

    /// Deep-copies every question into a fresh catalog wired to `sink`.
    ///
    /// Copies go through [`append`](Self::append), so the new sink receives
    /// the full audit trail; echo failures degrade to the warning `append`
    /// already emits.
    pub fn duplicate(&self, sink: Box<dyn AuditSink>) -> Self {
        let mut copy = Self::new(sink);
        for question in &self.questions {
            // append has already warned on echo failure
            let _ = copy.append(question.clone());
        }
        copy
    }
}

impl fmt::Debug for QuestionCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuestionCatalog")
            .field("questions", &self.questions)
            .field("sink", &self.sink.name())
            .finish()
    }
}

/// Forwards every line of an audit log verbatim to a display surface,
/// returning how many lines were read.
///
/// A read-only diagnostic: lines are not parsed back into questions.
pub fn review_log<R: BufRead>(source: R, surface: &mut dyn DisplaySurface) -> io::Result<usize> {
    let mut count = 0;
    for line in source.lines() {
        surface.line(&line?);
        count += 1;
    }
    Ok(count)
}

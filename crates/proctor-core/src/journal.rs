//! Append-only journal of submitted responses.
//!
//! Corrections are new appends; nothing is updated or deleted, so a grading
//! layer can replay the journal and apply whichever precedence it wants.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::question::Response;

/// One submitted response, stamped when it was recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    /// Position of the question in its catalog.
    pub question_index: usize,
    /// The submitted response.
    pub response: Response,
    /// When the response was recorded.
    pub answered_at: DateTime<Utc>,
}

impl fmt::Display for AnswerRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Q{}: {} (at {})",
            self.question_index,
            self.response,
            self.answered_at.format("%H:%M:%S")
        )
    }
}

/// Ordered log of answer records.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct AnswerJournal {
    records: Vec<AnswerRecord>,
}

impl AnswerJournal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a response for the question at `question_index`, stamped
    /// with the current time.
    pub fn record(&mut self, question_index: usize, response: Response) {
        self.records.push(AnswerRecord {
            question_index,
            response,
            answered_at: Utc::now(),
        });
    }

    /// The earliest record for a question, if any.
    ///
    /// The first submission is treated as binding; later appends for the
    /// same index stay visible through [`latest`](Self::latest) and
    /// [`iter`](Self::iter).
    pub fn lookup(&self, question_index: usize) -> Option<&AnswerRecord> {
        self.records
            .iter()
            .find(|record| record.question_index == question_index)
    }

    /// The most recent record for a question, if any.
    pub fn latest(&self, question_index: usize) -> Option<&AnswerRecord> {
        self.records
            .iter()
            .rev()
            .find(|record| record.question_index == question_index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnswerRecord> {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::Response;

    #[test]
    fn record_appends_with_a_timestamp() {
        let before = Utc::now();
        let mut journal = AnswerJournal::new();
        journal.record(0, Response::Bool(true));

        let record = journal.lookup(0).unwrap();
        assert_eq!(record.response, Response::Bool(true));
        assert!(record.answered_at >= before);
        assert!(record.answered_at <= Utc::now());
    }

    #[test]
    fn lookup_returns_the_earliest_record() {
        let mut journal = AnswerJournal::new();
        journal.record(2, Response::Choice(1));
        journal.record(2, Response::Choice(3));

        assert_eq!(journal.lookup(2).unwrap().response, Response::Choice(1));
        assert_eq!(journal.latest(2).unwrap().response, Response::Choice(3));
        assert_eq!(journal.len(), 2, "corrections stay in the log");
    }

    #[test]
    fn missing_index_is_an_absent_result() {
        let journal = AnswerJournal::new();
        assert!(journal.lookup(9).is_none());
        assert!(journal.latest(9).is_none());
    }

    #[test]
    fn record_display() {
        let mut journal = AnswerJournal::new();
        journal.record(1, Response::Bool(false));
        let shown = journal.lookup(1).unwrap().to_string();
        assert!(shown.starts_with("Q1: false (at "));
        assert!(shown.ends_with(')'));
    }
}

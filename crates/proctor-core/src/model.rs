//! Shared value types for the assessment model.
//!
//! These are the plain records the rest of the crate builds on: the subject
//! an exam belongs to, the students notified about it, and the small enums
//! describing an exam's kind and lifecycle mode.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An academic subject an exam is held for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subject {
    /// Full subject name, e.g. "Advanced Mathematics".
    pub name: String,
    /// Short course code, e.g. "MATH301".
    pub code: String,
    /// Credit hours awarded for the course.
    pub credit_hours: u32,
}

impl Subject {
    pub fn new(name: impl Into<String>, code: impl Into<String>, credit_hours: u32) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            credit_hours,
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ({} credit hours)",
            self.code, self.name, self.credit_hours
        )
    }
}

/// A student enrolled for a subject.
///
/// Students are purely reactive: they can be subscribed to an exam's
/// notifications but hold no authority over the exam itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Display name.
    pub name: String,
    /// Registration id, e.g. "ST001".
    pub id: String,
    /// The subject the student is enrolled in.
    pub subject: Subject,
}

impl Student {
    pub fn new(name: impl Into<String>, id: impl Into<String>, subject: Subject) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            subject,
        }
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) - {}", self.name, self.id, self.subject.name)
    }
}

/// Whether an exam is a practice run or the real thing.
///
/// The kind decides presentation behavior only: practice exams reveal the
/// answer key once finished, final exams never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExamKind {
    Practice,
    Final,
}

impl fmt::Display for ExamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExamKind::Practice => write!(f, "practice"),
            ExamKind::Final => write!(f, "final"),
        }
    }
}

impl FromStr for ExamKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "practice" => Ok(ExamKind::Practice),
            "final" => Ok(ExamKind::Final),
            other => Err(format!("unknown exam kind: {other}")),
        }
    }
}

/// Lifecycle mode of an exam: `Starting` → `Queued` → `Finished`.
///
/// `Finished` is terminal; no operation reverts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExamMode {
    Starting,
    Queued,
    Finished,
}

impl fmt::Display for ExamMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExamMode::Starting => write!(f, "Starting"),
            ExamMode::Queued => write!(f, "Queued"),
            ExamMode::Finished => write!(f, "Finished"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_display() {
        let subject = Subject::new("Advanced Mathematics", "MATH301", 3);
        assert_eq!(
            subject.to_string(),
            "MATH301: Advanced Mathematics (3 credit hours)"
        );
    }

    #[test]
    fn student_display() {
        let subject = Subject::new("Computer Science Fundamentals", "CS101", 4);
        let student = Student::new("Carol Davis", "ST003", subject);
        assert_eq!(
            student.to_string(),
            "Carol Davis (ST003) - Computer Science Fundamentals"
        );
    }

    #[test]
    fn exam_kind_display_and_parse() {
        assert_eq!(ExamKind::Practice.to_string(), "practice");
        assert_eq!(ExamKind::Final.to_string(), "final");
        assert_eq!("practice".parse::<ExamKind>().unwrap(), ExamKind::Practice);
        assert_eq!("Final".parse::<ExamKind>().unwrap(), ExamKind::Final);
        assert!("midterm".parse::<ExamKind>().is_err());
    }

    #[test]
    fn exam_mode_display() {
        assert_eq!(ExamMode::Starting.to_string(), "Starting");
        assert_eq!(ExamMode::Queued.to_string(), "Queued");
        assert_eq!(ExamMode::Finished.to_string(), "Finished");
    }
}

//! TOML exam definition parser.
//!
//! Loads exam definitions from TOML files and directories, and validates
//! them. Questions pass through the validating constructors, so a
//! definition that parses is a definition whose questions are well-formed.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::catalog::QuestionCatalog;
use crate::error::AuditError;
use crate::exam::Exam;
use crate::model::{ExamKind, Student, Subject};
use crate::question::Question;
use crate::traits::AuditSink;

/// A parsed, validated exam definition, ready to build an [`Exam`] from.
#[derive(Debug, Clone)]
pub struct ExamDefinition {
    pub title: String,
    pub kind: ExamKind,
    pub duration: Duration,
    pub subject: Subject,
    pub questions: Vec<Question>,
    pub roster: Vec<Student>,
}

impl ExamDefinition {
    /// Builds an exam over a fresh catalog wired to `sink`.
    ///
    /// Every question is appended through the catalog, so the sink receives
    /// the full audit trail; failed echoes are returned alongside the exam
    /// and the questions still land in the catalog.
    pub fn build_exam(&self, sink: Box<dyn AuditSink>) -> (Exam, Vec<AuditError>) {
        let mut catalog = QuestionCatalog::new(sink);
        let mut failures = Vec::new();
        for question in &self.questions {
            if let Err(error) = catalog.append(question.clone()) {
                failures.push(error);
            }
        }
        let exam = Exam::new(
            self.title.clone(),
            self.subject.clone(),
            self.duration,
            self.kind,
            catalog,
        );
        (exam, failures)
    }
}

/// Intermediate TOML structure for parsing exam definition files.
#[derive(Debug, Deserialize)]
struct TomlExamFile {
    exam: TomlExamHeader,
    subject: TomlSubject,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
    #[serde(default)]
    students: Vec<TomlStudent>,
}

#[derive(Debug, Deserialize)]
struct TomlExamHeader {
    title: String,
    kind: String,
    #[serde(default = "default_duration_minutes")]
    duration_minutes: u64,
}

fn default_duration_minutes() -> u64 {
    60
}

#[derive(Debug, Deserialize)]
struct TomlSubject {
    name: String,
    code: String,
    credit_hours: u32,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    kind: String,
    header: String,
    body: String,
    marks: u32,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    answer: Option<bool>,
    #[serde(default)]
    correct: Option<TomlCorrect>,
}

/// `correct` is a single index for single-choice and an array for
/// multi-choice.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TomlCorrect {
    One(usize),
    Many(Vec<usize>),
}

#[derive(Debug, Deserialize)]
struct TomlStudent {
    name: String,
    id: String,
}

/// Parse a single TOML file into an `ExamDefinition`.
pub fn parse_exam(path: &Path) -> Result<ExamDefinition> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read exam definition: {}", path.display()))?;

    parse_exam_str(&content, path)
}

/// Parse a TOML string into an `ExamDefinition` (useful for testing).
pub fn parse_exam_str(content: &str, source_path: &Path) -> Result<ExamDefinition> {
    let parsed: TomlExamFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let kind: ExamKind = parsed
        .exam
        .kind
        .parse()
        .map_err(|e: String| anyhow::anyhow!("{}", e))?;

    let subject = Subject::new(
        parsed.subject.name,
        parsed.subject.code,
        parsed.subject.credit_hours,
    );

    let questions = parsed
        .questions
        .into_iter()
        .enumerate()
        .map(|(index, q)| build_question(index, q))
        .collect::<Result<Vec<_>>>()?;

    let roster = parsed
        .students
        .into_iter()
        .map(|s| Student::new(s.name, s.id, subject.clone()))
        .collect();

    Ok(ExamDefinition {
        title: parsed.exam.title,
        kind,
        duration: Duration::from_secs(parsed.exam.duration_minutes * 60),
        subject,
        questions,
        roster,
    })
}

fn build_question(index: usize, q: TomlQuestion) -> Result<Question> {
    let label = format!("question {} ('{}')", index + 1, q.header);

    let built = match q.kind.to_lowercase().as_str() {
        "true-false" | "true/false" => {
            let answer = q
                .answer
                .with_context(|| format!("{label}: true/false questions require `answer`"))?;
            Question::true_false(q.header, q.body, q.marks, answer)
        }
        "single-choice" | "choose-one" => {
            let correct = match q.correct {
                Some(TomlCorrect::One(i)) => i,
                Some(TomlCorrect::Many(_)) => {
                    anyhow::bail!("{label}: single-choice takes one `correct` index, not a list")
                }
                None => anyhow::bail!("{label}: single-choice questions require `correct`"),
            };
            Question::single_choice(q.header, q.body, q.marks, q.options, correct)
        }
        "multi-choice" | "choose-all" => {
            let correct = match q.correct {
                Some(TomlCorrect::Many(indexes)) => indexes,
                Some(TomlCorrect::One(i)) => vec![i],
                None => anyhow::bail!("{label}: multi-choice questions require `correct`"),
            };
            Question::multi_choice(q.header, q.body, q.marks, q.options, correct)
        }
        other => anyhow::bail!("{label}: unknown question kind: {other}"),
    };

    built.with_context(|| label)
}

/// Recursively load all `.toml` exam definitions from a directory.
pub fn load_exam_directory(dir: &Path) -> Result<Vec<ExamDefinition>> {
    let mut definitions = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            definitions.extend(load_exam_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_exam(&path) {
                Ok(definition) => definitions.push(definition),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(definitions)
}

/// A warning from exam definition validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Header of the question the warning concerns (if applicable).
    pub question: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate an exam definition for common issues.
pub fn validate_definition(definition: &ExamDefinition) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if definition.questions.is_empty() {
        warnings.push(ValidationWarning {
            question: None,
            message: "exam has no questions".into(),
        });
    }

    if definition.duration.is_zero() {
        warnings.push(ValidationWarning {
            question: None,
            message: "exam duration is zero minutes".into(),
        });
    }

    // Duplicate questions under the narrow (header, body) identity
    let mut seen = std::collections::HashSet::new();
    for question in &definition.questions {
        if !seen.insert(question) {
            warnings.push(ValidationWarning {
                question: Some(question.header().to_string()),
                message: format!("duplicate question: {}", question.header()),
            });
        }
    }

    let mut seen_ids = std::collections::HashSet::new();
    for student in &definition.roster {
        if !seen_ids.insert(&student.id) {
            warnings.push(ValidationWarning {
                question: None,
                message: format!("duplicate student id: {}", student.id),
            });
        }
    }

    if definition.roster.is_empty() {
        warnings.push(ValidationWarning {
            question: None,
            message: "no students enrolled; starting the exam notifies nobody".into(),
        });
    }

    warnings
}

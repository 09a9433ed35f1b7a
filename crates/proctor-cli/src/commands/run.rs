//! The `proctor run` command.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;

use proctor_audit::{FileSink, ProcessSequence};
use proctor_core::bus::{ExamEvent, ExamObserver};
use proctor_core::exam::Exam;
use proctor_core::model::{ExamKind, Student, Subject};
use proctor_core::parser;
use proctor_core::question::Response;
use proctor_core::traits::{AuditSink, DisplaySurface};

/// Display surface printing to stdout, answer key in green.
pub(crate) struct ConsoleSurface;

impl DisplaySurface for ConsoleSurface {
    fn line(&mut self, text: &str) {
        println!("{text}");
    }

    fn highlight(&mut self, text: &str) {
        println!("{}", text.green());
    }
}

/// Observer relaying exam notifications to one enrolled student.
struct StudentInbox {
    student: Student,
}

impl ExamObserver for StudentInbox {
    fn name(&self) -> &str {
        &self.student.name
    }

    fn on_exam_starting(&self, event: &ExamEvent<'_>) -> anyhow::Result<()> {
        println!("Notification to {}: {}", self.student, event.message);
        Ok(())
    }
}

/// JSON artifact describing one completed session.
#[derive(Serialize)]
struct SessionSummary {
    title: String,
    kind: String,
    subject: Subject,
    duration_minutes: u64,
    mode: String,
    questions: usize,
    total_marks: u32,
    answered: usize,
    audit_log: String,
    completed_at: chrono::DateTime<chrono::Utc>,
}

pub fn execute(
    exam_path: PathBuf,
    log_dir: PathBuf,
    interactive: bool,
    summary_path: Option<PathBuf>,
) -> Result<()> {
    let definition = parser::parse_exam(&exam_path)?;

    // One file sink per catalog, numbered by the process-wide sequence
    let mut sequence = ProcessSequence;
    let sink = FileSink::create(&log_dir, &mut sequence)?;
    let audit_log = sink.name().to_string();

    let (mut exam, audit_failures) = definition.build_exam(Box::new(sink));
    for failure in &audit_failures {
        eprintln!("Warning: {failure}");
    }
    tracing::debug!(
        title = exam.title(),
        questions = exam.questions().len(),
        "exam constructed"
    );

    for student in &definition.roster {
        exam.subscribe(Box::new(StudentInbox {
            student: student.clone(),
        }));
    }

    exam.start();
    println!();

    let mut surface = ConsoleSurface;
    exam.present(&mut surface);

    if interactive {
        for (index, response) in collect_answers(&exam)? {
            exam.record_answer(index, response);
        }
    }

    exam.finish();
    println!("\nExam '{}' has been completed.", exam.title());

    // The reveal: a finished practice exam shows its answer key
    if exam.kind() == ExamKind::Practice {
        println!();
        exam.present(&mut surface);
    }

    if let Some(path) = summary_path {
        let summary = SessionSummary {
            title: exam.title().to_string(),
            kind: exam.kind().to_string(),
            subject: exam.subject().clone(),
            duration_minutes: exam.duration().as_secs() / 60,
            mode: exam.mode().to_string(),
            questions: exam.questions().len(),
            total_marks: exam.questions().total_marks(),
            answered: exam.answers().len(),
            audit_log,
            completed_at: chrono::Utc::now(),
        };
        let json = serde_json::to_string_pretty(&summary)?;
        std::fs::write(&path, json)
            .with_context(|| format!("failed to write session summary: {}", path.display()))?;
        println!("Session summary saved to: {}", path.display());
    }

    Ok(())
}

/// Prompts for one answer per question on stdin.
///
/// Unparsable input skips the question rather than reprompting, so piped
/// input can never wedge the session. Answers are returned instead of
/// recorded in place because the exam is borrowed per question.
fn collect_answers(exam: &Exam) -> Result<Vec<(usize, Response)>> {
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    let mut answers = Vec::new();

    println!();
    for (index, question) in exam.questions().iter().enumerate() {
        print!("Answer for question {} ({}): ", index + 1, question.header());
        std::io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!("\nNo more input; remaining questions left unanswered.");
            break;
        };
        let line = line.context("failed to read answer")?;

        match question.parse_response(&line) {
            Some(response) => answers.push((index, response)),
            None => println!("Unrecognized answer '{}', question skipped.", line.trim()),
        }
    }

    Ok(answers)
}

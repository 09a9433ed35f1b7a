//! Exam session example — minimal programmatic usage of proctor-core.
//!
//! Builds a practice exam in memory, subscribes a student, and drives the
//! lifecycle from start to the post-finish answer reveal.
//!
//! ```bash
//! cargo run --example exam_session
//! ```

use std::time::Duration;

use proctor_core::bus::{ExamEvent, ExamObserver};
use proctor_core::catalog::QuestionCatalog;
use proctor_core::exam::Exam;
use proctor_core::model::{ExamKind, Student, Subject};
use proctor_core::question::{Question, Response};
use proctor_core::traits::{DisplaySurface, MemorySink};

/// Surface that prints straight to stdout.
struct Stdout;

impl DisplaySurface for Stdout {
    fn line(&mut self, text: &str) {
        println!("{text}");
    }

    fn highlight(&mut self, text: &str) {
        println!(">>> {text}");
    }
}

/// Observer that relays notifications to one student.
struct Inbox {
    student: Student,
}

impl ExamObserver for Inbox {
    fn name(&self) -> &str {
        &self.student.name
    }

    fn on_exam_starting(&self, event: &ExamEvent<'_>) -> anyhow::Result<()> {
        println!("Notification to {}: {}", self.student, event.message);
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    let subject = Subject::new("Advanced Mathematics", "MATH301", 3);

    // Build the catalog; every append is echoed to the audit sink
    let mut catalog = QuestionCatalog::new(Box::new(MemorySink::new()));
    catalog.append(Question::true_false(
        "Basic Algebra",
        "Is the equation 2x + 3 = 7 solved by x = 2?",
        5,
        true,
    )?)?;
    catalog.append(Question::single_choice(
        "Calculus",
        "What is the derivative of x²?",
        10,
        ["2x", "x", "2", "x²"],
        0,
    )?)?;

    let mut exam = Exam::new(
        "Midterm Practice",
        subject.clone(),
        Duration::from_secs(60 * 60),
        ExamKind::Practice,
        catalog,
    );

    // Subscribe a student, then drive the lifecycle
    exam.subscribe(Box::new(Inbox {
        student: Student::new("Alice Johnson", "ST001", subject),
    }));
    exam.start();

    let mut surface = Stdout;
    exam.present(&mut surface);

    // Record a couple of answers as they arrive
    exam.record_answer(0, Response::Bool(true));
    exam.record_answer(1, Response::Choice(0));

    exam.finish();
    println!("\nExam '{}' has been completed.", exam.title());

    // Practice exams reveal the answer key once finished
    exam.present(&mut surface);

    // A retake is a fresh, unstarted exam over a copied catalog
    let retake = exam.retake(Box::new(MemorySink::new()));
    println!(
        "\nRetake ready: {} question(s), mode {}",
        retake.questions().len(),
        retake.mode()
    );

    Ok(())
}

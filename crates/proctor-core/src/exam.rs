//! The exam entity and its lifecycle.
//!
//! An [`Exam`] owns a question catalog, an answer journal, and a
//! notification bus, and moves through `Starting` → `Queued` → `Finished`.
//! All mutation goes through the exam's own operations; observers only ever
//! see a shared reference.

use std::time::Duration;

use crate::bus::{ExamEvent, ExamObserver, NotificationBus, SubscriptionId};
use crate::catalog::QuestionCatalog;
use crate::error::AuditError;
use crate::journal::{AnswerJournal, AnswerRecord};
use crate::model::{ExamKind, ExamMode, Subject};
use crate::question::{Question, QuestionKind, Response};
use crate::traits::{AuditSink, DisplaySurface};

#[derive(Debug)]
pub struct Exam {
    title: String,
    subject: Subject,
    duration: Duration,
    kind: ExamKind,
    questions: QuestionCatalog,
    mode: ExamMode,
    answers: AnswerJournal,
    bus: NotificationBus,
}

impl Exam {
    /// Creates an exam in `Starting` mode over an existing or fresh catalog.
    pub fn new(
        title: impl Into<String>,
        subject: Subject,
        duration: Duration,
        kind: ExamKind,
        questions: QuestionCatalog,
    ) -> Self {
        Self {
            title: title.into(),
            subject,
            duration,
            kind,
            questions,
            mode: ExamMode::Starting,
            answers: AnswerJournal::new(),
            bus: NotificationBus::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn kind(&self) -> ExamKind {
        self.kind
    }

    pub fn mode(&self) -> ExamMode {
        self.mode
    }

    pub fn questions(&self) -> &QuestionCatalog {
        &self.questions
    }

    pub fn answers(&self) -> &AnswerJournal {
        &self.answers
    }

    pub fn subscriber_count(&self) -> usize {
        self.bus.subscriber_count()
    }

    /// Registers an observer for this exam's lifecycle events.
    pub fn subscribe(&mut self, observer: Box<dyn ExamObserver>) -> SubscriptionId {
        self.bus.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Starts the exam: publishes the starting event, then advances to
    /// `Queued`.
    ///
    /// Publish happens before the transition, so observers see the exam
    /// still in `Starting` mode. Calling `start` in any other mode is a
    /// logged no-op and publishes nothing.
    pub fn start(&mut self) {
        if self.mode != ExamMode::Starting {
            tracing::warn!(title = %self.title, mode = %self.mode, "start ignored");
            return;
        }
        let message = format!("Exam '{}' for {} is starting!", self.title, self.subject.name);
        let bus = std::mem::take(&mut self.bus);
        let event = ExamEvent {
            message: &message,
            exam: &*self,
        };
        bus.publish(&event);
        self.bus = bus;
        self.mode = ExamMode::Queued;
        tracing::debug!(title = %self.title, "exam queued");
    }

    /// Finishes the exam. Unconditional and idempotent: the exam ends in
    /// `Finished` whatever mode it was in, including never-started.
    pub fn finish(&mut self) {
        if self.mode != ExamMode::Finished {
            tracing::debug!(title = %self.title, from = %self.mode, "exam finished");
        }
        self.mode = ExamMode::Finished;
    }

    /// Appends a question to the catalog (and its audit trail).
    ///
    /// Permitted in every mode, `Finished` included: the catalog is
    /// append-only and the audit trail records late additions like any
    /// other. `Err` reports a failed audit echo; the question is in the
    /// catalog regardless.
    pub fn add_question(&mut self, question: Question) -> Result<(), AuditError> {
        self.questions.append(question)
    }

    /// Records a response for the question at `question_index`.
    pub fn record_answer(&mut self, question_index: usize, response: Response) {
        self.answers.record(question_index, response);
    }

    /// The earliest recorded answer for a question, located by the narrow
    /// (header, body) identity.
    pub fn answer_for(&self, question: &Question) -> Option<&AnswerRecord> {
        let index = self.questions.position_of(question)?;
        self.answers.lookup(index)
    }

    /// Renders the exam to a display surface.
    ///
    /// Both kinds share the base layout: banner with title, subject,
    /// duration, mode, then every question in catalog order. A practice
    /// exam additionally reveals the highlighted answer key after each
    /// question once the exam is `Finished`; a final exam never reveals
    /// answers and says so up front.
    pub fn present(&self, surface: &mut dyn DisplaySurface) {
        let banner = match self.kind {
            ExamKind::Practice => "PRACTICE EXAM",
            ExamKind::Final => "FINAL EXAM",
        };
        surface.line(&format!("{banner}: {}", self.title));
        surface.line(&format!("Subject: {}", self.subject));
        surface.line(&format!("Duration: {} minutes", self.duration.as_secs() / 60));
        surface.line(&format!("Mode: {}", self.mode));
        if self.kind == ExamKind::Final {
            surface.line("No answers will be shown during or after this exam!");
        }
        surface.line(&"=".repeat(50));

        let reveal = self.kind == ExamKind::Practice && self.mode == ExamMode::Finished;
        for (index, question) in self.questions.iter().enumerate() {
            surface.line("");
            surface.line(&format!("Question {}:", index + 1));
            surface.line(question.header());
            match question.kind() {
                QuestionKind::MultiChoice { .. } => {
                    surface.line(&format!("{} (Select all that apply)", question.body()));
                }
                _ => surface.line(question.body()),
            }
            for option in question.labeled_options() {
                surface.line(&option);
            }
            surface.line(&format!("Marks: {}", question.marks()));
            if reveal {
                surface.highlight(&question.answer_key());
            }
            surface.line(&"-".repeat(30));
        }
    }

    /// Builds a fresh, unstarted copy of this exam for another sitting.
    ///
    /// The catalog is deep-copied onto the injected sink (one sink per
    /// catalog), `mode` resets to `Starting`, and the journal starts empty.
    /// Observers are not carried over. This is deliberately not a `Clone`
    /// impl: a faithful clone would snapshot mode and answers, which a
    /// retake must not.
    pub fn retake(&self, sink: Box<dyn AuditSink>) -> Exam {
        Exam::new(
            self.title.clone(),
            self.subject.clone(),
            self.duration,
            self.kind,
            self.questions.duplicate(sink),
        )
    }
}

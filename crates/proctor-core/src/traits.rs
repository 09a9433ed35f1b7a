//! Collaborator interfaces the domain model consumes.
//!
//! The catalog's audit sink and its id sequence are implemented by the
//! `proctor-audit` crate for the filesystem; the display surface is
//! implemented by whatever front end is presenting the exam. In-memory
//! implementations live here so tests and embedders need nothing extra.

use crate::error::AuditError;

// ---------------------------------------------------------------------------
// Audit sink trait
// ---------------------------------------------------------------------------

/// Durable consumer of catalog audit entries.
///
/// One sink instance serves one catalog. `append` must either persist the
/// line or report the failure; the catalog never retries and stays
/// consistent either way.
pub trait AuditSink {
    /// Identifies the sink in warnings and errors (e.g. a file path).
    fn name(&self) -> &str;

    /// Persists one audit line.
    fn append(&mut self, line: &str) -> Result<(), AuditError>;
}

/// Sink that keeps audit lines in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Vec<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines appended so far, in order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl AuditSink for MemorySink {
    fn name(&self) -> &str {
        "memory"
    }

    fn append(&mut self, line: &str) -> Result<(), AuditError> {
        self.lines.push(line.to_string());
        Ok(())
    }
}

/// Sink that discards every entry.
#[derive(Debug, Default)]
pub struct NullSink;

impl AuditSink for NullSink {
    fn name(&self) -> &str {
        "null"
    }

    fn append(&mut self, _line: &str) -> Result<(), AuditError> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Sequence source trait
// ---------------------------------------------------------------------------

/// Generator of monotonically increasing ids.
///
/// File-backed sinks take their log number from a sequence source injected
/// at construction, so catalogs stay independently testable.
pub trait SequenceSource {
    /// Returns the next id. Successive calls yield strictly increasing
    /// values.
    fn next_id(&mut self) -> u64;
}

/// Sequence counting up from a fixed start; handy for tests.
#[derive(Debug)]
pub struct FixedSequence {
    next: u64,
}

impl FixedSequence {
    pub fn starting_at(next: u64) -> Self {
        Self { next }
    }
}

impl SequenceSource for FixedSequence {
    fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

// ---------------------------------------------------------------------------
// Display surface trait
// ---------------------------------------------------------------------------

/// Line-oriented render target for exam presentation.
///
/// `highlight` carries emphasis (the practice answer key); surfaces that
/// cannot emphasize may render it like any other line.
pub trait DisplaySurface {
    fn line(&mut self, text: &str);

    fn highlight(&mut self, text: &str);
}

/// One line captured by a [`BufferSurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceLine {
    Plain(String),
    Highlight(String),
}

impl SurfaceLine {
    /// The line's text, regardless of emphasis.
    pub fn text(&self) -> &str {
        match self {
            SurfaceLine::Plain(text) | SurfaceLine::Highlight(text) => text,
        }
    }
}

/// Surface that records everything emitted to it.
#[derive(Debug, Default)]
pub struct BufferSurface {
    lines: Vec<SurfaceLine>,
}

impl BufferSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything captured, in emission order.
    pub fn lines(&self) -> &[SurfaceLine] {
        &self.lines
    }

    /// Captured text only, emphasis dropped.
    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(SurfaceLine::text).collect()
    }

    /// Highlighted lines only.
    pub fn highlights(&self) -> Vec<&str> {
        self.lines
            .iter()
            .filter_map(|line| match line {
                SurfaceLine::Highlight(text) => Some(text.as_str()),
                SurfaceLine::Plain(_) => None,
            })
            .collect()
    }
}

impl DisplaySurface for BufferSurface {
    fn line(&mut self, text: &str) {
        self.lines.push(SurfaceLine::Plain(text.to_string()));
    }

    fn highlight(&mut self, text: &str) {
        self.lines.push(SurfaceLine::Highlight(text.to_string()));
    }
}

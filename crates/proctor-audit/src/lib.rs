//! proctor-audit — File-backed implementations of the core audit seams.
//!
//! [`FileSink`] writes one `questions-<n>.log` file per catalog, taking
//! `<n>` from a [`SequenceSource`] injected at construction.
//! [`ProcessSequence`] is the production source: a process-wide monotonic
//! counter that outlives any single catalog.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{Context, Result};

use proctor_core::error::AuditError;
use proctor_core::traits::{AuditSink, SequenceSource};

/// Audit sink appending to a numbered log file.
///
/// Each append opens the file, writes one line, and closes the handle on
/// every exit path, so the sink never holds the file between appends.
pub struct FileSink {
    path: PathBuf,
    name: String,
}

impl FileSink {
    /// Creates a sink writing `questions-<n>.log` under `dir`, where `<n>`
    /// is drawn from `sequence`.
    ///
    /// The directory is created if missing. The log file itself is created
    /// lazily on the first append.
    pub fn create(dir: &Path, sequence: &mut dyn SequenceSource) -> Result<Self> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create log directory: {}", dir.display()))?;
        let path = dir.join(format!("questions-{}.log", sequence.next_id()));
        let name = path.display().to_string();
        tracing::debug!(sink = %name, "audit sink created");
        Ok(Self { path, name })
    }

    /// Path of the log file this sink appends to.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AuditSink for FileSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn append(&mut self, line: &str) -> Result<(), AuditError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|error| AuditError::new(&self.name, error))?;
        writeln!(file, "{line}").map_err(|error| AuditError::new(&self.name, error))
    }
}

// One counter for the whole process, whatever sinks come and go.
static NEXT_LOG_ID: AtomicU64 = AtomicU64::new(1);

/// The process-wide log id sequence, starting at 1.
///
/// Every `ProcessSequence` value draws from the same counter; ids keep
/// increasing for the life of the process, independent of any catalog's
/// lifetime. Tests wanting isolation inject
/// [`FixedSequence`](proctor_core::traits::FixedSequence) instead.
#[derive(Debug, Default)]
pub struct ProcessSequence;

impl SequenceSource for ProcessSequence {
    fn next_id(&mut self) -> u64 {
        NEXT_LOG_ID.fetch_add(1, Ordering::SeqCst)
    }
}

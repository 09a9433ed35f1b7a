//! The `proctor audit` command.

use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};

use proctor_core::catalog::review_log;

use super::run::ConsoleSurface;

pub fn execute(log_path: PathBuf) -> Result<()> {
    let file = match std::fs::File::open(&log_path) {
        Ok(file) => file,
        // A log that was never written is an absent result, not a failure
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            println!(
                "No audit log at {} (nothing has been recorded yet).",
                log_path.display()
            );
            return Ok(());
        }
        Err(error) => {
            return Err(error)
                .with_context(|| format!("failed to open audit log: {}", log_path.display()));
        }
    };

    let mut surface = ConsoleSurface;
    let count = review_log(BufReader::new(file), &mut surface)
        .with_context(|| format!("failed to read audit log: {}", log_path.display()))?;

    println!(
        "\n{count} audit entr{} in {}",
        if count == 1 { "y" } else { "ies" },
        log_path.display()
    );

    Ok(())
}

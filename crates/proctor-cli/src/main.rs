//! proctor CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "proctor",
    version,
    about = "Exam assembly, presentation, and audit toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an exam session from a definition file
    Run {
        /// Path to the .toml exam definition
        exam: PathBuf,

        /// Directory for question audit logs
        #[arg(long, default_value = "question-logs")]
        log_dir: PathBuf,

        /// Prompt for answers on stdin, one question at a time
        #[arg(long)]
        interactive: bool,

        /// Write a JSON session summary to this path
        #[arg(long)]
        summary: Option<PathBuf>,
    },

    /// Validate exam definition files
    Validate {
        /// Path to a definition file or directory
        path: PathBuf,
    },

    /// Review a question audit log
    Audit {
        /// Path to the audit log file
        log: PathBuf,
    },

    /// Create starter exam definitions
    Init {
        /// Directory to initialize (default: current directory)
        dir: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("proctor=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            exam,
            log_dir,
            interactive,
            summary,
        } => commands::run::execute(exam, log_dir, interactive, summary),
        Commands::Validate { path } => commands::validate::execute(path),
        Commands::Audit { log } => commands::audit::execute(log),
        Commands::Init { dir } => commands::init::execute(dir),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

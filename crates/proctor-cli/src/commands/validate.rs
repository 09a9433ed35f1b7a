//! The `proctor validate` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use proctor_core::parser::{self, ExamDefinition};

pub fn execute(path: PathBuf) -> Result<()> {
    let definitions = if path.is_dir() {
        parser::load_exam_directory(&path)?
    } else {
        vec![parser::parse_exam(&path)?]
    };

    let mut total_warnings = 0;

    for definition in &definitions {
        println!(
            "Exam: {} [{}] ({} questions, {} students)",
            definition.title,
            definition.kind,
            definition.questions.len(),
            definition.roster.len()
        );

        let warnings = parser::validate_definition(definition);
        for w in &warnings {
            let prefix = w
                .question
                .as_ref()
                .map(|header| format!("  [{header}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();

        print_inventory(definition);
        println!();
    }

    if total_warnings == 0 {
        println!("All exam definitions valid.");
    } else {
        println!("{total_warnings} warning(s) found.");
    }

    Ok(())
}

fn print_inventory(definition: &ExamDefinition) {
    let mut table = Table::new();
    table.set_header(vec!["#", "Kind", "Header", "Marks"]);

    for (index, question) in definition.questions.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(question.kind().label()),
            Cell::new(question.header()),
            Cell::new(question.marks()),
        ]);
    }

    println!("{table}");
    let total: u32 = definition.questions.iter().map(|q| q.marks()).sum();
    println!("Total marks: {total}");
}

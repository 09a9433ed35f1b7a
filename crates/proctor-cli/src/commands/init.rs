//! The `proctor init` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

pub fn execute(dir: Option<PathBuf>) -> Result<()> {
    let base = dir.unwrap_or_else(|| PathBuf::from("."));
    let exams_dir = base.join("exams");
    std::fs::create_dir_all(&exams_dir)
        .with_context(|| format!("failed to create {}", exams_dir.display()))?;

    for (name, content) in [
        ("math-practice.toml", MATH_PRACTICE),
        ("cs-final.toml", CS_FINAL),
    ] {
        let path = exams_dir.join(name);
        if path.exists() {
            println!("{} already exists, skipping.", path.display());
        } else {
            std::fs::write(&path, content)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Created {}", path.display());
        }
    }

    println!("\nNext steps:");
    println!("  1. Run: proctor validate {}", exams_dir.display());
    println!(
        "  2. Run: proctor run {}",
        exams_dir.join("math-practice.toml").display()
    );
    println!(
        "  3. Review the audit trail: proctor audit question-logs/questions-1.log"
    );

    Ok(())
}

const MATH_PRACTICE: &str = r#"[exam]
title = "Midterm Practice"
kind = "practice"
duration_minutes = 60

[subject]
name = "Advanced Mathematics"
code = "MATH301"
credit_hours = 3

[[questions]]
kind = "true-false"
header = "Basic Algebra"
body = "Is the equation 2x + 3 = 7 solved by x = 2?"
marks = 5
answer = true

[[questions]]
kind = "single-choice"
header = "Calculus"
body = "What is the derivative of x²?"
marks = 10
options = ["2x", "x", "2", "x²"]
correct = 0

[[students]]
name = "Alice Johnson"
id = "ST001"

[[students]]
name = "Bob Smith"
id = "ST002"
"#;

const CS_FINAL: &str = r#"[exam]
title = "Final Examination"
kind = "final"
duration_minutes = 120

[subject]
name = "Computer Science Fundamentals"
code = "CS101"
credit_hours = 4

[[questions]]
kind = "multi-choice"
header = "Programming Concepts"
body = "Which of the following are object-oriented programming principles?"
marks = 15
options = ["Encapsulation", "Recursion", "Inheritance", "Polymorphism", "Sorting"]
correct = [0, 2, 3]

[[questions]]
kind = "true-false"
header = "Data Structures"
body = "A stack follows LIFO (Last In, First Out) principle."
marks = 5
answer = true

[[students]]
name = "Carol Davis"
id = "ST003"
"#;

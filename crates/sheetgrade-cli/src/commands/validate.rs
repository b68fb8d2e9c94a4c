//! The `sheetgrade validate` command.

use std::path::PathBuf;

use anyhow::Result;

use sheetgrade_core::{parse_answers, parse_questions, validate_answer_key};

use super::read_input;

pub fn execute(questions_path: PathBuf, answers_path: PathBuf) -> Result<()> {
    let questions = parse_questions(&read_input(&questions_path)?);
    let answers = parse_answers(&read_input(&answers_path)?);

    println!(
        "Question paper: {} question(s), answer key: {} answer(s)",
        questions.len(),
        answers.len()
    );

    let warnings = validate_answer_key(&questions, &answers);
    for w in &warnings {
        let prefix = w
            .question_number
            .map(|n| format!("  [Q{n}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Answer key covers every question.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}

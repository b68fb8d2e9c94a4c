//! The `sheetgrade answers` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use sheetgrade_core::answers::parse_answers_detailed;
use sheetgrade_core::normalize_answer_key;

use super::{read_input, Format, NOTHING_RECOGNIZED};

pub fn execute(input: PathBuf, cleanup: bool, format: String) -> Result<()> {
    let format = Format::parse(&format)?;
    let text = read_input(&input)?;

    let parsed = parse_answers_detailed(&text);
    let Some(strategy) = parsed.strategy else {
        anyhow::bail!("{NOTHING_RECOGNIZED}");
    };
    let mut answers = parsed.output;

    if cleanup {
        let changed = normalize_answer_key(&mut answers);
        eprintln!("Normalized {changed} answer(s) to option letters");
    }

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&answers)?),
        Format::Text => {
            let mut table = Table::new();
            table.set_header(vec!["#", "Answer"]);
            for (number, answer) in &answers {
                table.add_row(vec![Cell::new(number), Cell::new(answer)]);
            }
            println!("{table}");
            eprintln!("{} answer(s) recognized ({strategy})", answers.len());
        }
    }

    Ok(())
}

//! The `sheetgrade questions` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use sheetgrade_core::questions::parse_questions_detailed;

use super::{read_input, Format, NOTHING_RECOGNIZED};

pub fn execute(input: PathBuf, format: String) -> Result<()> {
    let format = Format::parse(&format)?;
    let text = read_input(&input)?;

    let parsed = parse_questions_detailed(&text);
    let Some(strategy) = parsed.strategy else {
        anyhow::bail!("{NOTHING_RECOGNIZED}");
    };
    let questions = parsed.output;

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&questions)?),
        Format::Text => {
            let mut table = Table::new();
            table.set_header(vec!["#", "Question"]);
            for q in &questions {
                table.add_row(vec![Cell::new(q.number), Cell::new(&q.text)]);
            }
            println!("{table}");
            eprintln!("{} question(s) recognized ({strategy})", questions.len());
        }
    }

    Ok(())
}

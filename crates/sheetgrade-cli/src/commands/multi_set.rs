//! The `sheetgrade multi-set` command.

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use sheetgrade_core::model::{MultiSetAnswers, SetLabel};
use sheetgrade_core::{extract_set, parse_multi_set};

use super::{read_input, Format};

pub fn execute(input: PathBuf, set: Option<String>, format: String) -> Result<()> {
    let format = Format::parse(&format)?;
    let text = read_input(&input)?;
    let sets = parse_multi_set(&text)?;

    if let Some(label) = set {
        let answers = extract_set(&sets, &label)?;
        match format {
            Format::Json => println!("{}", serde_json::to_string_pretty(answers)?),
            Format::Text => {
                let mut table = Table::new();
                table.set_header(vec!["#".to_string(), label.trim().to_uppercase()]);
                for (number, answer) in answers {
                    table.add_row(vec![Cell::new(number), Cell::new(answer)]);
                }
                println!("{table}");
            }
        }
        return Ok(());
    }

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&sets)?),
        Format::Text => println!("{}", side_by_side(&sets)),
    }

    Ok(())
}

/// One row per question number, one column per set.
fn side_by_side(sets: &MultiSetAnswers) -> Table {
    let numbers: BTreeSet<u32> = sets.values().flat_map(|s| s.keys().copied()).collect();

    let mut table = Table::new();
    let mut header = vec!["#".to_string()];
    header.extend(SetLabel::ALL.iter().map(|l| l.to_string()));
    table.set_header(header);

    for number in numbers {
        let mut row = vec![Cell::new(number)];
        for label in SetLabel::ALL {
            let answer = sets
                .get(&label)
                .and_then(|s| s.get(&number))
                .map_or("-", String::as_str);
            row.push(Cell::new(answer));
        }
        table.add_row(row);
    }
    table
}

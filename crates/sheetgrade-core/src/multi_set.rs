//! Multi-set answer table parser.
//!
//! Answer keys for papers printed in three variants come as one table:
//!
//! ```text
//! Question Number | SET A | SET B    | SET C
//! Q1              | A. 20 | B. ODQZM | C. HAK
//! ```
//!
//! Text extraction loses the table grid, so each row's column delimiter is
//! detected per line: tabs, then pipes, then runs of two or more spaces.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ParseError;
use crate::model::{AnswerSet, MultiSetAnswers, SetLabel};
use crate::questions::parse_number;

#[allow(clippy::unwrap_used)]
static ROW_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[Qq]?0*(\d+)").unwrap());

#[allow(clippy::unwrap_used)]
static WIDE_GAP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s{2,}").unwrap());

/// Minimum columns in an answer row: the number plus one answer per set.
const MIN_COLUMNS: usize = 1 + SetLabel::ALL.len();

/// Parse a three-set answer table.
///
/// Fails with [`ParseError::MissingHeader`] unless some line names all
/// three sets, and with [`ParseError::EmptySet`] if a set ends up with no
/// answers at all.
pub fn parse_multi_set(text: &str) -> Result<MultiSetAnswers, ParseError> {
    let header = text.lines().find(|line| is_header(line));
    match header {
        Some(line) => tracing::debug!(header = line.trim(), "found multi-set header"),
        None => return Err(ParseError::MissingHeader),
    }

    let mut sets: MultiSetAnswers = SetLabel::ALL
        .iter()
        .map(|&label| (label, AnswerSet::new()))
        .collect();

    for line in text.lines() {
        let Some((number, columns)) = parse_row(line) else {
            continue;
        };
        for (label, answer) in SetLabel::ALL.iter().zip(&columns[1..MIN_COLUMNS]) {
            if answer.is_empty() {
                continue;
            }
            if let Some(answers) = sets.get_mut(label) {
                answers.insert(number, answer.to_string());
            }
        }
    }

    for label in SetLabel::ALL {
        if sets.get(&label).map_or(true, AnswerSet::is_empty) {
            return Err(ParseError::EmptySet { set: label });
        }
    }

    tracing::debug!(
        set_a = sets[&SetLabel::A].len(),
        set_b = sets[&SetLabel::B].len(),
        set_c = sets[&SetLabel::C].len(),
        "parsed multi-set answers"
    );
    Ok(sets)
}

/// Look up one variant's answers by label, e.g. `"SET B"` or `"setb"`.
pub fn extract_set<'a>(
    sets: &'a MultiSetAnswers,
    label: &str,
) -> Result<&'a AnswerSet, ParseError> {
    label
        .parse::<SetLabel>()
        .ok()
        .and_then(|l| sets.get(&l))
        .ok_or_else(|| ParseError::UnknownSet {
            requested: label.trim().to_string(),
            available: sets.keys().map(|l| l.to_string()).collect(),
        })
}

fn is_header(line: &str) -> bool {
    let upper = line.to_uppercase();
    SetLabel::ALL.iter().all(|label| label.appears_in(&upper))
}

fn is_label_line(stripped: &str) -> bool {
    let upper = stripped.to_uppercase();
    upper.contains("QUESTION") || SetLabel::ALL.iter().any(|label| label.appears_in(&upper))
}

/// Parse one answer row into its number and trimmed columns.
fn parse_row(line: &str) -> Option<(u32, Vec<&str>)> {
    // Only spaces are stripped: a trailing tab or pipe closes an empty cell.
    let stripped = line.trim_matches(|c: char| c == ' ' || c == '\r');
    if stripped.trim().is_empty() || is_label_line(stripped) {
        return None;
    }

    let columns = split_columns(stripped);
    let number = columns
        .first()
        .and_then(|first| ROW_NUMBER.captures(first))
        .and_then(|caps| parse_number(&caps[1]))?;

    if columns.len() < MIN_COLUMNS {
        tracing::trace!(row = stripped, columns = columns.len(), "skipping short row");
        return None;
    }
    Some((number, columns))
}

/// Split a row on the first delimiter kind it contains. Empty cells are kept
/// so every column stays aligned with its set; only border cells are dropped.
fn split_columns(stripped: &str) -> Vec<&str> {
    if stripped.contains('\t') {
        let mut columns: Vec<&str> = stripped.split('\t').map(str::trim).collect();
        if columns.first().is_some_and(|c| c.is_empty()) {
            columns.remove(0);
        }
        columns
    } else if stripped.contains('|') {
        let mut columns: Vec<&str> = stripped.split('|').map(str::trim).collect();
        // `| Q1 | A | B | C |` has one empty border cell at each end.
        if stripped.starts_with('|') {
            columns.remove(0);
            if stripped.len() > 1 && stripped.ends_with('|') {
                columns.pop();
            }
        }
        columns
    } else {
        WIDE_GAP.split(stripped).map(str::trim).collect()
    }
}

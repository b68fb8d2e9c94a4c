//! Answer-key parser (single variant).
//!
//! Five strategies, tried in order: same-line `Q<n> <answer>` tables,
//! split-line tables with the answer under a bare `Q<n>`, bare option
//! letters after a number, full-text numbered answers, and finally a
//! line-by-line accumulator. Captured answers are returned raw; the
//! matching engine does all normalization.

use std::sync::LazyLock;

use regex::Regex;

use crate::cascade::{run_cascade, Cascaded, Strategy};
use crate::model::AnswerSet;
use crate::questions::{accumulate_numbered_lines, parse_number, split_numbered_blocks};

#[allow(clippy::unwrap_used)]
static INLINE_ROW: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[Qq](\d+)\s+(.+)$").unwrap());

#[allow(clippy::unwrap_used)]
static BARE_HEADER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[Qq](\d+)$").unwrap());

#[allow(clippy::unwrap_used)]
static OPTION_ANSWER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)(?:^|[^\w.])(?:Q(?:uestion)?[ \t]*)?(\d+)[.:)][ \t]*([A-D])\b").unwrap()
});

#[allow(clippy::unwrap_used)]
static ANSWER_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:A(?:nswer)?[ \t]*)?(\d+)[.:)][ \t]*").unwrap()
});

#[allow(clippy::unwrap_used)]
static ANSWER_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:A(?:nswer)?\s*)?(\d+)[.:)]\s*(.+)$").unwrap());

#[allow(clippy::unwrap_used)]
static LEADING_OPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-D])(?:[.)]|\s|\d|$)").unwrap());

/// The answer-key cascade, in the order it is tried.
pub const ANSWER_STRATEGIES: [Strategy<AnswerSet>; 5] = [
    Strategy::new("inline-table", parse_inline_table),
    Strategy::new("split-line-table", parse_split_line_table),
    Strategy::new("option-letters", parse_option_letters),
    Strategy::new("numbered-text", parse_numbered_text),
    Strategy::new("line-by-line", parse_line_by_line),
];

/// Parse an answer key into question number -> raw answer text.
///
/// A number seen twice keeps its last answer. Returns an empty map when no
/// strategy recognizes anything.
pub fn parse_answers(text: &str) -> AnswerSet {
    parse_answers_detailed(text).output
}

/// Like [`parse_answers`], also reporting which strategy was adopted.
pub fn parse_answers_detailed(text: &str) -> Cascaded<AnswerSet> {
    run_cascade(text, &ANSWER_STRATEGIES)
}

/// `Q12    ODQZM` rows. Header lines mentioning `Question` or `SET` are skipped.
pub fn parse_inline_table(text: &str) -> AnswerSet {
    let mut answers = AnswerSet::new();
    for line in text.lines().map(str::trim) {
        if line.is_empty() || line.contains("Question") || line.contains("SET") {
            continue;
        }
        let Some(caps) = INLINE_ROW.captures(line) else {
            continue;
        };
        let answer = caps[2].trim();
        if let Some(number) = parse_number(&caps[1]).filter(|_| !answer.is_empty()) {
            answers.insert(number, answer.to_string());
        }
    }
    answers
}

/// A bare `Q12` line followed by its answer on the next line.
pub fn parse_split_line_table(text: &str) -> AnswerSet {
    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    let mut answers = AnswerSet::new();

    for (i, line) in lines.iter().enumerate() {
        let Some(number) = BARE_HEADER
            .captures(line)
            .and_then(|caps| parse_number(&caps[1]))
        else {
            continue;
        };
        match lines.get(i + 1) {
            Some(next) if !next.is_empty() && !BARE_HEADER.is_match(next) => {
                answers.insert(number, (*next).to_string());
            }
            _ => {}
        }
    }
    answers
}

/// `1. A`, `Q2) C`, `3: D` pairs, wherever they occur.
pub fn parse_option_letters(text: &str) -> AnswerSet {
    OPTION_ANSWER
        .captures_iter(text)
        .filter_map(|caps| Some((parse_number(&caps[1])?, caps[2].to_string())))
        .collect()
}

/// Numbered answers spanning lines until the next numbered line start.
pub fn parse_numbered_text(text: &str) -> AnswerSet {
    split_numbered_blocks(text, &ANSWER_START).into_iter().collect()
}

/// Line-by-line accumulation of numbered answers.
pub fn parse_line_by_line(text: &str) -> AnswerSet {
    accumulate_numbered_lines(text, &ANSWER_LINE)
        .into_iter()
        .collect()
}

/// Reduce an answer captured with leftover option text to its letter.
///
/// `"A. 20"`, `"B) Paris"` and `"A20"` become `"A"` and `"B"`: the letter
/// must be followed by `.`, `)`, whitespace, a digit or nothing. Answers
/// that merely start with A-D, like `"Apple"` or `"Dog"`, are left
/// unchanged, as is anything with a letter outside A-D.
pub fn cleanup_answer(raw: &str) -> String {
    let trimmed = raw.trim();
    match LEADING_OPTION.captures(trimmed) {
        Some(caps) => caps[1].to_string(),
        None => raw.to_string(),
    }
}

/// Apply [`cleanup_answer`] to every entry, returning how many changed.
pub fn normalize_answer_key(answers: &mut AnswerSet) -> usize {
    let mut changed = 0;
    for (number, answer) in answers.iter_mut() {
        let cleaned = cleanup_answer(answer);
        if cleaned != *answer {
            tracing::debug!(question = number, from = %answer, to = %cleaned, "normalized answer");
            *answer = cleaned;
            changed += 1;
        }
    }
    changed
}

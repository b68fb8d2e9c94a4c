//! Question paper parser.
//!
//! Recovers numbered questions from extracted text with a three-step
//! cascade: `Q<n>` header blocks with lettered options, then a single pass
//! over numbered line starts, then a line-by-line accumulator.

use std::sync::LazyLock;

use regex::Regex;

use crate::cascade::{run_cascade, Cascaded, Strategy};
use crate::model::QuestionRecord;

// Patterns below are literals checked by the tests in this module.
#[allow(clippy::unwrap_used)]
static BLOCK_HEADER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[Qq](\d+)$").unwrap());

#[allow(clippy::unwrap_used)]
static OPTION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-D])[.):]\s*(.+)$").unwrap());

#[allow(clippy::unwrap_used)]
static QUESTION_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:Q(?:uestion)?[ \t]*)?(\d+)[.:)][ \t]*").unwrap()
});

#[allow(clippy::unwrap_used)]
static QUESTION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:Q(?:uestion)?\s*)?(\d+)[.:)]\s*(.+)$").unwrap());

/// The question cascade, in the order it is tried.
pub const QUESTION_STRATEGIES: [Strategy<Vec<QuestionRecord>>; 3] = [
    Strategy::new("header-blocks", parse_header_blocks),
    Strategy::new("numbered-lines", parse_numbered_lines),
    Strategy::new("line-by-line", parse_line_by_line),
];

/// Parse questions from extracted text, in document order.
///
/// Returns an empty list when no strategy recognizes anything.
pub fn parse_questions(text: &str) -> Vec<QuestionRecord> {
    parse_questions_detailed(text).output
}

/// Like [`parse_questions`], also reporting which strategy was adopted.
pub fn parse_questions_detailed(text: &str) -> Cascaded<Vec<QuestionRecord>> {
    run_cascade(text, &QUESTION_STRATEGIES)
}

/// `Q<n>` on a line of its own opens a block that runs to the next header.
///
/// Inside a block, `A.`-`D.` lines are options, lines before the first
/// option form the stem, and any other line after an option continues it.
pub fn parse_header_blocks(text: &str) -> Vec<QuestionRecord> {
    let mut records = Vec::new();
    let mut current: Option<(u32, Vec<&str>)> = None;

    for line in text.lines() {
        if let Some(caps) = BLOCK_HEADER.captures(line.trim()) {
            if let Some((number, body)) = current.take() {
                records.extend(build_block(number, &body));
            }
            current = parse_number(&caps[1]).map(|n| (n, Vec::new()));
            continue;
        }
        if let Some((_, body)) = current.as_mut() {
            body.push(line);
        }
    }

    if let Some((number, body)) = current {
        records.extend(build_block(number, &body));
    }
    records
}

fn build_block(number: u32, lines: &[&str]) -> Option<QuestionRecord> {
    let mut stem: Vec<&str> = Vec::new();
    let mut options: Vec<String> = Vec::new();

    for line in lines.iter().map(|l| l.trim()).filter(|l| !l.is_empty()) {
        if let Some(caps) = OPTION_LINE.captures(line) {
            options.push(format!("{}. {}", &caps[1], caps[2].trim()));
        } else if let Some(option) = options.last_mut() {
            option.push(' ');
            option.push_str(line);
        } else {
            stem.push(line);
        }
    }

    let stem = stem.join(" ");
    let text = match (stem.is_empty(), options.is_empty()) {
        (true, true) => return None,
        (false, true) => stem,
        (true, false) => options.join("\n"),
        (false, false) => format!("{stem}\n\n{}", options.join("\n")),
    };
    Some(QuestionRecord::new(number, text))
}

/// One scan over `<n>.`, `<n>:` or `<n>)` line starts; each question runs to
/// the next start, with whitespace runs collapsed.
pub fn parse_numbered_lines(text: &str) -> Vec<QuestionRecord> {
    split_numbered_blocks(text, &QUESTION_START)
        .into_iter()
        .map(|(number, text)| QuestionRecord::new(number, text))
        .collect()
}

/// Walk lines, opening a question at each numbered line and appending
/// every other non-blank line to the open one.
pub fn parse_line_by_line(text: &str) -> Vec<QuestionRecord> {
    accumulate_numbered_lines(text, &QUESTION_LINE)
        .into_iter()
        .map(|(number, text)| QuestionRecord::new(number, text))
        .collect()
}

// ---------------------------------------------------------------------------
// Numbered-text scanning shared with the answer-key parser
// ---------------------------------------------------------------------------

/// Parse a captured question number. Zero and overflowing numbers are rejected.
pub(crate) fn parse_number(digits: &str) -> Option<u32> {
    digits.parse::<u32>().ok().filter(|&n| n > 0)
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split `text` at every match of `start` (whose first group is the number).
/// Each body runs from the end of its match to the start of the next one.
pub(crate) fn split_numbered_blocks(text: &str, start: &Regex) -> Vec<(u32, String)> {
    let starts: Vec<(Option<u32>, usize, usize)> = start
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let number = caps.get(1).and_then(|m| parse_number(m.as_str()));
            Some((number, whole.start(), whole.end()))
        })
        .collect();

    starts
        .iter()
        .enumerate()
        .filter_map(|(i, &(number, _, body_start))| {
            let body_end = starts.get(i + 1).map_or(text.len(), |&(_, next, _)| next);
            let body = collapse_whitespace(&text[body_start..body_end]);
            match number {
                Some(n) if !body.is_empty() => Some((n, body)),
                _ => None,
            }
        })
        .collect()
}

/// Accumulate numbered records line by line. `line_pattern` is matched
/// against trimmed lines; group 1 is the number and group 2 the first
/// line of the body.
pub(crate) fn accumulate_numbered_lines(text: &str, line_pattern: &Regex) -> Vec<(u32, String)> {
    let mut records = Vec::new();
    let mut current: Option<(Option<u32>, String)> = None;

    let mut flush = |current: Option<(Option<u32>, String)>| {
        if let Some((Some(number), body)) = current {
            let body = body.trim();
            if !body.is_empty() {
                records.push((number, body.to_string()));
            }
        }
    };

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(caps) = line_pattern.captures(line) {
            flush(current.take());
            current = Some((parse_number(&caps[1]), caps[2].to_string()));
        } else if let Some((_, body)) = current.as_mut() {
            body.push(' ');
            body.push_str(line);
        }
    }
    flush(current);

    records
}

#[cfg(test)]
mod tests {
    use super::*;

    const MCQ_PAPER: &str = "\
General Aptitude Test
Q1
What is 4 x 5?
A. 20
B. 25
C. 9
D. 45
Q2
Which word is the odd one
out of the list below?
A. Apple
B. Mango
C. Carrot
which grows underground
D. Banana
";

    #[test]
    fn header_blocks_split_stem_and_options() {
        let questions = parse_questions(MCQ_PAPER);
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].number, 1);
        assert_eq!(
            questions[0].text,
            "What is 4 x 5?\n\nA. 20\nB. 25\nC. 9\nD. 45"
        );
        assert_eq!(
            questions[1].text,
            "Which word is the odd one out of the list below?\n\n\
             A. Apple\nB. Mango\nC. Carrot which grows underground\nD. Banana"
        );
    }

    #[test]
    fn header_blocks_number_follows_header() {
        let text = "Q7\nFirst\nQ3\nSecond\nQ12\nThird";
        let numbers: Vec<u32> = parse_questions(text).iter().map(|q| q.number).collect();
        assert_eq!(numbers, vec![7, 3, 12]);
    }

    #[test]
    fn header_blocks_skip_empty_blocks() {
        let text = "Q1\n\nQ2\nOnly this one has text";
        let questions = parse_header_blocks(text);
        assert_eq!(questions, vec![QuestionRecord::new(2, "Only this one has text")]);
    }

    #[test]
    fn header_blocks_keep_duplicate_option_letters() {
        let text = "Q1\nPick one\nA. first\nA. again";
        let questions = parse_header_blocks(text);
        assert_eq!(questions[0].text, "Pick one\n\nA. first\nA. again");
    }

    #[test]
    fn header_blocks_consume_numbered_lines() {
        // Numbered lines inside a block belong to the block, not to a new question.
        let text = "Q1\nStatements:\n1. All cats are animals\n2. Some animals fly\nA. Only 1\nB. Both";
        let questions = parse_questions(text);
        assert_eq!(questions.len(), 1);
        assert!(questions[0].text.starts_with(
            "Statements: 1. All cats are animals 2. Some animals fly\n\n"
        ));
    }

    #[test]
    fn numbered_lines_collapse_whitespace() {
        let text = "1. What is the capital\n   of France?\n2) Name the largest   planet.\n3: Define osmosis.";
        let result = parse_questions_detailed(text);
        assert_eq!(result.strategy, Some("numbered-lines"));
        assert_eq!(
            result.output,
            vec![
                QuestionRecord::new(1, "What is the capital of France?"),
                QuestionRecord::new(2, "Name the largest planet."),
                QuestionRecord::new(3, "Define osmosis."),
            ]
        );
    }

    #[test]
    fn numbered_lines_accept_question_prefix() {
        let text = "Question 4. Explain gravity.\nQ5: Explain light.";
        let questions = parse_numbered_lines(text);
        assert_eq!(questions[0], QuestionRecord::new(4, "Explain gravity."));
        assert_eq!(questions[1], QuestionRecord::new(5, "Explain light."));
    }

    #[test]
    fn numbered_lines_skip_empty_bodies() {
        let text = "1.\n2. Real question";
        assert_eq!(
            parse_numbered_lines(text),
            vec![QuestionRecord::new(2, "Real question")]
        );
    }

    #[test]
    fn line_by_line_appends_continuations() {
        let text = "preamble ignored\n1. First line\ncontinues here\n\n2. Second";
        assert_eq!(
            parse_line_by_line(text),
            vec![
                QuestionRecord::new(1, "First line continues here"),
                QuestionRecord::new(2, "Second"),
            ]
        );
    }

    #[test]
    fn unrecognized_text_is_empty() {
        let result = parse_questions_detailed("Just a paragraph of prose.\nNothing numbered.");
        assert!(result.output.is_empty());
        assert_eq!(result.strategy, None);
    }

    #[test]
    fn zero_is_not_a_question_number() {
        assert!(parse_questions("0. Not a question").is_empty());
    }

    #[test]
    fn parsing_is_deterministic() {
        assert_eq!(parse_questions(MCQ_PAPER), parse_questions(MCQ_PAPER));
    }
}

//! Core data model types for sheetgrade.
//!
//! Records recovered from extracted text, the answer maps built from them,
//! and the per-answer matching outcome. Everything here is transient: built,
//! consumed and dropped inside one call.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Option letters a multiple-choice answer may use.
pub const OPTION_LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];

/// Returns `true` if `c` is one of the multiple-choice option letters.
pub fn is_option_letter(c: char) -> bool {
    OPTION_LETTERS.contains(&c)
}

/// A numbered question recovered from a question paper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// Question number as printed on the paper.
    pub number: u32,
    /// Question text; multiple-choice options follow the stem after a blank line.
    pub text: String,
}

impl QuestionRecord {
    pub fn new(number: u32, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }
}

/// Question number to raw answer text, exactly as captured.
pub type AnswerSet = BTreeMap<u32, String>;

/// The three parallel answer keys of a multi-set paper.
pub type MultiSetAnswers = BTreeMap<SetLabel, AnswerSet>;

/// One of the parallel variants of a question paper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SetLabel {
    #[serde(rename = "SET A")]
    A,
    #[serde(rename = "SET B")]
    B,
    #[serde(rename = "SET C")]
    C,
}

impl SetLabel {
    /// All labels, in column order.
    pub const ALL: [SetLabel; 3] = [SetLabel::A, SetLabel::B, SetLabel::C];

    /// The canonical label, e.g. `"SET A"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SetLabel::A => "SET A",
            SetLabel::B => "SET B",
            SetLabel::C => "SET C",
        }
    }

    /// Spellings that mark this set in a table header, upper-cased.
    pub(crate) fn markers(&self) -> [&'static str; 2] {
        match self {
            SetLabel::A => ["SET A", "SETA"],
            SetLabel::B => ["SET B", "SETB"],
            SetLabel::C => ["SET C", "SETC"],
        }
    }

    /// Returns `true` if the upper-cased `line` names this set.
    pub(crate) fn appears_in(&self, upper_line: &str) -> bool {
        self.markers().iter().any(|m| upper_line.contains(m))
    }
}

impl fmt::Display for SetLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SetLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        let letter = upper
            .strip_prefix("SET")
            .map(str::trim_start)
            .unwrap_or(upper.as_str());
        match letter {
            "A" => Ok(SetLabel::A),
            "B" => Ok(SetLabel::B),
            "C" => Ok(SetLabel::C),
            _ => Err(format!("unknown set label: {}", s.trim())),
        }
    }
}

/// One answer submitted by a test-taker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateAnswer {
    pub question_number: u32,
    pub answer_text: String,
}

impl CandidateAnswer {
    pub fn new(question_number: u32, answer_text: impl Into<String>) -> Self {
        Self {
            question_number,
            answer_text: answer_text.into(),
        }
    }
}

/// How a candidate answer is compared to the correct one.
///
/// Unknown method names fall back to [`MatchMethod::Fuzzy`] rather than
/// failing, both when parsed from a string and when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MatchMethod {
    /// Trimmed equality, case-insensitive unless configured otherwise.
    Exact,
    /// Edit-distance similarity ratio against a threshold.
    #[default]
    Fuzzy,
    /// Share of the correct answer's keywords found in the candidate.
    Keyword,
}

impl MatchMethod {
    /// Threshold used when none (or an out-of-range one) is supplied.
    pub fn default_threshold(&self) -> f64 {
        match self {
            MatchMethod::Exact => 1.0,
            MatchMethod::Fuzzy => 0.75,
            MatchMethod::Keyword => 0.6,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMethod::Exact => "exact",
            MatchMethod::Fuzzy => "fuzzy",
            MatchMethod::Keyword => "keyword",
        }
    }
}

impl fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for MatchMethod {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" => MatchMethod::Exact,
            "keyword" => MatchMethod::Keyword,
            _ => MatchMethod::Fuzzy,
        }
    }
}

impl From<String> for MatchMethod {
    fn from(s: String) -> Self {
        MatchMethod::from(s.as_str())
    }
}

impl From<MatchMethod> for String {
    fn from(m: MatchMethod) -> Self {
        m.as_str().to_string()
    }
}

/// Outcome of comparing one candidate answer to the correct answer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub is_correct: bool,
    /// Closeness in `[0, 1]`; `1.0` or `0.0` for all-or-nothing comparisons.
    pub similarity_score: f64,
}

impl MatchResult {
    /// An all-or-nothing result.
    pub fn binary(is_correct: bool) -> Self {
        Self {
            is_correct,
            similarity_score: if is_correct { 1.0 } else { 0.0 },
        }
    }

    /// A scored result; the score is clamped into `[0, 1]`.
    pub fn scored(score: f64, threshold: f64) -> Self {
        let score = if score.is_nan() {
            0.0
        } else {
            score.clamp(0.0, 1.0)
        };
        Self {
            is_correct: score >= threshold,
            similarity_score: score,
        }
    }
}

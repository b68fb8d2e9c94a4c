//! sheetgrade-core: answer-sheet parsing and grading.
//!
//! This crate turns loosely structured text extracted from question papers
//! and answer keys into numbered records, and scores submitted answers
//! against those records. Every entry point is a pure function of its
//! inputs: no I/O happens here apart from the optional config loader.

pub mod answers;
pub mod cascade;
pub mod config;
pub mod error;
pub mod matching;
pub mod model;
pub mod multi_set;
pub mod questions;
pub mod report;
pub mod validate;

pub use answers::{cleanup_answer, normalize_answer_key, parse_answers};
pub use config::GradingConfig;
pub use error::ParseError;
pub use matching::{grade_answer, grade_answer_with, similarity};
pub use model::{
    AnswerSet, CandidateAnswer, MatchMethod, MatchResult, MultiSetAnswers, QuestionRecord,
    SetLabel,
};
pub use multi_set::{extract_set, parse_multi_set};
pub use questions::parse_questions;
pub use report::{grade_test, GradeReport, GradedAnswer};
pub use validate::{validate_answer_key, ValidationWarning};

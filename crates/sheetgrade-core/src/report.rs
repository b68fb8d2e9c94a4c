//! Test grading and the grade report.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::GradingConfig;
use crate::matching::grade_answer_with;
use crate::model::{AnswerSet, CandidateAnswer, MatchMethod};

/// The graded outcome of one submitted test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeReport {
    /// Questions in the answer key, whether or not they were answered.
    pub total_questions: usize,
    pub correct_count: usize,
    /// `100 * correct_count / total_questions`, or `0` for an empty key.
    pub score_percentage: f64,
    pub passed: bool,
    /// Graded answers in submission order.
    pub per_question: Vec<GradedAnswer>,
    /// Method the report was graded with.
    pub method: MatchMethod,
    /// Threshold the matching engine applied.
    pub threshold: f64,
    /// Percentage needed to pass.
    pub passing_percentage: f64,
}

/// One graded answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradedAnswer {
    pub question_number: u32,
    pub candidate_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
    pub similarity_score: f64,
}

/// Grade a submission against an answer key.
///
/// Answers to questions missing from the key are skipped. If a question is
/// answered more than once, the last answer replaces the earlier one in
/// place. The denominator is always the size of the key, so unanswered
/// questions count as wrong.
pub fn grade_test(
    candidate_answers: &[CandidateAnswer],
    correct_answers: &AnswerSet,
    config: &GradingConfig,
) -> GradeReport {
    let mut per_question: Vec<GradedAnswer> = Vec::with_capacity(candidate_answers.len());
    let mut positions: HashMap<u32, usize> = HashMap::new();

    for answer in candidate_answers {
        let Some(correct) = correct_answers.get(&answer.question_number) else {
            tracing::debug!(
                question = answer.question_number,
                "skipping answer to question not in the key"
            );
            continue;
        };

        let result = grade_answer_with(&answer.answer_text, correct, config);
        let graded = GradedAnswer {
            question_number: answer.question_number,
            candidate_answer: answer.answer_text.clone(),
            correct_answer: correct.clone(),
            is_correct: result.is_correct,
            similarity_score: result.similarity_score,
        };

        match positions.get(&answer.question_number) {
            Some(&i) => per_question[i] = graded,
            None => {
                positions.insert(answer.question_number, per_question.len());
                per_question.push(graded);
            }
        }
    }

    let total_questions = correct_answers.len();
    let correct_count = per_question.iter().filter(|g| g.is_correct).count();
    let score_percentage = if total_questions == 0 {
        0.0
    } else {
        100.0 * correct_count as f64 / total_questions as f64
    };
    let passing_percentage = config.effective_passing_percentage();
    let passed = score_percentage >= passing_percentage;

    tracing::info!(
        total_questions,
        correct_count,
        score_percentage,
        passed,
        "graded submission"
    );

    GradeReport {
        total_questions,
        correct_count,
        score_percentage,
        passed,
        per_question,
        method: config.method,
        threshold: config.effective_threshold(),
        passing_percentage,
    }
}

impl GradeReport {
    /// Questions in the key that received no answer.
    pub fn unanswered(&self, correct_answers: &AnswerSet) -> Vec<u32> {
        correct_answers
            .keys()
            .copied()
            .filter(|n| !self.per_question.iter().any(|g| g.question_number == *n))
            .collect()
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: GradeReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(entries: &[(u32, &str)]) -> AnswerSet {
        entries.iter().map(|&(n, a)| (n, a.to_string())).collect()
    }

    fn submit(entries: &[(u32, &str)]) -> Vec<CandidateAnswer> {
        entries
            .iter()
            .map(|&(n, a)| CandidateAnswer::new(n, a))
            .collect()
    }

    #[test]
    fn end_to_end_fuzzy_grading() {
        let correct = key(&[(1, "A"), (2, "Paris"), (3, "B")]);
        let answers = submit(&[(1, "a"), (2, "paris"), (3, "C")]);
        let config = GradingConfig::new(MatchMethod::Fuzzy, 0.75, 60.0);

        let report = grade_test(&answers, &correct, &config);
        assert_eq!(report.total_questions, 3);
        assert_eq!(report.correct_count, 2);
        assert!((report.score_percentage - 66.666_666).abs() < 1e-3);
        assert!(report.passed);

        let flags: Vec<bool> = report.per_question.iter().map(|g| g.is_correct).collect();
        assert_eq!(flags, vec![true, true, false]);
        assert_eq!(report.per_question[1].similarity_score, 1.0);
    }

    #[test]
    fn unknown_questions_are_skipped() {
        let correct = key(&[(1, "A"), (2, "B")]);
        let answers = submit(&[(9, "A"), (1, "A")]);
        let report = grade_test(&answers, &correct, &GradingConfig::default());
        assert_eq!(report.per_question.len(), 1);
        assert_eq!(report.total_questions, 2);
        assert_eq!(report.score_percentage, 50.0);
        assert!(!report.passed);
        assert_eq!(report.unanswered(&correct), vec![2]);
    }

    #[test]
    fn empty_key_scores_zero() {
        let report = grade_test(&submit(&[(1, "A")]), &AnswerSet::new(), &GradingConfig::default());
        assert_eq!(report.total_questions, 0);
        assert_eq!(report.score_percentage, 0.0);
        assert!(report.per_question.is_empty());
    }

    #[test]
    fn pass_boundary_is_inclusive() {
        let correct = key(&[(1, "A"), (2, "B"), (3, "C"), (4, "D"), (5, "A")]);
        let answers = submit(&[(1, "A"), (2, "B"), (3, "C"), (4, "A"), (5, "B")]);
        let report = grade_test(&answers, &correct, &GradingConfig::default());
        assert_eq!(report.score_percentage, 60.0);
        assert!(report.passed);
    }

    #[test]
    fn pass_mark_above_hundred_never_passes() {
        let config = GradingConfig::new(MatchMethod::Fuzzy, 0.75, 150.0);
        let report = grade_test(&submit(&[(1, "A")]), &key(&[(1, "A")]), &config);
        assert_eq!(report.score_percentage, 100.0);
        assert!(!report.passed);
        assert_eq!(report.passing_percentage, 150.0);
    }

    #[test]
    fn repeated_answer_replaces_earlier() {
        let correct = key(&[(1, "A"), (2, "B")]);
        let answers = submit(&[(1, "A"), (2, "B"), (1, "C")]);
        let report = grade_test(&answers, &correct, &GradingConfig::default());
        assert_eq!(report.per_question.len(), 2);
        assert_eq!(report.per_question[0].candidate_answer, "C");
        assert_eq!(report.correct_count, 1);
        assert!(report.score_percentage <= 100.0);
    }

    #[test]
    fn json_roundtrip() {
        let correct = key(&[(1, "A")]);
        let report = grade_test(&submit(&[(1, "A")]), &correct, &GradingConfig::default());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.json");

        report.save_json(&path).unwrap();
        let loaded = GradeReport::load_json(&path).unwrap();
        assert_eq!(loaded, report);
    }
}

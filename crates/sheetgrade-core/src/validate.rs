//! Consistency checks between a parsed question paper and its answer key.

use std::collections::{BTreeSet, HashSet};

use crate::model::{AnswerSet, QuestionRecord};

/// A warning from answer-key validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The question number (if applicable).
    pub question_number: Option<u32>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn for_question(number: u32, message: impl Into<String>) -> Self {
        Self {
            question_number: Some(number),
            message: message.into(),
        }
    }

    fn general(message: impl Into<String>) -> Self {
        Self {
            question_number: None,
            message: message.into(),
        }
    }
}

/// Check a question list and answer key for common issues.
pub fn validate_answer_key(
    questions: &[QuestionRecord],
    answers: &AnswerSet,
) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if questions.is_empty() {
        warnings.push(ValidationWarning::general(
            "no questions recognized, check formatting",
        ));
    }
    if answers.is_empty() {
        warnings.push(ValidationWarning::general(
            "no answers recognized, check formatting",
        ));
    }

    let mut seen = HashSet::new();
    let mut duplicates = BTreeSet::new();
    for q in questions {
        if !seen.insert(q.number) {
            duplicates.insert(q.number);
        }
    }
    for number in duplicates {
        warnings.push(ValidationWarning::for_question(
            number,
            format!("duplicate question number: {number}"),
        ));
    }

    let question_numbers: BTreeSet<u32> = seen.into_iter().collect();
    for number in &question_numbers {
        if !answers.contains_key(number) {
            warnings.push(ValidationWarning::for_question(
                *number,
                "question has no answer in the key",
            ));
        }
    }

    for number in answers.keys() {
        if !question_numbers.contains(number) {
            warnings.push(ValidationWarning::for_question(
                *number,
                "orphaned answer: no matching question",
            ));
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consistent_key_has_no_warnings() {
        let questions = vec![QuestionRecord::new(1, "a"), QuestionRecord::new(2, "b")];
        let answers = AnswerSet::from([(1, "A".into()), (2, "B".into())]);
        assert!(validate_answer_key(&questions, &answers).is_empty());
    }

    #[test]
    fn reports_missing_orphaned_and_duplicate() {
        let questions = vec![
            QuestionRecord::new(1, "a"),
            QuestionRecord::new(2, "b"),
            QuestionRecord::new(2, "b again"),
        ];
        let answers = AnswerSet::from([(1, "A".into()), (7, "C".into())]);
        let warnings = validate_answer_key(&questions, &answers);

        assert!(warnings
            .iter()
            .any(|w| w.question_number == Some(2) && w.message.contains("duplicate")));
        assert!(warnings
            .iter()
            .any(|w| w.question_number == Some(2) && w.message.contains("no answer")));
        assert!(warnings
            .iter()
            .any(|w| w.question_number == Some(7) && w.message.contains("orphaned")));
        assert_eq!(warnings.len(), 3);
    }

    #[test]
    fn empty_inputs_are_flagged() {
        let warnings = validate_answer_key(&[], &AnswerSet::new());
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().all(|w| w.question_number.is_none()));
    }
}

//! Answer matching engine.
//!
//! Decides whether one candidate answer matches the correct answer. A
//! correct answer that is a single option letter is always compared as a
//! multiple-choice answer, whatever method was requested; otherwise the
//! requested method (exact, fuzzy or keyword) applies.

use std::collections::HashSet;

use crate::config::GradingConfig;
use crate::model::{is_option_letter, MatchMethod, MatchResult};

/// Words ignored when extracting keywords from a correct answer.
pub const STOP_WORDS: [&str; 17] = [
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "is", "are", "was",
    "were", "be", "been",
];

/// Grade one answer with the given method and threshold.
///
/// Exact matching is case-insensitive here; use [`grade_answer_with`] to
/// change that.
///
/// A `threshold` outside `[0, 1]` falls back to the method's default.
pub fn grade_answer(
    candidate: &str,
    correct: &str,
    method: MatchMethod,
    threshold: f64,
) -> MatchResult {
    let config = GradingConfig {
        method,
        threshold: Some(threshold),
        ..GradingConfig::default()
    };
    grade_answer_with(candidate, correct, &config)
}

/// Grade one answer using every setting in `config`.
pub fn grade_answer_with(candidate: &str, correct: &str, config: &GradingConfig) -> MatchResult {
    if let Some(letter) = option_letter(correct) {
        let given = candidate.trim().to_uppercase();
        return MatchResult::binary(given.chars().eq(std::iter::once(letter)));
    }

    let threshold = config.effective_threshold();
    match config.method {
        MatchMethod::Exact => {
            MatchResult::binary(exact_match(candidate, correct, config.case_sensitive))
        }
        MatchMethod::Fuzzy => fuzzy_match(candidate, correct, threshold),
        MatchMethod::Keyword => keyword_match(candidate, correct, threshold),
    }
}

/// The option letter a correct answer consists of, if it is exactly one.
fn option_letter(correct: &str) -> Option<char> {
    let upper = correct.trim().to_uppercase();
    let mut chars = upper.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if is_option_letter(c) => Some(c),
        _ => None,
    }
}

/// Trimmed equality, optionally ignoring case.
pub fn exact_match(candidate: &str, correct: &str, case_sensitive: bool) -> bool {
    let (candidate, correct) = (candidate.trim(), correct.trim());
    if case_sensitive {
        candidate == correct
    } else {
        candidate.to_lowercase() == correct.to_lowercase()
    }
}

fn fuzzy_match(candidate: &str, correct: &str, threshold: f64) -> MatchResult {
    let candidate = normalize(candidate);
    let correct = normalize(correct);
    if candidate.is_empty() || correct.is_empty() {
        return MatchResult::binary(false);
    }
    MatchResult::scored(similarity(&candidate, &correct), threshold)
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Edit-distance similarity ratio of two strings, after lower-casing and
/// trimming both.
///
/// The ratio is `(len_a + len_b - distance) / (len_a + len_b)`, where
/// insertions and deletions cost 1 and substitutions cost 2, so identical
/// strings score `1.0` and strings with nothing in common score `0.0`.
/// If either string is empty the ratio is `0.0`.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = normalize(a).chars().collect();
    let b: Vec<char> = normalize(b).chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let total = a.len() + b.len();
    let distance = weighted_edit_distance(&a, &b);
    (total - distance) as f64 / total as f64
}

fn weighted_edit_distance(a: &[char], b: &[char]) -> usize {
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + if ca == cb { 0 } else { 2 };
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

fn keyword_match(candidate: &str, correct: &str, threshold: f64) -> MatchResult {
    let score = keyword_score(candidate, correct);
    match score {
        Some(score) => MatchResult::scored(score, threshold),
        None => MatchResult::binary(false),
    }
}

/// Share of the correct answer's keywords present in the candidate.
///
/// Returns `None` when the correct answer has no keywords once stop words
/// are removed.
pub fn keyword_score(candidate: &str, correct: &str) -> Option<f64> {
    let keywords: HashSet<String> = tokenize(correct)
        .filter(|t| !STOP_WORDS.contains(&t.as_str()))
        .collect();
    if keywords.is_empty() {
        return None;
    }

    let given: HashSet<String> = tokenize(candidate).collect();
    let found = keywords.intersection(&given).count();
    Some(found as f64 / keywords.len() as f64)
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn mcq_overrides_requested_method() {
        for method in [MatchMethod::Exact, MatchMethod::Fuzzy, MatchMethod::Keyword] {
            assert_eq!(grade_answer(" a ", "A", method, 0.75), MatchResult::binary(true));
            assert_eq!(grade_answer("B", " a", method, 0.0), MatchResult::binary(false));
        }
    }

    #[test]
    fn mcq_requires_exact_letter() {
        // Fuzzy would give "A." a high score against "A"; the letter rule does not.
        assert!(!grade_answer("A.", "A", MatchMethod::Fuzzy, 0.1).is_correct);
        assert!(!grade_answer("AB", "A", MatchMethod::Fuzzy, 0.1).is_correct);
    }

    #[test]
    fn letter_outside_options_is_not_mcq() {
        let result = grade_answer("e", "E", MatchMethod::Fuzzy, 0.75);
        assert!(result.is_correct);
        assert_eq!(result.similarity_score, 1.0);
        assert!(grade_answer("e", "E", MatchMethod::Exact, 0.75).is_correct);
    }

    #[test]
    fn exact_ignores_case_by_default() {
        assert!(grade_answer("  PARIS ", "paris", MatchMethod::Exact, 0.75).is_correct);
        assert!(!grade_answer("Pariss", "Paris", MatchMethod::Exact, 0.75).is_correct);
    }

    #[test]
    fn exact_can_be_case_sensitive() {
        let config = GradingConfig {
            method: MatchMethod::Exact,
            case_sensitive: true,
            ..GradingConfig::default()
        };
        assert!(!grade_answer_with("paris", "Paris", &config).is_correct);
        assert!(grade_answer_with(" Paris", "Paris ", &config).is_correct);
    }

    #[test]
    fn similarity_ratio_values() {
        assert_eq!(similarity("Paris", "paris"), 1.0);
        assert!(approx(similarity("cat", "bat"), 4.0 / 6.0));
        assert!(approx(similarity("abc", "abcd"), 6.0 / 7.0));
        assert_eq!(similarity("abc", "xyz"), 0.0);
        assert_eq!(similarity("", "abc"), 0.0);
        assert_eq!(similarity("   ", "   "), 0.0);
    }

    #[test]
    fn fuzzy_threshold() {
        let close = grade_answer("photosynthesys", "Photosynthesis", MatchMethod::Fuzzy, 0.75);
        assert!(close.is_correct);
        assert!(close.similarity_score < 1.0);

        let far = grade_answer("respiration", "Photosynthesis", MatchMethod::Fuzzy, 0.75);
        assert!(!far.is_correct);
    }

    #[test]
    fn fuzzy_empty_never_matches() {
        let result = grade_answer("", "", MatchMethod::Fuzzy, 0.0);
        assert_eq!(result, MatchResult::binary(false));
    }

    #[test]
    fn keyword_score_ignores_stop_words() {
        let score = keyword_score(
            "Plants make food using sunlight",
            "The plant makes food from sunlight and water",
        )
        .unwrap();
        // keywords: plant, makes, food, from, sunlight, water -> food, sunlight found
        assert!(approx(score, 2.0 / 6.0));
    }

    #[test]
    fn keyword_threshold() {
        let result = grade_answer(
            "mitochondria produce energy",
            "Mitochondria produce energy for the cell",
            MatchMethod::Keyword,
            0.6,
        );
        // keywords: mitochondria, produce, energy, cell -> 3 of 4
        assert!(approx(result.similarity_score, 0.75));
        assert!(result.is_correct);
    }

    #[test]
    fn keyword_only_stop_words_scores_zero() {
        assert_eq!(keyword_score("was", "is was were"), None);
        let result = grade_answer("was", "is was were", MatchMethod::Keyword, 0.6);
        assert_eq!(result, MatchResult::binary(false));

        let result = grade_answer("the", "The and or", MatchMethod::Keyword, 0.0);
        assert_eq!(result, MatchResult::binary(false));
    }

    #[test]
    fn out_of_range_threshold_uses_default() {
        // 0.75 similarity meets the fuzzy default; 1.5 would reject everything.
        let result = grade_answer("abcd", "abce", MatchMethod::Fuzzy, 1.5);
        assert!(approx(result.similarity_score, 6.0 / 8.0));
        assert!(result.is_correct);
        assert!(grade_answer("abcd", "abce", MatchMethod::Fuzzy, f64::NAN).is_correct);
    }
}

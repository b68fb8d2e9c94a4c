//! Markdown rendering, for pasting a result into an issue or a chat.

use sheetgrade_core::report::GradeReport;

/// Format the grade report as markdown.
pub fn to_markdown(report: &GradeReport) -> String {
    let mut md = String::new();

    md.push_str(&format!(
        "**Result:** {} ({}/{} correct, {:.1}%, pass mark {:.1}%)\n\n",
        if report.passed { "PASSED" } else { "FAILED" },
        report.correct_count,
        report.total_questions,
        report.score_percentage,
        report.passing_percentage
    ));
    md.push_str(&format!(
        "Graded with `{}` matching, threshold {:.2}.\n\n",
        report.method, report.threshold
    ));

    if report.per_question.is_empty() {
        md.push_str("_No answers were graded._\n");
        return md;
    }

    md.push_str("| Question | Submitted | Expected | Similarity | Result |\n");
    md.push_str("|----------|-----------|----------|------------|--------|\n");
    for answer in &report.per_question {
        md.push_str(&format!(
            "| {} | {} | {} | {:.2} | {} |\n",
            answer.question_number,
            cell(&answer.candidate_answer),
            cell(&answer.correct_answer),
            answer.similarity_score,
            if answer.is_correct { "✓" } else { "✗" }
        ));
    }

    md
}

/// Keep multi-line answers and pipes from breaking the table.
fn cell(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetgrade_core::model::{AnswerSet, CandidateAnswer};
    use sheetgrade_core::{grade_test, GradingConfig};

    #[test]
    fn markdown_output() {
        let key: AnswerSet = [(1, "C".to_string()), (2, "Mitochondria".to_string())]
            .into_iter()
            .collect();
        let answers = vec![
            CandidateAnswer::new(1, "c"),
            CandidateAnswer::new(2, "mitochondria"),
        ];
        let report = grade_test(&answers, &key, &GradingConfig::default());
        let md = to_markdown(&report);

        assert!(md.contains("**Result:** PASSED (2/2 correct, 100.0%"));
        assert!(md.contains("`fuzzy`"));
        assert!(md.contains("| 1 | c | C | 1.00 | ✓ |"));
        assert!(md.contains("| 2 | mitochondria | Mitochondria | 1.00 | ✓ |"));
    }

    #[test]
    fn pipes_and_newlines_do_not_break_rows() {
        let key: AnswerSet = [(1, "a | b\nc".to_string())].into_iter().collect();
        let answers = vec![CandidateAnswer::new(1, "x")];
        let report = grade_test(&answers, &key, &GradingConfig::default());
        let md = to_markdown(&report);

        assert!(md.contains("| a \\| b c |"));
        assert!(md.contains("**Result:** FAILED"));
    }

    #[test]
    fn empty_report_says_so() {
        let report = grade_test(&[], &AnswerSet::new(), &GradingConfig::default());
        let md = to_markdown(&report);
        assert!(md.contains("_No answers were graded._"));
        assert!(!md.contains("| Question |"));
    }
}

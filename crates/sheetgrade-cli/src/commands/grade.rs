//! The `sheetgrade grade` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use comfy_table::{Cell, Table};

use sheetgrade_core::answers::parse_answers_detailed;
use sheetgrade_core::config::load_config_from;
use sheetgrade_core::model::{AnswerSet, CandidateAnswer, MatchMethod};
use sheetgrade_core::{extract_set, grade_test, parse_answers, parse_multi_set, GradeReport};
use sheetgrade_report::{to_markdown, write_html_report};

use super::{read_input, NOTHING_RECOGNIZED};

const DEFAULT_SET: &str = "SET A";

#[derive(Args)]
pub struct GradeArgs {
    /// Answer key text
    #[arg(long)]
    key: PathBuf,

    /// Submitted answers: JSON list of {question_number, answer_text}, or
    /// text in any answer-key layout
    #[arg(long)]
    submission: PathBuf,

    /// Treat the key as a SET A / SET B / SET C table
    #[arg(long)]
    multi_set: bool,

    /// Which set the submission was written against [default: SET A]
    #[arg(long, requires = "multi_set")]
    set: Option<String>,

    /// Matching method: exact, fuzzy, keyword
    #[arg(long)]
    method: Option<String>,

    /// Acceptance threshold between 0 and 1
    #[arg(long)]
    threshold: Option<f64>,

    /// Score percentage needed to pass
    #[arg(long)]
    passing_percentage: Option<f64>,

    /// Distinguish case in exact matching
    #[arg(long)]
    case_sensitive: bool,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format: text, json, html, markdown
    #[arg(long, default_value = "text")]
    format: String,

    /// Write the report here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

pub fn execute(args: GradeArgs) -> Result<()> {
    let mut config = load_config_from(args.config.as_deref())?;
    if let Some(method) = &args.method {
        config.method = MatchMethod::from(method.as_str());
    }
    if let Some(threshold) = args.threshold {
        config.threshold = Some(threshold);
    }
    if let Some(passing) = args.passing_percentage {
        config.passing_percentage = passing;
    }
    if args.case_sensitive {
        config.case_sensitive = true;
    }

    let set = args
        .multi_set
        .then(|| args.set.as_deref().unwrap_or(DEFAULT_SET));
    let key = load_key(&args.key, set)?;
    let submission = load_submission(&args.submission)?;

    let report = grade_test(&submission, &key, &config);
    let unanswered = report.unanswered(&key);
    if !unanswered.is_empty() {
        tracing::info!(?unanswered, "questions without an answer count as wrong");
    }

    let title = format!(
        "Grade report: {}",
        args.submission
            .file_stem()
            .map(|s| s.to_string_lossy())
            .unwrap_or_default()
    );

    match args.format.as_str() {
        "json" => match &args.output {
            Some(path) => {
                report.save_json(path)?;
                eprintln!("Report written to {}", path.display());
            }
            None => println!("{}", serde_json::to_string_pretty(&report)?),
        },
        "html" => match &args.output {
            Some(path) => {
                write_html_report(&report, &title, path)?;
                eprintln!("Report written to {}", path.display());
            }
            None => println!("{}", sheetgrade_report::generate_html(&report, &title)),
        },
        "markdown" | "md" => emit(&to_markdown(&report), args.output.as_deref())?,
        "text" => emit(&render_text(&report, &unanswered), args.output.as_deref())?,
        other => anyhow::bail!("unknown format '{other}', expected text, json, html or markdown"),
    }

    Ok(())
}

fn load_key(path: &Path, set: Option<&str>) -> Result<AnswerSet> {
    let text = read_input(path)?;
    let key = match set {
        Some(label) => {
            let sets = parse_multi_set(&text)?;
            extract_set(&sets, label)?.clone()
        }
        None => parse_answers(&text),
    };
    anyhow::ensure!(!key.is_empty(), "answer key: {NOTHING_RECOGNIZED}");
    Ok(key)
}

fn load_submission(path: &Path) -> Result<Vec<CandidateAnswer>> {
    let text = read_input(path)?;
    let is_json = path.extension().is_some_and(|ext| ext == "json");
    let answers = if is_json {
        serde_json::from_str::<Vec<CandidateAnswer>>(&text)
            .with_context(|| format!("failed to parse submission {}", path.display()))?
    } else {
        let parsed = parse_answers_detailed(&text);
        if let Some(strategy) = parsed.strategy {
            eprintln!(
                "Submission: {} answer(s) recognized ({strategy})",
                parsed.output.len()
            );
        }
        parsed
            .output
            .into_iter()
            .map(|(number, answer)| CandidateAnswer::new(number, answer))
            .collect()
    };
    anyhow::ensure!(!answers.is_empty(), "submission: {NOTHING_RECOGNIZED}");
    Ok(answers)
}

fn emit(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, content)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Report written to {}", path.display());
        }
        None => println!("{content}"),
    }
    Ok(())
}

fn render_text(report: &GradeReport, unanswered: &[u32]) -> String {
    let mut table = Table::new();
    table.set_header(vec!["#", "Submitted", "Expected", "Similarity", "Result"]);
    for answer in &report.per_question {
        table.add_row(vec![
            Cell::new(answer.question_number),
            Cell::new(&answer.candidate_answer),
            Cell::new(&answer.correct_answer),
            Cell::new(format!("{:.2}", answer.similarity_score)),
            Cell::new(if answer.is_correct { "OK" } else { "WRONG" }),
        ]);
    }

    let mut out = format!("{table}\n");
    if !unanswered.is_empty() {
        let list: Vec<String> = unanswered.iter().map(|n| format!("Q{n}")).collect();
        out.push_str(&format!("Unanswered: {}\n", list.join(", ")));
    }
    out.push_str(&format!(
        "Score: {}/{} ({:.1}%), pass mark {:.1}%: {}",
        report.correct_count,
        report.total_questions,
        report.score_percentage,
        report.passing_percentage,
        if report.passed { "PASSED" } else { "FAILED" }
    ));
    out
}

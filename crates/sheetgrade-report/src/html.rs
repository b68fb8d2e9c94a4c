//! HTML report generator.
//!
//! Produces a single page with CSS and JS inlined so it can be mailed or
//! archived next to the submission it describes.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;

use sheetgrade_core::report::GradeReport;

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML page for a graded submission.
pub fn generate_html(report: &GradeReport, title: &str) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>sheetgrade: {}</title>\n",
        html_escape(title)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    html.push_str("<header>\n");
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(title)));
    html.push_str(&format!(
        "<p class=\"meta\">Method: <strong>{}</strong> | threshold {:.2} | pass mark {:.1}% | {}</p>\n",
        report.method,
        report.threshold,
        report.passing_percentage,
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Summary
    let verdict_class = if report.passed { "pass" } else { "fail" };
    let verdict = if report.passed { "PASSED" } else { "FAILED" };
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Summary</h2>\n");
    html.push_str("<table class=\"summary\">\n");
    html.push_str("<thead><tr><th>Questions</th><th>Correct</th><th>Score</th><th>Result</th></tr></thead>\n");
    html.push_str(&format!(
        "<tbody><tr><td>{}</td><td>{}</td><td>{:.1}%</td><td class=\"{}\">{}</td></tr></tbody>\n",
        report.total_questions,
        report.correct_count,
        report.score_percentage,
        verdict_class,
        verdict
    ));
    html.push_str("</table>\n");
    html.push_str(&score_bar(report.score_percentage, report.passing_percentage));
    html.push_str("</section>\n");

    // Per-question results
    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Answers</h2>\n");
    html.push_str("<table class=\"results-table\" id=\"results\">\n");
    html.push_str("<thead><tr><th onclick=\"sortTable(0)\">Question</th><th onclick=\"sortTable(1)\">Submitted</th><th onclick=\"sortTable(2)\">Expected</th><th onclick=\"sortTable(3)\">Similarity</th><th onclick=\"sortTable(4)\">Result</th></tr></thead>\n");
    html.push_str("<tbody>\n");

    for answer in &report.per_question {
        let class = if answer.is_correct { "pass" } else { "fail" };
        let text = if answer.is_correct { "OK" } else { "WRONG" };
        html.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{:.2}</td><td>{}</td></tr>\n",
            class,
            answer.question_number,
            html_escape(&answer.candidate_answer),
            html_escape(&answer.correct_answer),
            answer.similarity_score,
            text
        ));
    }

    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(report).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file, creating parent directories.
pub fn write_html_report(report: &GradeReport, title: &str, path: &Path) -> Result<()> {
    let html = generate_html(report, title);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write HTML report to {}", path.display()))?;
    Ok(())
}

/// Horizontal bar for the score with a marker at the pass mark.
fn score_bar(score: f64, passing: f64) -> String {
    let width = 400.0;
    let height = 24;
    let filled = (score.clamp(0.0, 100.0) / 100.0 * width) as usize;
    let mark = (passing.clamp(0.0, 100.0) / 100.0 * width) as usize;

    let color = if score >= passing {
        "#22c55e"
    } else if score >= passing / 2.0 {
        "#eab308"
    } else {
        "#ef4444"
    };

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        width as usize + 60,
        height + 8
    );
    svg.push_str(&format!(
        "  <rect x=\"0\" y=\"4\" width=\"{}\" height=\"{}\" fill=\"var(--border)\" rx=\"4\"/>\n",
        width as usize, height
    ));
    svg.push_str(&format!(
        "  <rect x=\"0\" y=\"4\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
        filled, height, color
    ));
    svg.push_str(&format!(
        "  <line x1=\"{mark}\" y1=\"0\" x2=\"{mark}\" y2=\"{}\" stroke=\"currentColor\" stroke-width=\"2\"/>\n",
        height + 8
    ));
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{:.1}%</text>\n",
        width as usize + 8,
        4 + height / 2,
        score
    ));
    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; vertical-align: top; }
th { background: var(--border); cursor: pointer; }
td { white-space: pre-wrap; }
.pass { background: var(--pass); }
.fail { background: var(--fail); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
"#;

const JS: &str = r#"
function sortTable(col) {
  const table = document.getElementById('results');
  const tbody = table.querySelector('tbody');
  const rows = Array.from(tbody.querySelectorAll('tr'));
  const asc = !(table.dataset.sortCol == col && table.dataset.sortDir == 'asc');
  const numeric = col === 0 || col === 3;
  rows.sort((a, b) => {
    const va = a.cells[col].textContent;
    const vb = b.cells[col].textContent;
    const cmp = numeric ? parseFloat(va) - parseFloat(vb) : va.localeCompare(vb);
    return asc ? cmp : -cmp;
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;

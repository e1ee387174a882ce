//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined.

use anyhow::{Context, Result};
use std::path::Path;

use admission_core::report::{AdmissionSummary, CourseAdmissionReport};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML page from a course admission report.
pub fn generate_html(report: &CourseAdmissionReport) -> String {
    let mut html = String::new();
    let summary = &report.summary;

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>Admission report: {}</title>\n",
        html_escape(&report.course_id)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>Admission report</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Course: <strong>{}</strong> | {} students | {} rules | {} | report {}</p>\n",
        html_escape(&report.course_id),
        summary.total,
        report.criteria.len(),
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
        report.id
    ));
    html.push_str("</header>\n");

    // Summary dashboard
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Summary</h2>\n");
    html.push_str(&format!(
        "<p><strong>{}</strong> admitted, <strong>{}</strong> denied ({:.1}% admission rate), {} with data warnings</p>\n",
        summary.admitted,
        summary.denied,
        summary.admission_rate(),
        summary.with_warnings
    ));

    html.push_str("<table class=\"summary\">\n");
    html.push_str("<thead><tr><th>#</th><th>Rule</th><th>Type</th><th>Passed</th><th>Failed</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for rule in &summary.rules {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            rule.rule_index, rule.rule, rule.assignment_type, rule.passed, rule.failed
        ));
    }
    html.push_str("</tbody></table>\n");

    if summary.total > 0 && !summary.rules.is_empty() {
        html.push_str(&generate_bar_chart(summary));
    }

    html.push_str("</section>\n");

    // Per-student verdicts
    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Students</h2>\n");
    html.push_str("<table class=\"results-table\" id=\"results\">\n");
    html.push_str("<thead><tr><th onclick=\"sortTable(0)\">Student</th><th onclick=\"sortTable(1)\">Verdict</th><th>Explanation</th></tr></thead>\n");
    html.push_str("<tbody>\n");

    for student in &report.students {
        let verdict = &student.verdict;
        let class = if verdict.admitted { "pass" } else { "fail" };
        let text = if verdict.admitted {
            "ADMITTED"
        } else {
            "DENIED"
        };
        let explanation = verdict
            .explanation()
            .iter()
            .map(|line| html_escape(line))
            .collect::<Vec<_>>()
            .join("<br>");
        let warn_class = if verdict.has_warnings() { " warn" } else { "" };

        html.push_str(&format!(
            "<tr class=\"{class}{warn_class}\"><td>{}</td><td class=\"{class}\">{text}</td><td class=\"explanation\">{explanation}</td></tr>\n",
            html_escape(&student.student_id)
        ));
    }

    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Raw JSON
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

/// Write an HTML report to a file.
pub fn write_html_report(report: &CourseAdmissionReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write HTML report to {}", path.display()))?;
    Ok(())
}

/// Horizontal bars showing each rule's pass rate.
fn generate_bar_chart(summary: &AdmissionSummary) -> String {
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 260;

    let total_height = summary.rules.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, rule) in summary.rules.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let rate = rule.passed as f64 / summary.total as f64;
        let width = (rate * max_width as f64) as usize;

        let color = if rate >= 0.8 {
            "#22c55e"
        } else if rate >= 0.5 {
            "#eab308"
        } else {
            "#ef4444"
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">rule {} [{}]</text>\n",
            label_width - 10,
            y + bar_height / 2,
            rule.rule_index,
            rule.assignment_type
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{:.1}%</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            rate * 100.0
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; --warn: #f59e0b; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; vertical-align: top; }
th { background: var(--border); cursor: pointer; }
.pass { background: var(--pass); }
.fail { background: var(--fail); }
tr.warn td:first-child { border-left: 4px solid var(--warn); }
.explanation { font-size: 0.85rem; }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;

const JS: &str = r#"
function sortTable(col) {
  const table = document.getElementById('results');
  const tbody = table.querySelector('tbody');
  const rows = Array.from(tbody.querySelectorAll('tr'));
  const asc = table.dataset.sortCol == col && table.dataset.sortDir == 'asc' ? false : true;
  rows.sort((a, b) => {
    const va = a.cells[col].textContent;
    const vb = b.cells[col].textContent;
    return asc ? va.localeCompare(vb) : vb.localeCompare(va);
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;

//! HTML report emission: one self-contained page per event file with a
//! summary block and the full result table. No external assets, no
//! template engine; the page is built directly the way the other report
//! writers build their output.

use std::fs;
use std::path::Path;

use rostercheck_engine::{compute_summary, Issue, MatchResult, MatchType};

use crate::error::ReportError;
use crate::report::{result_row, CSV_COLUMNS};

const STYLE: &str = "\
body { font-family: sans-serif; margin: 2em; color: #222; }
h1 { font-size: 1.4em; }
.meta { color: #666; font-size: 0.85em; margin-bottom: 1.5em; }
table { border-collapse: collapse; width: 100%; font-size: 0.85em; }
th, td { border: 1px solid #ccc; padding: 4px 8px; text-align: left; }
th { background: #f0f0f0; position: sticky; top: 0; }
.summary { width: auto; margin-bottom: 2em; }
.summary td:last-child { text-align: right; }
tr.exact { background: #f4fbf4; }
tr.swap { background: #fdf6e8; }
tr.fuzzy { background: #fdf6e8; }
tr.none { background: #fbeeee; }
td.flag { background: #f6c8c8; font-weight: bold; }
";

/// Write match results as a self-contained HTML report.
pub fn write_html_report(
    results: &[MatchResult],
    output_path: &Path,
    event_name: &str,
) -> Result<(), ReportError> {
    let to_err = |message: String| ReportError::Io {
        path: output_path.to_path_buf(),
        message,
    };

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent).map_err(|e| to_err(e.to_string()))?;
    }

    let html = render(results, event_name);
    fs::write(output_path, html).map_err(|e| to_err(e.to_string()))?;
    log::info!("wrote HTML report {}", output_path.display());
    Ok(())
}

pub(crate) fn render(results: &[MatchResult], event_name: &str) -> String {
    let summary = compute_summary(results);
    let generated = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    let title = format!("Match report: {}", escape_html(event_name));

    let mut html = String::with_capacity(2048 + results.len() * 512);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{title}</title>\n"));
    html.push_str(&format!("<style>\n{STYLE}</style>\n</head>\n<body>\n"));
    html.push_str(&format!("<h1>{title}</h1>\n"));
    html.push_str(&format!("<p class=\"meta\">generated {generated}</p>\n"));

    html.push_str("<table class=\"summary\">\n");
    for (label, count) in [
        ("Event records", summary.total),
        ("Exact matches", summary.exact),
        ("Name swaps", summary.name_swap),
        ("Fuzzy matches", summary.fuzzy),
        ("Unmatched", summary.none),
        ("Results with issues", summary.with_issues),
        ("Day/month transposed", summary.dob_mob_swapped),
        ("Day mismatches", summary.dob_mismatch),
        ("Month mismatches", summary.mob_mismatch),
        ("Year mismatches", summary.yob_mismatch),
        ("Sex mismatches", summary.sex_mismatch),
        ("Association mismatches", summary.assoc_mismatch),
    ] {
        html.push_str(&format!("<tr><td>{label}</td><td>{count}</td></tr>\n"));
    }
    html.push_str("</table>\n");

    html.push_str("<table>\n<tr>");
    for column in CSV_COLUMNS {
        html.push_str(&format!("<th>{column}</th>"));
    }
    html.push_str("</tr>\n");

    for result in results {
        html.push_str(&format!("<tr class=\"{}\">", row_class(result.match_type)));
        for (column, value) in result_row(result).iter().enumerate() {
            if is_flagged(&result.issues, column) {
                html.push_str(&format!("<td class=\"flag\">{}</td>", escape_html(value)));
            } else {
                html.push_str(&format!("<td>{}</td>", escape_html(value)));
            }
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</table>\n</body>\n</html>\n");
    html
}

fn row_class(match_type: MatchType) -> &'static str {
    match match_type {
        MatchType::Exact => "exact",
        MatchType::NameSwap => "swap",
        MatchType::Fuzzy => "fuzzy",
        MatchType::None => "none",
    }
}

/// Whether a report column should be highlighted given the result's
/// issues. Columns follow the [`CSV_COLUMNS`] layout: event fields 0-7,
/// reference fields 8-15.
fn is_flagged(issues: &[Issue], column: usize) -> bool {
    let has = |issue: Issue| issues.contains(&issue);
    match column {
        1 | 9 => has(Issue::LastnameFuzzy) || has(Issue::NameSwapped),
        2 | 10 => has(Issue::FirstnameFuzzy) || has(Issue::NameSwapped),
        3 | 11 => has(Issue::SexMismatch),
        4 | 12 => has(Issue::AssocMismatch),
        5 | 13 => has(Issue::DobMismatch) || has(Issue::DobMobSwapped),
        6 | 14 => has(Issue::MobMismatch) || has(Issue::DobMobSwapped),
        7 | 15 => has(Issue::YobMismatch),
        _ => false,
    }
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

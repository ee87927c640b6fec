use std::io::IsTerminal;

use chrono::{DateTime, Utc};
use owo_colors::OwoColorize;
use serde::Serialize;
use terminal_size::{terminal_size, Width};

use crate::scoring::{RankedEntry, Report};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score: whole numbers without decimals, otherwise up to 2 places
/// (72, 6.67, -3.5)
pub fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{:.0}", score)
    } else {
        let s = format!("{:.2}", score);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate label to fit available width, accounting for Unicode
fn truncate_label(label: &str, max_width: usize) -> String {
    let chars: Vec<char> = label.chars().collect();
    if chars.len() <= max_width {
        label.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// One ranked row: index, score, label, class
/// Index column: 3 chars (fits "99."), right-aligned
/// Score column is right-aligned, 7 chars wide
fn format_rows<F>(entries: &[RankedEntry], class_of: F, use_colors: bool) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    let term_width = get_terminal_width();
    let score_width = 7;
    let separator = "  ";

    entries
        .iter()
        .map(|entry| {
            let index_str = format!("{:>2}.", entry.rank);
            let score_padded = format!("{:>width$}", format_score(entry.score), width = score_width);
            let class = class_of(&entry.id).unwrap_or_default();

            let fixed_width = 3 + 1 + score_width + separator.len() * 2 + class.chars().count();
            let label = match term_width {
                Some(width) if width > fixed_width + 10 => truncate_label(&entry.label, width - fixed_width),
                Some(_) => truncate_label(&entry.label, 20),
                None => entry.label.clone(),
            };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}",
                    index_str.dimmed(),
                    score_padded.bold(),
                    separator,
                    label,
                    separator,
                    class.cyan()
                )
            } else {
                format!("{} {}{}{}{}{}", index_str, score_padded, separator, label, separator, class)
                    .trim_end()
                    .to_string()
            }
        })
        .collect()
}

/// Format a report as ranked tables: dimensions, then groups, then codes
pub fn format_ranked_table(report: &Report, use_colors: bool) -> String {
    if report.ranking.is_empty() {
        return "No dimensions scored.".to_string();
    }

    let mut lines = Vec::new();
    let heading = |s: &str| if use_colors { s.bold().to_string() } else { s.to_string() };

    lines.push(heading(&report.title));
    lines.extend(format_rows(
        &report.ranking,
        |id| report.dimension(id).and_then(|d| d.class.clone().or_else(|| d.code.clone())),
        use_colors,
    ));

    if !report.group_ranking.is_empty() {
        lines.push(String::new());
        lines.push(heading("Groups"));
        lines.extend(format_rows(
            &report.group_ranking,
            |id| report.group(id).and_then(|g| g.class.clone()),
            use_colors,
        ));
    }

    let codes: Vec<String> = [("Top code", &report.top_code), ("Style code", &report.style_code)]
        .into_iter()
        .filter_map(|(name, code)| {
            code.as_ref().map(|c| {
                if use_colors {
                    format!("{}: {}", name, c.yellow())
                } else {
                    format!("{}: {}", name, c)
                }
            })
        })
        .collect();
    if !codes.is_empty() {
        lines.push(String::new());
        lines.extend(codes);
    }

    lines.join("\n")
}

/// Format the dimension ranking as tab-separated values for scripting
/// Columns: rank, id, label, score, class (no headers, no colors)
pub fn format_tsv(report: &Report) -> String {
    report
        .ranking
        .iter()
        .map(|entry| {
            let class = report
                .dimension(&entry.id)
                .and_then(|d| d.class.as_deref())
                .unwrap_or("");
            format!(
                "{}\t{}\t{}\t{}\t{}",
                entry.rank,
                entry.id,
                entry.label,
                format_score(entry.score),
                class
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Serialize)]
struct ReportEnvelope<'a> {
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    report: &'a Report,
}

/// Pretty JSON export of a report, stamped with `generated_at`
pub fn format_json(report: &Report, generated_at: DateTime<Utc>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&ReportEnvelope {
        generated_at,
        report,
    })
}

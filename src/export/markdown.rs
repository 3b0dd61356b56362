//! Human-readable Markdown report

use crate::analytics::ProcessedAnalytics;
use chrono::{DateTime, SecondsFormat, Utc};

/// Row used for any empty three-column table
pub const EMPTY_TABLE_ROW: &str = "| – | – | – |";

/// Make a value safe to embed in a table cell.
///
/// Line-break runs become one space; `|` and backticks are backslash-escaped.
pub fn sanitize_cell(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_break = false;
    for ch in value.chars() {
        match ch {
            '\r' | '\n' => {
                if !in_break {
                    out.push(' ');
                }
                in_break = true;
                continue;
            }
            '|' | '`' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
        in_break = false;
    }
    out
}

/// `12.3%`, or `–` for non-finite values
fn format_percent(value: f64, decimals: usize) -> String {
    if value.is_finite() {
        format!("{:.*}%", decimals, value)
    } else {
        "–".to_string()
    }
}

/// Thousands-grouped amount with up to two decimals, e.g. `1,234,567.5`
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return "–".to_string();
    }
    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let fraction = fraction.trim_end_matches('0');
    let sign = if value < 0.0 && (whole != "0" || !fraction.is_empty()) { "-" } else { "" };
    if fraction.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{fraction}")
    }
}

fn table(header: &str, divider: &str, rows: Vec<String>) -> String {
    let mut lines = vec![header.to_string(), divider.to_string()];
    if rows.is_empty() {
        lines.push(EMPTY_TABLE_ROW.to_string());
    } else {
        lines.extend(rows);
    }
    lines.join("\n")
}

pub fn to_markdown(analytics: &ProcessedAnalytics) -> String {
    to_markdown_at(analytics, Utc::now())
}

/// Render the report with an explicit generation time
pub fn to_markdown_at(analytics: &ProcessedAnalytics, generated_at: DateTime<Utc>) -> String {
    let kpis = &analytics.kpis;

    let kpi_rows = vec![
        format!("| Delinquency rate | {} |", format_percent(kpis.delinquency_rate, 2)),
        format!("| Portfolio yield | {} |", format_percent(kpis.portfolio_yield, 2)),
        format!("| Average LTV | {} |", format_percent(kpis.average_ltv, 1)),
        format!("| Average DTI | {} |", format_percent(kpis.average_dti, 1)),
        format!("| Active loans | {} |", kpis.loan_count),
    ];

    let treemap_rows = analytics
        .treemap
        .iter()
        .map(|entry| {
            format!(
                "| {} | {} | {} |",
                sanitize_cell(&entry.label),
                format_amount(entry.value),
                sanitize_cell(&entry.color)
            )
        })
        .collect();

    let roll_rate_rows = analytics
        .roll_rates
        .iter()
        .map(|rate| {
            format!(
                "| {} | {} | {} |",
                sanitize_cell(&rate.from),
                sanitize_cell(&rate.to),
                format_percent(rate.percent, 1)
            )
        })
        .collect();

    let growth_rows = analytics
        .growth_projection
        .iter()
        .map(|point| {
            format!(
                "| {} | {} | {} |",
                sanitize_cell(&point.label),
                format_percent(point.yield_pct, 2),
                format_amount(point.loan_volume as f64)
            )
        })
        .collect();

    [
        "# Portfolio Analytics Report".to_string(),
        format!(
            "Generated at: {}",
            generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        ),
        String::new(),
        "## KPI summary".to_string(),
        table("| KPI | Value |", "| --- | ---: |", kpi_rows),
        String::new(),
        "## Segment treemap".to_string(),
        table(
            "| Segment | Principal balance | Color |",
            "| --- | ---: | --- |",
            treemap_rows,
        ),
        String::new(),
        "## Roll-rate cascade".to_string(),
        table(
            "| From (DPD) | To (status) | Share |",
            "| --- | --- | ---: |",
            roll_rate_rows,
        ),
        String::new(),
        "## Growth projection".to_string(),
        table(
            "| Month | Yield | Loan volume |",
            "| --- | ---: | ---: |",
            growth_rows,
        ),
    ]
    .join("\n")
}

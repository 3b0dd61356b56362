//! Serializers for `ProcessedAnalytics`: CSV, JSON, Markdown

mod csv_export;
mod json;
mod markdown;

pub use csv_export::{to_csv, EXPORT_COLUMNS};
pub use json::{to_json, to_json_at};
pub use markdown::{format_amount, sanitize_cell, to_markdown, to_markdown_at, EMPTY_TABLE_ROW};

use crate::analytics::ProcessedAnalytics;
use crate::error::ExportError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
    Markdown,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Csv, ExportFormat::Json, ExportFormat::Markdown];

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Markdown => "md",
        }
    }

    /// Serialize `analytics`, stamping time-aware formats with `generated_at`
    pub fn render(
        &self,
        analytics: &ProcessedAnalytics,
        generated_at: DateTime<Utc>,
    ) -> Result<String, ExportError> {
        match self {
            ExportFormat::Csv => to_csv(analytics),
            ExportFormat::Json => to_json_at(analytics, generated_at),
            ExportFormat::Markdown => Ok(to_markdown_at(analytics, generated_at)),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "md" | "markdown" => Ok(ExportFormat::Markdown),
            other => Err(format!("Unknown export format: {}", other)),
        }
    }
}

/// A `--format` value: one format or `all`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportSelection {
    All,
    Only(ExportFormat),
}

impl ExportSelection {
    /// Formats named by `selections` in first-mentioned order without
    /// duplicates. No selection means every format.
    pub fn expand(selections: &[ExportSelection]) -> Vec<ExportFormat> {
        let mut formats: Vec<ExportFormat> = Vec::new();
        if selections.is_empty() {
            return ExportFormat::ALL.to_vec();
        }
        for selection in selections {
            let named: &[ExportFormat] = match selection {
                ExportSelection::All => &ExportFormat::ALL,
                ExportSelection::Only(format) => std::slice::from_ref(format),
            };
            for format in named {
                if !formats.contains(format) {
                    formats.push(*format);
                }
            }
        }
        formats
    }
}

impl FromStr for ExportSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(ExportSelection::All)
        } else {
            s.parse().map(ExportSelection::Only)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format() {
        assert_eq!("CSV".parse::<ExportFormat>(), Ok(ExportFormat::Csv));
        assert_eq!("md".parse::<ExportFormat>(), Ok(ExportFormat::Markdown));
        assert!("pdf".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_all_selection_expands_to_every_format() {
        assert_eq!("all".parse::<ExportSelection>(), Ok(ExportSelection::All));
        assert_eq!(
            "json".parse::<ExportSelection>(),
            Ok(ExportSelection::Only(ExportFormat::Json))
        );
        assert!("pdf".parse::<ExportSelection>().is_err());

        assert_eq!(ExportSelection::expand(&[ExportSelection::All]), ExportFormat::ALL.to_vec());
        assert_eq!(ExportSelection::expand(&[]), ExportFormat::ALL.to_vec());
    }

    #[test]
    fn test_selection_dedupes_in_order() {
        let selections = [
            ExportSelection::Only(ExportFormat::Markdown),
            ExportSelection::All,
            ExportSelection::Only(ExportFormat::Csv),
        ];
        assert_eq!(
            ExportSelection::expand(&selections),
            vec![ExportFormat::Markdown, ExportFormat::Csv, ExportFormat::Json]
        );
    }

    #[test]
    fn test_render_every_format_on_empty_bundle() {
        let analytics = ProcessedAnalytics::empty();
        let now = Utc::now();
        for format in ExportFormat::ALL {
            let text = format.render(&analytics, now).unwrap();
            assert!(!text.is_empty(), "{:?} rendered nothing", format);
        }
    }
}

//! Load loan rows from uploaded CSV text

use super::data::{coerce_number, LoanRow, UNKNOWN_STATUS};
use super::header::{missing_required_columns, normalize_header, DPD_STATUS, LEGACY_DPD};
use super::tokenizer::{parse_csv_line, split_lines, strip_wrapping_quotes};
use crate::error::IngestError;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::fmt;

/// Raw data line keyed by normalized header
struct RawRecord<'h> {
    cells: HashMap<&'h str, String>,
}

impl<'h> RawRecord<'h> {
    fn from_line(headers: &'h [String], line: &str) -> Self {
        let values = parse_csv_line(line);
        // Later duplicates of a header win, matching a plain key/value overwrite
        let cells = headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                let value = values
                    .get(idx)
                    .map(|v| strip_wrapping_quotes(v).trim().to_string())
                    .unwrap_or_default();
                (header.as_str(), value)
            })
            .collect();
        Self { cells }
    }

    fn text(&self, column: &str) -> &str {
        self.cells.get(column).map(String::as_str).unwrap_or("")
    }

    fn number(&self, column: &str) -> f64 {
        coerce_number(self.text(column))
    }

    fn to_loan_row(&self) -> LoanRow {
        let loan_status = match self.text("loan_status") {
            "" => UNKNOWN_STATUS.to_string(),
            status => status.to_string(),
        };

        let dpd_status = [DPD_STATUS, LEGACY_DPD]
            .iter()
            .map(|column| self.text(column))
            .find(|value| !value.is_empty())
            .map(str::to_string);

        LoanRow {
            loan_amount: self.number("loan_amount"),
            appraised_value: self.number("appraised_value"),
            borrower_income: self.number("borrower_income"),
            monthly_debt: self.number("monthly_debt"),
            loan_status,
            interest_rate: self.number("interest_rate"),
            principal_balance: self.number("principal_balance"),
            dpd_status,
        }
    }
}

/// Parse CSV text into typed loan rows.
///
/// Fails only on structure: an empty file or missing required columns. The
/// column check runs before any data line is touched.
pub fn parse_loan_csv(content: &str) -> Result<Vec<LoanRow>, IngestError> {
    let lines = split_lines(content);
    let (header_line, data_lines) = lines.split_first().ok_or(IngestError::EmptyFile)?;

    let headers: Vec<String> = parse_csv_line(header_line)
        .iter()
        .map(|h| normalize_header(h))
        .collect();
    debug!("Normalized headers: {:?}", headers);

    let missing = missing_required_columns(&headers);
    if !missing.is_empty() {
        return Err(IngestError::MissingColumns(missing));
    }

    let rows: Vec<LoanRow> = data_lines
        .iter()
        .map(|line| RawRecord::from_line(&headers, line).to_loan_row())
        .collect();

    info!("Parsed {} loan rows", rows.len());
    Ok(rows)
}

/// Non-fatal notice attached to a successful upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadAdvisory {
    /// No row carried a DPD status, so roll rates will be empty
    MissingDpd { rows: usize },
}

impl fmt::Display for UploadAdvisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadAdvisory::MissingDpd { rows } => write!(
                f,
                "Loaded {} rows, but no DPD status was found. Roll-rate analytics may be limited.",
                rows
            ),
        }
    }
}

/// Parsed upload plus any advisory for the caller to display
#[derive(Debug, Clone)]
pub struct LoanUpload {
    pub rows: Vec<LoanRow>,
    pub advisory: Option<UploadAdvisory>,
}

impl LoanUpload {
    /// One-line status message for the uploader
    pub fn summary(&self) -> String {
        match &self.advisory {
            Some(advisory) => advisory.to_string(),
            None => format!("Loaded {} rows successfully.", self.rows.len()),
        }
    }
}

/// Parse an upload and flag datasets without any DPD information
pub fn ingest_csv(content: &str) -> Result<LoanUpload, IngestError> {
    let rows = parse_loan_csv(content)?;

    let advisory = if rows.iter().all(|row| row.dpd_bucket().is_none()) {
        let advisory = UploadAdvisory::MissingDpd { rows: rows.len() };
        warn!("{}", advisory);
        Some(advisory)
    } else {
        None
    };

    Ok(LoanUpload { rows, advisory })
}

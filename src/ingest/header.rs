//! Header normalization and required-column checks

use super::tokenizer::strip_wrapping_quotes;

/// Canonical name for the days-past-due bucket column
pub const DPD_STATUS: &str = "dpd_status";

/// Legacy column consulted when no `dpd_status` value is present
pub const LEGACY_DPD: &str = "dpd";

/// Columns every upload must carry, in the order errors report them
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "loan_amount",
    "appraised_value",
    "borrower_income",
    "monthly_debt",
    "loan_status",
    "interest_rate",
    "principal_balance",
];

/// Alias → canonical name. Only DPD spellings are resolved.
const HEADER_ALIASES: [(&str, &str); 7] = [
    ("dpd", DPD_STATUS),
    ("dpd_status", DPD_STATUS),
    ("dpdstatus", DPD_STATUS),
    ("dpd_code", DPD_STATUS),
    ("dpd_bucket", DPD_STATUS),
    ("days_past_due", DPD_STATUS),
    ("dayspastdue", DPD_STATUS),
];

/// Normalize a raw header cell to its canonical column name.
///
/// `" Days Past Due "` → `dpd_status`, `"Loan Amount ($)"` → `loan_amount_`.
pub fn normalize_header(header: &str) -> String {
    let cleaned = strip_wrapping_quotes(header).trim().to_lowercase();

    let mut collapsed = String::with_capacity(cleaned.len());
    let mut in_separator = false;
    for ch in cleaned.chars() {
        if ch.is_ascii_alphanumeric() {
            collapsed.push(ch);
            in_separator = false;
        } else if !in_separator {
            collapsed.push('_');
            in_separator = true;
        }
    }

    HEADER_ALIASES
        .iter()
        .find(|(alias, _)| *alias == collapsed)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or(collapsed)
}

/// Required columns absent from `headers`, in `REQUIRED_COLUMNS` order
pub fn missing_required_columns(headers: &[String]) -> Vec<String> {
    REQUIRED_COLUMNS
        .iter()
        .filter(|required| !headers.iter().any(|h| h == *required))
        .map(|required| required.to_string())
        .collect()
}

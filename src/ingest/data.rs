//! Typed loan records

use serde::{Deserialize, Serialize};

/// Status used when an upload leaves `loan_status` blank
pub const UNKNOWN_STATUS: &str = "unknown";

/// One loan from an uploaded CSV.
///
/// Built once by the loader and only read afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRow {
    /// Original loan amount
    pub loan_amount: f64,

    /// Appraised collateral value (0 when absent)
    pub appraised_value: f64,

    /// Annual borrower income
    pub borrower_income: f64,

    /// Monthly debt obligations
    pub monthly_debt: f64,

    /// Free-text status category, e.g. "current" or "30-59 days past due"
    pub loan_status: String,

    /// Interest rate as uploaded, either a fraction (0.05) or a percentage (5);
    /// the KPI aggregator picks one scale for the whole dataset
    pub interest_rate: f64,

    /// Outstanding principal
    pub principal_balance: f64,

    /// Delinquency bucket label the loan started the period in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dpd_status: Option<String>,
}

impl LoanRow {
    /// Loan-to-value ratio; appraisals below 1 are treated as 1
    pub fn ltv_ratio(&self) -> f64 {
        self.loan_amount / self.appraised_value.max(1.0)
    }

    /// Monthly debt over monthly income, `None` when income is not positive
    pub fn dti_ratio(&self) -> Option<f64> {
        let monthly_income = self.borrower_income / 12.0;
        if monthly_income > 0.0 {
            Some(self.monthly_debt / monthly_income)
        } else {
            None
        }
    }

    /// DPD bucket if the row carries a non-empty one
    pub fn dpd_bucket(&self) -> Option<&str> {
        self.dpd_status.as_deref().filter(|s| !s.is_empty())
    }
}

/// Currency-aware numeric coercion.
///
/// Keeps only digits, `.` and `-`, then parses. Anything unparseable or too
/// large for a finite `f64` is 0.
pub fn coerce_number(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

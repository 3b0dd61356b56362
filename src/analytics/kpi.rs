//! Portfolio-level KPI snapshot

use super::config::AnalyticsConfig;
use super::round_to;
use crate::ingest::LoanRow;
use serde::{Deserialize, Serialize};

/// Summary statistics for one upload. All percentages are 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiStats {
    pub delinquency_rate: f64,
    pub portfolio_yield: f64,
    #[serde(rename = "averageLTV")]
    pub average_ltv: f64,
    #[serde(rename = "averageDTI")]
    pub average_dti: f64,
    pub loan_count: usize,
}

/// Divisor turning uploaded rates into fractions.
///
/// One scale per dataset: if any rate is above 1 the whole file is read as
/// percentages, otherwise as fractions.
fn rate_divisor(rows: &[LoanRow]) -> f64 {
    if rows.iter().any(|r| r.interest_rate > 1.0) {
        100.0
    } else {
        1.0
    }
}

/// Replace NaN and infinities with 0
fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Compute KPIs over the full row set.
///
/// Every ratio has a guarded denominator so an empty or zero-balance
/// portfolio yields zeros rather than NaN.
pub fn compute_kpis(rows: &[LoanRow], config: &AnalyticsConfig) -> KpiStats {
    let loan_count = rows.len();
    let count_divisor = loan_count.max(1) as f64;

    let delinquent = rows
        .iter()
        .filter(|row| config.is_delinquent(&row.loan_status))
        .count();
    let delinquency_rate = delinquent as f64 / count_divisor * 100.0;

    let total_principal: f64 = rows.iter().map(|r| r.principal_balance).sum();
    let divisor = rate_divisor(rows);
    let weighted_interest: f64 = rows
        .iter()
        .map(|r| r.interest_rate / divisor * r.principal_balance)
        .sum();
    let portfolio_yield = if total_principal != 0.0 {
        weighted_interest / total_principal * 100.0
    } else {
        0.0
    };

    let ltv_sum: f64 = rows.iter().map(LoanRow::ltv_ratio).sum();
    let average_ltv = ltv_sum / count_divisor * 100.0;

    // Rows without positive income drop out of both numerator and divisor
    let dti_values: Vec<f64> = rows.iter().filter_map(LoanRow::dti_ratio).collect();
    let dti_sum: f64 = dti_values.iter().sum();
    let average_dti = dti_sum / dti_values.len().max(1) as f64 * 100.0;

    KpiStats {
        delinquency_rate: round_to(delinquency_rate, 2),
        portfolio_yield: finite_or_zero(round_to(portfolio_yield, 2)),
        average_ltv: finite_or_zero(round_to(average_ltv, 1)),
        average_dti: finite_or_zero(round_to(average_dti, 1)),
        loan_count,
    }
}

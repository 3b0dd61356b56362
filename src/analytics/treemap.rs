//! Principal balance by loan status

use super::config::AnalyticsConfig;
use crate::ingest::LoanRow;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One flat treemap segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreemapEntry {
    /// Loan status
    pub label: String,
    /// Summed principal balance
    pub value: f64,
    pub color: String,
}

/// Group principal by status, in first-seen order, colouring from the palette
pub fn build_treemap(rows: &[LoanRow], config: &AnalyticsConfig) -> Vec<TreemapEntry> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut entries: Vec<TreemapEntry> = Vec::new();

    for row in rows {
        let slot = *index.entry(row.loan_status.as_str()).or_insert_with(|| {
            let position = entries.len();
            entries.push(TreemapEntry {
                label: row.loan_status.clone(),
                value: 0.0,
                color: config.palette_color(position).to_string(),
            });
            position
        });
        entries[slot].value += row.principal_balance;
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn loan(status: &str, balance: f64) -> LoanRow {
        LoanRow {
            loan_amount: 0.0,
            appraised_value: 0.0,
            borrower_income: 0.0,
            monthly_debt: 0.0,
            loan_status: status.to_string(),
            interest_rate: 0.0,
            principal_balance: balance,
            dpd_status: None,
        }
    }

    #[test]
    fn test_groups_in_first_seen_order() {
        let rows = vec![
            loan("current", 100.0),
            loan("90+ days past due", 5.0),
            loan("current", 50.0),
            loan("charged off", 500.0),
        ];
        let treemap = build_treemap(&rows, &AnalyticsConfig::default());

        let labels: Vec<&str> = treemap.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["current", "90+ days past due", "charged off"]);
        assert_relative_eq!(treemap[0].value, 150.0);
        assert_relative_eq!(treemap[2].value, 500.0);
        assert_eq!(treemap[0].color, "#C1A6FF");
        assert_eq!(treemap[1].color, "#5F4896");
        assert_eq!(treemap[2].color, "#22c55e");
    }

    #[test]
    fn test_colors_cycle_after_palette() {
        let rows: Vec<LoanRow> = (0..7).map(|i| loan(&format!("s{i}"), 1.0)).collect();
        let treemap = build_treemap(&rows, &AnalyticsConfig::default());
        assert_eq!(treemap.len(), 7);
        assert_eq!(treemap[5].color, treemap[0].color);
        assert_eq!(treemap[6].color, treemap[1].color);
    }

    #[test]
    fn test_empty_rows() {
        assert!(build_treemap(&[], &AnalyticsConfig::default()).is_empty());
    }
}

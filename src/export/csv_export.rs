//! Loan-level CSV export with an appended `ltv` column

use crate::analytics::ProcessedAnalytics;
use crate::error::ExportError;
use crate::ingest::LoanRow;
use csv::{QuoteStyle, Terminator, WriterBuilder};

/// Output columns in order
pub const EXPORT_COLUMNS: [&str; 9] = [
    "loan_amount",
    "appraised_value",
    "borrower_income",
    "monthly_debt",
    "loan_status",
    "interest_rate",
    "principal_balance",
    "dpd_status",
    "ltv",
];

fn export_record(loan: &LoanRow) -> [String; 9] {
    [
        loan.loan_amount.to_string(),
        loan.appraised_value.to_string(),
        loan.borrower_income.to_string(),
        loan.monthly_debt.to_string(),
        loan.loan_status.clone(),
        loan.interest_rate.to_string(),
        loan.principal_balance.to_string(),
        loan.dpd_status.clone().unwrap_or_default(),
        format!("{:.1}", loan.ltv_ratio() * 100.0),
    ]
}

/// Render one line per loan under a fixed header.
///
/// Fields holding quotes, commas or line breaks are quoted. No trailing
/// newline; an empty dataset yields just the header line.
pub fn to_csv(analytics: &ProcessedAnalytics) -> Result<String, ExportError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(EXPORT_COLUMNS)?;
    for loan in &analytics.loans {
        writer.write_record(export_record(loan))?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    let mut text = String::from_utf8(bytes)?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::process_loan_rows;

    fn loan(status: &str, dpd: Option<&str>) -> LoanRow {
        LoanRow {
            loan_amount: 100.0,
            appraised_value: 300.0,
            borrower_income: 1200.0,
            monthly_debt: 100.0,
            loan_status: status.to_string(),
            interest_rate: 5.5,
            principal_balance: 90.0,
            dpd_status: dpd.map(str::to_string),
        }
    }

    #[test]
    fn test_empty_dataset_is_header_only() {
        let csv = to_csv(&ProcessedAnalytics::empty()).unwrap();
        assert_eq!(
            csv,
            "loan_amount,appraised_value,borrower_income,monthly_debt,loan_status,interest_rate,principal_balance,dpd_status,ltv"
        );
    }

    #[test]
    fn test_rows_with_ltv() {
        let analytics = process_loan_rows(vec![loan("current", Some("0"))]);
        let csv = to_csv(&analytics).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "100,300,1200,100,current,5.5,90,0,33.3");
    }

    #[test]
    fn test_escapes_special_values() {
        let analytics = process_loan_rows(vec![loan("late, \"really\"", None)]);
        let csv = to_csv(&analytics).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[1], r#"100,300,1200,100,"late, ""really""",5.5,90,,33.3"#);
    }

    #[test]
    fn test_zero_appraisal_ltv() {
        let mut row = loan("current", None);
        row.appraised_value = 0.0;
        let csv = to_csv(&process_loan_rows(vec![row])).unwrap();
        assert!(csv.ends_with(",10000.0"));
    }
}

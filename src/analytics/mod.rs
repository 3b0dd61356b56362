//! Portfolio aggregation: KPIs, treemap segments, roll rates, growth trend

pub mod config;
mod growth;
mod kpi;
mod roll_rate;
mod treemap;

pub use config::{AnalyticsConfig, GrowthConfig};
pub use growth::{build_growth_projection, build_growth_projection_at, GrowthPoint};
pub use kpi::{compute_kpis, KpiStats};
pub use roll_rate::{build_roll_rates, RollRateEntry};
pub use treemap::{build_treemap, TreemapEntry};

use crate::error::IngestError;
use crate::ingest::{ingest_csv, LoanRow, UploadAdvisory};
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

/// Round half away from zero to `decimals` places
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Everything derived from one upload. Exporters consume only this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedAnalytics {
    pub kpis: KpiStats,
    pub treemap: Vec<TreemapEntry>,
    pub roll_rates: Vec<RollRateEntry>,
    pub growth_projection: Vec<GrowthPoint>,
    pub loans: Vec<LoanRow>,
}

impl ProcessedAnalytics {
    /// Bundle for a dataset with no loans
    pub fn empty() -> Self {
        Self {
            kpis: compute_kpis(&[], &AnalyticsConfig::default()),
            treemap: Vec::new(),
            roll_rates: Vec::new(),
            growth_projection: Vec::new(),
            loans: Vec::new(),
        }
    }
}

/// Result of analyzing raw CSV text
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub analytics: ProcessedAnalytics,
    pub advisory: Option<UploadAdvisory>,
}

/// Runs the aggregation pipeline under one configuration
#[derive(Debug, Clone, Default)]
pub struct LoanAnalyzer {
    config: AnalyticsConfig,
}

impl LoanAnalyzer {
    pub fn new(config: AnalyticsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Aggregate already-typed rows, labelling growth points from now
    pub fn process(&self, rows: Vec<LoanRow>) -> ProcessedAnalytics {
        self.process_at(rows, Utc::now())
    }

    /// Aggregate rows with growth labels counted from `as_of`
    pub fn process_at(&self, rows: Vec<LoanRow>, as_of: DateTime<Utc>) -> ProcessedAnalytics {
        let kpis = compute_kpis(&rows, &self.config);
        let treemap = build_treemap(&rows, &self.config);
        let roll_rates = build_roll_rates(&rows);
        let growth_projection = build_growth_projection_at(
            kpis.portfolio_yield,
            kpis.loan_count,
            &self.config.growth,
            as_of,
        );

        info!(
            "Aggregated {} loans into {} segments and {} roll-rate cells",
            kpis.loan_count,
            treemap.len(),
            roll_rates.len()
        );

        ProcessedAnalytics {
            kpis,
            treemap,
            roll_rates,
            growth_projection,
            loans: rows,
        }
    }

    /// Parse and aggregate CSV text in one pass
    pub fn analyze(&self, content: &str) -> Result<AnalysisOutcome, IngestError> {
        let upload = ingest_csv(content)?;
        Ok(AnalysisOutcome {
            analytics: self.process(upload.rows),
            advisory: upload.advisory,
        })
    }
}

/// Aggregate rows with the default configuration
pub fn process_loan_rows(rows: Vec<LoanRow>) -> ProcessedAnalytics {
    LoanAnalyzer::default().process(rows)
}

/// Parse and aggregate CSV text with the default configuration
pub fn analyze_csv(content: &str) -> Result<ProcessedAnalytics, IngestError> {
    LoanAnalyzer::default()
        .analyze(content)
        .map(|outcome| outcome.analytics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::TimeZone;

    const HEADER: &str =
        "loan_amount,appraised_value,borrower_income,monthly_debt,loan_status,interest_rate,principal_balance";

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(66.666, 2), 66.67);
        assert_eq!(round_to(0.05, 1), 0.1);
        assert_eq!(round_to(-1.25, 1), -1.3);
        assert_eq!(round_to(0.0, 2), 0.0);
    }

    #[test]
    fn test_scenario_single_current_loan() {
        let csv = format!("{HEADER}\n100,200,1200,100,current,5,90");
        let analytics = analyze_csv(&csv).unwrap();

        assert_eq!(analytics.loans.len(), 1);
        assert_eq!(analytics.loans[0].loan_status, "current");
        assert_eq!(analytics.kpis.delinquency_rate, 0.0);
        assert_relative_eq!(analytics.kpis.portfolio_yield, 5.0);
        assert_relative_eq!(analytics.kpis.average_ltv, 50.0);
        assert_eq!(analytics.treemap.len(), 1);
        assert!(analytics.roll_rates.is_empty());
        assert_eq!(analytics.growth_projection.len(), 6);
    }

    #[test]
    fn test_header_only_upload() {
        let outcome = LoanAnalyzer::default().analyze(HEADER).unwrap();
        let analytics = outcome.analytics;

        assert_eq!(analytics.kpis.loan_count, 0);
        assert_eq!(analytics.kpis.delinquency_rate, 0.0);
        assert_eq!(analytics.kpis.portfolio_yield, 0.0);
        assert!(analytics.treemap.is_empty());
        assert!(analytics.roll_rates.is_empty());
        assert_eq!(analytics.growth_projection[0].loan_volume, 100);
        assert_relative_eq!(analytics.growth_projection[0].yield_pct, 1.2);
        assert_eq!(outcome.advisory, Some(UploadAdvisory::MissingDpd { rows: 0 }));
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let err = analyze_csv("loan_amount\n1").unwrap_err();
        assert!(err.to_string().contains("interest_rate"));
    }

    #[test]
    fn test_roll_rates_from_csv() {
        let csv = format!(
            "{HEADER},DPD Bucket\n1,1,1,1,current,5,10,30\n1,1,1,1,30-59 days past due,5,10,30\n1,1,1,1,current,5,10,"
        );
        let analytics = analyze_csv(&csv).unwrap();
        assert_eq!(analytics.roll_rates.len(), 2);
        assert!(analytics.roll_rates.iter().all(|r| r.from == "30" && r.percent == 50.0));
        assert_relative_eq!(analytics.kpis.delinquency_rate, 33.33);
    }

    #[test]
    fn test_custom_config_flows_through() {
        let config = AnalyticsConfig {
            treemap_palette: vec!["#000000".to_string()],
            growth: GrowthConfig {
                points: 3,
                ..GrowthConfig::default()
            },
            ..AnalyticsConfig::default()
        };
        let rows = analyze_csv(&format!("{HEADER}\n1,1,1,1,a,5,1\n1,1,1,1,b,5,1"))
            .unwrap()
            .loans;
        let as_of = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let analytics = LoanAnalyzer::new(config).process_at(rows, as_of);

        assert_eq!(analytics.growth_projection.len(), 3);
        assert_eq!(analytics.growth_projection[0].label, "Jan 2026");
        assert!(analytics.treemap.iter().all(|e| e.color == "#000000"));
    }

    #[test]
    fn test_bundle_json_field_names() {
        let value = serde_json::to_value(ProcessedAnalytics::empty()).unwrap();
        assert!(value.get("rollRates").is_some());
        assert!(value.get("growthProjection").is_some());
        assert!(value["kpis"].get("averageLTV").is_some());
        assert!(value["kpis"].get("delinquencyRate").is_some());
    }
}

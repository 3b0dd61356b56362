//! Pretty-printed JSON export of the whole bundle

use crate::analytics::{GrowthPoint, KpiStats, ProcessedAnalytics, RollRateEntry, TreemapEntry};
use crate::error::ExportError;
use crate::ingest::LoanRow;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Wire shape: a timestamp followed by the bundle's fields
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonExport<'a> {
    generated_at: String,
    kpis: &'a KpiStats,
    treemap: &'a [TreemapEntry],
    roll_rates: &'a [RollRateEntry],
    growth_projection: &'a [GrowthPoint],
    loans: &'a [LoanRow],
}

pub fn to_json(analytics: &ProcessedAnalytics) -> Result<String, ExportError> {
    to_json_at(analytics, Utc::now())
}

/// Serialize with an explicit generation time
pub fn to_json_at(
    analytics: &ProcessedAnalytics,
    generated_at: DateTime<Utc>,
) -> Result<String, ExportError> {
    let export = JsonExport {
        generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        kpis: &analytics.kpis,
        treemap: &analytics.treemap,
        roll_rates: &analytics.roll_rates,
        growth_projection: &analytics.growth_projection,
        loans: &analytics.loans,
    };
    Ok(serde_json::to_string_pretty(&export)?)
}

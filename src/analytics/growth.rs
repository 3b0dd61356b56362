//! Placeholder growth trend
//!
//! A straight line from the current yield and loan count. It is not fitted to
//! any history and carries no predictive meaning.

use super::config::{GrowthConfig, DEFAULT_GROWTH_STEP_DAYS, DEFAULT_GROWTH_YIELD_STEP};
use super::round_to;
use chrono::{DateTime, TimeDelta, Utc};
use log::warn;
use serde::{Deserialize, Serialize};

/// One forward month of the trend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthPoint {
    /// Short month label, e.g. "Oct 2026"
    pub label: String,
    /// Projected yield (%)
    #[serde(rename = "yield")]
    pub yield_pct: f64,
    pub loan_volume: u64,
}

/// `start + step_days * index`, `None` if any step overflows
fn offset_date(start: DateTime<Utc>, step_days: i64, index: usize) -> Option<DateTime<Utc>> {
    let days = step_days.checked_mul(i64::try_from(index).ok()?)?;
    start.checked_add_signed(TimeDelta::try_days(days)?)
}

/// Build the trend starting today
pub fn build_growth_projection(
    base_yield: f64,
    loan_count: usize,
    config: &GrowthConfig,
) -> Vec<GrowthPoint> {
    build_growth_projection_at(base_yield, loan_count, config, Utc::now())
}

/// Build the trend with labels counted from `start`.
///
/// A step that cannot be represented (date out of range, non-finite yield
/// step) is replaced by its default; volumes saturate.
pub fn build_growth_projection_at(
    base_yield: f64,
    loan_count: usize,
    config: &GrowthConfig,
    start: DateTime<Utc>,
) -> Vec<GrowthPoint> {
    let start_yield = if base_yield == 0.0 || !base_yield.is_finite() {
        config.fallback_yield
    } else {
        base_yield
    };
    let start_volume = if loan_count == 0 { config.fallback_volume } else { loan_count as u64 };

    let last_index = config.points.saturating_sub(1);
    let step_days = if offset_date(start, config.step_days, last_index).is_some() {
        config.step_days
    } else {
        warn!(
            "Growth step of {} days is out of range, using {}",
            config.step_days, DEFAULT_GROWTH_STEP_DAYS
        );
        DEFAULT_GROWTH_STEP_DAYS
    };
    let yield_step = if config.yield_step.is_finite() {
        config.yield_step
    } else {
        DEFAULT_GROWTH_YIELD_STEP
    };

    (0..config.points)
        .map(|index| {
            let date = offset_date(start, step_days, index).unwrap_or(start);
            let yield_pct = round_to(start_yield + index as f64 * yield_step, 2);
            GrowthPoint {
                label: date.format("%b %Y").to_string(),
                yield_pct: if yield_pct.is_finite() { yield_pct } else { 0.0 },
                loan_volume: start_volume.saturating_add((index as u64).saturating_mul(config.volume_step)),
            }
        })
        .collect()
}

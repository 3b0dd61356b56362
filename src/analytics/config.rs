//! Aggregation settings

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Statuses counted as delinquent by the KPI aggregator
pub const DEFAULT_DELINQUENT_STATUSES: [&str; 3] = [
    "30-59 days past due",
    "60-89 days past due",
    "90+ days past due",
];

/// Treemap palette, assigned in first-seen order
pub const DEFAULT_TREEMAP_PALETTE: [&str; 5] = ["#C1A6FF", "#5F4896", "#22c55e", "#2563eb", "#0C2742"];

pub const DEFAULT_GROWTH_POINTS: usize = 6;
/// Upper bound on GROWTH_POINTS read from the environment
pub const MAX_GROWTH_POINTS: usize = 120;
pub const DEFAULT_GROWTH_STEP_DAYS: i64 = 30;
pub const DEFAULT_GROWTH_YIELD_STEP: f64 = 0.15;
pub const DEFAULT_GROWTH_VOLUME_STEP: u64 = 15;
/// Starting yield (%) when the portfolio yield is zero
pub const DEFAULT_FALLBACK_YIELD: f64 = 1.2;
/// Starting volume when there are no loans
pub const DEFAULT_FALLBACK_VOLUME: u64 = 100;

/// Parameters of the placeholder growth trend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthConfig {
    /// Number of forward points
    pub points: usize,
    /// Days between consecutive labels
    pub step_days: i64,
    /// Yield increase per point (percentage points)
    pub yield_step: f64,
    /// Loan volume increase per point
    pub volume_step: u64,
    pub fallback_yield: f64,
    pub fallback_volume: u64,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            points: DEFAULT_GROWTH_POINTS,
            step_days: DEFAULT_GROWTH_STEP_DAYS,
            yield_step: DEFAULT_GROWTH_YIELD_STEP,
            volume_step: DEFAULT_GROWTH_VOLUME_STEP,
            fallback_yield: DEFAULT_FALLBACK_YIELD,
            fallback_volume: DEFAULT_FALLBACK_VOLUME,
        }
    }
}

/// Settings for one aggregation pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub delinquent_statuses: Vec<String>,
    pub treemap_palette: Vec<String>,
    pub growth: GrowthConfig,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            delinquent_statuses: DEFAULT_DELINQUENT_STATUSES.iter().map(|s| s.to_string()).collect(),
            treemap_palette: DEFAULT_TREEMAP_PALETTE.iter().map(|s| s.to_string()).collect(),
            growth: GrowthConfig::default(),
        }
    }
}

/// Read an env var and parse it, `None` if unset or unparseable
fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

impl AnalyticsConfig {
    /// Defaults with growth parameters overridden from the environment:
    /// GROWTH_POINTS, GROWTH_STEP_DAYS, GROWTH_YIELD_STEP, GROWTH_VOLUME_STEP.
    /// Out-of-range values (more than `MAX_GROWTH_POINTS` points, non-finite
    /// yield step) keep the default.
    pub fn from_env() -> Self {
        let defaults = GrowthConfig::default();
        Self {
            growth: GrowthConfig {
                points: env_parse("GROWTH_POINTS")
                    .filter(|p: &usize| *p <= MAX_GROWTH_POINTS)
                    .unwrap_or(defaults.points),
                step_days: env_parse("GROWTH_STEP_DAYS").unwrap_or(defaults.step_days),
                yield_step: env_parse("GROWTH_YIELD_STEP")
                    .filter(|v: &f64| v.is_finite())
                    .unwrap_or(defaults.yield_step),
                volume_step: env_parse("GROWTH_VOLUME_STEP").unwrap_or(defaults.volume_step),
                ..defaults
            },
            ..Self::default()
        }
    }

    /// Load a JSON config file; omitted keys keep their defaults
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Palette colour for the `index`-th distinct segment
    pub fn palette_color(&self, index: usize) -> &str {
        if self.treemap_palette.is_empty() {
            DEFAULT_TREEMAP_PALETTE[index % DEFAULT_TREEMAP_PALETTE.len()]
        } else {
            self.treemap_palette[index % self.treemap_palette.len()].as_str()
        }
    }

    pub fn is_delinquent(&self, status: &str) -> bool {
        self.delinquent_statuses.iter().any(|s| s == status)
    }
}

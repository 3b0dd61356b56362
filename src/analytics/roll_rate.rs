//! DPD bucket → loan status transition shares
//!
//! Each row with a DPD bucket is one observed transition from that bucket to
//! its current status. Shares are computed per origin bucket; only observed
//! transitions are emitted.

use super::round_to;
use crate::ingest::LoanRow;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One cell of the sparse roll-rate matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollRateEntry {
    /// Origin DPD bucket
    pub from: String,
    /// Destination loan status
    pub to: String,
    /// Share of `from`'s loans ending at `to` (0-100, one decimal)
    pub percent: f64,
}

/// Destination counts for one origin bucket, in first-seen order
struct OriginCounts<'a> {
    from: &'a str,
    destinations: Vec<(&'a str, usize)>,
}

impl<'a> OriginCounts<'a> {
    fn record(&mut self, to: &'a str) {
        match self.destinations.iter_mut().find(|(status, _)| *status == to) {
            Some((_, count)) => *count += 1,
            None => self.destinations.push((to, 1)),
        }
    }

    fn total(&self) -> usize {
        self.destinations.iter().map(|(_, count)| count).sum()
    }
}

pub fn build_roll_rates(rows: &[LoanRow]) -> Vec<RollRateEntry> {
    let mut origin_index: HashMap<&str, usize> = HashMap::new();
    let mut origins: Vec<OriginCounts> = Vec::new();

    for row in rows {
        let Some(from) = row.dpd_bucket() else {
            continue;
        };
        let slot = *origin_index.entry(from).or_insert_with(|| {
            origins.push(OriginCounts {
                from,
                destinations: Vec::new(),
            });
            origins.len() - 1
        });
        origins[slot].record(row.loan_status.as_str());
    }

    origins
        .iter()
        .flat_map(|origin| {
            let total = origin.total().max(1) as f64;
            origin.destinations.iter().map(move |(to, count)| RollRateEntry {
                from: origin.from.to_string(),
                to: to.to_string(),
                percent: round_to(*count as f64 / total * 100.0, 1),
            })
        })
        .collect()
}

//! Aggregated load-test report ingestion.
//!
//! Parses the JSON summary written by the load generator and derives the
//! inputs of [`crate::evaluation::evaluate`]: the four latency statistics and
//! whether any request ended in an error. All durations in the report are
//! integer nanoseconds.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;

use crate::error::CoreError;
use crate::evaluation::LatencyStats;

/// Status code reported for successful requests.
pub const STATUS_CODE_OK: &str = "OK";

/// A single latency percentile entry, e.g. `{"percentage": 95, "latency": 3000000}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LatencyDistribution {
    pub percentage: u32,
    #[serde(with = "nanos")]
    pub latency: Duration,
}

/// Outcome of one request, present when the report was written with details.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResultDetail {
    #[serde(with = "nanos")]
    pub latency: Duration,
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub status: String,
}

/// Aggregated report of one load-test execution.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Report {
    pub count: u64,
    #[serde(with = "nanos")]
    pub total: Duration,
    #[serde(with = "nanos")]
    pub average: Duration,
    #[serde(with = "nanos")]
    pub fastest: Duration,
    #[serde(with = "nanos")]
    pub slowest: Duration,
    pub rps: f64,
    pub latency_distribution: Vec<LatencyDistribution>,
    pub error_distribution: BTreeMap<String, u64>,
    pub status_code_distribution: BTreeMap<String, u64>,
    pub details: Vec<ResultDetail>,
}

impl Report {
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        serde_json::from_str(json)
            .map_err(|e| CoreError::Validation(format!("Invalid load-test report: {e}")))
    }

    /// Derive the latency statistics evaluated against thresholds.
    ///
    /// The mean is the report average. Percentiles come from the latency
    /// distribution, falling back to the per-request details, and are zero
    /// when neither has them.
    pub fn latency_stats(&self) -> LatencyStats {
        let mut sorted: Vec<Duration> = self.details.iter().map(|d| d.latency).collect();
        sorted.sort_unstable();

        let pick = |pct: u32| {
            self.distribution_latency(pct)
                .or_else(|| percentile(&sorted, pct))
                .unwrap_or_default()
        };

        LatencyStats {
            mean: self.average,
            median: pick(50),
            p95: pick(95),
            p99: pick(99),
        }
    }

    /// Whether any request in the run ended with an error.
    pub fn had_error(&self) -> bool {
        self.error_distribution.values().any(|&count| count > 0)
            || self
                .status_code_distribution
                .iter()
                .any(|(code, &count)| code != STATUS_CODE_OK && count > 0)
            || self.details.iter().any(|d| !d.error.is_empty())
    }

    fn distribution_latency(&self, pct: u32) -> Option<Duration> {
        self.latency_distribution
            .iter()
            .find(|d| d.percentage == pct)
            .map(|d| d.latency)
    }
}

/// Nearest-rank percentile of an ascending slice. `None` when empty.
pub fn percentile(sorted: &[Duration], pct: u32) -> Option<Duration> {
    if sorted.is_empty() {
        return None;
    }
    let len = sorted.len();
    let rank = (len * pct.min(100) as usize).div_ceil(100);
    Some(sorted[rank.saturating_sub(1).min(len - 1)])
}

/// Serde adapter for durations encoded as integer nanoseconds.
mod nanos {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let ns = Option::<u64>::deserialize(deserializer)?;
        Ok(ns.map(Duration::from_nanos).unwrap_or_default())
    }
}

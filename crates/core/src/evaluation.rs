//! Test run status evaluation.
//!
//! Compares measured latency statistics against a run's configured
//! thresholds and folds in the run's fail-on-error policy to produce the
//! overall run status.

use std::time::Duration;

use crate::status::Status;
use crate::threshold::{Threshold, Thresholds};

/// Latency statistics measured for a single test run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LatencyStats {
    pub mean: Duration,
    pub median: Duration,
    pub p95: Duration,
    pub p99: Duration,
}

impl LatencyStats {
    pub fn get(&self, metric: Threshold) -> Duration {
        match metric {
            Threshold::Mean => self.mean,
            Threshold::Median => self.median,
            Threshold::P95 => self.p95,
            Threshold::P99 => self.p99,
        }
    }
}

/// Evaluate `thresholds` against `stats` and return the overall status.
///
/// Every present setting with a non-zero bound gets its `status` replaced:
/// `Fail` if the measured value is strictly greater than the bound, `Ok`
/// otherwise. Settings without a bound are left untouched.
///
/// The overall status is `Fail` if any evaluated setting failed, or if
/// `fail_on_error` is set and `had_error` is true. An error-driven failure
/// is never attributed to an individual metric.
pub fn evaluate(
    thresholds: &mut Thresholds,
    fail_on_error: bool,
    stats: &LatencyStats,
    had_error: bool,
) -> Status {
    let mut any_threshold_failed = false;

    for metric in Threshold::ALL {
        let Some(setting) = thresholds.get_mut(metric) else {
            continue;
        };
        if !setting.is_configured() {
            continue;
        }

        setting.status = if stats.get(metric) > setting.threshold {
            any_threshold_failed = true;
            Status::Fail
        } else {
            Status::Ok
        };
    }

    let error_failure = fail_on_error && had_error;

    let status = if any_threshold_failed || error_failure {
        Status::Fail
    } else {
        Status::Ok
    };

    tracing::debug!(
        %status,
        any_threshold_failed,
        error_failure,
        "Evaluated test run thresholds",
    );

    status
}

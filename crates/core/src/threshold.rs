//! Latency thresholds configured on a test run.
//!
//! A run carries at most one [`ThresholdSetting`] per [`Threshold`] metric.
//! The whole set is persisted as a JSONB document of the shape
//!
//! ```json
//! {"mean": {"status": "ok", "threshold": 5000000}, "p99": {"status": "fail", "threshold": 1000000}}
//! ```
//!
//! where `threshold` is a duration in integer nanoseconds and is omitted when
//! not configured.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::status::Status;

// ---------------------------------------------------------------------------
// Threshold metric
// ---------------------------------------------------------------------------

/// Latency statistic a threshold can be configured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Threshold {
    Mean,
    Median,
    P95,
    P99,
}

impl Threshold {
    /// All metrics, in evaluation order.
    pub const ALL: [Threshold; 4] = [
        Threshold::Mean,
        Threshold::Median,
        Threshold::P95,
        Threshold::P99,
    ];

    /// Key used in the serialized thresholds document.
    pub fn as_str(self) -> &'static str {
        match self {
            Threshold::Mean => "mean",
            Threshold::Median => "median",
            Threshold::P95 => "p95",
            Threshold::P99 => "p99",
        }
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Threshold setting
// ---------------------------------------------------------------------------

/// A configured latency bound paired with its last evaluated status.
///
/// A zero `threshold` means the metric is not configured and is skipped by
/// evaluation.
///
/// On the wire `threshold` is a signed nanosecond count. Negative and `null`
/// values decode as zero (not configured); bounds beyond `i64::MAX`
/// nanoseconds are written as `i64::MAX`. A `null` status decodes as `ok`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ThresholdSettingRepr", into = "ThresholdSettingRepr")]
pub struct ThresholdSetting {
    pub threshold: Duration,
    pub status: Status,
}

impl ThresholdSetting {
    /// A setting with the given bound and an initial `Ok` status.
    pub fn new(threshold: Duration) -> Self {
        Self {
            threshold,
            status: Status::Ok,
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.threshold.is_zero()
    }
}

/// Wire form of [`ThresholdSetting`].
#[derive(Serialize, Deserialize)]
struct ThresholdSettingRepr {
    #[serde(default)]
    status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    threshold: Option<i64>,
}

impl From<ThresholdSettingRepr> for ThresholdSetting {
    fn from(repr: ThresholdSettingRepr) -> Self {
        Self {
            threshold: repr
                .threshold
                .and_then(|ns| u64::try_from(ns).ok())
                .map(Duration::from_nanos)
                .unwrap_or_default(),
            status: repr.status,
        }
    }
}

impl From<ThresholdSetting> for ThresholdSettingRepr {
    fn from(setting: ThresholdSetting) -> Self {
        let threshold = setting
            .is_configured()
            .then(|| i64::try_from(setting.threshold.as_nanos()).unwrap_or(i64::MAX));
        Self {
            status: setting.status,
            threshold,
        }
    }
}

// ---------------------------------------------------------------------------
// Threshold set
// ---------------------------------------------------------------------------

/// The fixed set of per-metric threshold slots of a test run.
///
/// Keys other than the four metric names are ignored when decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean: Option<ThresholdSetting>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub median: Option<ThresholdSetting>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p95: Option<ThresholdSetting>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p99: Option<ThresholdSetting>,
}

impl Thresholds {
    fn slot(&self, metric: Threshold) -> &Option<ThresholdSetting> {
        match metric {
            Threshold::Mean => &self.mean,
            Threshold::Median => &self.median,
            Threshold::P95 => &self.p95,
            Threshold::P99 => &self.p99,
        }
    }

    fn slot_mut(&mut self, metric: Threshold) -> &mut Option<ThresholdSetting> {
        match metric {
            Threshold::Mean => &mut self.mean,
            Threshold::Median => &mut self.median,
            Threshold::P95 => &mut self.p95,
            Threshold::P99 => &mut self.p99,
        }
    }

    pub fn get(&self, metric: Threshold) -> Option<&ThresholdSetting> {
        self.slot(metric).as_ref()
    }

    pub fn get_mut(&mut self, metric: Threshold) -> Option<&mut ThresholdSetting> {
        self.slot_mut(metric).as_mut()
    }

    /// Store a setting for `metric`, returning the previous one.
    pub fn set(&mut self, metric: Threshold, setting: ThresholdSetting) -> Option<ThresholdSetting> {
        self.slot_mut(metric).replace(setting)
    }

    pub fn remove(&mut self, metric: Threshold) -> Option<ThresholdSetting> {
        self.slot_mut(metric).take()
    }

    /// Iterate over the present slots in [`Threshold::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Threshold, &ThresholdSetting)> + '_ {
        Threshold::ALL
            .into_iter()
            .filter_map(move |metric| self.get(metric).map(|setting| (metric, setting)))
    }

    pub fn is_empty(&self) -> bool {
        Threshold::ALL.iter().all(|&metric| self.get(metric).is_none())
    }
}

impl FromIterator<(Threshold, ThresholdSetting)> for Thresholds {
    fn from_iter<I: IntoIterator<Item = (Threshold, ThresholdSetting)>>(iter: I) -> Self {
        let mut thresholds = Thresholds::default();
        for (metric, setting) in iter {
            thresholds.set(metric, setting);
        }
        thresholds
    }
}

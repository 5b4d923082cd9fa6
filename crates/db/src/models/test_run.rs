//! Test run entity model and DTOs.

use ghz_core::evaluation::{evaluate, LatencyStats};
use ghz_core::status::Status;
use ghz_core::threshold::Thresholds;
use ghz_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// A test run row from the `test_runs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TestRun {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub description: Option<String>,
    /// Any request error forces the run to fail.
    pub fail_on_error: bool,
    pub thresholds: Json<Thresholds>,
    #[sqlx(try_from = "String")]
    pub status: Status,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TestRun {
    /// Evaluate this run against measured latencies, updating the status of
    /// every configured threshold and the overall run status in place.
    pub fn set_status(&mut self, stats: &LatencyStats, had_error: bool) {
        self.status = evaluate(&mut self.thresholds.0, self.fail_on_error, stats, had_error);
    }
}

/// DTO for creating a new test run.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTestRun {
    pub project_id: DbId,
    /// A random name is generated if omitted or blank.
    pub name: Option<String>,
    pub description: Option<String>,
    /// Defaults to `false` if omitted.
    pub fail_on_error: Option<bool>,
    pub thresholds: Option<Thresholds>,
}

/// DTO for updating an existing test run. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTestRun {
    /// Ignored if blank after normalization.
    pub name: Option<String>,
    pub description: Option<String>,
    pub fail_on_error: Option<bool>,
    /// Replaces the whole threshold set.
    pub thresholds: Option<Thresholds>,
}

//! Evaluate a load-test report against a stored test run and persist the
//! resulting status.

use std::path::Path;

use ghz_core::error::CoreError;
use ghz_core::report::Report;
use ghz_core::types::DbId;
use ghz_db::error::into_core_error;
use ghz_db::models::test_run::TestRun;
use ghz_db::repositories::TestRunRepo;
use sqlx::PgPool;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("Failed to read report {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Read and parse a report file.
pub async fn load_report(path: &Path) -> Result<Report, IngestError> {
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| IngestError::Read {
            path: path.display().to_string(),
            source,
        })?;
    Ok(Report::from_json(&json)?)
}

/// Evaluate `report` against test run `test_run_id` and save the outcome.
///
/// Returns the stored run with updated threshold statuses and overall status.
pub async fn ingest_report(
    pool: &PgPool,
    test_run_id: DbId,
    report: &Report,
) -> Result<TestRun, CoreError> {
    let not_found = || CoreError::NotFound {
        entity: "test_run",
        id: test_run_id,
    };

    let mut run = TestRunRepo::find_by_id(pool, test_run_id)
        .await
        .map_err(into_core_error)?
        .ok_or_else(not_found)?;

    let stats = report.latency_stats();
    let had_error = report.had_error();
    tracing::debug!(test_run_id, ?stats, had_error, "Derived report statistics");

    run.set_status(&stats, had_error);

    TestRunRepo::save_status(pool, &run)
        .await
        .map_err(into_core_error)?
        .ok_or_else(not_found)
}

//! `ghz-ingest` -- records the outcome of a load-test run.
//!
//! Reads the JSON report written by the load generator, evaluates it against
//! the thresholds configured on a stored test run and saves the resulting
//! statuses.
//!
//! # Environment variables
//!
//! | Variable                   | Required | Default | Description                       |
//! |----------------------------|----------|---------|-----------------------------------|
//! | `DATABASE_URL`             | yes      | --      | PostgreSQL connection string      |
//! | `DATABASE_MAX_CONNECTIONS` | no       | `20`    | Connection pool size              |
//! | `REPORT_PATH`              | yes      | --      | Path of the JSON report           |
//! | `TEST_RUN_ID`              | yes      | --      | Test run the report belongs to    |
//!
//! Exits with status 1 when the run fails its thresholds, 2 on any error.

use std::process::ExitCode;

use ghz_core::status::Status;
use ghz_db::DbConfig;
use ghz_ingest::config::IngestConfig;
use ghz_ingest::ingest;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ghz_ingest=info,ghz_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db_config = match DbConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid database configuration");
            return ExitCode::from(2);
        }
    };

    let config = match IngestConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid ingest configuration");
            return ExitCode::from(2);
        }
    };

    tracing::info!(
        test_run_id = config.test_run_id,
        report_path = %config.report_path.display(),
        "Starting ghz-ingest",
    );

    let report = match ingest::load_report(&config.report_path).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load report");
            return ExitCode::from(2);
        }
    };

    let pool = match ghz_db::create_pool(&db_config).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(error = %e, "Failed to connect to database");
            return ExitCode::from(2);
        }
    };

    match ingest::ingest_report(&pool, config.test_run_id, &report).await {
        Ok(run) => {
            for (metric, setting) in run.thresholds.iter() {
                tracing::info!(
                    %metric,
                    threshold = ?setting.threshold,
                    status = %setting.status,
                    "Threshold evaluated",
                );
            }
            tracing::info!(test_run_id = run.id, status = %run.status, "Test run recorded");
            if run.status == Status::Fail {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to record test run");
            ExitCode::from(2)
        }
    }
}

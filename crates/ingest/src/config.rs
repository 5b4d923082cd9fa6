use std::path::PathBuf;

use ghz_core::types::DbId;
use ghz_db::config::ConfigError;

/// Ingest job configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Path of the JSON report written by the load generator.
    pub report_path: PathBuf,
    /// Test run the report belongs to.
    pub test_run_id: DbId,
}

impl IngestConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var       | Required |
    /// |---------------|----------|
    /// | `REPORT_PATH` | yes      |
    /// | `TEST_RUN_ID` | yes      |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let report_path = lookup("REPORT_PATH")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .ok_or(ConfigError::Missing("REPORT_PATH"))?;

        let raw_id = lookup("TEST_RUN_ID").ok_or(ConfigError::Missing("TEST_RUN_ID"))?;
        let test_run_id = raw_id
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid {
                name: "TEST_RUN_ID",
                value: raw_id.clone(),
            })?;

        Ok(Self {
            report_path,
            test_run_id,
        })
    }
}

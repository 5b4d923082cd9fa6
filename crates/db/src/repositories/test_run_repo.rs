//! Repository for the `test_runs` table.

use ghz_core::naming::{normalize_description, normalize_name, normalize_or_generate};
use ghz_core::status::Status;
use ghz_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::test_run::{CreateTestRun, TestRun, UpdateTestRun};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, project_id, name, description, fail_on_error, thresholds, status, \
    created_at, updated_at";

/// Filter restricting `test_runs` to live runs of live projects.
const LIVE: &str = "\
    test_runs.deleted_at IS NULL AND EXISTS (\
        SELECT 1 FROM projects \
        WHERE projects.id = test_runs.project_id AND projects.deleted_at IS NULL)";

/// Provides CRUD operations for test runs.
pub struct TestRunRepo;

impl TestRunRepo {
    /// Insert a new test run, returning the created row.
    ///
    /// The parent project must exist and not be soft-deleted; otherwise no row
    /// is inserted and `sqlx::Error::RowNotFound` is returned. The normalized
    /// name must be unique within the project (`uq_test_runs_project_id_name`).
    /// New runs start with status `ok`.
    pub async fn create(pool: &PgPool, input: &CreateTestRun) -> Result<TestRun, sqlx::Error> {
        let name = normalize_or_generate(input.name.as_deref());
        let description = input.description.as_deref().map(normalize_description);
        let thresholds = input.thresholds.clone().unwrap_or_default();

        let query = format!(
            "INSERT INTO test_runs (project_id, name, description, fail_on_error, thresholds, status)
             SELECT $1, $2, $3, COALESCE($4, FALSE), $5, $6
             WHERE EXISTS (SELECT 1 FROM projects WHERE id = $1 AND deleted_at IS NULL)
             RETURNING {COLUMNS}"
        );
        let run = sqlx::query_as::<_, TestRun>(&query)
            .bind(input.project_id)
            .bind(&name)
            .bind(&description)
            .bind(input.fail_on_error)
            .bind(Json(&thresholds))
            .bind(Status::Ok.as_str())
            .fetch_one(pool)
            .await?;

        tracing::info!(
            test_run_id = run.id,
            project_id = run.project_id,
            name = %run.name,
            "Test run created",
        );
        Ok(run)
    }

    /// Find a test run by its internal ID. Excludes soft-deleted runs and runs
    /// of soft-deleted projects.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TestRun>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM test_runs WHERE id = $1 AND {LIVE}");
        sqlx::query_as::<_, TestRun>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a test run by name within a project. The name is normalized first.
    pub async fn find_by_name(
        pool: &PgPool,
        project_id: DbId,
        name: &str,
    ) -> Result<Option<TestRun>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM test_runs \
             WHERE project_id = $1 AND name = $2 AND {LIVE}"
        );
        sqlx::query_as::<_, TestRun>(&query)
            .bind(project_id)
            .bind(normalize_name(name))
            .fetch_optional(pool)
            .await
    }

    /// List the live test runs of a live project, most recently created first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<TestRun>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM test_runs \
             WHERE project_id = $1 AND {LIVE} \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, TestRun>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Update a test run. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTestRun,
    ) -> Result<Option<TestRun>, sqlx::Error> {
        let name = input
            .name
            .as_deref()
            .map(normalize_name)
            .filter(|n| !n.is_empty());
        let description = input.description.as_deref().map(normalize_description);

        let query = format!(
            "UPDATE test_runs SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                fail_on_error = COALESCE($4, fail_on_error),
                thresholds = COALESCE($5, thresholds),
                updated_at = NOW()
             WHERE id = $1 AND {LIVE}
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TestRun>(&query)
            .bind(id)
            .bind(&name)
            .bind(&description)
            .bind(input.fail_on_error)
            .bind(input.thresholds.as_ref().map(Json))
            .fetch_optional(pool)
            .await
    }

    /// Persist the evaluated thresholds and overall status of `run`.
    ///
    /// Call after [`TestRun::set_status`]. Returns `None` if the run no
    /// longer exists.
    pub async fn save_status(pool: &PgPool, run: &TestRun) -> Result<Option<TestRun>, sqlx::Error> {
        let query = format!(
            "UPDATE test_runs SET
                thresholds = $2,
                status = $3,
                updated_at = NOW()
             WHERE id = $1 AND {LIVE}
             RETURNING {COLUMNS}"
        );
        let saved = sqlx::query_as::<_, TestRun>(&query)
            .bind(run.id)
            .bind(&run.thresholds)
            .bind(run.status.as_str())
            .fetch_optional(pool)
            .await?;

        if saved.is_some() {
            tracing::info!(test_run_id = run.id, status = %run.status, "Test run status saved");
        }
        Ok(saved)
    }

    /// Soft-delete a test run by ID. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let query = format!("UPDATE test_runs SET deleted_at = NOW() WHERE id = $1 AND {LIVE}");
        let result = sqlx::query(&query).bind(id).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }
}

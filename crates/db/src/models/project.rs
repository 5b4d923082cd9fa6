//! Project entity model and DTOs.

use ghz_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A project row from the `projects` table.
///
/// `name` is stored normalized (see [`ghz_core::naming::normalize_name`]).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateProject {
    /// Explicit primary key; taken from the `projects` sequence if omitted.
    /// A key already in use is rejected by `projects_pkey`.
    pub id: Option<DbId>,
    /// A random name is generated if omitted or blank.
    pub name: Option<String>,
    pub description: Option<String>,
}

/// DTO for updating an existing project. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    /// Ignored if blank after normalization.
    pub name: Option<String>,
    pub description: Option<String>,
}

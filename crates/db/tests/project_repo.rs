//! Integration tests for the project repository.
//!
//! Exercises name normalization, lookups, uniqueness and partial updates
//! against a real database.

use assert_matches::assert_matches;
use ghz_core::error::CoreError;
use ghz_db::error::{into_core_error, is_unique_violation};
use ghz_db::models::project::{CreateProject, UpdateProject};
use ghz_db::repositories::ProjectRepo;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_project(name: &str, description: &str) -> CreateProject {
    CreateProject {
        name: Some(name.to_string()),
        description: Some(description.to_string()),
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_normalizes_name_and_description(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project("TestProj111 ", "Test Description Asdf "))
        .await
        .unwrap();

    assert!(project.id > 0);
    assert_eq!(project.name, "testproj111");
    assert_eq!(project.description.as_deref(), Some("Test Description Asdf"));

    let found = ProjectRepo::find_by_id(&pool, project.id)
        .await
        .unwrap()
        .expect("project should exist");
    assert_eq!(found.name, "testproj111");
    assert_eq!(found.description.as_deref(), Some("Test Description Asdf"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_without_name_generates_one(pool: PgPool) {
    let input = CreateProject {
        name: None,
        description: Some("Test Description Asdf 2".to_string()),
        ..Default::default()
    };
    let project = ProjectRepo::create(&pool, &input).await.unwrap();
    assert!(!project.name.is_empty());

    let found = ProjectRepo::find_by_id(&pool, project.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.name, project.name);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_duplicate_name_conflicts(pool: PgPool) {
    ProjectRepo::create(&pool, &new_project(" FooProject ", " Bar Desc "))
        .await
        .unwrap();

    let err = ProjectRepo::create(&pool, &new_project("FooProject", "Lorem Ipsum"))
        .await
        .unwrap_err();
    assert!(is_unique_violation(&err));
    assert_matches!(into_core_error(err), CoreError::Conflict(msg) if msg.contains("uq_projects_name"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_with_explicit_id(pool: PgPool) {
    let input = CreateProject {
        id: Some(123),
        ..new_project(" FooProject ", " Bar Desc ")
    };
    let project = ProjectRepo::create(&pool, &input).await.unwrap();
    assert_eq!(project.id, 123);
    assert_eq!(project.name, "fooproject");
    assert_eq!(project.description.as_deref(), Some("Bar Desc"));

    let found = ProjectRepo::find_by_id(&pool, 123).await.unwrap().unwrap();
    assert_eq!(found.name, "fooproject");

    let duplicate = CreateProject {
        id: Some(123),
        ..new_project("ACME", "Lorem Ipsum")
    };
    let err = ProjectRepo::create(&pool, &duplicate).await.unwrap_err();
    assert!(is_unique_violation(&err));
    assert_matches!(into_core_error(err), CoreError::Conflict(msg) if msg.contains("projects_pkey"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_name_reusable_after_soft_delete(pool: PgPool) {
    let first = ProjectRepo::create(&pool, &new_project("acme", ""))
        .await
        .unwrap();
    assert!(ProjectRepo::soft_delete(&pool, first.id).await.unwrap());
    assert!(!ProjectRepo::soft_delete(&pool, first.id).await.unwrap());

    let second = ProjectRepo::create(&pool, &new_project("ACME", ""))
        .await
        .unwrap();
    assert_ne!(first.id, second.id);
    assert!(ProjectRepo::find_by_id(&pool, first.id)
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Find
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_by_name(pool: PgPool) {
    let created = ProjectRepo::create(
        &pool,
        &new_project("testproject123", "test project description goes here"),
    )
    .await
    .unwrap();

    let found = ProjectRepo::find_by_name(&pool, " TestProject123 ")
        .await
        .unwrap()
        .expect("lookup should normalize the name");
    assert_eq!(found.id, created.id);
    assert_eq!(
        found.description.as_deref(),
        Some("test project description goes here")
    );

    assert!(ProjectRepo::find_by_name(&pool, "testproject999")
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_by_id_not_found(pool: PgPool) {
    assert!(ProjectRepo::find_by_id(&pool, 4321).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_newest_first(pool: PgPool) {
    let a = ProjectRepo::create(&pool, &new_project("alpha", "")).await.unwrap();
    let b = ProjectRepo::create(&pool, &new_project("beta", "")).await.unwrap();

    let ids: Vec<i64> = ProjectRepo::list(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, vec![b.id, a.id]);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_returns_none(pool: PgPool) {
    let input = UpdateProject {
        name: Some("testproject124".to_string()),
        description: Some("asdf".to_string()),
    };
    assert!(ProjectRepo::update(&pool, 4321, &input)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_existing(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project("testproject123", "old"))
        .await
        .unwrap();

    let updated = ProjectRepo::update(
        &pool,
        project.id,
        &UpdateProject {
            name: Some(" New Name ".to_string()),
            description: Some("Baz".to_string()),
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.name, "newname");
    assert_eq!(updated.description.as_deref(), Some("Baz"));
    assert!(updated.updated_at >= project.updated_at);

    // A blank name keeps the current one.
    let updated = ProjectRepo::update(
        &pool,
        project.id,
        &UpdateProject {
            name: Some("  ".to_string()),
            description: Some("Foo Test Bar".to_string()),
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.name, "newname");
    assert_eq!(updated.description.as_deref(), Some("Foo Test Bar"));
}

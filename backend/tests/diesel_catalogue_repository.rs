//! `DieselCatalogueRepository` against embedded PostgreSQL.

use exam_registry::domain::catalogue::{
    Diploma, DiplomaFields, Division, DivisionFields, Grade, GradeFields,
};
use exam_registry::domain::ports::{CatalogueRepository, CatalogueRepositoryError};
use exam_registry::outbound::persistence::{
    DbPool, DieselCatalogueRepository, PoolConfig, run_pending_migrations,
};
use pg_embedded_setup_unpriv::TestCluster;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;
use uuid::Uuid;

#[path = "support/pg_embed.rs"]
mod pg_embed;

use pg_embed::{handle_cluster_setup_failure, reset_database, test_cluster};

const TEST_DB: &str = "registry_catalogue_repository_test";

struct TestContext {
    runtime: Runtime,
    _cluster: TestCluster,
    repository: DieselCatalogueRepository,
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = test_cluster()?;
    let database_url = reset_database(&cluster, TEST_DB)?;
    runtime
        .block_on(run_pending_migrations(&database_url))
        .map_err(|err| err.to_string())?;

    let config = PoolConfig::new(database_url.as_str())
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(async { DbPool::new(config).await })
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        _cluster: cluster,
        repository: DieselCatalogueRepository::new(pool),
    })
}

#[fixture]
fn repo_context() -> Option<TestContext> {
    match setup_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn division(name: &str, code: &str) -> DivisionFields {
    DivisionFields {
        name: name.to_owned(),
        code: code.to_owned(),
    }
}

#[rstest]
fn empty_tables_list_nothing(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: empty_tables_list_nothing skipped");
        return;
    };
    let repository = &context.repository;

    let (diplomas, grades) = context.runtime.block_on(async {
        (
            CatalogueRepository::<Diploma>::list(repository).await.expect("diplomas"),
            CatalogueRepository::<Grade>::list(repository).await.expect("grades"),
        )
    });
    assert!(diplomas.is_empty());
    assert!(grades.is_empty());
}

#[rstest]
fn records_list_in_creation_order(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: records_list_in_creation_order skipped");
        return;
    };
    let repository = &context.repository;

    let (created, listed) = context.runtime.block_on(async {
        let mut created = Vec::new();
        for (name, code) in [("Southern", "SOUTH"), ("Northern", "NORTH"), ("Eastern", "EAST")] {
            let record = CatalogueRepository::<Division>::create(repository, division(name, code))
                .await
                .expect("create");
            created.push(record.id);
        }
        let listed = CatalogueRepository::<Division>::list(repository)
            .await
            .expect("list");
        (created, listed)
    });

    let listed_ids: Vec<Uuid> = listed.iter().map(|record| record.id).collect();
    assert_eq!(listed_ids, created);
    assert!(
        listed
            .windows(2)
            .all(|pair| pair[0].created_at <= pair[1].created_at)
    );
}

#[rstest]
fn duplicate_code_is_reported(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: duplicate_code_is_reported skipped");
        return;
    };
    let repository = &context.repository;

    let result = context.runtime.block_on(async {
        CatalogueRepository::<Division>::create(repository, division("Northern", "NORTH"))
            .await
            .expect("first create");
        CatalogueRepository::<Division>::create(repository, division("North again", "NORTH")).await
    });

    assert!(
        matches!(result, Err(CatalogueRepositoryError::Duplicate { .. })),
        "expected Duplicate, got {result:?}"
    );
}

#[rstest]
fn replace_keeps_identity_and_clears_optional_columns(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: replace_keeps_identity_and_clears_optional_columns skipped");
        return;
    };
    let repository = &context.repository;

    let (created, replaced, found) = context.runtime.block_on(async {
        let created = CatalogueRepository::<Diploma>::create(
            repository,
            DiplomaFields {
                name: "Baccalaureate".to_owned(),
                description: Some("Secondary school diploma".to_owned()),
            },
        )
        .await
        .expect("create");
        let replaced = CatalogueRepository::<Diploma>::replace(
            repository,
            created.id,
            DiplomaFields {
                name: "Baccalaureate (general)".to_owned(),
                description: None,
            },
        )
        .await
        .expect("replace")
        .expect("record exists");
        let found = CatalogueRepository::<Diploma>::find(repository, created.id)
            .await
            .expect("find")
            .expect("record exists");
        (created, replaced, found)
    });

    assert_eq!(replaced.id, created.id);
    assert_eq!(replaced.created_at, created.created_at);
    assert_eq!(found.values.name, "Baccalaureate (general)");
    assert_eq!(found.values.description, None);
}

#[rstest]
fn unknown_ids_are_absent(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: unknown_ids_are_absent skipped");
        return;
    };
    let repository = &context.repository;
    let id = Uuid::new_v4();

    let (found, replaced, deleted) = context.runtime.block_on(async {
        (
            CatalogueRepository::<Grade>::find(repository, id).await.expect("find"),
            CatalogueRepository::<Grade>::replace(
                repository,
                id,
                GradeFields {
                    name: "Merit".to_owned(),
                    rank: 2,
                },
            )
            .await
            .expect("replace"),
            CatalogueRepository::<Grade>::delete(repository, id)
                .await
                .expect("delete"),
        )
    });

    assert_eq!(found, None);
    assert_eq!(replaced, None);
    assert!(!deleted);
}

#[rstest]
fn delete_removes_the_record(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: delete_removes_the_record skipped");
        return;
    };
    let repository = &context.repository;

    let (deleted, remaining) = context.runtime.block_on(async {
        let record = CatalogueRepository::<Grade>::create(
            repository,
            GradeFields {
                name: "Distinction".to_owned(),
                rank: 1,
            },
        )
        .await
        .expect("create");
        let deleted = CatalogueRepository::<Grade>::delete(repository, record.id)
            .await
            .expect("delete");
        let remaining = CatalogueRepository::<Grade>::list(repository)
            .await
            .expect("list");
        (deleted, remaining)
    });

    assert!(deleted);
    assert!(remaining.is_empty());
}

//! Database fixtures for the Postgres repository tests.
//!
//! Tests are skipped unless `DATABASE_URL` points at a disposable database.

use briefdesk_application::{ClientRepository, ProjectRepository};
use briefdesk_domain::{Client, ClientId, NewClient, NewProject, Project, ProjectId};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use crate::{PostgresClientRepository, PostgresProjectRepository};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

pub(crate) async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for postgres repository tests: {error}");
    }

    Some(pool)
}

/// Client with a unique email and tax id so runs never collide.
pub(crate) fn unique_client() -> Client {
    let suffix = Uuid::new_v4().simple().to_string();
    let input = NewClient::new(
        "Anna Verdi",
        Some("Verdi Studio".to_owned()),
        &format!("IT{suffix}"),
        &format!("anna.{suffix}@verdi.example"),
        "+39 02 1234",
        "CEO",
    )
    .unwrap_or_else(|_| panic!("valid client"));
    let now = Utc::now();

    Client {
        id: ClientId::new(),
        full_name: input.full_name,
        company_name: input.company_name,
        tax_id: input.tax_id,
        email: input.email,
        phone: input.phone,
        role: input.role,
        created_at: now,
        updated_at: now,
    }
}

pub(crate) async fn stored_client(pool: &PgPool) -> Client {
    let client = unique_client();
    let insert = PostgresClientRepository::new(pool.clone())
        .insert(&client)
        .await;
    assert!(insert.is_ok());
    client
}

pub(crate) async fn stored_project(pool: &PgPool, client_id: ClientId) -> Project {
    stored_project_at(pool, client_id, Utc::now()).await
}

pub(crate) async fn stored_project_at(
    pool: &PgPool,
    client_id: ClientId,
    created_at: DateTime<Utc>,
) -> Project {
    let project = NewProject::new(client_id, "Website relaunch", None, None, None)
        .unwrap_or_else(|_| panic!("valid project"))
        .into_project(ProjectId::new(), "http://localhost:3000", created_at);
    let insert = PostgresProjectRepository::new(pool.clone())
        .insert(&project)
        .await;
    assert!(insert.is_ok());
    project
}

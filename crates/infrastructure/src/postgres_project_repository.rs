//! PostgreSQL-backed project repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use briefdesk_application::{ProjectListQuery, ProjectRepository};
use briefdesk_core::{AppError, AppResult, NonEmptyString};
use briefdesk_domain::{ClientId, Project, ProjectId, ProjectStatus};

use crate::postgres_error::reference_conflict_or_internal;

const UNKNOWN_CLIENT: &str = "project references an unknown client";

/// PostgreSQL implementation of the project repository port.
#[derive(Clone)]
pub struct PostgresProjectRepository {
    pool: PgPool,
}

impl PostgresProjectRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProjectRow {
    id: uuid::Uuid,
    client_id: uuid::Uuid,
    name: String,
    description: Option<String>,
    status: String,
    briefing_completed: bool,
    briefing_url: String,
    internal_notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProjectRow> for Project {
    type Error = AppError;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProjectId::from_uuid(row.id),
            client_id: ClientId::from_uuid(row.client_id),
            name: NonEmptyString::for_field("name", row.name)?,
            description: row.description,
            status: ProjectStatus::parse(&row.status)?,
            briefing_completed: row.briefing_completed,
            briefing_url: row.briefing_url,
            internal_notes: row.internal_notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn list(&self, query: ProjectListQuery) -> AppResult<Vec<Project>> {
        let rows = sqlx::query_as::<_, ProjectRow>(
            r#"
            SELECT id, client_id, name, description, status, briefing_completed,
                   briefing_url, internal_notes, created_at, updated_at
            FROM projects
            WHERE ($1::TEXT IS NULL OR status = $1)
              AND ($2::UUID IS NULL OR client_id = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(query.status.map(|status| status.as_str()))
        .bind(query.client_id.map(|client_id| client_id.as_uuid()))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list projects: {error}")))?;

        rows.into_iter().map(Project::try_from).collect()
    }

    async fn find(&self, project_id: ProjectId) -> AppResult<Option<Project>> {
        let row = sqlx::query_as::<_, ProjectRow>(
            r#"
            SELECT id, client_id, name, description, status, briefing_completed,
                   briefing_url, internal_notes, created_at, updated_at
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(project_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find project: {error}")))?;

        row.map(Project::try_from).transpose()
    }

    async fn insert(&self, project: &Project) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO projects (
                id, client_id, name, description, status, briefing_completed,
                briefing_url, internal_notes, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(project.id.as_uuid())
        .bind(project.client_id.as_uuid())
        .bind(project.name.as_str())
        .bind(project.description.as_deref())
        .bind(project.status.as_str())
        .bind(project.briefing_completed)
        .bind(project.briefing_url.as_str())
        .bind(project.internal_notes.as_deref())
        .bind(project.created_at)
        .bind(project.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|error| reference_conflict_or_internal(error, "insert project", UNKNOWN_CLIENT))?;

        Ok(())
    }

    async fn save(&self, project: &Project) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE projects
            SET client_id = $2,
                name = $3,
                description = $4,
                status = $5,
                briefing_completed = $6,
                internal_notes = $7,
                updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(project.id.as_uuid())
        .bind(project.client_id.as_uuid())
        .bind(project.name.as_str())
        .bind(project.description.as_deref())
        .bind(project.status.as_str())
        .bind(project.briefing_completed)
        .bind(project.internal_notes.as_deref())
        .bind(project.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|error| reference_conflict_or_internal(error, "update project", UNKNOWN_CLIENT))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("project not found".to_owned()));
        }

        Ok(())
    }

    async fn delete(&self, project_id: ProjectId) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM projects
            WHERE id = $1
            "#,
        )
        .bind(project_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete project: {error}")))?;

        Ok(result.rows_affected() > 0)
    }
}

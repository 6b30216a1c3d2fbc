//! PostgreSQL-backed briefing repository. Intake answers live in a JSONB column.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;

use briefdesk_application::{BriefingListItem, BriefingRepository};
use briefdesk_core::{AppError, AppResult};
use briefdesk_domain::{Briefing, BriefingForm, BriefingId, BriefingStatus, ClientId, ProjectId};

/// PostgreSQL implementation of the briefing repository port.
#[derive(Clone)]
pub struct PostgresBriefingRepository {
    pool: PgPool,
}

impl PostgresBriefingRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct BriefingRow {
    id: uuid::Uuid,
    project_id: uuid::Uuid,
    client_id: uuid::Uuid,
    form: Json<BriefingForm>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<BriefingRow> for Briefing {
    type Error = AppError;

    fn try_from(row: BriefingRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: BriefingId::from_uuid(row.id),
            project_id: ProjectId::from_uuid(row.project_id),
            client_id: ClientId::from_uuid(row.client_id),
            form: row.form.0,
            status: BriefingStatus::parse(&row.status)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct BriefingListRow {
    #[sqlx(flatten)]
    briefing: BriefingRow,
    project_name: Option<String>,
}

#[async_trait]
impl BriefingRepository for PostgresBriefingRepository {
    async fn list(&self) -> AppResult<Vec<BriefingListItem>> {
        let rows = sqlx::query_as::<_, BriefingListRow>(
            r#"
            SELECT briefings.id, briefings.project_id, briefings.client_id, briefings.form,
                   briefings.status, briefings.created_at, briefings.updated_at,
                   projects.name AS project_name
            FROM briefings
            LEFT JOIN projects ON projects.id = briefings.project_id
            ORDER BY briefings.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list briefings: {error}")))?;

        rows.into_iter()
            .map(|row| {
                Ok(BriefingListItem {
                    briefing: Briefing::try_from(row.briefing)?,
                    project_name: row.project_name,
                })
            })
            .collect()
    }

    async fn find(&self, briefing_id: BriefingId) -> AppResult<Option<Briefing>> {
        let row = sqlx::query_as::<_, BriefingRow>(
            r#"
            SELECT id, project_id, client_id, form, status, created_at, updated_at
            FROM briefings
            WHERE id = $1
            "#,
        )
        .bind(briefing_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find briefing: {error}")))?;

        row.map(Briefing::try_from).transpose()
    }

    async fn latest_for_project(&self, project_id: ProjectId) -> AppResult<Option<Briefing>> {
        let row = sqlx::query_as::<_, BriefingRow>(
            r#"
            SELECT id, project_id, client_id, form, status, created_at, updated_at
            FROM briefings
            WHERE project_id = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(project_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to find briefing for project: {error}"))
        })?;

        row.map(Briefing::try_from).transpose()
    }

    async fn insert(&self, briefing: &Briefing) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO briefings (id, project_id, client_id, form, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(briefing.id.as_uuid())
        .bind(briefing.project_id.as_uuid())
        .bind(briefing.client_id.as_uuid())
        .bind(Json(&briefing.form))
        .bind(briefing.status.as_str())
        .bind(briefing.created_at)
        .bind(briefing.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to insert briefing: {error}")))?;

        Ok(())
    }

    async fn update_status(
        &self,
        briefing_id: BriefingId,
        status: BriefingStatus,
        updated_at: DateTime<Utc>,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE briefings
            SET status = $2, updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(briefing_id.as_uuid())
        .bind(status.as_str())
        .bind(updated_at)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to update briefing status: {error}"))
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, briefing_id: BriefingId) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM briefings
            WHERE id = $1
            "#,
        )
        .bind(briefing_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete briefing: {error}")))?;

        Ok(result.rows_affected() > 0)
    }
}

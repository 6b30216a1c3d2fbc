//! PostgreSQL-backed temporary credential store using the `temp_users` table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use briefdesk_application::TemporaryCredentialRepository;
use briefdesk_core::{AppError, AppResult};
use briefdesk_domain::{EmailAddress, ProjectId, TemporaryCredential, TemporaryPassword};

/// PostgreSQL implementation of the temporary credential repository port.
#[derive(Clone)]
pub struct PostgresTemporaryCredentialRepository {
    pool: PgPool,
}

impl PostgresTemporaryCredentialRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TemporaryCredentialRow {
    user_id: Option<String>,
    project_id: uuid::Uuid,
    email: String,
    password: String,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl TryFrom<TemporaryCredentialRow> for TemporaryCredential {
    type Error = AppError;

    fn try_from(row: TemporaryCredentialRow) -> Result<Self, Self::Error> {
        Ok(Self {
            project_id: ProjectId::from_uuid(row.project_id),
            user_id: row.user_id,
            email: EmailAddress::new(row.email)?,
            password: TemporaryPassword::new(row.password)?,
            expires_at: row.expires_at,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl TemporaryCredentialRepository for PostgresTemporaryCredentialRepository {
    async fn insert(&self, credential: &TemporaryCredential) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO temp_users (user_id, project_id, email, password, expires_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(credential.user_id.as_deref())
        .bind(credential.project_id.as_uuid())
        .bind(credential.email.as_str())
        .bind(credential.password.as_str())
        .bind(credential.expires_at)
        .bind(credential.created_at)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to insert temporary credential: {error}"))
        })?;

        Ok(())
    }

    async fn latest_for_project(
        &self,
        project_id: ProjectId,
    ) -> AppResult<Option<TemporaryCredential>> {
        let row = sqlx::query_as::<_, TemporaryCredentialRow>(
            r#"
            SELECT user_id, project_id, email, password, expires_at, created_at
            FROM temp_users
            WHERE project_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(project_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to load temporary credential: {error}"))
        })?;

        row.map(TemporaryCredential::try_from).transpose()
    }

    async fn list_for_project(
        &self,
        project_id: ProjectId,
    ) -> AppResult<Vec<TemporaryCredential>> {
        let rows = sqlx::query_as::<_, TemporaryCredentialRow>(
            r#"
            SELECT user_id, project_id, email, password, expires_at, created_at
            FROM temp_users
            WHERE project_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(project_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list temporary credentials: {error}"))
        })?;

        rows.into_iter().map(TemporaryCredential::try_from).collect()
    }

    async fn delete_for_project(&self, project_id: ProjectId) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM temp_users
            WHERE project_id = $1
            "#,
        )
        .bind(project_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to delete temporary credentials: {error}"))
        })?;

        Ok(result.rows_affected())
    }

    async fn delete_for_user(&self, user_id: &str) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM temp_users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to delete temporary credentials: {error}"))
        })?;

        Ok(result.rows_affected())
    }
}

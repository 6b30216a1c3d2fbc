//! PostgreSQL-backed client repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use briefdesk_application::ClientRepository;
use briefdesk_core::{AppError, AppResult, NonEmptyString};
use briefdesk_domain::{Client, ClientId, EmailAddress};

use crate::postgres_error::{reference_conflict_or_internal, unique_conflict_or_internal};

const DUPLICATE_CLIENT: &str = "a client with this email or tax id already exists";
const CLIENT_IN_USE: &str = "client is still referenced by a project";

/// PostgreSQL implementation of the client repository port.
#[derive(Clone)]
pub struct PostgresClientRepository {
    pool: PgPool,
}

impl PostgresClientRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_where(&self, column: &str, value: &str) -> AppResult<Option<Client>> {
        let statement = format!(
            "SELECT id, full_name, company_name, tax_id, email, phone, role, created_at, updated_at \
             FROM clients WHERE {column} = $1"
        );

        let row = sqlx::query_as::<_, ClientRow>(&statement)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to find client: {error}")))?;

        row.map(Client::try_from).transpose()
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ClientRow {
    id: uuid::Uuid,
    full_name: String,
    company_name: Option<String>,
    tax_id: String,
    email: String,
    phone: String,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ClientRow> for Client {
    type Error = AppError;

    fn try_from(row: ClientRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ClientId::from_uuid(row.id),
            full_name: NonEmptyString::for_field("fullName", row.full_name)?,
            company_name: row.company_name,
            tax_id: NonEmptyString::for_field("taxId", row.tax_id)?,
            email: EmailAddress::new(row.email)?,
            phone: NonEmptyString::for_field("phone", row.phone)?,
            role: row.role,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl ClientRepository for PostgresClientRepository {
    async fn list(&self, search: Option<&str>) -> AppResult<Vec<Client>> {
        let pattern = search.map(|term| format!("%{}%", escape_like(term)));

        let rows = sqlx::query_as::<_, ClientRow>(
            r#"
            SELECT id, full_name, company_name, tax_id, email, phone, role, created_at, updated_at
            FROM clients
            WHERE $1::TEXT IS NULL
               OR full_name ILIKE $1
               OR company_name ILIKE $1
            ORDER BY full_name ASC
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list clients: {error}")))?;

        rows.into_iter().map(Client::try_from).collect()
    }

    async fn find(&self, client_id: ClientId) -> AppResult<Option<Client>> {
        let row = sqlx::query_as::<_, ClientRow>(
            r#"
            SELECT id, full_name, company_name, tax_id, email, phone, role, created_at, updated_at
            FROM clients
            WHERE id = $1
            "#,
        )
        .bind(client_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find client: {error}")))?;

        row.map(Client::try_from).transpose()
    }

    async fn find_by_email(&self, email: &EmailAddress) -> AppResult<Option<Client>> {
        self.find_where("lower(email)", email.as_str()).await
    }

    async fn find_by_tax_id(&self, tax_id: &str) -> AppResult<Option<Client>> {
        self.find_where("tax_id", tax_id).await
    }

    async fn insert(&self, client: &Client) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO clients (
                id, full_name, company_name, tax_id, email, phone, role, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(client.id.as_uuid())
        .bind(client.full_name.as_str())
        .bind(client.company_name.as_deref())
        .bind(client.tax_id.as_str())
        .bind(client.email.as_str())
        .bind(client.phone.as_str())
        .bind(client.role.as_str())
        .bind(client.created_at)
        .bind(client.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|error| unique_conflict_or_internal(error, "insert client", DUPLICATE_CLIENT))?;

        Ok(())
    }

    async fn save(&self, client: &Client) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE clients
            SET full_name = $2,
                company_name = $3,
                tax_id = $4,
                email = $5,
                phone = $6,
                role = $7,
                updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(client.id.as_uuid())
        .bind(client.full_name.as_str())
        .bind(client.company_name.as_deref())
        .bind(client.tax_id.as_str())
        .bind(client.email.as_str())
        .bind(client.phone.as_str())
        .bind(client.role.as_str())
        .bind(client.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|error| unique_conflict_or_internal(error, "update client", DUPLICATE_CLIENT))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("client not found".to_owned()));
        }

        Ok(())
    }

    async fn delete(&self, client_id: ClientId) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM clients
            WHERE id = $1
            "#,
        )
        .bind(client_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|error| reference_conflict_or_internal(error, "delete client", CLIENT_IN_USE))?;

        Ok(result.rows_affected() > 0)
    }
}

fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests;

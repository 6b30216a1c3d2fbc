use briefdesk_core::AppError;
use sqlx::PgPool;
use tower_sessions::cookie::SameSite;
use tower_sessions::cookie::time::Duration;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;

use crate::api_config::SessionConfig;

const SESSION_TABLE: &str = "briefdesk_sessions";

/// Builds the cookie session layer backed by the Postgres session table.
///
/// Owner and briefing sessions share the same cookie; the stored identity
/// tells them apart.
pub async fn build_postgres_session_layer(
    pool: PgPool,
    config: &SessionConfig,
) -> Result<SessionManagerLayer<PostgresStore>, AppError> {
    let session_store = PostgresStore::new(pool)
        .with_table_name(SESSION_TABLE)
        .map_err(|error| {
            AppError::Configuration(format!("invalid session table name: {error}"))
        })?;

    session_store.migrate().await.map_err(|error| {
        AppError::Internal(format!("failed to initialize session store: {error}"))
    })?;

    Ok(SessionManagerLayer::new(session_store)
        .with_name("briefdesk.sid")
        .with_secure(config.cookie_secure)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(config.idle_minutes))))
}

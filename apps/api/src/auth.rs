use briefdesk_core::{AppError, SessionIdentity};
use tower_sessions::Session;

use crate::error::ApiResult;

mod session;

pub use session::{login_handler, logout_handler, me_handler};

pub const SESSION_USER_KEY: &str = "session_identity";

/// Reads the identity stored in the session, if any.
pub async fn session_identity(session: &Session) -> ApiResult<Option<SessionIdentity>> {
    Ok(session
        .get::<SessionIdentity>(SESSION_USER_KEY)
        .await
        .map_err(|error| AppError::Internal(format!("failed to read session identity: {error}")))?)
}

/// Stores `identity` under a fresh session id.
pub async fn establish_session(session: &Session, identity: &SessionIdentity) -> ApiResult<()> {
    session
        .cycle_id()
        .await
        .map_err(|error| AppError::Internal(format!("failed to rotate session id: {error}")))?;

    session
        .insert(SESSION_USER_KEY, identity)
        .await
        .map_err(|error| AppError::Internal(format!("failed to persist session: {error}")))?;

    Ok(())
}

/// Clears the session, removes it from the store and drops its cookie.
pub async fn end_session(session: &Session) -> ApiResult<()> {
    session
        .flush()
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete session: {error}")))?;

    Ok(())
}

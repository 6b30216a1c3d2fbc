use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use briefdesk_core::AppError;
use tower_sessions::Session;

use crate::dto::{LoginRequest, SessionIdentityResponse};
use crate::error::ApiResult;
use crate::state::AppState;

use super::{end_session, establish_session, session_identity};

pub async fn login_handler(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<SessionIdentityResponse>> {
    let identity = state
        .owner_auth_service
        .login(payload.email.as_str(), payload.password.as_str())
        .await?;

    establish_session(&session, &identity).await?;
    tracing::info!(user_id = identity.user_id(), "owner signed in");

    Ok(Json(SessionIdentityResponse::from(&identity)))
}

pub async fn logout_handler(
    State(state): State<AppState>,
    session: Session,
) -> ApiResult<StatusCode> {
    if let Some(identity) = session_identity(&session).await? {
        state.owner_auth_service.logout(&identity).await;
    }

    end_session(&session).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn me_handler(session: Session) -> ApiResult<Json<SessionIdentityResponse>> {
    let identity = session_identity(&session)
        .await?
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?;

    Ok(Json(SessionIdentityResponse::from(&identity)))
}

use briefdesk_domain::BriefingForm;

use super::*;
use crate::auth::{end_session, establish_session, session_identity};

pub async fn briefing_gate_handler(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    session: Session,
) -> ApiResult<Json<BriefingGateResponse>> {
    let project_id = project_id_from_path(&project_id)?;
    let identity = session_identity(&session).await?;

    let gate = state
        .briefing_access_service
        .gate(project_id, identity.as_ref())
        .await?;

    Ok(Json(BriefingGateResponse::from(gate)))
}

pub async fn briefing_login_handler(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<BriefingGateResponse>> {
    let project_id = project_id_from_path(&project_id)?;

    let identity = state
        .briefing_access_service
        .login(project_id, payload.email.trim(), payload.password.as_str())
        .await?;
    establish_session(&session, &identity).await?;

    let gate = state
        .briefing_access_service
        .gate(project_id, Some(&identity))
        .await?;

    Ok(Json(BriefingGateResponse::from(gate)))
}

pub async fn briefing_submit_handler(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    session: Session,
    Json(form): Json<BriefingForm>,
) -> ApiResult<(StatusCode, Json<BriefingSubmissionResponse>)> {
    let project_id = project_id_from_path(&project_id)?;
    let identity = session_identity(&session)
        .await?
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?;

    let submission = state
        .briefing_access_service
        .submit(project_id, &identity, form)
        .await?;

    if submission.end_session
        && let Err(error) = end_session(&session).await
    {
        tracing::warn!(%project_id, error = %error.0, "failed to end briefing session");
    }

    Ok((
        StatusCode::CREATED,
        Json(BriefingSubmissionResponse::from(&submission)),
    ))
}

#[cfg(test)]
mod tests;

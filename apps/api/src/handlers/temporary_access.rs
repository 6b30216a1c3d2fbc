use super::*;

fn required_field(value: Option<String>, field: &str) -> ApiResult<String> {
    Ok(NonEmptyString::for_field(field, value.unwrap_or_default())?.into())
}

pub async fn create_temporary_user_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateTemporaryUserRequest>,
) -> ApiResult<Json<CreateTemporaryUserResponse>> {
    let project_id = required_field(payload.project_id, "projectId")?;
    let email = required_field(payload.email, "email")?;
    let password = required_field(payload.password, "password")?;

    let issued = state
        .temporary_access_service
        .issue(
            ProjectId::parse("projectId", &project_id)?,
            EmailAddress::new(email)?,
            TemporaryPassword::new(password)?,
        )
        .await?;

    Ok(Json(CreateTemporaryUserResponse::from(issued)))
}

pub async fn delete_temporary_by_project_handler(
    State(state): State<AppState>,
    Json(payload): Json<DeleteTemporaryByProjectRequest>,
) -> ApiResult<Json<DeleteTemporaryByProjectResponse>> {
    let project_id = required_field(payload.project_id, "projectId")?;
    let email = payload
        .email
        .filter(|email| !email.trim().is_empty())
        .map(EmailAddress::new)
        .transpose()?;

    let outcome = state
        .temporary_access_service
        .revoke_by_project(ProjectId::parse("projectId", &project_id)?, email.as_ref())
        .await?;

    Ok(Json(DeleteTemporaryByProjectResponse::from(outcome)))
}

pub async fn delete_temporary_user_handler(
    State(state): State<AppState>,
    Json(payload): Json<DeleteTemporaryUserRequest>,
) -> ApiResult<Json<OkResponse>> {
    let user_id = required_field(payload.user_id, "userId")?;

    state
        .temporary_access_service
        .revoke_by_identity(user_id.trim())
        .await?;

    Ok(Json(OkResponse { ok: true }))
}

pub async fn temporary_credential_by_project_handler(
    State(state): State<AppState>,
    Query(query): Query<TemporaryCredentialQuery>,
) -> ApiResult<Json<TemporaryCredentialResponse>> {
    let project_id = required_field(query.project_id, "projectId")?;

    let credential = state
        .temporary_access_service
        .lookup(ProjectId::parse("projectId", &project_id)?)
        .await?;

    Ok(Json(TemporaryCredentialResponse::from(credential)))
}

#[cfg(test)]
mod tests;

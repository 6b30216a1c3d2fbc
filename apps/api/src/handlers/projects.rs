use super::*;

pub async fn list_projects_handler(
    State(state): State<AppState>,
    Query(query): Query<ProjectListParams>,
) -> ApiResult<Json<Vec<ProjectResponse>>> {
    let projects = state
        .project_service
        .list(query.try_into()?)
        .await?
        .into_iter()
        .map(ProjectResponse::from)
        .collect();

    Ok(Json(projects))
}

pub async fn create_project_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateProjectRequest>,
) -> ApiResult<(StatusCode, Json<ProjectCreatedResponse>)> {
    let (input, issue_credentials) = payload.into_input()?;
    let created = state
        .project_service
        .create(input, issue_credentials)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ProjectCreatedResponse::from(created)),
    ))
}

pub async fn get_project_handler(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> ApiResult<Json<ProjectResponse>> {
    let project = state
        .project_service
        .get(project_id_from_path(&project_id)?)
        .await?;

    Ok(Json(ProjectResponse::from(project)))
}

pub async fn update_project_handler(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Json(payload): Json<UpdateProjectRequest>,
) -> ApiResult<Json<ProjectResponse>> {
    let project = state
        .project_service
        .update(project_id_from_path(&project_id)?, payload.try_into()?)
        .await?;

    Ok(Json(ProjectResponse::from(project)))
}

pub async fn delete_project_handler(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .project_service
        .delete(project_id_from_path(&project_id)?)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn regenerate_credentials_handler(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> ApiResult<Json<BriefingCredentialsResponse>> {
    let credentials = state
        .project_service
        .regenerate_credentials(project_id_from_path(&project_id)?)
        .await?;

    Ok(Json(BriefingCredentialsResponse::from(credentials)))
}

pub async fn project_briefing_handler(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> ApiResult<Json<BriefingResponse>> {
    let briefing = state
        .briefing_service
        .for_project(project_id_from_path(&project_id)?)
        .await?;

    Ok(Json(BriefingResponse::from(briefing)))
}

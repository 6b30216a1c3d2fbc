use briefdesk_application::ProjectListQuery;

use super::*;

fn client_id_from_path(value: &str) -> ApiResult<ClientId> {
    Ok(ClientId::parse("clientId", value)?)
}

pub async fn list_clients_handler(
    State(state): State<AppState>,
    Query(query): Query<ClientListQuery>,
) -> ApiResult<Json<Vec<ClientResponse>>> {
    let clients = state
        .client_service
        .list(query.search.as_deref())
        .await?
        .into_iter()
        .map(ClientResponse::from)
        .collect();

    Ok(Json(clients))
}

pub async fn create_client_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateClientRequest>,
) -> ApiResult<(StatusCode, Json<ClientResponse>)> {
    let client = state.client_service.create(payload.try_into()?).await?;

    Ok((StatusCode::CREATED, Json(ClientResponse::from(client))))
}

pub async fn get_client_handler(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> ApiResult<Json<ClientResponse>> {
    let client = state
        .client_service
        .get(client_id_from_path(&client_id)?)
        .await?;

    Ok(Json(ClientResponse::from(client)))
}

pub async fn update_client_handler(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
    Json(payload): Json<UpdateClientRequest>,
) -> ApiResult<Json<ClientResponse>> {
    let client = state
        .client_service
        .update(client_id_from_path(&client_id)?, payload.try_into()?)
        .await?;

    Ok(Json(ClientResponse::from(client)))
}

pub async fn delete_client_handler(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .client_service
        .delete(client_id_from_path(&client_id)?)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_client_projects_handler(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> ApiResult<Json<Vec<ProjectResponse>>> {
    let client_id = client_id_from_path(&client_id)?;
    state.client_service.get(client_id).await?;

    let projects = state
        .project_service
        .list(ProjectListQuery {
            status: None,
            client_id: Some(client_id),
        })
        .await?
        .into_iter()
        .map(ProjectResponse::from)
        .collect();

    Ok(Json(projects))
}

use super::*;

fn briefing_id_from_path(value: &str) -> ApiResult<BriefingId> {
    Ok(BriefingId::parse("briefingId", value)?)
}

pub async fn list_briefings_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<BriefingListItemResponse>>> {
    let briefings = state
        .briefing_service
        .list()
        .await?
        .into_iter()
        .map(BriefingListItemResponse::from)
        .collect();

    Ok(Json(briefings))
}

pub async fn update_briefing_status_handler(
    State(state): State<AppState>,
    Path(briefing_id): Path<String>,
    Json(payload): Json<UpdateBriefingStatusRequest>,
) -> ApiResult<Json<BriefingResponse>> {
    let briefing = state
        .briefing_service
        .update_status(
            briefing_id_from_path(&briefing_id)?,
            BriefingStatus::parse(&payload.status)?,
        )
        .await?;

    Ok(Json(BriefingResponse::from(briefing)))
}

pub async fn delete_briefing_handler(
    State(state): State<AppState>,
    Path(briefing_id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .briefing_service
        .delete(briefing_id_from_path(&briefing_id)?)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

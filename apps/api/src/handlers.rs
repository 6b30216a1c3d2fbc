use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use briefdesk_core::{AppError, NonEmptyString};
use briefdesk_domain::{
    BriefingId, BriefingStatus, ClientId, EmailAddress, ProjectId, TemporaryPassword,
};
use tower_sessions::Session;

use crate::dto::{
    BriefingCredentialsResponse, BriefingGateResponse, BriefingListItemResponse,
    BriefingResponse, BriefingSubmissionResponse, ClientListQuery, ClientResponse,
    CreateClientRequest, CreateProjectRequest, CreateTemporaryUserRequest,
    CreateTemporaryUserResponse, DeleteTemporaryByProjectRequest,
    DeleteTemporaryByProjectResponse, DeleteTemporaryUserRequest, HealthResponse, LoginRequest,
    OkResponse, ProjectCreatedResponse, ProjectListParams, ProjectResponse,
    TemporaryCredentialQuery, TemporaryCredentialResponse, UpdateBriefingStatusRequest,
    UpdateClientRequest, UpdateProjectRequest,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub mod briefing_gate;
pub mod briefings;
pub mod clients;
pub mod health;
pub mod projects;
pub mod temporary_access;

#[cfg(test)]
mod test_support;

fn project_id_from_path(value: &str) -> ApiResult<ProjectId> {
    Ok(ProjectId::parse("projectId", value)?)
}

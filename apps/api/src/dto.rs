mod auth;
mod briefings;
mod clients;
mod common;
mod projects;
mod temporary_access;

pub use auth::{LoginRequest, SessionIdentityResponse};
pub use briefings::{
    BriefingGateResponse, BriefingListItemResponse, BriefingResponse, BriefingSubmissionResponse,
    UpdateBriefingStatusRequest,
};
pub use clients::{
    ClientCreatedResponse, ClientListQuery, ClientResponse, CreateClientRequest,
    UpdateClientRequest,
};
pub use common::{HealthResponse, OkResponse};
pub use projects::{
    BriefingCredentialsResponse, CreateProjectRequest, ProjectCreatedResponse, ProjectListParams,
    ProjectResponse, UpdateProjectRequest,
};
pub use temporary_access::{
    CreateTemporaryUserRequest, CreateTemporaryUserResponse, DeleteTemporaryByProjectRequest,
    DeleteTemporaryByProjectResponse, DeleteTemporaryUserRequest, TemporaryCredentialQuery,
    TemporaryCredentialResponse,
};

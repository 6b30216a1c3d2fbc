use briefdesk_application::{BriefingCredentials, ProjectCreated, ProjectListQuery};
use briefdesk_core::{AppError, AppResult, NonEmptyString};
use briefdesk_domain::{ClientId, NewProject, Project, ProjectStatus, ProjectUpdate};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// API representation of a project.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/project-response.ts"
)]
pub struct ProjectResponse {
    pub id: String,
    pub client_id: String,
    pub name: String,
    pub description: Option<String>,
    #[ts(type = "\"awaiting_briefing\" | \"in_progress\" | \"paused\" | \"completed\"")]
    pub status: &'static str,
    pub briefing_completed: bool,
    pub briefing_url: String,
    pub internal_notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Project> for ProjectResponse {
    fn from(value: Project) -> Self {
        Self {
            id: value.id.to_string(),
            client_id: value.client_id.to_string(),
            name: value.name.into(),
            description: value.description,
            status: value.status.as_str(),
            briefing_completed: value.briefing_completed,
            briefing_url: value.briefing_url,
            internal_notes: value.internal_notes,
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

/// Incoming payload for project creation.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-project-request.ts"
)]
pub struct CreateProjectRequest {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub internal_notes: Option<String>,
    #[serde(default)]
    pub issue_credentials: Option<bool>,
}

impl CreateProjectRequest {
    /// Validates the payload. Returns the project and whether to issue credentials.
    pub fn into_input(self) -> AppResult<(NewProject, bool)> {
        let client_id = ClientId::parse("clientId", &self.client_id)?;
        let status = self
            .status
            .as_deref()
            .map(ProjectStatus::parse)
            .transpose()?;
        let input = NewProject::new(
            client_id,
            &self.name,
            self.description,
            status,
            self.internal_notes,
        )?;

        Ok((input, self.issue_credentials.unwrap_or(true)))
    }
}

/// Incoming payload for a partial project update.
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-project-request.ts"
)]
pub struct UpdateProjectRequest {
    pub client_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub internal_notes: Option<String>,
}

impl TryFrom<UpdateProjectRequest> for ProjectUpdate {
    type Error = AppError;

    fn try_from(value: UpdateProjectRequest) -> AppResult<Self> {
        Ok(Self {
            client_id: value
                .client_id
                .map(|client_id| ClientId::parse("clientId", &client_id))
                .transpose()?,
            name: value
                .name
                .map(|name| NonEmptyString::for_field("name", name))
                .transpose()?,
            description: value.description.map(Some),
            status: value
                .status
                .as_deref()
                .map(ProjectStatus::parse)
                .transpose()?,
            internal_notes: value.internal_notes.map(Some),
        })
    }
}

/// Query string of the project list.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectListParams {
    pub status: Option<String>,
    pub client_id: Option<String>,
}

impl TryFrom<ProjectListParams> for ProjectListQuery {
    type Error = AppError;

    fn try_from(value: ProjectListParams) -> AppResult<Self> {
        Ok(Self {
            status: value
                .status
                .as_deref()
                .filter(|status| !status.trim().is_empty())
                .map(ProjectStatus::parse)
                .transpose()?,
            client_id: value
                .client_id
                .as_deref()
                .filter(|client_id| !client_id.trim().is_empty())
                .map(|client_id| ClientId::parse("clientId", client_id))
                .transpose()?,
        })
    }
}

/// Briefing credentials handed to the owner.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/briefing-credentials-response.ts"
)]
pub struct BriefingCredentialsResponse {
    pub email: String,
    pub password: String,
    pub temp_saved: bool,
}

impl From<BriefingCredentials> for BriefingCredentialsResponse {
    fn from(value: BriefingCredentials) -> Self {
        Self {
            email: value.email.as_str().to_owned(),
            password: value.password.as_str().to_owned(),
            temp_saved: value.temp_saved,
        }
    }
}

/// Result of project creation.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/project-created-response.ts"
)]
pub struct ProjectCreatedResponse {
    pub project: ProjectResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub credentials: Option<BriefingCredentialsResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub credential_error: Option<String>,
}

impl From<ProjectCreated> for ProjectCreatedResponse {
    fn from(value: ProjectCreated) -> Self {
        Self {
            project: value.project.into(),
            credentials: value.credentials.map(BriefingCredentialsResponse::from),
            credential_error: value.credential_error,
        }
    }
}

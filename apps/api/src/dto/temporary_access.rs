use briefdesk_application::{IssuedCredential, RevokeOutcome};
use briefdesk_domain::TemporaryCredential;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Incoming payload for temporary identity creation.
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-temporary-user-request.ts"
)]
pub struct CreateTemporaryUserRequest {
    pub project_id: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Result of temporary identity creation.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-temporary-user-response.ts"
)]
pub struct CreateTemporaryUserResponse {
    pub user_id: String,
    pub temp_saved: bool,
}

impl From<IssuedCredential> for CreateTemporaryUserResponse {
    fn from(value: IssuedCredential) -> Self {
        Self {
            user_id: value.user_id,
            temp_saved: value.temp_saved,
        }
    }
}

/// Incoming payload for revocation by project.
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/delete-temporary-by-project-request.ts"
)]
pub struct DeleteTemporaryByProjectRequest {
    pub project_id: Option<String>,
    pub email: Option<String>,
}

/// Result of revocation by project.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/delete-temporary-by-project-response.ts"
)]
pub struct DeleteTemporaryByProjectResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub deleted_by: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub info: Option<&'static str>,
}

impl From<RevokeOutcome> for DeleteTemporaryByProjectResponse {
    fn from(value: RevokeOutcome) -> Self {
        Self {
            ok: true,
            deleted_by: value.deleted_by(),
            info: value.info(),
        }
    }
}

/// Incoming payload for revocation by identity.
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/delete-temporary-user-request.ts"
)]
pub struct DeleteTemporaryUserRequest {
    pub user_id: Option<String>,
}

/// Query string of the credential lookup.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemporaryCredentialQuery {
    pub project_id: Option<String>,
}

/// Newest stored credential of a project. Serializes to `{}` when there is none.
#[derive(Debug, Default, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/temporary-credential-response.ts"
)]
pub struct TemporaryCredentialResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub expires_at: Option<String>,
}

impl From<Option<TemporaryCredential>> for TemporaryCredentialResponse {
    fn from(value: Option<TemporaryCredential>) -> Self {
        let Some(credential) = value else {
            return Self::default();
        };

        Self {
            email: Some(credential.email.as_str().to_owned()),
            password: Some(credential.password.as_str().to_owned()),
            expires_at: Some(credential.expires_at.to_rfc3339()),
        }
    }
}

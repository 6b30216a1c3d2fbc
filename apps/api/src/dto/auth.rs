use briefdesk_core::{SessionIdentity, SessionKind};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Email and password sign-in payload, shared by the owner and briefing logins.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/login-request.ts"
)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// API representation of the signed-in identity.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/session-identity-response.ts"
)]
pub struct SessionIdentityResponse {
    pub user_id: String,
    pub email: Option<String>,
    #[ts(type = "\"owner\" | \"temporary_briefing\"")]
    pub kind: &'static str,
    pub project_id: Option<String>,
}

impl From<&SessionIdentity> for SessionIdentityResponse {
    fn from(identity: &SessionIdentity) -> Self {
        let (kind, project_id) = match identity.kind() {
            SessionKind::Owner => ("owner", None),
            SessionKind::TemporaryBriefing { project_id } => {
                ("temporary_briefing", Some(project_id.to_string()))
            }
        };

        Self {
            user_id: identity.user_id().to_owned(),
            email: identity.email().map(str::to_owned),
            kind,
            project_id,
        }
    }
}

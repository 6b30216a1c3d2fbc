use briefdesk_application::{BriefingGate, BriefingListItem, BriefingSubmission};
use briefdesk_domain::{Briefing, BriefingForm};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Project label shown for briefings whose project no longer exists.
pub const PUBLIC_BRIEFING_LABEL: &str = "Public briefing";

/// API representation of a briefing.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/briefing-response.ts"
)]
pub struct BriefingResponse {
    pub id: String,
    pub project_id: String,
    pub client_id: String,
    #[ts(type = "Record<string, unknown>")]
    pub form: BriefingForm,
    #[ts(type = "\"pending\" | \"reviewed\" | \"approved\" | \"rejected\"")]
    pub status: &'static str,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Briefing> for BriefingResponse {
    fn from(value: Briefing) -> Self {
        Self {
            id: value.id.to_string(),
            project_id: value.project_id.to_string(),
            client_id: value.client_id.to_string(),
            form: value.form,
            status: value.status.as_str(),
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

/// Briefing list row with the name of its project.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/briefing-list-item-response.ts"
)]
pub struct BriefingListItemResponse {
    pub briefing: BriefingResponse,
    pub project_name: String,
}

impl From<BriefingListItem> for BriefingListItemResponse {
    fn from(value: BriefingListItem) -> Self {
        Self {
            briefing: value.briefing.into(),
            project_name: value
                .project_name
                .unwrap_or_else(|| PUBLIC_BRIEFING_LABEL.to_owned()),
        }
    }
}

/// Incoming payload for a review status change.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-briefing-status-request.ts"
)]
pub struct UpdateBriefingStatusRequest {
    #[serde(default)]
    pub status: String,
}

/// Access state of the public briefing form.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/briefing-gate-response.ts"
)]
pub struct BriefingGateResponse {
    #[ts(type = "\"login_required\" | \"form\" | \"submitted\"")]
    pub state: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub project_name: Option<String>,
}

impl From<BriefingGate> for BriefingGateResponse {
    fn from(value: BriefingGate) -> Self {
        Self {
            state: value.state.as_str(),
            project_name: value.project_name,
        }
    }
}

/// Result of a briefing submission.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/briefing-submission-response.ts"
)]
pub struct BriefingSubmissionResponse {
    pub briefing_id: String,
    pub signed_out: bool,
}

impl From<&BriefingSubmission> for BriefingSubmissionResponse {
    fn from(value: &BriefingSubmission) -> Self {
        Self {
            briefing_id: value.briefing.id.to_string(),
            signed_out: value.end_session,
        }
    }
}

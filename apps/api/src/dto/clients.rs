use briefdesk_core::{AppError, AppResult, NonEmptyString};
use briefdesk_domain::{Client, ClientUpdate, EmailAddress, NewClient};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// API representation of a client.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/client-response.ts"
)]
pub struct ClientResponse {
    pub id: String,
    pub full_name: String,
    pub company_name: Option<String>,
    pub tax_id: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Client> for ClientResponse {
    fn from(value: Client) -> Self {
        Self {
            id: value.id.to_string(),
            full_name: value.full_name.into(),
            company_name: value.company_name,
            tax_id: value.tax_id.into(),
            email: value.email.as_str().to_owned(),
            phone: value.phone.into(),
            role: value.role,
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

/// Incoming payload for client creation.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-client-request.ts"
)]
pub struct CreateClientRequest {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub tax_id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub role: String,
}

impl TryFrom<CreateClientRequest> for NewClient {
    type Error = AppError;

    fn try_from(value: CreateClientRequest) -> AppResult<Self> {
        Self::new(
            &value.full_name,
            value.company_name,
            &value.tax_id,
            &value.email,
            &value.phone,
            &value.role,
        )
    }
}

/// Incoming payload for a partial client update.
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-client-request.ts"
)]
pub struct UpdateClientRequest {
    pub full_name: Option<String>,
    pub company_name: Option<String>,
    pub tax_id: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
}

impl TryFrom<UpdateClientRequest> for ClientUpdate {
    type Error = AppError;

    fn try_from(value: UpdateClientRequest) -> AppResult<Self> {
        Ok(Self {
            full_name: value
                .full_name
                .map(|full_name| NonEmptyString::for_field("fullName", full_name))
                .transpose()?,
            company_name: value.company_name.map(Some),
            tax_id: value
                .tax_id
                .map(|tax_id| NonEmptyString::for_field("taxId", tax_id))
                .transpose()?,
            email: value.email.map(EmailAddress::new).transpose()?,
            phone: value
                .phone
                .map(|phone| NonEmptyString::for_field("phone", phone))
                .transpose()?,
            role: value.role.map(|role| role.trim().to_owned()),
        })
    }
}

/// Query string of the client list.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ClientListQuery {
    pub search: Option<String>,
}

/// Identifier of a created or reused client.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/client-created-response.ts"
)]
pub struct ClientCreatedResponse {
    pub id: String,
}

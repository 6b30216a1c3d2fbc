//! Identity provider adapter for the hosted GoTrue-compatible auth REST API.
//!
//! Admin calls authenticate with the service-role key. Password sign-in and
//! sign-out use the public anon key.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use url::Url;

use briefdesk_application::{
    IdentityProvider, NewTemporaryIdentity, ProviderSession, ProviderUser,
};
use briefdesk_core::{AppError, AppResult};

/// Metadata flag marking temporary briefing identities.
pub const TEMP_BRIEFING_FLAG: &str = "temp_briefing";

/// Metadata key holding the project a temporary identity belongs to.
pub const PROJECT_ID_KEY: &str = "projectId";

/// REST client for the identity provider.
pub struct SupabaseIdentityProvider {
    http_client: reqwest::Client,
    base_url: Url,
    anon_key: String,
    service_role_key: Option<String>,
}

impl SupabaseIdentityProvider {
    /// Creates a new identity provider client.
    #[must_use]
    pub fn new(
        http_client: reqwest::Client,
        base_url: Url,
        anon_key: impl Into<String>,
        service_role_key: Option<String>,
    ) -> Self {
        Self {
            http_client,
            base_url,
            anon_key: anon_key.into(),
            service_role_key: service_role_key.filter(|key| !key.trim().is_empty()),
        }
    }

    fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                AppError::Configuration("SUPABASE_URL cannot be used as a base URL".to_owned())
            })?
            .pop_if_empty()
            .extend(["auth", "v1"])
            .extend(segments);
        Ok(url)
    }

    fn service_role_key(&self) -> AppResult<&str> {
        self.service_role_key.as_deref().ok_or_else(|| {
            AppError::Configuration("SUPABASE_SERVICE_ROLE_KEY is not configured".to_owned())
        })
    }

    fn admin_request(
        &self,
        method: reqwest::Method,
        segments: &[&str],
    ) -> AppResult<reqwest::RequestBuilder> {
        let key = self.service_role_key()?;
        let url = self.endpoint(segments)?;

        Ok(self
            .http_client
            .request(method, url)
            .header("apikey", key)
            .bearer_auth(key))
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        operation: &str,
    ) -> AppResult<reqwest::Response> {
        let response = request.send().await.map_err(|error| {
            AppError::Internal(format!("identity provider {operation} transport error: {error}"))
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<response body unavailable>".to_owned());
        tracing::debug!(operation, %status, "identity provider request failed");

        if status == reqwest::StatusCode::BAD_REQUEST || status == reqwest::StatusCode::UNAUTHORIZED
        {
            return Err(AppError::Unauthorized(format!(
                "identity provider rejected {operation} with status {status}: {body}"
            )));
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!(
                "identity provider {operation} target not found"
            )));
        }

        Err(AppError::Internal(format!(
            "identity provider {operation} failed with status {status}: {body}"
        )))
    }
}

#[derive(Debug, Deserialize)]
struct GoTrueUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    app_metadata: Value,
    #[serde(default)]
    user_metadata: Value,
}

impl From<GoTrueUser> for ProviderUser {
    fn from(user: GoTrueUser) -> Self {
        let temporary_briefing = [&user.app_metadata, &user.user_metadata]
            .iter()
            .any(|metadata| metadata.get(TEMP_BRIEFING_FLAG).and_then(Value::as_bool) == Some(true));

        // app_metadata takes precedence over user_metadata.
        let project_id = [&user.app_metadata, &user.user_metadata]
            .iter()
            .find_map(|metadata| metadata.get(PROJECT_ID_KEY).and_then(Value::as_str))
            .map(str::to_owned);

        Self {
            id: user.id,
            email: user.email.filter(|email| !email.is_empty()),
            temporary_briefing,
            project_id,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GoTrueUserList {
    #[serde(default)]
    users: Vec<GoTrueUser>,
}

#[derive(Debug, Deserialize)]
struct GoTrueSession {
    access_token: String,
    user: GoTrueUser,
}

fn temporary_user_payload(identity: &NewTemporaryIdentity) -> Value {
    let metadata = json!({
        TEMP_BRIEFING_FLAG: true,
        PROJECT_ID_KEY: identity.project_id.to_string(),
    });

    json!({
        "email": identity.email.as_str(),
        "password": identity.password.as_str(),
        "email_confirm": true,
        "app_metadata": metadata,
        "user_metadata": metadata,
    })
}

#[async_trait]
impl IdentityProvider for SupabaseIdentityProvider {
    fn is_admin_configured(&self) -> bool {
        self.service_role_key.is_some()
    }

    async fn create_temporary_user(
        &self,
        identity: &NewTemporaryIdentity,
    ) -> AppResult<ProviderUser> {
        let request = self
            .admin_request(reqwest::Method::POST, &["admin", "users"])?
            .json(&temporary_user_payload(identity));

        let user = self
            .send(request, "create user")
            .await?
            .json::<GoTrueUser>()
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to decode created identity: {error}"))
            })?;

        Ok(user.into())
    }

    async fn delete_user(&self, user_id: &str) -> AppResult<()> {
        let request = self.admin_request(reqwest::Method::DELETE, &["admin", "users", user_id])?;
        self.send(request, "delete user").await?;
        Ok(())
    }

    async fn list_users(&self, page: u32, per_page: u32) -> AppResult<Vec<ProviderUser>> {
        let key = self.service_role_key()?;
        let mut url = self.endpoint(&["admin", "users"])?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("per_page", &per_page.to_string());
        let request = self
            .http_client
            .get(url)
            .header("apikey", key)
            .bearer_auth(key);

        let list = self
            .send(request, "list users")
            .await?
            .json::<GoTrueUserList>()
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to decode identity list: {error}"))
            })?;

        Ok(list.users.into_iter().map(ProviderUser::from).collect())
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> AppResult<ProviderSession> {
        let mut url = self.endpoint(&["token"])?;
        url.query_pairs_mut().append_pair("grant_type", "password");
        let request = self
            .http_client
            .post(url)
            .header("apikey", self.anon_key.as_str())
            .json(&json!({ "email": email, "password": password }));

        let session = self
            .send(request, "password sign-in")
            .await?
            .json::<GoTrueSession>()
            .await
            .map_err(|error| AppError::Internal(format!("failed to decode session: {error}")))?;

        Ok(ProviderSession {
            user: session.user.into(),
            access_token: session.access_token,
        })
    }

    async fn sign_out(&self, access_token: &str) -> AppResult<()> {
        let url = self.endpoint(&["logout"])?;
        let request = self
            .http_client
            .post(url)
            .header("apikey", self.anon_key.as_str())
            .bearer_auth(access_token);

        self.send(request, "sign-out").await?;
        Ok(())
    }
}

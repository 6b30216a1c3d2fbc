//! Identity provider port.
//!
//! The identity provider owns user accounts. Admin operations need the
//! privileged service-role key; password sign-in only needs the public key.

use async_trait::async_trait;

use briefdesk_core::AppResult;
use briefdesk_domain::{EmailAddress, ProjectId, TemporaryPassword};

/// Number of users scanned by the email fallback during revocation.
pub const USER_LIST_PAGE_SIZE: u32 = 1000;

/// Account record returned by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderUser {
    /// Opaque identity id.
    pub id: String,
    /// Login email, when the provider returned one.
    pub email: Option<String>,
    /// Whether the account carries the `temp_briefing` tag.
    pub temporary_briefing: bool,
    /// Project recorded in the account metadata, if any.
    pub project_id: Option<String>,
}

/// Result of a successful password sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSession {
    /// Signed-in account.
    pub user: ProviderUser,
    /// Bearer token used to end the provider session later.
    pub access_token: String,
}

/// Input for a pre-confirmed temporary identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTemporaryIdentity {
    /// Project the identity is scoped to.
    pub project_id: ProjectId,
    /// Login email.
    pub email: EmailAddress,
    /// Login password.
    pub password: TemporaryPassword,
}

/// Port for the external identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Returns whether the privileged admin key is configured.
    fn is_admin_configured(&self) -> bool;

    /// Creates a confirmed identity tagged with the temporary-briefing metadata.
    async fn create_temporary_user(&self, identity: &NewTemporaryIdentity)
    -> AppResult<ProviderUser>;

    /// Deletes an identity by id.
    async fn delete_user(&self, user_id: &str) -> AppResult<()>;

    /// Lists one page of identities.
    async fn list_users(&self, page: u32, per_page: u32) -> AppResult<Vec<ProviderUser>>;

    /// Signs in with email and password.
    async fn sign_in_with_password(&self, email: &str, password: &str)
    -> AppResult<ProviderSession>;

    /// Ends the provider session behind an access token.
    async fn sign_out(&self, access_token: &str) -> AppResult<()>;
}

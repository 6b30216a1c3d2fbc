//! Temporary briefing access: issue, revoke and look up scoped credentials.
//!
//! Identity creation is the primary step. Store bookkeeping and cleanup are
//! secondary: their failures are logged and never block the caller, unless
//! the compensating policy is selected for issuance.

use std::sync::Arc;

use briefdesk_core::{AppError, AppResult};

use crate::{IdentityProvider, TemporaryCredentialRepository};

/// Behavior when the credential store write fails after the identity was created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IssuePolicy {
    /// Keep the identity and report `temp_saved = false`.
    #[default]
    BestEffort,
    /// Delete the identity again and fail the issuance.
    Compensating,
}

impl IssuePolicy {
    /// Returns the configuration string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BestEffort => "best_effort",
            Self::Compensating => "compensating",
        }
    }

    /// Parses a configuration string.
    pub fn parse(value: &str) -> AppResult<Self> {
        match value.trim() {
            "best_effort" => Ok(Self::BestEffort),
            "compensating" => Ok(Self::Compensating),
            other => Err(AppError::Validation(format!(
                "unknown temporary credential policy '{other}'"
            ))),
        }
    }
}

/// Result of a successful issuance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedCredential {
    /// Identity id assigned by the provider.
    pub user_id: String,
    /// Whether the credential row was stored.
    pub temp_saved: bool,
}

/// How a by-project revocation found its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevokeOutcome {
    /// Identities were found through the credential store.
    DeletedByStore,
    /// An identity was found by scanning the provider for the email.
    DeletedByEmail,
    /// Nothing matched. Still a success.
    NothingFound,
}

impl RevokeOutcome {
    /// Returns the `deletedBy` label, if something was deleted.
    #[must_use]
    pub fn deleted_by(&self) -> Option<&'static str> {
        match self {
            Self::DeletedByStore => Some("temp_users"),
            Self::DeletedByEmail => Some("email"),
            Self::NothingFound => None,
        }
    }

    /// Returns the informational message reported when nothing was deleted.
    #[must_use]
    pub fn info(&self) -> Option<&'static str> {
        match self {
            Self::NothingFound => Some("no temporary user found"),
            Self::DeletedByStore | Self::DeletedByEmail => None,
        }
    }
}

/// Application service for temporary briefing credentials.
#[derive(Clone)]
pub struct TemporaryAccessService {
    identity_provider: Arc<dyn IdentityProvider>,
    credential_repository: Arc<dyn TemporaryCredentialRepository>,
    policy: IssuePolicy,
}

impl TemporaryAccessService {
    /// Creates a new temporary access service.
    #[must_use]
    pub fn new(
        identity_provider: Arc<dyn IdentityProvider>,
        credential_repository: Arc<dyn TemporaryCredentialRepository>,
        policy: IssuePolicy,
    ) -> Self {
        Self {
            identity_provider,
            credential_repository,
            policy,
        }
    }

    /// Returns the configured issue policy.
    #[must_use]
    pub fn policy(&self) -> IssuePolicy {
        self.policy
    }

    fn ensure_admin_configured(&self) -> AppResult<()> {
        if self.identity_provider.is_admin_configured() {
            return Ok(());
        }

        Err(AppError::Configuration(
            "SUPABASE_SERVICE_ROLE_KEY is not configured".to_owned(),
        ))
    }
}

mod issue;
mod lookup;
mod password;
mod revoke;

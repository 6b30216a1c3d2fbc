//! Owner sign-in through the identity provider.

use std::sync::Arc;

use briefdesk_core::{AppError, AppResult, SessionIdentity, SessionKind};

use crate::IdentityProvider;

const INVALID_LOGIN: &str = "invalid email or password";

/// Application service for the owner login.
#[derive(Clone)]
pub struct OwnerAuthService {
    identity_provider: Arc<dyn IdentityProvider>,
}

impl OwnerAuthService {
    /// Creates a new owner auth service.
    #[must_use]
    pub fn new(identity_provider: Arc<dyn IdentityProvider>) -> Self {
        Self { identity_provider }
    }

    /// Signs the owner in. Temporary briefing identities are refused with
    /// the same message as a wrong password.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<SessionIdentity> {
        let session = self
            .identity_provider
            .sign_in_with_password(email, password)
            .await
            .map_err(|error| {
                tracing::info!(%error, "owner login rejected");
                AppError::Unauthorized(INVALID_LOGIN.to_owned())
            })?;

        if session.user.temporary_briefing {
            tracing::info!(user_id = %session.user.id, "temporary identity refused at owner login");
            if let Err(error) = self.identity_provider.sign_out(&session.access_token).await {
                tracing::warn!(%error, "failed to end rejected provider session");
            }
            return Err(AppError::Unauthorized(INVALID_LOGIN.to_owned()));
        }

        Ok(SessionIdentity::new(
            session.user.id,
            session.user.email,
            SessionKind::Owner,
            Some(session.access_token),
        ))
    }

    /// Ends the provider session behind an identity. Failures are logged only.
    pub async fn logout(&self, identity: &SessionIdentity) {
        let Some(access_token) = identity.access_token() else {
            return;
        };

        if let Err(error) = self.identity_provider.sign_out(access_token).await {
            tracing::warn!(user_id = identity.user_id(), %error, "failed to end provider session");
        }
    }
}

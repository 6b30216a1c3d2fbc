use briefdesk_core::{AppError, AppResult};
use briefdesk_domain::{EmailAddress, ProjectId, TemporaryCredential, TemporaryPassword};
use chrono::Utc;

use crate::NewTemporaryIdentity;

use super::*;

impl TemporaryAccessService {
    /// Creates a scoped identity for `project_id` and records it in the store.
    ///
    /// Identity-provider failures abort with a generic error. A failed store
    /// write is downgraded to `temp_saved = false` under the best-effort policy.
    pub async fn issue(
        &self,
        project_id: ProjectId,
        email: EmailAddress,
        password: TemporaryPassword,
    ) -> AppResult<IssuedCredential> {
        self.ensure_admin_configured()?;

        let identity = NewTemporaryIdentity {
            project_id,
            email,
            password,
        };

        let user = self
            .identity_provider
            .create_temporary_user(&identity)
            .await
            .map_err(|error| {
                tracing::error!(%project_id, %error, "failed to create temporary identity");
                AppError::Unavailable("failed to create temporary user".to_owned())
            })?;

        let credential = TemporaryCredential::issued(
            project_id,
            Some(user.id.clone()),
            identity.email,
            identity.password,
            Utc::now(),
        );

        let Err(error) = self.credential_repository.insert(&credential).await else {
            tracing::info!(%project_id, user_id = %user.id, "issued temporary credential");
            return Ok(IssuedCredential {
                user_id: user.id,
                temp_saved: true,
            });
        };

        tracing::warn!(
            %project_id,
            user_id = %user.id,
            %error,
            "failed to store temporary credential"
        );

        if self.policy == IssuePolicy::Compensating {
            if let Err(error) = self.identity_provider.delete_user(&user.id).await {
                tracing::warn!(
                    user_id = %user.id,
                    %error,
                    "failed to roll back temporary identity"
                );
            }
            return Err(AppError::Unavailable(
                "failed to create temporary user".to_owned(),
            ));
        }

        Ok(IssuedCredential {
            user_id: user.id,
            temp_saved: false,
        })
    }
}

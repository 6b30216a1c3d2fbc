use briefdesk_core::{AppError, AppResult};
use briefdesk_domain::{EmailAddress, ProjectId};

use crate::USER_LIST_PAGE_SIZE;

use super::*;

impl TemporaryAccessService {
    /// Deletes the identities issued for a project and their store rows.
    ///
    /// Falls back to an email scan of the first provider page when the store
    /// has no rows. Per-identity failures are logged and ignored.
    pub async fn revoke_by_project(
        &self,
        project_id: ProjectId,
        email: Option<&EmailAddress>,
    ) -> AppResult<RevokeOutcome> {
        self.ensure_admin_configured()?;

        match self.credential_repository.list_for_project(project_id).await {
            Ok(rows) if !rows.is_empty() => {
                for user_id in rows.iter().filter_map(|row| row.user_id.as_deref()) {
                    if let Err(error) = self.identity_provider.delete_user(user_id).await {
                        tracing::warn!(%project_id, user_id, %error, "failed to delete temporary identity");
                    }
                }

                if let Err(error) = self.credential_repository.delete_for_project(project_id).await {
                    tracing::warn!(%project_id, %error, "failed to delete temporary credential rows");
                }

                return Ok(RevokeOutcome::DeletedByStore);
            }
            Ok(_) => {}
            Err(error) => {
                tracing::warn!(%project_id, %error, "failed to read temporary credential rows");
            }
        }

        let Some(email) = email else {
            return Ok(RevokeOutcome::NothingFound);
        };

        let users = match self
            .identity_provider
            .list_users(1, USER_LIST_PAGE_SIZE)
            .await
        {
            Ok(users) => users,
            Err(error) => {
                tracing::warn!(%project_id, %error, "failed to list identities for email fallback");
                return Ok(RevokeOutcome::NothingFound);
            }
        };

        let Some(user) = users.iter().find(|user| {
            user.email
                .as_deref()
                .is_some_and(|candidate| email.matches(candidate))
        }) else {
            return Ok(RevokeOutcome::NothingFound);
        };

        if let Err(error) = self.identity_provider.delete_user(&user.id).await {
            tracing::warn!(%project_id, user_id = %user.id, %error, "failed to delete temporary identity");
        }

        Ok(RevokeOutcome::DeletedByEmail)
    }

    /// Deletes one identity, then any store row that references it.
    ///
    /// The identity deletion is the primary step and its failure is surfaced.
    pub async fn revoke_by_identity(&self, user_id: &str) -> AppResult<()> {
        self.ensure_admin_configured()?;

        self.identity_provider
            .delete_user(user_id)
            .await
            .map_err(|error| {
                tracing::error!(user_id, %error, "failed to delete temporary identity");
                AppError::Unavailable("failed to delete temporary user".to_owned())
            })?;

        if let Err(error) = self.credential_repository.delete_for_user(user_id).await {
            tracing::warn!(user_id, %error, "failed to delete temporary credential rows");
        }

        Ok(())
    }
}

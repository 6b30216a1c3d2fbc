use briefdesk_core::AppResult;
use briefdesk_domain::{ProjectId, TemporaryCredential};

use super::*;

impl TemporaryAccessService {
    /// Returns the newest stored credential of a project for owner display.
    ///
    /// Store failures read as "no credential" so the owner view never breaks.
    pub async fn lookup(&self, project_id: ProjectId) -> AppResult<Option<TemporaryCredential>> {
        self.ensure_admin_configured()?;

        match self.credential_repository.latest_for_project(project_id).await {
            Ok(credential) => Ok(credential),
            Err(error) => {
                tracing::warn!(%project_id, %error, "temporary credential lookup failed");
                Ok(None)
            }
        }
    }
}

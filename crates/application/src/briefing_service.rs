//! Owner-side briefing review.

use std::sync::Arc;

use chrono::Utc;

use briefdesk_core::{AppError, AppResult};
use briefdesk_domain::{Briefing, BriefingId, BriefingStatus, ProjectId};

use crate::{BriefingListItem, BriefingRepository};

/// Application service for reviewing submitted briefings.
#[derive(Clone)]
pub struct BriefingService {
    briefing_repository: Arc<dyn BriefingRepository>,
}

impl BriefingService {
    /// Creates a new briefing service.
    #[must_use]
    pub fn new(briefing_repository: Arc<dyn BriefingRepository>) -> Self {
        Self {
            briefing_repository,
        }
    }

    /// Lists briefings newest first with their project names.
    pub async fn list(&self) -> AppResult<Vec<BriefingListItem>> {
        self.briefing_repository.list().await
    }

    /// Returns the briefing submitted for a project.
    pub async fn for_project(&self, project_id: ProjectId) -> AppResult<Briefing> {
        self.briefing_repository
            .latest_for_project(project_id)
            .await?
            .ok_or_else(|| AppError::NotFound("briefing not found".to_owned()))
    }

    /// Changes the review status.
    pub async fn update_status(
        &self,
        briefing_id: BriefingId,
        status: BriefingStatus,
    ) -> AppResult<Briefing> {
        if !self
            .briefing_repository
            .update_status(briefing_id, status, Utc::now())
            .await?
        {
            return Err(AppError::NotFound("briefing not found".to_owned()));
        }

        self.briefing_repository
            .find(briefing_id)
            .await?
            .ok_or_else(|| AppError::NotFound("briefing not found".to_owned()))
    }

    /// Deletes a briefing.
    pub async fn delete(&self, briefing_id: BriefingId) -> AppResult<()> {
        if !self.briefing_repository.delete(briefing_id).await? {
            return Err(AppError::NotFound("briefing not found".to_owned()));
        }

        Ok(())
    }
}

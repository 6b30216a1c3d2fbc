//! Project lifecycle.

use briefdesk_core::{AppError, AppResult, NonEmptyString};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::normalize_optional;
use crate::{ClientId, ProjectId};

/// Project lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Waiting for the client to fill in the briefing form.
    AwaitingBriefing,
    /// Work in progress.
    InProgress,
    /// Temporarily on hold.
    Paused,
    /// Delivered.
    Completed,
}

impl ProjectStatus {
    /// Returns the storage string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AwaitingBriefing => "awaiting_briefing",
            Self::InProgress => "in_progress",
            Self::Paused => "paused",
            Self::Completed => "completed",
        }
    }

    /// Parses a storage string into a project status.
    pub fn parse(value: &str) -> AppResult<Self> {
        match value {
            "awaiting_briefing" => Ok(Self::AwaitingBriefing),
            "in_progress" => Ok(Self::InProgress),
            "paused" => Ok(Self::Paused),
            "completed" => Ok(Self::Completed),
            _ => Err(AppError::Validation(format!(
                "unknown project status '{value}'"
            ))),
        }
    }
}

/// A client project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Stable identifier.
    pub id: ProjectId,
    /// Owning client.
    pub client_id: ClientId,
    /// Display name.
    pub name: NonEmptyString,
    /// Free-text description.
    pub description: Option<String>,
    /// Lifecycle status.
    pub status: ProjectStatus,
    /// Whether the intake briefing was submitted.
    pub briefing_completed: bool,
    /// Public URL of the briefing form.
    pub briefing_url: String,
    /// Owner-only notes.
    pub internal_notes: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Validated input for project creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    /// Owning client.
    pub client_id: ClientId,
    /// Display name.
    pub name: NonEmptyString,
    /// Free-text description.
    pub description: Option<String>,
    /// Initial status.
    pub status: ProjectStatus,
    /// Owner-only notes.
    pub internal_notes: Option<String>,
}

impl NewProject {
    /// Validates raw project fields. Status defaults to awaiting briefing.
    pub fn new(
        client_id: ClientId,
        name: &str,
        description: Option<String>,
        status: Option<ProjectStatus>,
        internal_notes: Option<String>,
    ) -> AppResult<Self> {
        Ok(Self {
            client_id,
            name: NonEmptyString::for_field("name", name)?,
            description: normalize_optional(description),
            status: status.unwrap_or(ProjectStatus::AwaitingBriefing),
            internal_notes: normalize_optional(internal_notes),
        })
    }

    /// Materializes the project with its public briefing URL.
    #[must_use]
    pub fn into_project(self, id: ProjectId, public_base_url: &str, now: DateTime<Utc>) -> Project {
        Project {
            id,
            client_id: self.client_id,
            name: self.name,
            description: self.description,
            status: self.status,
            briefing_completed: false,
            briefing_url: briefing_url(public_base_url, id),
            internal_notes: self.internal_notes,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update for a project. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectUpdate {
    /// New owning client.
    pub client_id: Option<ClientId>,
    /// New display name.
    pub name: Option<NonEmptyString>,
    /// New description. `Some(None)` clears it.
    pub description: Option<Option<String>>,
    /// New status.
    pub status: Option<ProjectStatus>,
    /// New internal notes. `Some(None)` clears them.
    pub internal_notes: Option<Option<String>>,
}

impl Project {
    /// Applies a partial update and bumps `updated_at`.
    pub fn apply(&mut self, update: ProjectUpdate, now: DateTime<Utc>) {
        if let Some(client_id) = update.client_id {
            self.client_id = client_id;
        }
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = normalize_optional(description);
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(internal_notes) = update.internal_notes {
            self.internal_notes = normalize_optional(internal_notes);
        }
        self.updated_at = now;
    }

    /// Marks the briefing as received. Work moves to in progress.
    pub fn mark_briefing_completed(&mut self, now: DateTime<Utc>) {
        self.briefing_completed = true;
        self.status = ProjectStatus::InProgress;
        self.updated_at = now;
    }
}

/// Builds the public briefing form URL for a project.
#[must_use]
pub fn briefing_url(public_base_url: &str, project_id: ProjectId) -> String {
    format!("{}/briefing/{project_id}", public_base_url.trim_end_matches('/'))
}

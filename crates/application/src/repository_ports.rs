//! Persistence ports.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use briefdesk_core::AppResult;
use briefdesk_domain::{
    Briefing, BriefingId, BriefingStatus, Client, ClientId, EmailAddress, Project, ProjectId,
    ProjectStatus, TemporaryCredential,
};

/// Repository port for the temporary credential side table.
#[async_trait]
pub trait TemporaryCredentialRepository: Send + Sync {
    /// Stores an issued credential.
    async fn insert(&self, credential: &TemporaryCredential) -> AppResult<()>;

    /// Returns the most recently created credential for a project.
    async fn latest_for_project(
        &self,
        project_id: ProjectId,
    ) -> AppResult<Option<TemporaryCredential>>;

    /// Returns every credential row stored for a project.
    async fn list_for_project(&self, project_id: ProjectId)
    -> AppResult<Vec<TemporaryCredential>>;

    /// Deletes the rows of a project. Returns the number of deleted rows.
    async fn delete_for_project(&self, project_id: ProjectId) -> AppResult<u64>;

    /// Deletes the rows referencing an identity. Returns the number of deleted rows.
    async fn delete_for_user(&self, user_id: &str) -> AppResult<u64>;
}

/// Filters for project listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectListQuery {
    /// Restrict to one status.
    pub status: Option<ProjectStatus>,
    /// Restrict to one client.
    pub client_id: Option<ClientId>,
}

/// Repository port for projects.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Lists projects newest first.
    async fn list(&self, query: ProjectListQuery) -> AppResult<Vec<Project>>;

    /// Finds a project by id.
    async fn find(&self, project_id: ProjectId) -> AppResult<Option<Project>>;

    /// Inserts a new project.
    async fn insert(&self, project: &Project) -> AppResult<()>;

    /// Persists every mutable column of an existing project.
    async fn save(&self, project: &Project) -> AppResult<()>;

    /// Deletes a project. Returns false when it did not exist.
    async fn delete(&self, project_id: ProjectId) -> AppResult<bool>;
}

/// Repository port for clients.
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Lists clients ordered by name, optionally filtered by a name or company substring.
    async fn list(&self, search: Option<&str>) -> AppResult<Vec<Client>>;

    /// Finds a client by id.
    async fn find(&self, client_id: ClientId) -> AppResult<Option<Client>>;

    /// Finds a client by email.
    async fn find_by_email(&self, email: &EmailAddress) -> AppResult<Option<Client>>;

    /// Finds a client by tax id.
    async fn find_by_tax_id(&self, tax_id: &str) -> AppResult<Option<Client>>;

    /// Inserts a client. A duplicate email or tax id is a conflict.
    async fn insert(&self, client: &Client) -> AppResult<()>;

    /// Persists every mutable column of an existing client.
    async fn save(&self, client: &Client) -> AppResult<()>;

    /// Deletes a client. Returns false when it did not exist and a conflict
    /// while a project still references it.
    async fn delete(&self, client_id: ClientId) -> AppResult<bool>;
}

/// Briefing row joined with the name of its project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BriefingListItem {
    /// Stored briefing.
    pub briefing: Briefing,
    /// Project name, absent when the project was deleted.
    pub project_name: Option<String>,
}

/// Repository port for briefings.
#[async_trait]
pub trait BriefingRepository: Send + Sync {
    /// Lists briefings newest first.
    async fn list(&self) -> AppResult<Vec<BriefingListItem>>;

    /// Finds a briefing by id.
    async fn find(&self, briefing_id: BriefingId) -> AppResult<Option<Briefing>>;

    /// Returns the newest briefing submitted for a project.
    async fn latest_for_project(&self, project_id: ProjectId) -> AppResult<Option<Briefing>>;

    /// Inserts a submitted briefing.
    async fn insert(&self, briefing: &Briefing) -> AppResult<()>;

    /// Updates the review status. Returns false when the briefing did not exist.
    async fn update_status(
        &self,
        briefing_id: BriefingId,
        status: BriefingStatus,
        updated_at: DateTime<Utc>,
    ) -> AppResult<bool>;

    /// Deletes a briefing. Returns false when it did not exist.
    async fn delete(&self, briefing_id: BriefingId) -> AppResult<bool>;
}

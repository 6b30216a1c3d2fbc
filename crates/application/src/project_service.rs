//! Project lifecycle and briefing credential management.

use std::sync::Arc;

use chrono::Utc;

use briefdesk_core::{AppError, AppResult};
use briefdesk_domain::{
    Client, ClientId, EmailAddress, NewProject, Project, ProjectId, ProjectUpdate,
    TemporaryPassword,
};

use crate::{ClientRepository, ProjectListQuery, ProjectRepository, TemporaryAccessService};

/// Credential handed to the client so they can open the briefing form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BriefingCredentials {
    /// Login email.
    pub email: EmailAddress,
    /// Login password.
    pub password: TemporaryPassword,
    /// Whether the credential row was stored for later display.
    pub temp_saved: bool,
}

/// Result of project creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCreated {
    /// Stored project.
    pub project: Project,
    /// Issued credentials, when requested and successful.
    pub credentials: Option<BriefingCredentials>,
    /// Message shown when credential issuance failed.
    pub credential_error: Option<String>,
}

/// Application service for projects.
#[derive(Clone)]
pub struct ProjectService {
    project_repository: Arc<dyn ProjectRepository>,
    client_repository: Arc<dyn ClientRepository>,
    temporary_access: TemporaryAccessService,
    public_base_url: String,
}

impl ProjectService {
    /// Creates a new project service.
    #[must_use]
    pub fn new(
        project_repository: Arc<dyn ProjectRepository>,
        client_repository: Arc<dyn ClientRepository>,
        temporary_access: TemporaryAccessService,
        public_base_url: impl Into<String>,
    ) -> Self {
        Self {
            project_repository,
            client_repository,
            temporary_access,
            public_base_url: public_base_url.into(),
        }
    }

    /// Lists projects newest first.
    pub async fn list(&self, query: ProjectListQuery) -> AppResult<Vec<Project>> {
        self.project_repository.list(query).await
    }

    /// Returns one project.
    pub async fn get(&self, project_id: ProjectId) -> AppResult<Project> {
        self.project_repository
            .find(project_id)
            .await?
            .ok_or_else(|| AppError::NotFound("project not found".to_owned()))
    }

    async fn client(&self, client_id: ClientId) -> AppResult<Client> {
        self.client_repository
            .find(client_id)
            .await?
            .ok_or_else(|| AppError::NotFound("client not found".to_owned()))
    }

    /// Creates a project and optionally issues briefing credentials for its client.
    ///
    /// Issuance failures never fail the creation; they are reported in
    /// `credential_error`.
    pub async fn create(
        &self,
        input: NewProject,
        issue_credentials: bool,
    ) -> AppResult<ProjectCreated> {
        let client = self.client(input.client_id).await?;
        let project = input.into_project(ProjectId::new(), &self.public_base_url, Utc::now());
        self.project_repository.insert(&project).await?;
        tracing::info!(project_id = %project.id, client_id = %client.id, "created project");

        if !issue_credentials {
            return Ok(ProjectCreated {
                project,
                credentials: None,
                credential_error: None,
            });
        }

        match self.issue_for(project.id, client.email).await {
            Ok(credentials) => Ok(ProjectCreated {
                project,
                credentials: Some(credentials),
                credential_error: None,
            }),
            Err(error) => {
                tracing::warn!(project_id = %project.id, %error, "failed to issue briefing credentials");
                Ok(ProjectCreated {
                    project,
                    credentials: None,
                    credential_error: Some(error.message().to_owned()),
                })
            }
        }
    }

    async fn issue_for(
        &self,
        project_id: ProjectId,
        email: EmailAddress,
    ) -> AppResult<BriefingCredentials> {
        let password = TemporaryAccessService::generate_password()?;
        let issued = self
            .temporary_access
            .issue(project_id, email.clone(), password.clone())
            .await?;

        Ok(BriefingCredentials {
            email,
            password,
            temp_saved: issued.temp_saved,
        })
    }

    /// Applies a partial update.
    pub async fn update(&self, project_id: ProjectId, update: ProjectUpdate) -> AppResult<Project> {
        let mut project = self.get(project_id).await?;
        if let Some(client_id) = update.client_id {
            self.client(client_id).await?;
        }

        project.apply(update, Utc::now());
        self.project_repository.save(&project).await?;
        Ok(project)
    }

    /// Revokes any temporary credential of the project, then deletes it.
    pub async fn delete(&self, project_id: ProjectId) -> AppResult<()> {
        if let Err(error) = self.temporary_access.revoke_by_project(project_id, None).await {
            tracing::warn!(%project_id, %error, "credential cleanup before project delete failed");
        }

        if !self.project_repository.delete(project_id).await? {
            return Err(AppError::NotFound("project not found".to_owned()));
        }

        tracing::info!(%project_id, "deleted project");
        Ok(())
    }

    /// Replaces the briefing credentials of a project.
    ///
    /// The previous identity is revoked first on a best-effort basis. Two
    /// concurrent regenerations may both succeed and leave two identities.
    pub async fn regenerate_credentials(
        &self,
        project_id: ProjectId,
    ) -> AppResult<BriefingCredentials> {
        let project = self.get(project_id).await?;
        let client = self.client(project.client_id).await?;

        if let Err(error) = self
            .temporary_access
            .revoke_by_project(project_id, Some(&client.email))
            .await
        {
            tracing::warn!(%project_id, %error, "failed to revoke previous briefing credentials");
        }

        self.issue_for(project_id, client.email).await
    }
}

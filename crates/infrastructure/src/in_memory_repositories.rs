//! In-memory repository implementations for tests and local runs without a database.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use briefdesk_application::{
    BriefingListItem, BriefingRepository, ClientRepository, ProjectListQuery, ProjectRepository,
    TemporaryCredentialRepository,
};
use briefdesk_core::{AppError, AppResult};
use briefdesk_domain::{
    Briefing, BriefingId, BriefingStatus, Client, ClientId, EmailAddress, Project, ProjectId,
    TemporaryCredential,
};

/// In-memory temporary credential store. Rows keep insertion order.
#[derive(Debug, Default)]
pub struct InMemoryTemporaryCredentialRepository {
    rows: RwLock<Vec<TemporaryCredential>>,
}

impl InMemoryTemporaryCredentialRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TemporaryCredentialRepository for InMemoryTemporaryCredentialRepository {
    async fn insert(&self, credential: &TemporaryCredential) -> AppResult<()> {
        self.rows.write().await.push(credential.clone());
        Ok(())
    }

    async fn latest_for_project(
        &self,
        project_id: ProjectId,
    ) -> AppResult<Option<TemporaryCredential>> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .rev()
            .filter(|row| row.project_id == project_id)
            .max_by_key(|row| row.created_at)
            .cloned())
    }

    async fn list_for_project(
        &self,
        project_id: ProjectId,
    ) -> AppResult<Vec<TemporaryCredential>> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .filter(|row| row.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn delete_for_project(&self, project_id: ProjectId) -> AppResult<u64> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|row| row.project_id != project_id);
        Ok(u64::try_from(before - rows.len()).unwrap_or(u64::MAX))
    }

    async fn delete_for_user(&self, user_id: &str) -> AppResult<u64> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|row| row.user_id.as_deref() != Some(user_id));
        Ok(u64::try_from(before - rows.len()).unwrap_or(u64::MAX))
    }
}

/// In-memory project repository.
#[derive(Debug, Default)]
pub struct InMemoryProjectRepository {
    projects: RwLock<HashMap<ProjectId, Project>>,
}

impl InMemoryProjectRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    async fn references_client(&self, client_id: ClientId) -> bool {
        self.projects
            .read()
            .await
            .values()
            .any(|project| project.client_id == client_id)
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn list(&self, query: ProjectListQuery) -> AppResult<Vec<Project>> {
        let mut projects: Vec<Project> = self
            .projects
            .read()
            .await
            .values()
            .filter(|project| query.status.is_none_or(|status| project.status == status))
            .filter(|project| {
                query
                    .client_id
                    .is_none_or(|client_id| project.client_id == client_id)
            })
            .cloned()
            .collect();
        projects.sort_by(|left, right| right.created_at.cmp(&left.created_at));
        Ok(projects)
    }

    async fn find(&self, project_id: ProjectId) -> AppResult<Option<Project>> {
        Ok(self.projects.read().await.get(&project_id).cloned())
    }

    async fn insert(&self, project: &Project) -> AppResult<()> {
        let mut projects = self.projects.write().await;
        if projects.contains_key(&project.id) {
            return Err(AppError::Conflict(format!(
                "project '{}' already exists",
                project.id
            )));
        }
        projects.insert(project.id, project.clone());
        Ok(())
    }

    async fn save(&self, project: &Project) -> AppResult<()> {
        let mut projects = self.projects.write().await;
        let Some(stored) = projects.get_mut(&project.id) else {
            return Err(AppError::NotFound("project not found".to_owned()));
        };
        *stored = project.clone();
        Ok(())
    }

    async fn delete(&self, project_id: ProjectId) -> AppResult<bool> {
        Ok(self.projects.write().await.remove(&project_id).is_some())
    }
}

/// In-memory client repository. Uniqueness and project references are
/// enforced like the database constraints.
#[derive(Debug)]
pub struct InMemoryClientRepository {
    clients: RwLock<HashMap<ClientId, Client>>,
    projects: Arc<InMemoryProjectRepository>,
}

impl InMemoryClientRepository {
    /// Creates an empty repository that checks references against `projects`.
    #[must_use]
    pub fn new(projects: Arc<InMemoryProjectRepository>) -> Self {
        Self {
            clients: RwLock::new(HashMap::new()),
            projects,
        }
    }
}

fn ensure_unique(clients: &HashMap<ClientId, Client>, client: &Client) -> AppResult<()> {
    let duplicate = clients.values().any(|stored| {
        stored.id != client.id && (stored.email == client.email || stored.tax_id == client.tax_id)
    });

    if duplicate {
        return Err(AppError::Conflict(
            "a client with this email or tax id already exists".to_owned(),
        ));
    }

    Ok(())
}

#[async_trait]
impl ClientRepository for InMemoryClientRepository {
    async fn list(&self, search: Option<&str>) -> AppResult<Vec<Client>> {
        let mut clients: Vec<Client> = self
            .clients
            .read()
            .await
            .values()
            .filter(|client| search.is_none_or(|term| client.matches_search(term)))
            .cloned()
            .collect();
        clients.sort_by(|left, right| left.full_name.as_str().cmp(right.full_name.as_str()));
        Ok(clients)
    }

    async fn find(&self, client_id: ClientId) -> AppResult<Option<Client>> {
        Ok(self.clients.read().await.get(&client_id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> AppResult<Option<Client>> {
        Ok(self
            .clients
            .read()
            .await
            .values()
            .find(|client| &client.email == email)
            .cloned())
    }

    async fn find_by_tax_id(&self, tax_id: &str) -> AppResult<Option<Client>> {
        Ok(self
            .clients
            .read()
            .await
            .values()
            .find(|client| client.tax_id.as_str() == tax_id)
            .cloned())
    }

    async fn insert(&self, client: &Client) -> AppResult<()> {
        let mut clients = self.clients.write().await;
        ensure_unique(&clients, client)?;
        clients.insert(client.id, client.clone());
        Ok(())
    }

    async fn save(&self, client: &Client) -> AppResult<()> {
        let mut clients = self.clients.write().await;
        ensure_unique(&clients, client)?;
        let Some(stored) = clients.get_mut(&client.id) else {
            return Err(AppError::NotFound("client not found".to_owned()));
        };
        *stored = client.clone();
        Ok(())
    }

    async fn delete(&self, client_id: ClientId) -> AppResult<bool> {
        if self.projects.references_client(client_id).await {
            return Err(AppError::Conflict(
                "client is still referenced by a project".to_owned(),
            ));
        }

        Ok(self.clients.write().await.remove(&client_id).is_some())
    }
}

/// In-memory briefing repository. Project names are resolved through `projects`.
#[derive(Debug)]
pub struct InMemoryBriefingRepository {
    briefings: RwLock<Vec<Briefing>>,
    projects: Arc<InMemoryProjectRepository>,
}

impl InMemoryBriefingRepository {
    /// Creates an empty repository that resolves project names through `projects`.
    #[must_use]
    pub fn new(projects: Arc<InMemoryProjectRepository>) -> Self {
        Self {
            briefings: RwLock::new(Vec::new()),
            projects,
        }
    }
}

#[async_trait]
impl BriefingRepository for InMemoryBriefingRepository {
    async fn list(&self) -> AppResult<Vec<BriefingListItem>> {
        let mut briefings = self.briefings.read().await.clone();
        briefings.sort_by(|left, right| right.created_at.cmp(&left.created_at));

        let projects = self.projects.projects.read().await;
        Ok(briefings
            .into_iter()
            .map(|briefing| BriefingListItem {
                project_name: projects
                    .get(&briefing.project_id)
                    .map(|project| project.name.to_string()),
                briefing,
            })
            .collect())
    }

    async fn find(&self, briefing_id: BriefingId) -> AppResult<Option<Briefing>> {
        Ok(self
            .briefings
            .read()
            .await
            .iter()
            .find(|briefing| briefing.id == briefing_id)
            .cloned())
    }

    async fn latest_for_project(&self, project_id: ProjectId) -> AppResult<Option<Briefing>> {
        Ok(self
            .briefings
            .read()
            .await
            .iter()
            .rev()
            .filter(|briefing| briefing.project_id == project_id)
            .max_by_key(|briefing| briefing.created_at)
            .cloned())
    }

    async fn insert(&self, briefing: &Briefing) -> AppResult<()> {
        self.briefings.write().await.push(briefing.clone());
        Ok(())
    }

    async fn update_status(
        &self,
        briefing_id: BriefingId,
        status: BriefingStatus,
        updated_at: DateTime<Utc>,
    ) -> AppResult<bool> {
        let mut briefings = self.briefings.write().await;
        let Some(briefing) = briefings
            .iter_mut()
            .find(|briefing| briefing.id == briefing_id)
        else {
            return Ok(false);
        };

        briefing.status = status;
        briefing.updated_at = updated_at;
        Ok(true)
    }

    async fn delete(&self, briefing_id: BriefingId) -> AppResult<bool> {
        let mut briefings = self.briefings.write().await;
        let before = briefings.len();
        briefings.retain(|briefing| briefing.id != briefing_id);
        Ok(briefings.len() != before)
    }
}

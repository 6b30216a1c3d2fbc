use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use briefdesk_core::{AppError, AppResult};
use briefdesk_domain::{
    Briefing, BriefingId, BriefingStatus, Client, ClientId, EmailAddress, Project, ProjectId,
    TemporaryCredential,
};

use crate::{
    BriefingListItem, BriefingRepository, ClientRepository, IdentityProvider,
    NewTemporaryIdentity, ProjectListQuery, ProjectRepository, ProviderSession, ProviderUser,
    TemporaryCredentialRepository,
};

pub(crate) struct StoredUser {
    pub user: ProviderUser,
    pub password: String,
}

#[derive(Default)]
pub(crate) struct IdentityState {
    pub users: Vec<StoredUser>,
    pub created: u32,
    pub deleted: Vec<String>,
    pub signed_out: Vec<String>,
}

pub(crate) struct FakeIdentityProvider {
    pub admin_configured: bool,
    pub fail_create: bool,
    pub fail_delete: bool,
    pub state: Mutex<IdentityState>,
}

impl Default for FakeIdentityProvider {
    fn default() -> Self {
        Self {
            admin_configured: true,
            fail_create: false,
            fail_delete: false,
            state: Mutex::new(IdentityState::default()),
        }
    }
}

impl FakeIdentityProvider {
    pub(crate) async fn add_owner(&self, email: &str, password: &str) {
        let mut state = self.state.lock().await;
        state.users.push(StoredUser {
            user: ProviderUser {
                id: "owner-1".to_owned(),
                email: Some(email.to_owned()),
                temporary_briefing: false,
                project_id: None,
            },
            password: password.to_owned(),
        });
    }

    pub(crate) async fn user_ids(&self) -> Vec<String> {
        self.state
            .lock()
            .await
            .users
            .iter()
            .map(|stored| stored.user.id.clone())
            .collect()
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentityProvider {
    fn is_admin_configured(&self) -> bool {
        self.admin_configured
    }

    async fn create_temporary_user(
        &self,
        identity: &NewTemporaryIdentity,
    ) -> AppResult<ProviderUser> {
        if self.fail_create {
            return Err(AppError::Internal(
                "identity provider returned 422: email exists".to_owned(),
            ));
        }

        let mut state = self.state.lock().await;
        state.created += 1;
        let user = ProviderUser {
            id: format!("temp-{}", state.created),
            email: Some(identity.email.as_str().to_owned()),
            temporary_briefing: true,
            project_id: Some(identity.project_id.to_string()),
        };
        state.users.push(StoredUser {
            user: user.clone(),
            password: identity.password.as_str().to_owned(),
        });
        Ok(user)
    }

    async fn delete_user(&self, user_id: &str) -> AppResult<()> {
        if self.fail_delete {
            return Err(AppError::Internal(
                "identity provider returned 500".to_owned(),
            ));
        }

        let mut state = self.state.lock().await;
        let before = state.users.len();
        state.users.retain(|stored| stored.user.id != user_id);
        if state.users.len() == before {
            return Err(AppError::NotFound("user not found".to_owned()));
        }
        state.deleted.push(user_id.to_owned());
        Ok(())
    }

    async fn list_users(&self, page: u32, per_page: u32) -> AppResult<Vec<ProviderUser>> {
        let state = self.state.lock().await;
        let skip = usize::try_from(page.saturating_sub(1) * per_page).unwrap_or(usize::MAX);
        let take = usize::try_from(per_page).unwrap_or(usize::MAX);
        Ok(state
            .users
            .iter()
            .skip(skip)
            .take(take)
            .map(|stored| stored.user.clone())
            .collect())
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> AppResult<ProviderSession> {
        let state = self.state.lock().await;
        state
            .users
            .iter()
            .find(|stored| {
                stored
                    .user
                    .email
                    .as_deref()
                    .is_some_and(|candidate| candidate.eq_ignore_ascii_case(email))
                    && stored.password == password
            })
            .map(|stored| ProviderSession {
                user: stored.user.clone(),
                access_token: format!("token-{}", stored.user.id),
            })
            .ok_or_else(|| AppError::Unauthorized("Invalid login credentials".to_owned()))
    }

    async fn sign_out(&self, access_token: &str) -> AppResult<()> {
        self.state
            .lock()
            .await
            .signed_out
            .push(access_token.to_owned());
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct FakeCredentialRepository {
    pub fail_insert: bool,
    pub fail_reads: bool,
    pub rows: Mutex<Vec<TemporaryCredential>>,
}

impl FakeCredentialRepository {
    fn ensure_readable(&self) -> AppResult<()> {
        if self.fail_reads {
            return Err(AppError::Internal(
                "relation \"temp_users\" does not exist".to_owned(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl TemporaryCredentialRepository for FakeCredentialRepository {
    async fn insert(&self, credential: &TemporaryCredential) -> AppResult<()> {
        if self.fail_insert {
            return Err(AppError::Internal(
                "relation \"temp_users\" does not exist".to_owned(),
            ));
        }
        self.rows.lock().await.push(credential.clone());
        Ok(())
    }

    async fn latest_for_project(
        &self,
        project_id: ProjectId,
    ) -> AppResult<Option<TemporaryCredential>> {
        self.ensure_readable()?;
        Ok(self
            .rows
            .lock()
            .await
            .iter()
            .rev()
            .find(|row| row.project_id == project_id)
            .cloned())
    }

    async fn list_for_project(
        &self,
        project_id: ProjectId,
    ) -> AppResult<Vec<TemporaryCredential>> {
        self.ensure_readable()?;
        Ok(self
            .rows
            .lock()
            .await
            .iter()
            .filter(|row| row.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn delete_for_project(&self, project_id: ProjectId) -> AppResult<u64> {
        let mut rows = self.rows.lock().await;
        let before = rows.len();
        rows.retain(|row| row.project_id != project_id);
        Ok((before - rows.len()) as u64)
    }

    async fn delete_for_user(&self, user_id: &str) -> AppResult<u64> {
        let mut rows = self.rows.lock().await;
        let before = rows.len();
        rows.retain(|row| row.user_id.as_deref() != Some(user_id));
        Ok((before - rows.len()) as u64)
    }
}

#[derive(Default)]
pub(crate) struct FakeProjectRepository {
    pub fail_save: bool,
    pub projects: Mutex<Vec<Project>>,
}

#[async_trait]
impl ProjectRepository for FakeProjectRepository {
    async fn list(&self, query: ProjectListQuery) -> AppResult<Vec<Project>> {
        let mut projects: Vec<Project> = self
            .projects
            .lock()
            .await
            .iter()
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
        Ok(self
            .projects
            .lock()
            .await
            .iter()
            .find(|project| project.id == project_id)
            .cloned())
    }

    async fn insert(&self, project: &Project) -> AppResult<()> {
        self.projects.lock().await.push(project.clone());
        Ok(())
    }

    async fn save(&self, project: &Project) -> AppResult<()> {
        if self.fail_save {
            return Err(AppError::Internal("connection reset".to_owned()));
        }

        let mut projects = self.projects.lock().await;
        let Some(stored) = projects.iter_mut().find(|stored| stored.id == project.id) else {
            return Err(AppError::NotFound("project not found".to_owned()));
        };
        *stored = project.clone();
        Ok(())
    }

    async fn delete(&self, project_id: ProjectId) -> AppResult<bool> {
        let mut projects = self.projects.lock().await;
        let before = projects.len();
        projects.retain(|project| project.id != project_id);
        Ok(projects.len() != before)
    }
}

#[derive(Default)]
pub(crate) struct FakeClientRepository {
    pub referenced: Vec<ClientId>,
    pub clients: Mutex<Vec<Client>>,
}

#[async_trait]
impl ClientRepository for FakeClientRepository {
    async fn list(&self, search: Option<&str>) -> AppResult<Vec<Client>> {
        let mut clients: Vec<Client> = self
            .clients
            .lock()
            .await
            .iter()
            .filter(|client| search.is_none_or(|term| client.matches_search(term)))
            .cloned()
            .collect();
        clients.sort_by(|left, right| left.full_name.as_str().cmp(right.full_name.as_str()));
        Ok(clients)
    }

    async fn find(&self, client_id: ClientId) -> AppResult<Option<Client>> {
        Ok(self
            .clients
            .lock()
            .await
            .iter()
            .find(|client| client.id == client_id)
            .cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> AppResult<Option<Client>> {
        Ok(self
            .clients
            .lock()
            .await
            .iter()
            .find(|client| &client.email == email)
            .cloned())
    }

    async fn find_by_tax_id(&self, tax_id: &str) -> AppResult<Option<Client>> {
        Ok(self
            .clients
            .lock()
            .await
            .iter()
            .find(|client| client.tax_id.as_str() == tax_id)
            .cloned())
    }

    async fn insert(&self, client: &Client) -> AppResult<()> {
        let mut clients = self.clients.lock().await;
        if clients
            .iter()
            .any(|stored| stored.email == client.email || stored.tax_id == client.tax_id)
        {
            return Err(AppError::Conflict(
                "a client with this email or tax id already exists".to_owned(),
            ));
        }
        clients.push(client.clone());
        Ok(())
    }

    async fn save(&self, client: &Client) -> AppResult<()> {
        let mut clients = self.clients.lock().await;
        let Some(stored) = clients.iter_mut().find(|stored| stored.id == client.id) else {
            return Err(AppError::NotFound("client not found".to_owned()));
        };
        *stored = client.clone();
        Ok(())
    }

    async fn delete(&self, client_id: ClientId) -> AppResult<bool> {
        if self.referenced.contains(&client_id) {
            return Err(AppError::Conflict(
                "client is still referenced by a project".to_owned(),
            ));
        }

        let mut clients = self.clients.lock().await;
        let before = clients.len();
        clients.retain(|client| client.id != client_id);
        Ok(clients.len() != before)
    }
}

#[derive(Default)]
pub(crate) struct FakeBriefingRepository {
    pub fail_insert: bool,
    pub briefings: Mutex<Vec<Briefing>>,
}

#[async_trait]
impl BriefingRepository for FakeBriefingRepository {
    async fn list(&self) -> AppResult<Vec<BriefingListItem>> {
        Ok(self
            .briefings
            .lock()
            .await
            .iter()
            .rev()
            .map(|briefing| BriefingListItem {
                briefing: briefing.clone(),
                project_name: None,
            })
            .collect())
    }

    async fn find(&self, briefing_id: BriefingId) -> AppResult<Option<Briefing>> {
        Ok(self
            .briefings
            .lock()
            .await
            .iter()
            .find(|briefing| briefing.id == briefing_id)
            .cloned())
    }

    async fn latest_for_project(&self, project_id: ProjectId) -> AppResult<Option<Briefing>> {
        Ok(self
            .briefings
            .lock()
            .await
            .iter()
            .rev()
            .find(|briefing| briefing.project_id == project_id)
            .cloned())
    }

    async fn insert(&self, briefing: &Briefing) -> AppResult<()> {
        if self.fail_insert {
            return Err(AppError::Internal("connection reset".to_owned()));
        }
        self.briefings.lock().await.push(briefing.clone());
        Ok(())
    }

    async fn update_status(
        &self,
        briefing_id: BriefingId,
        status: BriefingStatus,
        updated_at: DateTime<Utc>,
    ) -> AppResult<bool> {
        let mut briefings = self.briefings.lock().await;
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
        let mut briefings = self.briefings.lock().await;
        let before = briefings.len();
        briefings.retain(|briefing| briefing.id != briefing_id);
        Ok(briefings.len() != before)
    }
}

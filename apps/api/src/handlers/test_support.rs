use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use briefdesk_application::{
    IdentityProvider, IssuePolicy, NewTemporaryIdentity, ProviderSession, ProviderUser,
};
use briefdesk_core::{AppError, AppResult};
use briefdesk_domain::{NewClient, NewProject, Project};
use briefdesk_infrastructure::{
    InMemoryBriefingRepository, InMemoryClientRepository, InMemoryProjectRepository,
    InMemoryTemporaryCredentialRepository,
};
use tower_sessions::{MemoryStore, Session};

use crate::api_services::{AppRepositories, build_app_state};
use crate::state::AppState;

pub(crate) const CLIENT_EMAIL: &str = "anna@verdi.example";

#[derive(Default)]
struct IdentityState {
    users: Vec<(ProviderUser, String)>,
    created: usize,
}

/// Identity provider double that keeps users in memory.
pub(crate) struct FakeIdentityProvider {
    admin_configured: bool,
    state: Mutex<IdentityState>,
}

impl FakeIdentityProvider {
    fn new(admin_configured: bool) -> Self {
        Self {
            admin_configured,
            state: Mutex::new(IdentityState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, IdentityState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    pub(crate) fn user_ids(&self) -> Vec<String> {
        self.state()
            .users
            .iter()
            .map(|(user, _)| user.id.clone())
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
        let mut state = self.state();
        state.created += 1;
        let user = ProviderUser {
            id: format!("temp-{}", state.created),
            email: Some(identity.email.as_str().to_owned()),
            temporary_briefing: true,
            project_id: Some(identity.project_id.to_string()),
        };
        state
            .users
            .push((user.clone(), identity.password.as_str().to_owned()));
        Ok(user)
    }

    async fn delete_user(&self, user_id: &str) -> AppResult<()> {
        let mut state = self.state();
        let before = state.users.len();
        state.users.retain(|(user, _)| user.id != user_id);
        if state.users.len() == before {
            return Err(AppError::NotFound("user not found".to_owned()));
        }
        Ok(())
    }

    async fn list_users(&self, _page: u32, _per_page: u32) -> AppResult<Vec<ProviderUser>> {
        Ok(self
            .state()
            .users
            .iter()
            .map(|(user, _)| user.clone())
            .collect())
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> AppResult<ProviderSession> {
        self.state()
            .users
            .iter()
            .find(|(user, stored_password)| {
                user.email
                    .as_deref()
                    .is_some_and(|stored| stored.eq_ignore_ascii_case(email))
                    && stored_password == password
            })
            .map(|(user, _)| ProviderSession {
                user: user.clone(),
                access_token: format!("token-{}", user.id),
            })
            .ok_or_else(|| AppError::Unauthorized("invalid login credentials".to_owned()))
    }

    async fn sign_out(&self, _access_token: &str) -> AppResult<()> {
        Ok(())
    }
}

/// Application state wired to in-memory adapters.
pub(crate) struct TestApp {
    pub(crate) state: AppState,
    pub(crate) identity_provider: Arc<FakeIdentityProvider>,
}

impl TestApp {
    pub(crate) fn new() -> Self {
        Self::with_admin(true)
    }

    pub(crate) fn without_service_key() -> Self {
        Self::with_admin(false)
    }

    fn with_admin(admin_configured: bool) -> Self {
        let identity_provider = Arc::new(FakeIdentityProvider::new(admin_configured));
        let projects = Arc::new(InMemoryProjectRepository::new());
        let repositories = AppRepositories {
            identity_provider: identity_provider.clone(),
            credential_repository: Arc::new(InMemoryTemporaryCredentialRepository::new()),
            project_repository: projects.clone(),
            client_repository: Arc::new(InMemoryClientRepository::new(projects.clone())),
            briefing_repository: Arc::new(InMemoryBriefingRepository::new(projects)),
        };

        Self {
            state: build_app_state(
                repositories,
                IssuePolicy::BestEffort,
                "http://localhost:3000",
                "http://localhost:3000",
            ),
            identity_provider,
        }
    }

    /// Stores a client and a project awaiting its briefing.
    pub(crate) async fn seed_project(&self) -> Project {
        let client = self
            .state
            .client_service
            .create(
                NewClient::new("Anna Verdi", None, "IT0123", CLIENT_EMAIL, "+39 02 1234", "CEO")
                    .unwrap_or_else(|_| panic!("valid client")),
            )
            .await
            .unwrap_or_else(|_| panic!("client should be stored"));

        self.state
            .project_service
            .create(
                NewProject::new(client.id, "Website relaunch", None, None, None)
                    .unwrap_or_else(|_| panic!("valid project")),
                false,
            )
            .await
            .unwrap_or_else(|_| panic!("project should be stored"))
            .project
    }
}

pub(crate) fn session() -> Session {
    Session::new(None, Arc::new(MemoryStore::default()), None)
}

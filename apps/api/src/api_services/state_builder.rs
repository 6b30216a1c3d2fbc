use std::sync::Arc;

use briefdesk_application::{
    BriefingAccessService, BriefingRepository, BriefingService, ClientRepository, ClientService,
    IdentityProvider, IssuePolicy, OwnerAuthService, ProjectRepository, ProjectService,
    TemporaryAccessService, TemporaryCredentialRepository,
};
use briefdesk_infrastructure::{
    PostgresBriefingRepository, PostgresClientRepository, PostgresProjectRepository,
    PostgresTemporaryCredentialRepository,
};
use sqlx::PgPool;

use crate::state::AppState;

/// Port implementations the services are composed from.
pub struct AppRepositories {
    pub identity_provider: Arc<dyn IdentityProvider>,
    pub credential_repository: Arc<dyn TemporaryCredentialRepository>,
    pub project_repository: Arc<dyn ProjectRepository>,
    pub client_repository: Arc<dyn ClientRepository>,
    pub briefing_repository: Arc<dyn BriefingRepository>,
}

impl AppRepositories {
    pub fn postgres(pool: &PgPool, identity_provider: Arc<dyn IdentityProvider>) -> Self {
        Self {
            identity_provider,
            credential_repository: Arc::new(PostgresTemporaryCredentialRepository::new(
                pool.clone(),
            )),
            project_repository: Arc::new(PostgresProjectRepository::new(pool.clone())),
            client_repository: Arc::new(PostgresClientRepository::new(pool.clone())),
            briefing_repository: Arc::new(PostgresBriefingRepository::new(pool.clone())),
        }
    }
}

pub fn build_app_state(
    repositories: AppRepositories,
    policy: IssuePolicy,
    public_base_url: &str,
    frontend_url: &str,
) -> AppState {
    let temporary_access_service = TemporaryAccessService::new(
        repositories.identity_provider.clone(),
        repositories.credential_repository,
        policy,
    );
    let client_service = ClientService::new(repositories.client_repository.clone());

    AppState {
        briefing_access_service: BriefingAccessService::new(
            repositories.project_repository.clone(),
            repositories.briefing_repository.clone(),
            repositories.identity_provider.clone(),
            client_service.clone(),
            temporary_access_service.clone(),
        ),
        project_service: ProjectService::new(
            repositories.project_repository,
            repositories.client_repository,
            temporary_access_service.clone(),
            public_base_url,
        ),
        owner_auth_service: OwnerAuthService::new(repositories.identity_provider),
        briefing_service: BriefingService::new(repositories.briefing_repository),
        client_service,
        temporary_access_service,
        frontend_url: frontend_url.to_owned(),
    }
}

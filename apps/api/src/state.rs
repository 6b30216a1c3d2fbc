use briefdesk_application::{
    BriefingAccessService, BriefingService, ClientService, OwnerAuthService, ProjectService,
    TemporaryAccessService,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub temporary_access_service: TemporaryAccessService,
    pub briefing_access_service: BriefingAccessService,
    pub owner_auth_service: OwnerAuthService,
    pub client_service: ClientService,
    pub project_service: ProjectService,
    pub briefing_service: BriefingService,
    pub frontend_url: String,
}

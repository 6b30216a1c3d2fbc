//! Application services and ports.

#![forbid(unsafe_code)]

mod briefing_access_service;
mod briefing_service;
mod client_service;
mod identity_ports;
mod owner_auth_service;
mod project_service;
mod repository_ports;
mod temporary_access_service;

#[cfg(test)]
mod test_fakes;

pub use briefing_access_service::{BriefingAccessService, BriefingGate, BriefingSubmission};
pub use briefing_service::BriefingService;
pub use client_service::ClientService;
pub use identity_ports::{
    IdentityProvider, NewTemporaryIdentity, ProviderSession, ProviderUser, USER_LIST_PAGE_SIZE,
};
pub use owner_auth_service::OwnerAuthService;
pub use project_service::{BriefingCredentials, ProjectCreated, ProjectService};
pub use repository_ports::{
    BriefingListItem, BriefingRepository, ClientRepository, ProjectListQuery, ProjectRepository,
    TemporaryCredentialRepository,
};
pub use temporary_access_service::{
    IssuePolicy, IssuedCredential, RevokeOutcome, TemporaryAccessService,
};

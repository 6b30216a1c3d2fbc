//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_repositories;
mod postgres_briefing_repository;
mod postgres_client_repository;
mod postgres_error;
mod postgres_project_repository;
mod postgres_temporary_credential_repository;
#[cfg(test)]
mod postgres_test_support;
mod supabase_identity_provider;

pub use in_memory_repositories::{
    InMemoryBriefingRepository, InMemoryClientRepository, InMemoryProjectRepository,
    InMemoryTemporaryCredentialRepository,
};
pub use postgres_briefing_repository::PostgresBriefingRepository;
pub use postgres_client_repository::PostgresClientRepository;
pub use postgres_project_repository::PostgresProjectRepository;
pub use postgres_temporary_credential_repository::PostgresTemporaryCredentialRepository;
pub use supabase_identity_provider::{
    PROJECT_ID_KEY, SupabaseIdentityProvider, TEMP_BRIEFING_FLAG,
};

mod database;
mod identity;
mod sessions;
mod state_builder;

pub use database::connect_and_migrate;
pub use identity::build_identity_provider;
pub use sessions::build_postgres_session_layer;
pub use state_builder::{AppRepositories, build_app_state};

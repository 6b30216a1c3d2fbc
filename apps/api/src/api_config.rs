use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use briefdesk_application::IssuePolicy;
use briefdesk_core::AppError;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Identity provider connection settings.
#[derive(Debug, Clone)]
pub struct IdentityProviderConfig {
    pub base_url: Url,
    pub anon_key: String,
    pub service_role_key: Option<String>,
    pub http_timeout: Option<Duration>,
}

/// Postgres pool settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Session cookie settings.
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    pub cookie_secure: bool,
    pub idle_minutes: i64,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub database: DatabaseConfig,
    pub frontend_url: String,
    pub public_base_url: String,
    pub api_host: String,
    pub api_port: u16,
    pub session: SessionConfig,
    pub identity_provider: IdentityProviderConfig,
    pub temp_credential_policy: IssuePolicy,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");

        let database = DatabaseConfig {
            url: required_env("DATABASE_URL")?,
            max_connections: parsed_env("DATABASE_MAX_CONNECTIONS")?.unwrap_or(10),
        };
        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());
        let public_base_url = optional_non_empty_env("PUBLIC_BASE_URL")
            .unwrap_or_else(|| frontend_url.clone());

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);

        let cookie_secure = env::var("SESSION_COOKIE_SECURE")
            .unwrap_or_else(|_| "false".to_owned())
            .eq_ignore_ascii_case("true");
        let idle_minutes = parsed_env::<i64>("SESSION_IDLE_MINUTES")?.unwrap_or(30);
        if idle_minutes <= 0 {
            return Err(AppError::Validation(
                "SESSION_IDLE_MINUTES must be positive".to_owned(),
            ));
        }
        let session = SessionConfig {
            cookie_secure,
            idle_minutes,
        };

        let base_url = Url::parse(&required_non_empty_env("SUPABASE_URL")?)
            .map_err(|error| AppError::Validation(format!("invalid SUPABASE_URL: {error}")))?;
        let http_timeout =
            parsed_env::<u64>("IDENTITY_HTTP_TIMEOUT_SECONDS")?.map(Duration::from_secs);

        let identity_provider = IdentityProviderConfig {
            base_url,
            anon_key: required_non_empty_env("SUPABASE_ANON_KEY")?,
            service_role_key: optional_non_empty_env("SUPABASE_SERVICE_ROLE_KEY"),
            http_timeout,
        };
        if identity_provider.service_role_key.is_none() {
            tracing::warn!(
                "SUPABASE_SERVICE_ROLE_KEY is not set; temporary credential endpoints will fail"
            );
        }

        let temp_credential_policy = optional_non_empty_env("TEMP_CREDENTIAL_POLICY")
            .map(|value| IssuePolicy::parse(value.as_str()))
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            migrate_only,
            database,
            frontend_url,
            public_base_url,
            api_host,
            api_port,
            session,
            identity_provider,
            temp_credential_policy,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}

fn required_non_empty_env(name: &str) -> Result<String, AppError> {
    let value = required_env(name)?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}

fn optional_non_empty_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn parsed_env<T>(name: &str) -> Result<Option<T>, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    optional_non_empty_env(name)
        .map(|value| {
            value
                .parse::<T>()
                .map_err(|error| AppError::Validation(format!("invalid {name}: {error}")))
        })
        .transpose()
}

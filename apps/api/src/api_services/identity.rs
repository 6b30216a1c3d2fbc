use briefdesk_core::AppError;
use briefdesk_infrastructure::SupabaseIdentityProvider;

use crate::api_config::IdentityProviderConfig;

pub fn build_identity_provider(
    config: &IdentityProviderConfig,
) -> Result<SupabaseIdentityProvider, AppError> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = config.http_timeout {
        builder = builder.timeout(timeout);
    }

    let http_client = builder.build().map_err(|error| {
        AppError::Internal(format!("failed to build identity provider HTTP client: {error}"))
    })?;

    Ok(SupabaseIdentityProvider::new(
        http_client,
        config.base_url.clone(),
        config.anon_key.as_str(),
        config.service_role_key.clone(),
    ))
}

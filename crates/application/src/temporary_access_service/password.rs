use briefdesk_core::{AppError, AppResult};
use briefdesk_domain::TemporaryPassword;

use super::*;

impl TemporaryAccessService {
    /// Generates a random four-digit password.
    pub fn generate_password() -> AppResult<TemporaryPassword> {
        let mut bytes = [0u8; 4];
        getrandom::fill(&mut bytes).map_err(|error| {
            AppError::Internal(format!("failed to generate temporary password: {error}"))
        })?;

        Ok(TemporaryPassword::from_random(u32::from_le_bytes(bytes)))
    }
}

//! Temporary briefing credentials.
//!
//! A temporary credential is a scoped identity in the external identity
//! provider plus a bookkeeping row that lets the owner read the issued
//! password back. The password is stored in plaintext and expiry is advisory:
//! nothing purges or rejects expired rows.

use briefdesk_core::{AppResult, NonEmptyString};
use chrono::{DateTime, Duration, Utc};

use crate::{EmailAddress, ProjectId};

/// Lifetime of an issued credential, in hours.
pub const TEMPORARY_CREDENTIAL_TTL_HOURS: i64 = 24;

/// Smallest generated numeric password.
pub const TEMPORARY_PASSWORD_MIN: u16 = 1000;

/// Largest generated numeric password.
pub const TEMPORARY_PASSWORD_MAX: u16 = 9999;

/// Shared secret handed to the client. Any non-empty value is accepted;
/// generated values are four digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemporaryPassword(String);

impl TemporaryPassword {
    /// Validates a caller-supplied password.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        NonEmptyString::for_field("password", value).map(|value| Self(value.into()))
    }

    /// Builds a four-digit password from a random number.
    #[must_use]
    pub fn from_random(random: u32) -> Self {
        let span = u32::from(TEMPORARY_PASSWORD_MAX - TEMPORARY_PASSWORD_MIN) + 1;
        let value = u32::from(TEMPORARY_PASSWORD_MIN) + random % span;
        Self(value.to_string())
    }

    /// Returns the password string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Computes the advisory expiry for a credential issued at `issued_at`.
#[must_use]
pub fn credential_expiry(issued_at: DateTime<Utc>) -> DateTime<Utc> {
    issued_at + Duration::hours(TEMPORARY_CREDENTIAL_TTL_HOURS)
}

/// Bookkeeping row for an issued credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemporaryCredential {
    /// Project the credential grants briefing access to.
    pub project_id: ProjectId,
    /// Opaque identity id assigned by the identity provider.
    pub user_id: Option<String>,
    /// Login email.
    pub email: EmailAddress,
    /// Plaintext password kept for owner display.
    pub password: TemporaryPassword,
    /// Advisory expiry.
    pub expires_at: DateTime<Utc>,
    /// Issuance timestamp.
    pub created_at: DateTime<Utc>,
}

impl TemporaryCredential {
    /// Creates a credential row issued at `issued_at`.
    #[must_use]
    pub fn issued(
        project_id: ProjectId,
        user_id: Option<String>,
        email: EmailAddress,
        password: TemporaryPassword,
        issued_at: DateTime<Utc>,
    ) -> Self {
        Self {
            project_id,
            user_id,
            email,
            password,
            expires_at: credential_expiry(issued_at),
            created_at: issued_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn empty_password_is_rejected() {
        assert!(TemporaryPassword::new("").is_err());
    }

    #[test]
    fn credential_expires_after_one_day() {
        let issued_at = Utc::now();
        let credential = TemporaryCredential::issued(
            ProjectId::new(),
            Some("user-1".to_owned()),
            EmailAddress::new("a@x.com").unwrap_or_else(|_| panic!("valid email")),
            TemporaryPassword::new("4821").unwrap_or_else(|_| panic!("valid password")),
            issued_at,
        );

        assert_eq!(credential.expires_at - issued_at, Duration::hours(24));
        assert_eq!(credential.created_at, issued_at);
    }

    proptest! {
        #[test]
        fn generated_passwords_are_four_digits(random in any::<u32>()) {
            let password = TemporaryPassword::from_random(random);
            let value: u16 = password.as_str().parse().unwrap_or(0);
            prop_assert_eq!(password.as_str().len(), 4);
            prop_assert!((TEMPORARY_PASSWORD_MIN..=TEMPORARY_PASSWORD_MAX).contains(&value));
        }
    }
}

//! Client records and contact validation.

use briefdesk_core::{AppError, AppResult, NonEmptyString};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ClientId;

/// Validated email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// Performs basic structural validation: non-empty, contains exactly one `@`,
    /// local part and domain are non-empty, domain contains at least one `.`.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim().to_lowercase();

        if trimmed.is_empty() {
            return Err(AppError::Validation("email is required".to_owned()));
        }

        let Some((local, domain)) = trimmed.split_once('@') else {
            return Err(AppError::Validation(
                "email address must contain exactly one '@'".to_owned(),
            ));
        };

        if local.is_empty() {
            return Err(AppError::Validation(
                "email local part must not be empty".to_owned(),
            ));
        }

        if domain.is_empty() || domain.contains('@') || !domain.contains('.') {
            return Err(AppError::Validation(
                "email domain must contain at least one '.'".to_owned(),
            ));
        }

        if trimmed.len() > 254 {
            return Err(AppError::Validation(
                "email address must not exceed 254 characters".to_owned(),
            ));
        }

        Ok(Self(trimmed))
    }

    /// Returns the validated email string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Case-insensitive comparison against a raw address from an external system.
    #[must_use]
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other.trim())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// Client of the freelancer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    /// Stable identifier.
    pub id: ClientId,
    /// Contact person full name.
    pub full_name: NonEmptyString,
    /// Optional company name.
    pub company_name: Option<String>,
    /// Tax code or VAT number. Unique across clients.
    pub tax_id: NonEmptyString,
    /// Contact email. Unique across clients.
    pub email: EmailAddress,
    /// Contact phone.
    pub phone: NonEmptyString,
    /// Role of the contact inside the client organisation.
    pub role: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClient {
    /// Contact person full name.
    pub full_name: NonEmptyString,
    /// Optional company name.
    pub company_name: Option<String>,
    /// Tax code or VAT number.
    pub tax_id: NonEmptyString,
    /// Contact email.
    pub email: EmailAddress,
    /// Contact phone.
    pub phone: NonEmptyString,
    /// Role of the contact.
    pub role: String,
}

impl NewClient {
    /// Validates raw client fields.
    pub fn new(
        full_name: &str,
        company_name: Option<String>,
        tax_id: &str,
        email: &str,
        phone: &str,
        role: &str,
    ) -> AppResult<Self> {
        Ok(Self {
            full_name: NonEmptyString::for_field("fullName", full_name)?,
            company_name: normalize_optional(company_name),
            tax_id: NonEmptyString::for_field("taxId", tax_id)?,
            email: EmailAddress::new(email)?,
            phone: NonEmptyString::for_field("phone", phone)?,
            role: role.trim().to_owned(),
        })
    }
}

/// Partial update for a client. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientUpdate {
    /// New full name.
    pub full_name: Option<NonEmptyString>,
    /// New company name. `Some(None)` clears it.
    pub company_name: Option<Option<String>>,
    /// New tax id.
    pub tax_id: Option<NonEmptyString>,
    /// New email.
    pub email: Option<EmailAddress>,
    /// New phone.
    pub phone: Option<NonEmptyString>,
    /// New role.
    pub role: Option<String>,
}

impl Client {
    /// Applies a partial update and bumps `updated_at`.
    pub fn apply(&mut self, update: ClientUpdate, now: DateTime<Utc>) {
        if let Some(full_name) = update.full_name {
            self.full_name = full_name;
        }
        if let Some(company_name) = update.company_name {
            self.company_name = normalize_optional(company_name);
        }
        if let Some(tax_id) = update.tax_id {
            self.tax_id = tax_id;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        if let Some(role) = update.role {
            self.role = role;
        }
        self.updated_at = now;
    }

    /// Returns true when `term` appears in the full or company name, ignoring case.
    #[must_use]
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }

        self.full_name.as_str().to_lowercase().contains(&term)
            || self
                .company_name
                .as_deref()
                .is_some_and(|company| company.to_lowercase().contains(&term))
    }
}

pub(crate) fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

use std::fmt::{Display, Formatter};

use briefdesk_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectId(Uuid);

impl ProjectId {
    /// Creates a random project identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a project identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Parses a transport value, naming `field` in the validation error.
    pub fn parse(field: &str, value: &str) -> AppResult<Self> {
        parse_uuid(field, value).map(Self)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ProjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for ProjectId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Unique identifier for a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientId(Uuid);

impl ClientId {
    /// Creates a random client identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a client identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Parses a transport value, naming `field` in the validation error.
    pub fn parse(field: &str, value: &str) -> AppResult<Self> {
        parse_uuid(field, value).map(Self)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for ClientId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Unique identifier for a submitted briefing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BriefingId(Uuid);

impl BriefingId {
    /// Creates a random briefing identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a briefing identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Parses a transport value, naming `field` in the validation error.
    pub fn parse(field: &str, value: &str) -> AppResult<Self> {
        parse_uuid(field, value).map(Self)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for BriefingId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for BriefingId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

fn parse_uuid(field: &str, value: &str) -> AppResult<Uuid> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }

    Uuid::parse_str(trimmed)
        .map_err(|_| AppError::Validation(format!("{field} must be a valid identifier")))
}

#[cfg(test)]
mod tests {
    use briefdesk_core::AppError;

    use super::ProjectId;

    #[test]
    fn empty_project_id_reports_missing_field() {
        let result = ProjectId::parse("projectId", "  ");
        assert!(matches!(
            result,
            Err(AppError::Validation(message)) if message == "projectId is required"
        ));
    }

    #[test]
    fn malformed_project_id_is_rejected() {
        assert!(ProjectId::parse("projectId", "P1").is_err());
    }

    #[test]
    fn project_id_round_trips_through_display() {
        let project_id = ProjectId::new();
        let parsed = ProjectId::parse("projectId", project_id.to_string().as_str());
        assert_eq!(parsed.ok(), Some(project_id));
    }
}

//! Intake briefing submitted by a client.

use briefdesk_core::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{BriefingId, ClientId, EmailAddress, ProjectId};

/// Review status of a submitted briefing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BriefingStatus {
    /// Submitted, not yet looked at.
    Pending,
    /// Read by the owner.
    Reviewed,
    /// Accepted as the basis for the project.
    Approved,
    /// Declined.
    Rejected,
}

impl BriefingStatus {
    /// Returns the storage string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Reviewed => "reviewed",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a storage string into a briefing status.
    pub fn parse(value: &str) -> AppResult<Self> {
        match value {
            "pending" => Ok(Self::Pending),
            "reviewed" => Ok(Self::Reviewed),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(AppError::Validation(format!(
                "unknown briefing status '{value}'"
            ))),
        }
    }
}

/// Free-form intake answers. Stored as a JSON document next to the briefing row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BriefingForm {
    /// Contact full name.
    pub full_name: String,
    /// Contact company.
    pub company_name: Option<String>,
    /// Tax code or VAT number.
    pub tax_id: String,
    /// Contact email, also used to find or create the client.
    pub email: String,
    /// Contact phone.
    pub phone: String,
    /// Contact role.
    pub role: String,

    /// What the project should achieve.
    pub project_goal: String,
    /// Whether something already exists and what.
    pub existing_solution: String,
    /// Hard deadline, if any.
    pub specific_deadline: Option<String>,

    /// Project classification (site, e-commerce, web system, native app, other).
    pub project_type: String,
    /// Free text when the classification is "other".
    pub project_type_other: Option<String>,
    /// Front-end, back-end or both.
    pub scope: String,

    /// Features the product needs.
    pub required_features: String,
    /// The most important features.
    pub main_features: String,
    /// Nice-to-have features.
    pub secondary_features: Option<String>,
    /// User levels and roles.
    pub user_levels: Option<String>,
    /// Reserved or members-only areas.
    pub reserved_areas: Option<String>,

    /// Whether designs already exist.
    pub existing_design: String,
    /// Reference websites.
    pub reference_sites: Option<String>,
    /// Preferred colors.
    pub color_palette: Option<String>,
    /// Whether a logo is ready.
    pub logo_ready: bool,

    /// Third-party services to integrate.
    pub external_services: Option<String>,
    /// Target platforms (web, android, ios). At least one is required.
    pub platforms: Vec<String>,
    /// Technical preferences.
    pub technical_preferences: Option<String>,

    /// Whether content is ready.
    pub content_ready: Option<String>,
    /// How content will be delivered.
    pub content_delivery: Option<String>,
    /// Data to import from another system.
    pub data_import: Option<String>,

    /// Whether the client owns a domain.
    pub has_domain: bool,
    /// Whether the client has hosting.
    pub has_hosting: bool,
    /// Whether hosting setup help is wanted.
    pub needs_hosting_help: bool,

    /// Support and maintenance expectations.
    pub support_type: String,
    /// Budget estimate.
    pub estimated_budget: Option<String>,
    /// Phased, fixed price or hourly.
    pub payment_method: String,

    /// Final deadline.
    pub final_deadline: Option<String>,
    /// Parts that are urgent.
    pub urgent_parts: Option<String>,
    /// Planned launch date.
    pub launch_date: Option<String>,

    /// Anything else.
    pub additional_info: Option<String>,
    /// Regulatory or compliance constraints.
    pub compliance_notes: Option<String>,
}

impl BriefingForm {
    /// Checks required answers and returns the contact email on success.
    pub fn validate(&self) -> AppResult<EmailAddress> {
        let required = [
            ("fullName", self.full_name.as_str()),
            ("taxId", self.tax_id.as_str()),
            ("phone", self.phone.as_str()),
            ("role", self.role.as_str()),
            ("projectGoal", self.project_goal.as_str()),
            ("existingSolution", self.existing_solution.as_str()),
            ("projectType", self.project_type.as_str()),
            ("scope", self.scope.as_str()),
            ("requiredFeatures", self.required_features.as_str()),
            ("mainFeatures", self.main_features.as_str()),
            ("existingDesign", self.existing_design.as_str()),
            ("supportType", self.support_type.as_str()),
            ("paymentMethod", self.payment_method.as_str()),
        ];

        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(AppError::Validation(format!("{field} is required")));
        }

        if self.platforms.iter().all(|platform| platform.trim().is_empty()) {
            return Err(AppError::Validation(
                "select at least one platform".to_owned(),
            ));
        }

        EmailAddress::new(self.email.as_str())
    }
}

/// A submitted briefing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Briefing {
    /// Stable identifier.
    pub id: BriefingId,
    /// Project the briefing belongs to.
    pub project_id: ProjectId,
    /// Client who filled it in.
    pub client_id: ClientId,
    /// Intake answers.
    pub form: BriefingForm,
    /// Review status.
    pub status: BriefingStatus,
    /// Submission timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Briefing {
    /// Creates a pending briefing submitted at `now`.
    #[must_use]
    pub fn submitted(
        project_id: ProjectId,
        client_id: ClientId,
        form: BriefingForm,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: BriefingId::new(),
            project_id,
            client_id,
            form,
            status: BriefingStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }
}

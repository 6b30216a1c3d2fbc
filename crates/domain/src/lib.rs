//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod briefing;
mod briefing_access;
mod client;
mod credential;
mod ids;
mod project;

pub use briefing::{Briefing, BriefingForm, BriefingStatus};
pub use briefing_access::BriefingAccessState;
pub use client::{Client, ClientUpdate, EmailAddress, NewClient};
pub use credential::{
    TEMPORARY_CREDENTIAL_TTL_HOURS, TEMPORARY_PASSWORD_MAX, TEMPORARY_PASSWORD_MIN,
    TemporaryCredential, TemporaryPassword, credential_expiry,
};
pub use ids::{BriefingId, ClientId, ProjectId};
pub use project::{NewProject, Project, ProjectStatus, ProjectUpdate, briefing_url};

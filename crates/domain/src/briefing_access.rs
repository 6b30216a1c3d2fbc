//! Access gate for the public briefing form.

use briefdesk_core::{SessionIdentity, SessionKind};
use serde::{Deserialize, Serialize};

use crate::Project;

/// Per-visit state of a visitor on a project's briefing route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BriefingAccessState {
    /// No usable session. The visitor must log in with the issued credential.
    Unauthenticated,
    /// Signed in with the temporary identity issued for this project.
    AuthenticatedAsTemporary,
    /// Signed in as the workspace owner.
    AuthenticatedAsOwner,
    /// The briefing for this project has already been submitted.
    Submitted,
}

impl BriefingAccessState {
    /// Resolves the state for `project` given the current session, if any.
    ///
    /// A completed briefing wins over any auth state. A temporary identity
    /// scoped to another project counts as unauthenticated.
    #[must_use]
    pub fn resolve(project: &Project, identity: Option<&SessionIdentity>) -> Self {
        if project.briefing_completed {
            return Self::Submitted;
        }

        match identity.map(SessionIdentity::kind) {
            Some(SessionKind::Owner) => Self::AuthenticatedAsOwner,
            Some(SessionKind::TemporaryBriefing { project_id })
                if project_id == project.id.as_uuid() =>
            {
                Self::AuthenticatedAsTemporary
            }
            _ => Self::Unauthenticated,
        }
    }

    /// Returns the transport label used by the public form.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "login_required",
            Self::AuthenticatedAsTemporary | Self::AuthenticatedAsOwner => "form",
            Self::Submitted => "submitted",
        }
    }
}

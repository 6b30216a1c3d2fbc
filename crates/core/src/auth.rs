use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which kind of principal a session belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionKind {
    /// The workspace owner, signed in through the owner login.
    Owner,
    /// A scoped identity issued for exactly one project's briefing form.
    TemporaryBriefing {
        /// Project the identity was issued for.
        project_id: Uuid,
    },
}

/// Identity information persisted in the authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIdentity {
    user_id: String,
    email: Option<String>,
    kind: SessionKind,
    access_token: Option<String>,
}

impl SessionIdentity {
    /// Creates a session identity from identity-provider data.
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        email: Option<String>,
        kind: SessionKind,
        access_token: Option<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            email,
            kind,
            access_token,
        }
    }

    /// Returns the opaque user id assigned by the identity provider.
    #[must_use]
    pub fn user_id(&self) -> &str {
        self.user_id.as_str()
    }

    /// Returns the email, if the provider returned one.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the session kind.
    #[must_use]
    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    /// Returns the provider access token used for sign-out.
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Returns true when the identity is a temporary briefing identity.
    #[must_use]
    pub fn is_temporary(&self) -> bool {
        matches!(self.kind, SessionKind::TemporaryBriefing { .. })
    }

    /// Returns true when this identity may open the briefing form of `project_id`.
    #[must_use]
    pub fn can_access_briefing(&self, project_id: Uuid) -> bool {
        match self.kind {
            SessionKind::Owner => true,
            SessionKind::TemporaryBriefing {
                project_id: scoped_project_id,
            } => scoped_project_id == project_id,
        }
    }
}

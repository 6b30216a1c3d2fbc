//! Public briefing form: access gate, credential login and submission.

use std::sync::Arc;

use chrono::Utc;

use briefdesk_core::{AppError, AppResult, SessionIdentity, SessionKind};
use briefdesk_domain::{
    Briefing, BriefingAccessState, BriefingForm, NewClient, Project, ProjectId,
};

use crate::{
    BriefingRepository, ClientService, IdentityProvider, ProjectRepository, ProviderSession,
    TemporaryAccessService,
};

const INVALID_CREDENTIALS: &str = "invalid credentials";
const SUBMISSION_FAILED: &str = "failed to submit briefing, please retry";

/// What a visitor sees on a project's briefing route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BriefingGate {
    /// Resolved access state.
    pub state: BriefingAccessState,
    /// Project name, only disclosed once the visitor is past the login step.
    pub project_name: Option<String>,
}

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BriefingSubmission {
    /// Stored briefing.
    pub briefing: Briefing,
    /// Whether the session belonged to a temporary identity and must be ended.
    pub end_session: bool,
}

/// Application service behind the public briefing routes.
#[derive(Clone)]
pub struct BriefingAccessService {
    project_repository: Arc<dyn ProjectRepository>,
    briefing_repository: Arc<dyn BriefingRepository>,
    identity_provider: Arc<dyn IdentityProvider>,
    client_service: ClientService,
    temporary_access: TemporaryAccessService,
}

impl BriefingAccessService {
    /// Creates a new briefing access service.
    #[must_use]
    pub fn new(
        project_repository: Arc<dyn ProjectRepository>,
        briefing_repository: Arc<dyn BriefingRepository>,
        identity_provider: Arc<dyn IdentityProvider>,
        client_service: ClientService,
        temporary_access: TemporaryAccessService,
    ) -> Self {
        Self {
            project_repository,
            briefing_repository,
            identity_provider,
            client_service,
            temporary_access,
        }
    }

    async fn project(&self, project_id: ProjectId) -> AppResult<Project> {
        self.project_repository
            .find(project_id)
            .await?
            .ok_or_else(|| AppError::NotFound("project not found".to_owned()))
    }

    /// Resolves the access state of the current visit.
    pub async fn gate(
        &self,
        project_id: ProjectId,
        identity: Option<&SessionIdentity>,
    ) -> AppResult<BriefingGate> {
        let project = self.project(project_id).await?;
        let state = BriefingAccessState::resolve(&project, identity);
        let project_name = match state {
            BriefingAccessState::Unauthenticated => None,
            _ => Some(project.name.into()),
        };

        Ok(BriefingGate {
            state,
            project_name,
        })
    }

    /// Signs a visitor in with the credential issued for this project.
    ///
    /// Every failure reads the same, including an identity issued for a
    /// different project.
    pub async fn login(
        &self,
        project_id: ProjectId,
        email: &str,
        password: &str,
    ) -> AppResult<SessionIdentity> {
        self.project(project_id).await?;

        let session = self
            .identity_provider
            .sign_in_with_password(email, password)
            .await
            .map_err(|error| {
                tracing::info!(%project_id, %error, "briefing login rejected");
                AppError::Unauthorized(INVALID_CREDENTIALS.to_owned())
            })?;

        let ProviderSession { user, access_token } = session;
        let kind = if user.temporary_briefing {
            let scoped_to_project = user
                .project_id
                .as_deref()
                .is_some_and(|scoped| scoped.eq_ignore_ascii_case(&project_id.to_string()));

            if !scoped_to_project {
                tracing::info!(%project_id, user_id = %user.id, "temporary identity used on another project");
                if let Err(error) = self.identity_provider.sign_out(&access_token).await {
                    tracing::warn!(user_id = %user.id, %error, "failed to end rejected provider session");
                }
                return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_owned()));
            }

            SessionKind::TemporaryBriefing {
                project_id: project_id.as_uuid(),
            }
        } else {
            SessionKind::Owner
        };

        Ok(SessionIdentity::new(
            user.id,
            user.email,
            kind,
            Some(access_token),
        ))
    }

    /// Stores a briefing and completes the project.
    ///
    /// A temporary identity is revoked and signed out afterwards. Cleanup
    /// failures are logged and never fail the submission.
    pub async fn submit(
        &self,
        project_id: ProjectId,
        identity: &SessionIdentity,
        form: BriefingForm,
    ) -> AppResult<BriefingSubmission> {
        let mut project = self.project(project_id).await?;

        match BriefingAccessState::resolve(&project, Some(identity)) {
            BriefingAccessState::Submitted => {
                return Err(AppError::Conflict(
                    "briefing already submitted".to_owned(),
                ));
            }
            BriefingAccessState::Unauthenticated => {
                return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_owned()));
            }
            BriefingAccessState::AuthenticatedAsTemporary
            | BriefingAccessState::AuthenticatedAsOwner => {}
        }

        let email = form.validate()?;
        let new_client = NewClient::new(
            &form.full_name,
            form.company_name.clone(),
            &form.tax_id,
            email.as_str(),
            &form.phone,
            &form.role,
        )?;

        let briefing = self
            .persist(&mut project, new_client, form)
            .await
            .map_err(|error| {
                tracing::error!(%project_id, %error, "failed to persist briefing");
                AppError::Unavailable(SUBMISSION_FAILED.to_owned())
            })?;
        tracing::info!(%project_id, briefing_id = %briefing.id, "briefing submitted");

        if !identity.is_temporary() {
            return Ok(BriefingSubmission {
                briefing,
                end_session: false,
            });
        }

        if let Err(error) = self
            .temporary_access
            .revoke_by_identity(identity.user_id())
            .await
        {
            tracing::warn!(%project_id, user_id = identity.user_id(), %error, "failed to revoke temporary identity after submission");
        }

        if let Some(access_token) = identity.access_token()
            && let Err(error) = self.identity_provider.sign_out(access_token).await
        {
            tracing::warn!(%project_id, %error, "failed to end temporary provider session");
        }

        Ok(BriefingSubmission {
            briefing,
            end_session: true,
        })
    }

    async fn persist(
        &self,
        project: &mut Project,
        new_client: NewClient,
        form: BriefingForm,
    ) -> AppResult<Briefing> {
        let client = self.client_service.find_or_create(new_client).await?;
        let now = Utc::now();

        let briefing = Briefing::submitted(project.id, client.id, form, now);
        self.briefing_repository.insert(&briefing).await?;

        project.client_id = client.id;
        project.mark_briefing_completed(now);
        self.project_repository.save(project).await?;

        Ok(briefing)
    }
}

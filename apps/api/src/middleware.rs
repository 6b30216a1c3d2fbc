use axum::extract::{Request, State};
use axum::http::{HeaderValue, Method, header};
use axum::middleware::Next;
use axum::response::Response;
use briefdesk_core::AppError;
use tower_sessions::Session;
use url::{Origin, Url};

use crate::auth::session_identity;
use crate::error::ApiResult;
use crate::state::AppState;

/// Admits owner sessions only. Temporary briefing identities are forbidden.
pub async fn require_owner(
    session: Session,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let identity = session_identity(&session)
        .await?
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?;

    if identity.is_temporary() {
        return Err(AppError::Forbidden("owner access required".to_owned()).into());
    }

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

pub async fn require_same_origin_for_mutations(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    if is_state_changing_method(request.method()) {
        let headers = request.headers();

        if let Some(fetch_site) = headers.get("sec-fetch-site")
            && fetch_site == HeaderValue::from_static("cross-site")
        {
            return Err(AppError::Unauthorized("cross-site request blocked".to_owned()).into());
        }

        let origin = headers
            .get(header::ORIGIN)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        let referer = headers
            .get(header::REFERER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        if !origin_is_allowed(state.frontend_url.as_str(), origin, referer) {
            return Err(AppError::Unauthorized("origin validation failed".to_owned()).into());
        }
    }

    Ok(next.run(request).await)
}

fn origin_is_allowed(allowed_origin: &str, origin: &str, referer: &str) -> bool {
    let Some(allowed) = parse_origin(allowed_origin) else {
        return false;
    };

    [origin, referer]
        .into_iter()
        .filter_map(parse_origin)
        .any(|candidate| candidate == allowed)
}

/// Tuple origin of a URL. Opaque origins never match.
fn parse_origin(value: &str) -> Option<Origin> {
    let origin = Url::parse(value.trim()).ok()?.origin();
    origin.is_tuple().then_some(origin)
}

fn is_state_changing_method(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

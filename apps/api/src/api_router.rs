use axum::Router;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{delete, get, post, put};
use briefdesk_core::AppError;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tower_sessions::{SessionManagerLayer, SessionStore};

use crate::state::AppState;
use crate::{auth, handlers, middleware};

pub fn build_router<Store>(
    app_state: AppState,
    frontend_url: &str,
    session_layer: SessionManagerLayer<Store>,
) -> Result<Router, AppError>
where
    Store: SessionStore + Clone,
{
    let owner_routes = Router::new()
        .route(
            "/api/briefing/create-temp-user",
            post(handlers::temporary_access::create_temporary_user_handler),
        )
        .route(
            "/api/briefing/delete-temp-by-project",
            post(handlers::temporary_access::delete_temporary_by_project_handler),
        )
        .route(
            "/api/briefing/delete-temp-user",
            post(handlers::temporary_access::delete_temporary_user_handler),
        )
        .route(
            "/api/temp-users/by-project",
            get(handlers::temporary_access::temporary_credential_by_project_handler),
        )
        .route(
            "/api/clients",
            get(handlers::clients::list_clients_handler)
                .post(handlers::clients::create_client_handler),
        )
        .route(
            "/api/clients/{client_id}",
            get(handlers::clients::get_client_handler)
                .put(handlers::clients::update_client_handler)
                .delete(handlers::clients::delete_client_handler),
        )
        .route(
            "/api/clients/{client_id}/projects",
            get(handlers::clients::list_client_projects_handler),
        )
        .route(
            "/api/projects",
            get(handlers::projects::list_projects_handler)
                .post(handlers::projects::create_project_handler),
        )
        .route(
            "/api/projects/{project_id}",
            get(handlers::projects::get_project_handler)
                .put(handlers::projects::update_project_handler)
                .delete(handlers::projects::delete_project_handler),
        )
        .route(
            "/api/projects/{project_id}/credentials/regenerate",
            post(handlers::projects::regenerate_credentials_handler),
        )
        .route(
            "/api/projects/{project_id}/briefing",
            get(handlers::projects::project_briefing_handler),
        )
        .route(
            "/api/briefings",
            get(handlers::briefings::list_briefings_handler),
        )
        .route(
            "/api/briefings/{briefing_id}",
            delete(handlers::briefings::delete_briefing_handler),
        )
        .route(
            "/api/briefings/{briefing_id}/status",
            put(handlers::briefings::update_briefing_status_handler),
        )
        .route_layer(from_fn(middleware::require_owner));

    let public_briefing_routes = Router::new()
        .route(
            "/briefing/{project_id}",
            get(handlers::briefing_gate::briefing_gate_handler),
        )
        .route(
            "/briefing/{project_id}/login",
            post(handlers::briefing_gate::briefing_login_handler),
        )
        .route(
            "/briefing/{project_id}/submit",
            post(handlers::briefing_gate::briefing_submit_handler),
        );

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route("/auth/login", post(auth::login_handler))
        .route("/auth/logout", post(auth::logout_handler))
        .route("/auth/me", get(auth::me_handler))
        .merge(public_briefing_routes)
        .merge(owner_routes)
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_same_origin_for_mutations,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(frontend_cors_layer(frontend_url)?)
        .layer(session_layer)
        .with_state(app_state))
}

/// Allows credentialed calls from the dashboard origin only.
fn frontend_cors_layer(frontend_url: &str) -> Result<CorsLayer, AppError> {
    let origin = HeaderValue::from_str(frontend_url.trim_end_matches('/'))
        .map_err(|error| AppError::Configuration(format!("invalid FRONTEND_URL: {error}")))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE]))
}

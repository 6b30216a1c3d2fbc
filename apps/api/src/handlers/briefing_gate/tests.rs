use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use briefdesk_core::AppError;
use briefdesk_domain::BriefingForm;
use serde_json::json;

use crate::auth::session_identity;
use crate::dto::{CreateTemporaryUserRequest, LoginRequest};
use crate::error::ApiError;
use crate::handlers::temporary_access::create_temporary_user_handler;
use crate::handlers::test_support::{CLIENT_EMAIL, TestApp, session};

use super::{briefing_gate_handler, briefing_login_handler, briefing_submit_handler};

fn briefing_form() -> BriefingForm {
    serde_json::from_value(json!({
        "fullName": "Anna Verdi",
        "taxId": "IT0123",
        "email": CLIENT_EMAIL,
        "phone": "+39 02 1234",
        "role": "CEO",
        "projectGoal": "Sell online",
        "existingSolution": "none",
        "projectType": "ecommerce",
        "scope": "mvp",
        "requiredFeatures": "cart",
        "mainFeatures": "catalog, checkout",
        "existingDesign": "no",
        "platforms": ["web"],
        "supportType": "monthly",
        "paymentMethod": "installments"
    }))
    .unwrap_or_else(|_| panic!("form should decode"))
}

async fn issue(app: &TestApp, project_id: &str, password: &str) {
    let Json(_) = create_temporary_user_handler(
        State(app.state.clone()),
        Json(CreateTemporaryUserRequest {
            project_id: Some(project_id.to_owned()),
            email: Some(CLIENT_EMAIL.to_owned()),
            password: Some(password.to_owned()),
        }),
    )
    .await
    .unwrap_or_else(|_| panic!("issue should succeed"));
}

fn login(password: &str) -> Json<LoginRequest> {
    Json(LoginRequest {
        email: CLIENT_EMAIL.to_owned(),
        password: password.to_owned(),
    })
}

#[tokio::test]
async fn anonymous_visit_requires_login_and_hides_project_name() {
    let app = TestApp::new();
    let project_id = app.seed_project().await.id.to_string();

    let Json(gate) = briefing_gate_handler(State(app.state.clone()), Path(project_id), session())
        .await
        .unwrap_or_else(|_| panic!("gate should resolve"));

    assert_eq!(gate.state, "login_required");
    assert_eq!(gate.project_name, None);
}

#[tokio::test]
async fn unknown_project_is_not_found() {
    let app = TestApp::new();

    let result = briefing_gate_handler(
        State(app.state.clone()),
        Path("5b0f5c8e-8f35-4a4e-9a55-3c7d0f0f5a11".to_owned()),
        session(),
    )
    .await;

    assert!(matches!(result, Err(ApiError(AppError::NotFound(_)))));
}

#[tokio::test]
async fn wrong_password_reads_as_invalid_credentials() {
    let app = TestApp::new();
    let project_id = app.seed_project().await.id.to_string();
    issue(&app, &project_id, "4821").await;

    let session = session();
    let result = briefing_login_handler(
        State(app.state.clone()),
        Path(project_id),
        session.clone(),
        login("0000"),
    )
    .await;

    let Err(ApiError(AppError::Unauthorized(message))) = result else {
        panic!("expected an unauthorized error");
    };
    assert_eq!(message, "invalid credentials");
    assert!(matches!(session_identity(&session).await, Ok(None)));
}

#[tokio::test]
async fn credential_of_another_project_is_refused() {
    let app = TestApp::new();
    let first = app.seed_project().await.id.to_string();
    let second = app.seed_project().await.id.to_string();
    issue(&app, &first, "4821").await;

    let result = briefing_login_handler(
        State(app.state.clone()),
        Path(second),
        session(),
        login("4821"),
    )
    .await;

    assert!(matches!(result, Err(ApiError(AppError::Unauthorized(_)))));
}

#[tokio::test]
async fn temporary_submission_completes_project_and_cleans_up() {
    let app = TestApp::new();
    let project_id = app.seed_project().await.id.to_string();
    issue(&app, &project_id, "4821").await;

    let session = session();
    let Json(gate) = briefing_login_handler(
        State(app.state.clone()),
        Path(project_id.clone()),
        session.clone(),
        login("4821"),
    )
    .await
    .unwrap_or_else(|_| panic!("login should succeed"));
    assert_eq!(gate.state, "form");
    assert_eq!(gate.project_name.as_deref(), Some("Website relaunch"));

    let (status, Json(submission)) = briefing_submit_handler(
        State(app.state.clone()),
        Path(project_id.clone()),
        session.clone(),
        Json(briefing_form()),
    )
    .await
    .unwrap_or_else(|_| panic!("submission should succeed"));

    assert_eq!(status, StatusCode::CREATED);
    assert!(submission.signed_out);
    assert!(app.identity_provider.user_ids().is_empty());
    assert!(matches!(session_identity(&session).await, Ok(None)));

    let Json(gate) = briefing_gate_handler(State(app.state.clone()), Path(project_id), session)
        .await
        .unwrap_or_else(|_| panic!("gate should resolve"));
    assert_eq!(gate.state, "submitted");
}

#[tokio::test]
async fn invalid_form_keeps_the_session() {
    let app = TestApp::new();
    let project_id = app.seed_project().await.id.to_string();
    issue(&app, &project_id, "4821").await;

    let session = session();
    let Json(_) = briefing_login_handler(
        State(app.state.clone()),
        Path(project_id.clone()),
        session.clone(),
        login("4821"),
    )
    .await
    .unwrap_or_else(|_| panic!("login should succeed"));

    let mut form = briefing_form();
    form.platforms.clear();
    let result =
        briefing_submit_handler(State(app.state.clone()), Path(project_id), session.clone(), Json(form))
            .await;

    assert!(matches!(result, Err(ApiError(AppError::Validation(_)))));
    assert!(matches!(session_identity(&session).await, Ok(Some(_))));
}

#[tokio::test]
async fn submission_without_session_is_unauthorized() {
    let app = TestApp::new();
    let project_id = app.seed_project().await.id.to_string();

    let result = briefing_submit_handler(
        State(app.state.clone()),
        Path(project_id),
        session(),
        Json(briefing_form()),
    )
    .await;

    assert!(matches!(result, Err(ApiError(AppError::Unauthorized(_)))));
}

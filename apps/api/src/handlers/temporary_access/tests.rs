use axum::Json;
use axum::extract::{Query, State};
use briefdesk_core::AppError;

use crate::dto::{
    CreateTemporaryUserRequest, DeleteTemporaryByProjectRequest, DeleteTemporaryUserRequest,
    TemporaryCredentialQuery,
};
use crate::error::ApiError;
use crate::handlers::test_support::{CLIENT_EMAIL, TestApp};

use super::{
    create_temporary_user_handler, delete_temporary_by_project_handler,
    delete_temporary_user_handler, temporary_credential_by_project_handler,
};

fn create_request(project_id: &str, password: &str) -> CreateTemporaryUserRequest {
    CreateTemporaryUserRequest {
        project_id: Some(project_id.to_owned()),
        email: Some(CLIENT_EMAIL.to_owned()),
        password: Some(password.to_owned()),
    }
}

fn lookup_query(project_id: &str) -> Query<TemporaryCredentialQuery> {
    Query(TemporaryCredentialQuery {
        project_id: Some(project_id.to_owned()),
    })
}

#[tokio::test]
async fn issued_credential_is_returned_by_lookup() {
    let app = TestApp::new();
    let project_id = app.seed_project().await.id.to_string();

    let Json(issued) = create_temporary_user_handler(
        State(app.state.clone()),
        Json(create_request(&project_id, "4821")),
    )
    .await
    .unwrap_or_else(|_| panic!("issue should succeed"));
    assert!(issued.temp_saved);
    assert_eq!(app.identity_provider.user_ids(), vec![issued.user_id]);

    let Json(credential) =
        temporary_credential_by_project_handler(State(app.state.clone()), lookup_query(&project_id))
            .await
            .unwrap_or_else(|_| panic!("lookup should succeed"));
    assert_eq!(credential.email.as_deref(), Some(CLIENT_EMAIL));
    assert_eq!(credential.password.as_deref(), Some("4821"));
    assert!(credential.expires_at.is_some());
}

#[tokio::test]
async fn issued_email_is_stored_in_canonical_lowercase() {
    let app = TestApp::new();
    let project_id = app.seed_project().await.id.to_string();

    let Json(_) = create_temporary_user_handler(
        State(app.state.clone()),
        Json(CreateTemporaryUserRequest {
            project_id: Some(project_id.clone()),
            email: Some(" Anna.Verdi@Example.com ".to_owned()),
            password: Some("4821".to_owned()),
        }),
    )
    .await
    .unwrap_or_else(|_| panic!("issue should succeed"));

    let Json(credential) =
        temporary_credential_by_project_handler(State(app.state.clone()), lookup_query(&project_id))
            .await
            .unwrap_or_else(|_| panic!("lookup should succeed"));
    let Some(email) = credential.email else {
        panic!("lookup should return the issued email");
    };
    assert_eq!(email, "anna.verdi@example.com");
    assert!(email.eq_ignore_ascii_case("Anna.Verdi@Example.com"));
}

#[tokio::test]
async fn malformed_fallback_email_is_rejected() {
    let app = TestApp::new();
    let project_id = app.seed_project().await.id.to_string();

    let result = delete_temporary_by_project_handler(
        State(app.state.clone()),
        Json(DeleteTemporaryByProjectRequest {
            project_id: Some(project_id),
            email: Some("not-an-email".to_owned()),
        }),
    )
    .await;

    assert!(matches!(result, Err(ApiError(AppError::Validation(_)))));
}

#[tokio::test]
async fn missing_fields_are_rejected_before_any_upstream_call() {
    let app = TestApp::without_service_key();

    let result = create_temporary_user_handler(
        State(app.state.clone()),
        Json(CreateTemporaryUserRequest {
            project_id: Some("  ".to_owned()),
            email: Some(CLIENT_EMAIL.to_owned()),
            password: Some("4821".to_owned()),
        }),
    )
    .await;

    let Err(ApiError(AppError::Validation(message))) = result else {
        panic!("expected a validation error");
    };
    assert_eq!(message, "projectId is required");

    let result = delete_temporary_user_handler(
        State(app.state.clone()),
        Json(DeleteTemporaryUserRequest::default()),
    )
    .await;
    assert!(matches!(result, Err(ApiError(AppError::Validation(_)))));
}

#[tokio::test]
async fn missing_service_key_is_a_configuration_error() {
    let app = TestApp::without_service_key();
    let project_id = app.seed_project().await.id.to_string();

    let issue = create_temporary_user_handler(
        State(app.state.clone()),
        Json(create_request(&project_id, "4821")),
    )
    .await;
    assert!(matches!(issue, Err(ApiError(AppError::Configuration(_)))));

    let lookup =
        temporary_credential_by_project_handler(State(app.state.clone()), lookup_query(&project_id))
            .await;
    assert!(matches!(lookup, Err(ApiError(AppError::Configuration(_)))));
}

#[tokio::test]
async fn lookup_without_rows_is_empty() {
    let app = TestApp::new();
    let project_id = app.seed_project().await.id.to_string();

    let Json(credential) =
        temporary_credential_by_project_handler(State(app.state.clone()), lookup_query(&project_id))
            .await
            .unwrap_or_else(|_| panic!("lookup should succeed"));

    assert_eq!(credential.email, None);
    assert_eq!(credential.password, None);
    assert_eq!(credential.expires_at, None);
}

#[tokio::test]
async fn revoke_by_project_removes_every_issued_identity() {
    let app = TestApp::new();
    let project_id = app.seed_project().await.id.to_string();

    for password in ["1111", "2222"] {
        let Json(_) = create_temporary_user_handler(
            State(app.state.clone()),
            Json(create_request(&project_id, password)),
        )
        .await
        .unwrap_or_else(|_| panic!("issue should succeed"));
    }
    assert_eq!(app.identity_provider.user_ids().len(), 2);

    let Json(outcome) = delete_temporary_by_project_handler(
        State(app.state.clone()),
        Json(DeleteTemporaryByProjectRequest {
            project_id: Some(project_id.clone()),
            email: None,
        }),
    )
    .await
    .unwrap_or_else(|_| panic!("revoke should succeed"));

    assert!(outcome.ok);
    assert_eq!(outcome.deleted_by, Some("temp_users"));
    assert!(app.identity_provider.user_ids().is_empty());

    let Json(credential) =
        temporary_credential_by_project_handler(State(app.state.clone()), lookup_query(&project_id))
            .await
            .unwrap_or_else(|_| panic!("lookup should succeed"));
    assert_eq!(credential.email, None);
}

#[tokio::test]
async fn revoke_for_unknown_project_reports_nothing_found() {
    let app = TestApp::new();

    let Json(outcome) = delete_temporary_by_project_handler(
        State(app.state.clone()),
        Json(DeleteTemporaryByProjectRequest {
            project_id: Some("5b0f5c8e-8f35-4a4e-9a55-3c7d0f0f5a11".to_owned()),
            email: Some("nobody@example.com".to_owned()),
        }),
    )
    .await
    .unwrap_or_else(|_| panic!("revoke should succeed"));

    assert!(outcome.ok);
    assert_eq!(outcome.deleted_by, None);
    assert_eq!(outcome.info, Some("no temporary user found"));
}

#[tokio::test]
async fn revoke_by_identity_deletes_the_user() {
    let app = TestApp::new();
    let project_id = app.seed_project().await.id.to_string();

    let Json(issued) = create_temporary_user_handler(
        State(app.state.clone()),
        Json(create_request(&project_id, "4821")),
    )
    .await
    .unwrap_or_else(|_| panic!("issue should succeed"));

    let Json(response) = delete_temporary_user_handler(
        State(app.state.clone()),
        Json(DeleteTemporaryUserRequest {
            user_id: Some(issued.user_id),
        }),
    )
    .await
    .unwrap_or_else(|_| panic!("revoke should succeed"));

    assert!(response.ok);
    assert!(app.identity_provider.user_ids().is_empty());
}

use briefdesk_application::{ClientRepository, ProjectRepository};
use briefdesk_core::AppError;
use briefdesk_domain::ClientId;

use super::{PostgresClientRepository, escape_like};
use crate::PostgresProjectRepository;
use crate::postgres_test_support::{stored_client, stored_project, test_pool, unique_client};

#[test]
fn like_wildcards_are_escaped() {
    assert_eq!(escape_like("50%_off"), "50\\%\\_off");
    assert_eq!(escape_like("verdi"), "verdi");
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresClientRepository::new(pool.clone());
    let existing = stored_client(&pool).await;

    let mut duplicate = unique_client();
    duplicate.email = existing.email.clone();

    let result = repository.insert(&duplicate).await;
    assert!(matches!(
        result,
        Err(AppError::Conflict(message))
            if message == "a client with this email or tax id already exists"
    ));
}

#[tokio::test]
async fn duplicate_tax_id_is_a_conflict() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresClientRepository::new(pool.clone());
    let existing = stored_client(&pool).await;

    let mut duplicate = unique_client();
    duplicate.tax_id = existing.tax_id.clone();

    assert!(matches!(
        repository.insert(&duplicate).await,
        Err(AppError::Conflict(_))
    ));
}

#[tokio::test]
async fn referenced_client_cannot_be_deleted() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresClientRepository::new(pool.clone());
    let projects = PostgresProjectRepository::new(pool.clone());
    let client = stored_client(&pool).await;
    let project = stored_project(&pool, client.id).await;

    let result = repository.delete(client.id).await;
    assert!(matches!(
        result,
        Err(AppError::Conflict(message)) if message == "client is still referenced by a project"
    ));

    assert!(matches!(projects.delete(project.id).await, Ok(true)));
    assert!(matches!(repository.delete(client.id).await, Ok(true)));
    assert!(matches!(repository.delete(client.id).await, Ok(false)));
}

#[tokio::test]
async fn find_by_email_ignores_case() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresClientRepository::new(pool.clone());
    let client = stored_client(&pool).await;

    let found = repository.find_by_email(&client.email).await;
    assert!(matches!(found, Ok(Some(found)) if found.id == client.id));
    assert!(matches!(repository.find(ClientId::new()).await, Ok(None)));
}

#[tokio::test]
async fn search_treats_wildcards_literally() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresClientRepository::new(pool.clone());
    let client = stored_client(&pool).await;

    let listed = repository
        .list(Some("verdi stud"))
        .await
        .unwrap_or_else(|_| panic!("clients should list"));
    assert!(listed.iter().any(|candidate| candidate.id == client.id));

    let listed = repository
        .list(Some("%"))
        .await
        .unwrap_or_else(|_| panic!("clients should list"));
    assert!(listed.iter().all(|candidate| candidate.id != client.id));
}

//! Client management.

use std::sync::Arc;

use chrono::Utc;

use briefdesk_core::{AppError, AppResult};
use briefdesk_domain::{Client, ClientId, ClientUpdate, NewClient};

use crate::ClientRepository;

/// Application service for client records.
#[derive(Clone)]
pub struct ClientService {
    client_repository: Arc<dyn ClientRepository>,
}

impl ClientService {
    /// Creates a new client service.
    #[must_use]
    pub fn new(client_repository: Arc<dyn ClientRepository>) -> Self {
        Self { client_repository }
    }

    /// Lists clients, optionally filtered by a name or company substring.
    pub async fn list(&self, search: Option<&str>) -> AppResult<Vec<Client>> {
        let search = search.map(str::trim).filter(|term| !term.is_empty());
        self.client_repository.list(search).await
    }

    /// Returns one client.
    pub async fn get(&self, client_id: ClientId) -> AppResult<Client> {
        self.client_repository
            .find(client_id)
            .await?
            .ok_or_else(|| AppError::NotFound("client not found".to_owned()))
    }

    /// Creates a client. When the email or tax id is already taken the
    /// existing client is returned instead.
    pub async fn create(&self, input: NewClient) -> AppResult<Client> {
        let now = Utc::now();
        let client = Client {
            id: ClientId::new(),
            full_name: input.full_name,
            company_name: input.company_name,
            tax_id: input.tax_id,
            email: input.email,
            phone: input.phone,
            role: input.role,
            created_at: now,
            updated_at: now,
        };

        match self.client_repository.insert(&client).await {
            Ok(()) => Ok(client),
            Err(AppError::Conflict(message)) => {
                if let Some(existing) = self.client_repository.find_by_email(&client.email).await? {
                    return Ok(existing);
                }
                if let Some(existing) = self
                    .client_repository
                    .find_by_tax_id(client.tax_id.as_str())
                    .await?
                {
                    return Ok(existing);
                }
                Err(AppError::Conflict(message))
            }
            Err(error) => Err(error),
        }
    }

    /// Returns the client registered under the input email, creating it when absent.
    pub async fn find_or_create(&self, input: NewClient) -> AppResult<Client> {
        if let Some(existing) = self.client_repository.find_by_email(&input.email).await? {
            return Ok(existing);
        }

        self.create(input).await
    }

    /// Applies a partial update.
    pub async fn update(&self, client_id: ClientId, update: ClientUpdate) -> AppResult<Client> {
        let mut client = self.get(client_id).await?;
        client.apply(update, Utc::now());
        self.client_repository.save(&client).await?;
        Ok(client)
    }

    /// Deletes a client that no project references.
    pub async fn delete(&self, client_id: ClientId) -> AppResult<()> {
        if !self.client_repository.delete(client_id).await? {
            return Err(AppError::NotFound("client not found".to_owned()));
        }

        Ok(())
    }
}

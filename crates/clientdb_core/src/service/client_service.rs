//! Client use-case service.
//!
//! # Invariants
//! - Service APIs never bypass repository persistence contracts.
//! - Repository errors are returned unchanged; nothing is retried.
//! - Log events carry identifiers only, never client field values.

use crate::model::client::{Client, ClientId};
use crate::repo::client_repo::{ClientRepository, RepoResult};
use log::{debug, info, warn};

/// Use-case service wrapper for client operations.
pub struct ClientService<R: ClientRepository> {
    repo: R,
}

impl<R: ClientRepository> ClientService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Gets one client by ID; absent rows yield `RepoError::NotFound`.
    pub fn get_client(&self, id: ClientId) -> RepoResult<Client> {
        let result = self.repo.get_client(id);
        if let Err(err) = &result {
            if err.is_not_found() {
                debug!("event=client_get module=service status=not_found client_id={id}");
            } else {
                warn!("event=client_get module=service status=error client_id={id} error={err}");
            }
        }
        result
    }

    /// Gets one client by ID, mapping absence to `None`.
    pub fn find_client(&self, id: ClientId) -> RepoResult<Option<Client>> {
        self.repo.find_client(id)
    }

    /// Inserts a client and returns its store-assigned identifier.
    pub fn insert_client(&self, client: &Client) -> RepoResult<ClientId> {
        match self.repo.insert_client(client) {
            Ok(id) => {
                info!("event=client_insert module=service status=ok client_id={id}");
                Ok(id)
            }
            Err(err) => {
                warn!("event=client_insert module=service status=error error={err}");
                Err(err)
            }
        }
    }

    /// Builds and inserts a client from its field values.
    ///
    /// Returns the persisted client with its assigned identifier.
    pub fn register_client(
        &self,
        fio: impl Into<String>,
        login: impl Into<String>,
        birthday: impl Into<String>,
        email: impl Into<String>,
    ) -> RepoResult<Client> {
        let client = Client::new(fio, login, birthday, email);
        let id = self.insert_client(&client)?;
        Ok(client.with_id(id))
    }

    /// Deletes a client by ID.
    pub fn delete_client(&self, id: ClientId) -> RepoResult<()> {
        match self.repo.delete_client(id) {
            Ok(()) => {
                info!("event=client_delete module=service status=ok client_id={id}");
                Ok(())
            }
            Err(err) => {
                warn!("event=client_delete module=service status=error client_id={id} error={err}");
                Err(err)
            }
        }
    }
}

//! HttpConsoleApi - IConsoleApi implementation over HTTP
//!
//! Wraps the [`ConsoleClient`] and converts its errors into the port-level
//! [`ApiError`] so the state layer never sees reqwest types.

use async_trait::async_trait;
use deckhand_core::domain::{Folder, FolderId, Instance, InstanceId, InstanceUpdate};
use deckhand_core::ports::{ApiError, IConsoleApi};

use crate::client::ConsoleClient;

/// [`IConsoleApi`] adapter backed by [`ConsoleClient`]
#[derive(Debug, Clone)]
pub struct HttpConsoleApi {
    client: ConsoleClient,
}

impl HttpConsoleApi {
    pub fn new(client: ConsoleClient) -> Self {
        Self { client }
    }

    /// Returns the wrapped client
    pub fn client(&self) -> &ConsoleClient {
        &self.client
    }
}

#[async_trait]
impl IConsoleApi for HttpConsoleApi {
    async fn list_instances(&self) -> Result<Vec<Instance>, ApiError> {
        Ok(self.client.list_instances().await?)
    }

    async fn list_folders(&self) -> Result<Vec<Folder>, ApiError> {
        Ok(self.client.list_folders().await?)
    }

    async fn update_instance(
        &self,
        instance_id: &InstanceId,
        update: &InstanceUpdate,
    ) -> Result<(), ApiError> {
        Ok(self.client.update_instance(instance_id, update).await?)
    }

    async fn create_folder(&self, name: &str) -> Result<(), ApiError> {
        Ok(self.client.create_folder(name).await?)
    }

    async fn delete_folder(&self, folder_id: &FolderId) -> Result<(), ApiError> {
        Ok(self.client.delete_folder(folder_id).await?)
    }

    async fn rename_folder(&self, folder_id: &FolderId, name: &str) -> Result<(), ApiError> {
        Ok(self.client.rename_folder(folder_id, name).await?)
    }
}

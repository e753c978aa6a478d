//! Console API client
//!
//! Provides a typed HTTP client for the console server's instance and
//! folder endpoints. Handles the optional bearer header, JSON bodies, and
//! endpoint construction.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use deckhand_api::client::ConsoleClient;
//!
//! # async fn example() -> Result<(), deckhand_api::ClientError> {
//! let client = ConsoleClient::new("http://127.0.0.1:8080");
//! let instances = client.list_instances().await?;
//! println!("{} instances", instances.len());
//! # Ok(())
//! # }
//! ```

use deckhand_core::config::ApiConfig;
use deckhand_core::domain::{Folder, FolderId, Instance, InstanceId, InstanceUpdate};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::ClientError;

/// Request body for folder create and rename
#[derive(Debug, Serialize)]
struct FolderNameBody<'a> {
    name: &'a str,
}

/// HTTP client for the console API
///
/// Wraps `reqwest::Client` with base URL construction and the optional
/// bearer token. Every non-2xx response is turned into
/// [`ClientError::UnexpectedStatus`]; nothing is retried.
#[derive(Debug, Clone)]
pub struct ConsoleClient {
    /// The underlying HTTP client
    client: Client,
    /// Server root, without a trailing slash
    base_url: String,
    /// Token sent as `Authorization: Bearer`
    bearer_token: Option<String>,
}

impl ConsoleClient {
    /// Creates a client for the server at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            bearer_token: None,
        }
    }

    /// Creates a client from the `api` configuration section
    pub fn from_config(config: &ApiConfig) -> Self {
        let client = Self::new(config.base_url.clone());
        match &config.bearer_token {
            Some(token) => client.with_bearer_token(token.clone()),
            None => client,
        }
    }

    /// Sets the bearer token sent with every request
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Returns the base URL for API requests
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Creates a request builder for the given method and path
    ///
    /// # Arguments
    /// * `method` - HTTP method
    /// * `path` - Path relative to the server root (e.g. "/api/folders")
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.client.request(method, &url);
        match &self.bearer_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// `GET /api/instances`
    pub async fn list_instances(&self) -> Result<Vec<Instance>, ClientError> {
        debug!("Fetching instances");
        let response = self.send(self.request(Method::GET, "/api/instances")).await?;
        let instances: Vec<Instance> = parse_json(response).await?;
        debug!(count = instances.len(), "Fetched instances");
        Ok(instances)
    }

    /// `GET /api/folders`
    pub async fn list_folders(&self) -> Result<Vec<Folder>, ClientError> {
        debug!("Fetching folders");
        let response = self.send(self.request(Method::GET, "/api/folders")).await?;
        let folders: Vec<Folder> = parse_json(response).await?;
        debug!(count = folders.len(), "Fetched folders");
        Ok(folders)
    }

    /// `PATCH /api/instances/{id}`
    pub async fn update_instance(
        &self,
        instance_id: &InstanceId,
        update: &InstanceUpdate,
    ) -> Result<(), ClientError> {
        let path = format!("/api/instances/{}", instance_id.as_str());
        debug!(instance_id = %instance_id, folder_id = %update.folder_id, "Updating instance");
        self.send(self.request(Method::PATCH, &path).json(update))
            .await?;
        Ok(())
    }

    /// `POST /api/folders`
    pub async fn create_folder(&self, name: &str) -> Result<(), ClientError> {
        debug!(name, "Creating folder");
        self.send(
            self.request(Method::POST, "/api/folders")
                .json(&FolderNameBody { name }),
        )
        .await?;
        Ok(())
    }

    /// `DELETE /api/folders/{id}`
    pub async fn delete_folder(&self, folder_id: &FolderId) -> Result<(), ClientError> {
        let path = format!("/api/folders/{}", folder_id.as_str());
        debug!(folder_id = %folder_id, "Deleting folder");
        self.send(self.request(Method::DELETE, &path)).await?;
        Ok(())
    }

    /// `PATCH /api/folders/{id}`
    pub async fn rename_folder(&self, folder_id: &FolderId, name: &str) -> Result<(), ClientError> {
        let path = format!("/api/folders/{}", folder_id.as_str());
        debug!(folder_id = %folder_id, name, "Renaming folder");
        self.send(
            self.request(Method::PATCH, &path)
                .json(&FolderNameBody { name }),
        )
        .await?;
        Ok(())
    }

    /// Sends a request and rejects non-2xx responses
    async fn send(&self, builder: RequestBuilder) -> Result<Response, ClientError> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().to_string();
        let body = response.text().await.unwrap_or_default();
        warn!(%url, status = status.as_u16(), "Console API returned error status");
        Err(ClientError::UnexpectedStatus { status, body })
    }
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ClientError::InvalidResponse(e.to_string()))
}

pub mod storage;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use url::Url;
use uuid::Uuid;

use crate::database::models::{CreateItemRequest, Item, PublicUser, UpdateItemRequest};
use crate::types::{AuthResponse, DeleteResponse, HealthStatus, LoginRequest, RegisterRequest};

pub use storage::LocalStorage;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid API base URL '{0}'")]
    InvalidBaseUrl(String),

    #[error("not logged in")]
    NotAuthenticated,

    #[error("{message} (HTTP {status})")]
    Api { status: StatusCode, message: String },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Typed HTTP client for the Digital Desk API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl ApiClient {
    /// `base_url` is the API root, e.g. `http://localhost:5000/api`
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let mut url = Url::parse(base_url).map_err(|_| ClientError::InvalidBaseUrl(base_url.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }
        // Url::join replaces the last segment unless the path ends in '/'
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            http,
            base_url: url,
            token: None,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // Users

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ClientError> {
        let builder = self.request(Method::POST, "users/register")?.json(request);
        self.send(builder).await
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ClientError> {
        let builder = self.request(Method::POST, "users/login")?.json(request);
        self.send(builder).await
    }

    pub async fn profile(&self) -> Result<PublicUser, ClientError> {
        let builder = self.authed(Method::GET, "users/profile")?;
        self.send(builder).await
    }

    // Items

    pub async fn list_items(&self) -> Result<Vec<Item>, ClientError> {
        let builder = self.authed(Method::GET, "todos")?;
        self.send(builder).await
    }

    pub async fn create_item(&self, request: &CreateItemRequest) -> Result<Item, ClientError> {
        let builder = self.authed(Method::POST, "todos")?.json(request);
        self.send(builder).await
    }

    pub async fn update_item(&self, id: Uuid, request: &UpdateItemRequest) -> Result<Item, ClientError> {
        let builder = self.authed(Method::PUT, &format!("todos/{}", id))?.json(request);
        self.send(builder).await
    }

    pub async fn delete_item(&self, id: Uuid) -> Result<DeleteResponse, ClientError> {
        let builder = self.authed(Method::DELETE, &format!("todos/{}", id))?;
        self.send(builder).await
    }

    pub async fn toggle_item(&self, id: Uuid) -> Result<Item, ClientError> {
        let builder = self.authed(Method::PATCH, &format!("todos/{}/toggle", id))?;
        self.send(builder).await
    }

    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        let builder = self.request(Method::GET, "health")?;
        self.send(builder).await
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|_| ClientError::InvalidBaseUrl(format!("{}{}", self.base_url, path)))?;
        Ok(self.http.request(method, url))
    }

    fn authed(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let token = self.token.as_deref().ok_or(ClientError::NotAuthenticated)?;
        Ok(self.request(method, path)?.bearer_auth(token))
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ClientError> {
        let response = builder.send().await?;
        Self::parse(response).await
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());

        tracing::debug!("API error {}: {}", status, message);
        Err(ClientError::Api { status, message })
    }
}

//! Consul KV coordination store

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::StatusCode;
use tracing::debug;

use crate::domain::registry::CoordinationStore;
use crate::domain::DomainError;

const TOKEN_HEADER: &str = "X-Consul-Token";

/// Connection settings for a Consul agent
#[derive(Debug, Clone)]
pub struct ConsulConfig {
    /// Agent base URL, e.g. "http://127.0.0.1:8500"
    pub address: String,
    /// ACL token sent with every request
    pub token: Option<String>,
    /// Prepended to every key, e.g. "apihub/services/"
    pub key_prefix: String,
    pub timeout: Duration,
}

impl ConsulConfig {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            token: None,
            key_prefix: String::new(),
            timeout: Duration::from_secs(5),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Coordination store backed by the Consul HTTP KV API
#[derive(Debug, Clone)]
pub struct ConsulKvStore {
    client: reqwest::Client,
    config: ConsulConfig,
}

impl ConsulKvStore {
    pub fn new(config: ConsulConfig) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DomainError::publication(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    fn url(&self, key: &str) -> String {
        format!(
            "{}/v1/kv/{}{}",
            self.config.address.trim_end_matches('/'),
            self.config.key_prefix,
            key
        )
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.token {
            Some(token) => request.header(TOKEN_HEADER, token),
            None => request,
        }
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        key: &str,
    ) -> Result<reqwest::Response, DomainError> {
        self.authorize(request)
            .send()
            .await
            .map_err(|e| DomainError::publication(format!("Consul request for '{}' failed: {}", key, e)))
    }
}

async fn status_error(response: reqwest::Response, key: &str) -> DomainError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    DomainError::publication(format!("Consul returned HTTP {} for '{}': {}", status, key, body))
}

#[async_trait]
impl CoordinationStore for ConsulKvStore {
    async fn put(&self, key: &str, value: Bytes) -> Result<(), DomainError> {
        let response = self.send(self.client.put(self.url(key)).body(value), key).await?;

        if !response.status().is_success() {
            return Err(status_error(response, key).await);
        }

        // Consul answers `true` or `false`; false only happens for CAS writes
        let accepted = response.text().await.map_err(|e| {
            DomainError::publication(format!("Failed to read Consul response: {}", e))
        })?;

        if accepted.trim() != "true" {
            return Err(DomainError::publication(format!(
                "Consul rejected write to '{}'",
                key
            )));
        }

        debug!(key = %key, "Consul key written");
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Bytes>, DomainError> {
        let response = self
            .send(self.client.get(self.url(key)).query(&[("raw", "")]), key)
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(status_error(response, key).await);
        }

        let body = response.bytes().await.map_err(|e| {
            DomainError::publication(format!("Failed to read Consul response: {}", e))
        })?;

        Ok(Some(body))
    }

    async fn delete(&self, key: &str) -> Result<(), DomainError> {
        let response = self.send(self.client.delete(self.url(key)), key).await?;

        if !response.status().is_success() {
            return Err(status_error(response, key).await);
        }

        debug!(key = %key, "Consul key deleted");
        Ok(())
    }
}

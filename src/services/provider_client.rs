//! Provider data client.
//!
//! Issues one GET per (provider, resource, filter) against the REST backend and
//! turns the answer into typed records or a `FetchError`. No retries: a failed
//! request is final until the user triggers it again.

use std::time::Duration;

use reqwest::{Client as HttpClient, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::types::errors::{FetchError, SettingsError};
use crate::types::git::{Branch, Commit, PullRequest};
use crate::types::provider::Identity;
use crate::types::request::ResourceRequest;
use crate::types::settings::ClientSettings;

/// HTTP client bound to one backend origin. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ProviderDataClient {
    http: HttpClient,
    base_url: Url,
}

impl ProviderDataClient {
    pub fn new(settings: &ClientSettings) -> Result<Self, SettingsError> {
        let base_url = Url::parse(&settings.base_url)
            .map_err(|e| SettingsError::InvalidValue(format!("base_url: {}", e)))?;
        let http = HttpClient::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .map_err(|e| SettingsError::InvalidValue(format!("HTTP client: {}", e)))?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL of the endpoint serving `request`.
    pub fn endpoint_url(&self, request: &ResourceRequest) -> Result<Url, FetchError> {
        self.base_url
            .join(&request.path_and_query())
            .map_err(|e| FetchError::Transport(e.to_string()))
    }

    pub async fn fetch_branches(&self, identity: &Identity) -> Result<Vec<Branch>, FetchError> {
        self.fetch_resource(&ResourceRequest::branches(identity.clone()))
            .await
    }

    pub async fn fetch_commits(
        &self,
        identity: &Identity,
        branch: Option<&str>,
    ) -> Result<Vec<Commit>, FetchError> {
        self.fetch_resource(&ResourceRequest::commits(identity.clone(), branch))
            .await
    }

    pub async fn fetch_pull_requests(
        &self,
        identity: &Identity,
        state: Option<&str>,
    ) -> Result<Vec<PullRequest>, FetchError> {
        self.fetch_resource(&ResourceRequest::pull_requests(identity.clone(), state))
            .await
    }

    /// Performs the GET described by `request` and decodes a JSON array of `T`.
    pub async fn fetch_resource<T: DeserializeOwned>(
        &self,
        request: &ResourceRequest,
    ) -> Result<Vec<T>, FetchError> {
        let url = self.endpoint_url(request)?;
        log::debug!("provider_client::fetch_resource {}", url);

        let response = self.http.get(url.clone()).send().await.map_err(|e| {
            log::warn!("request to {} failed: {}", url, e);
            FetchError::Transport(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            // An unreadable error body is treated the same as an empty one.
            let body = response.text().await.unwrap_or_default();
            let message =
                error_message_from_body(&body).unwrap_or_else(|| request.default_error_message());
            log::warn!("{} returned {}: {}", url, status, message);
            return Err(FetchError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| {
            log::warn!("{} returned an undecodable body: {}", url, e);
            FetchError::Parse(e.to_string())
        })
    }
}

/// Extracts the backend's error text: `error` first, then `message`.
///
/// Blank strings and non-string values count as absent.
pub fn error_message_from_body(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["error", "message"].iter().find_map(|field| {
        value
            .get(*field)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}

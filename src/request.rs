/*!
 * Shared HTTP plumbing for the scraping and API providers.
 *
 * All providers issue requests through one client carrying a fixed
 * descriptive user-agent and a bounded timeout. Transport failures, non-2xx
 * statuses and undecodable payloads are mapped onto the provider error
 * taxonomy here so that the adapters never crash on upstream surprises.
 */

use std::time::Duration;

use log::error;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::errors::ProviderError;

/// Fixed user-agent sent with every provider request
pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; sentex)";

/// Per-request timeout in seconds
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// HTTP requester shared by all network providers
#[derive(Debug, Clone)]
pub struct HttpRequester {
    /// HTTP client for making requests
    client: Client,
}

impl Default for HttpRequester {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpRequester {
    /// Create a new requester with the default timeout
    pub fn new() -> Self {
        Self::with_timeout(REQUEST_TIMEOUT_SECS)
    }

    /// Create a new requester with a custom timeout in seconds
    pub fn with_timeout(timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .user_agent(USER_AGENT)
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Fetch a URL and return the response body as text.
    ///
    /// Scraping providers parse the returned markup themselves; parsing is
    /// kept out of this layer so the response body can cross await points.
    pub async fn get_text(&self, provider: &str, url: &str) -> Result<String, ProviderError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed {
                provider: provider.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("Provider {} returned HTTP {} for {}", provider, status, url);
            return Err(ProviderError::ApiError {
                provider: provider.to_string(),
                status_code: status.as_u16(),
                message: format!("GET {}", url),
            });
        }

        response
            .text()
            .await
            .map_err(|e| ProviderError::RequestFailed {
                provider: provider.to_string(),
                message: e.to_string(),
            })
    }

    /// Fetch a URL and decode the response body as typed JSON
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        provider: &str,
        url: &str,
    ) -> Result<T, ProviderError> {
        let body = self.get_text(provider, url).await?;
        serde_json::from_str(&body).map_err(|e| ProviderError::ParseError {
            provider: provider.to_string(),
            message: e.to_string(),
        })
    }

    /// POST a JSON body with extra headers and decode the typed JSON response
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        provider: &str,
        url: &str,
        headers: &[(&str, &str)],
        body: &B,
    ) -> Result<T, ProviderError> {
        let mut request = self.client.post(url).json(body);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed {
                provider: provider.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Provider {} returned HTTP {}: {}", provider, status, message);
            return Err(ProviderError::ApiError {
                provider: provider.to_string(),
                status_code: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ProviderError::ParseError {
                provider: provider.to_string(),
                message: e.to_string(),
            })
    }
}

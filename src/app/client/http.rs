//! Language API over HTTP
//!
//! Every call is a `POST <base>/<system_name>/<action_namespace>` with the
//! selector parameters in the query string and the operation arguments as a
//! form body. Transport problems are logged and turned into a missing
//! response so the validator stays the only place that judges an answer.

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::app::client::{ApiClient, ClientConfig};
use crate::app::response::ApiResponse;
use crate::errors::ClientResult;

/// HTTP implementation of [`ApiClient`]
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    client: Client,
    base_url: Url,
}

impl HttpApiClient {
    /// Creates a client for the configured API location
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the base URL is invalid or the HTTP client
    /// cannot be built
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let base_url = config.parse_base_url()?;
        let client = config.build_http_client()?;

        tracing::info!("Created language API client for {}", base_url);

        Ok(Self { client, base_url })
    }

    /// Get the base URL of the language API
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, system_name: &str, action_namespace: &str) -> Option<Url> {
        match self
            .base_url
            .join(&format!("{}/{}", system_name, action_namespace))
        {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::warn!(
                    "Cannot build endpoint for {}/{}: {}",
                    system_name,
                    action_namespace,
                    e
                );
                None
            }
        }
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn call(
        &self,
        system_name: &str,
        action_namespace: &str,
        get_params: &[(&str, &str)],
        post_params: &[(&str, &str)],
    ) -> Option<ApiResponse> {
        let url = self.endpoint(system_name, action_namespace)?;

        tracing::debug!("Calling {} with {:?}", url, get_params);

        let response = match self
            .client
            .post(url.clone())
            .query(get_params)
            .form(post_params)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Language API request to {} failed: {}", url, e);
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Language API responded with HTTP {} for {}", status, url);
            return None;
        }

        match response.json::<ApiResponse>().await {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::warn!("Language API response from {} is not valid JSON: {}", url, e);
                None
            }
        }
    }
}

//! Language API client
//!
//! The batch workflows talk to the language API through the [`ApiClient`]
//! trait so the transport can be swapped for a recording double in tests.
//!
//! The module is organized into:
//! - `config`: HTTP client configuration and building
//! - `http`: the reqwest-backed [`HttpApiClient`]

use async_trait::async_trait;

use crate::app::response::ApiResponse;

pub mod config;
pub mod http;

pub use config::ClientConfig;
pub use http::HttpApiClient;

/// Remote operation invoker of the language API
///
/// `get_params` always carries the `system` and `action` selectors,
/// `post_params` the operation arguments (`language`, `applet`).
///
/// Implementations never fail: a call that did not produce a response is
/// reported as `None` and judged by the response validator.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Invoke one remote operation
    async fn call(
        &self,
        system_name: &str,
        action_namespace: &str,
        get_params: &[(&str, &str)],
        post_params: &[(&str, &str)],
    ) -> Option<ApiResponse>;
}

//! Better BibTeX JSON-RPC client over HTTP.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::ACCEPT;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use super::envelope::unwrap_response;
use super::http_client::build_rpc_http_client;
use super::{DEFAULT_ENDPOINT, RpcError, RpcTransport};

/// JSON-RPC 2.0 request body.
#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    params: &'a Value,
}

/// Client for the Better BibTeX JSON-RPC endpoint.
///
/// Every call is a single HTTP POST; there is no retry.
#[derive(Debug, Clone)]
pub struct RpcClient {
    http: Client,
    endpoint: Url,
}

impl RpcClient {
    /// Creates a client for the given endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns [`RpcError::InvalidEndpoint`] if `endpoint` is not an
    /// absolute http(s) URL or the HTTP client cannot be built.
    pub fn new(endpoint: &str) -> Result<Self, RpcError> {
        let parsed = Url::parse(endpoint.trim())
            .map_err(|error| RpcError::invalid_endpoint(endpoint, &error.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(RpcError::invalid_endpoint(
                endpoint,
                &format!("scheme '{}' is not supported", parsed.scheme()),
            ));
        }

        let http = build_rpc_http_client(endpoint)?;
        Ok(Self {
            http,
            endpoint: parsed,
        })
    }

    /// Creates a client for [`DEFAULT_ENDPOINT`].
    ///
    /// # Errors
    ///
    /// Returns [`RpcError`] if the HTTP client cannot be built.
    pub fn with_default_endpoint() -> Result<Self, RpcError> {
        Self::new(DEFAULT_ENDPOINT)
    }

    /// The endpoint this client posts to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }
}

#[async_trait]
impl RpcTransport for RpcClient {
    #[tracing::instrument(skip(self, params), fields(endpoint = %self.endpoint))]
    async fn call(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            method,
            params: &params,
        };
        debug!(params = %params, "Calling Better BibTeX");

        let response = self
            .http
            .post(self.endpoint.clone())
            .header(ACCEPT, "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|error| {
                RpcError::connection_failure(self.endpoint.as_str(), &error_chain(&error))
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|error| {
            RpcError::connection_failure(self.endpoint.as_str(), &error_chain(&error))
        })?;
        trace!(%status, body_len = text.len(), "Received Better BibTeX response");

        let body: Value = serde_json::from_str(&text).map_err(|error| {
            RpcError::invalid_response(
                method,
                &format!("HTTP {status} with a body that is not JSON: {error}"),
            )
        })?;

        unwrap_response(method, body)
    }
}

/// Joins an error and its sources; reqwest's top-level message alone
/// rarely says why a connection failed.
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

//! HTTP client construction policy for the RPC client.
//!
//! Centralizes networking defaults (user-agent, proxy compatibility) so the
//! client behaves the same in the binary and in tests.

use std::panic::{AssertUnwindSafe, catch_unwind};

use reqwest::{Client, ClientBuilder};
use tracing::warn;

use crate::user_agent;

use super::RpcError;

/// Builds the HTTP client used for JSON-RPC calls.
///
/// No request timeout is set: a call blocks until the service answers or
/// the connection fails.
///
/// # Errors
///
/// Returns [`RpcError::InvalidEndpoint`] when client construction fails.
pub(crate) fn build_rpc_http_client(endpoint: &str) -> Result<Client, RpcError> {
    match try_build_client(false) {
        Ok(client) => Ok(client),
        Err(BuildClientFailure::Panic) => {
            // Some restricted macOS sandbox environments panic when querying
            // system proxy settings. The endpoint is normally local, so retry
            // without proxy lookup.
            warn!("RPC client hit system proxy panic; using no-proxy fallback builder");
            match try_build_client(true) {
                Ok(client) => Ok(client),
                Err(BuildClientFailure::Panic) => Err(RpcError::invalid_endpoint(
                    endpoint,
                    "HTTP client construction panicked while initializing networking",
                )),
                Err(BuildClientFailure::Build(error)) => Err(RpcError::invalid_endpoint(
                    endpoint,
                    &format!("HTTP client construction failed: {error}"),
                )),
            }
        }
        Err(BuildClientFailure::Build(error)) => Err(RpcError::invalid_endpoint(
            endpoint,
            &format!("HTTP client construction failed: {error}"),
        )),
    }
}

enum BuildClientFailure {
    Panic,
    Build(reqwest::Error),
}

fn try_build_client(disable_proxy: bool) -> Result<Client, BuildClientFailure> {
    catch_unwind(AssertUnwindSafe(move || {
        let mut builder = base_builder();
        if disable_proxy {
            builder = builder.no_proxy();
        }
        builder.build().map_err(BuildClientFailure::Build)
    }))
    .map_err(|_| BuildClientFailure::Panic)?
}

fn base_builder() -> ClientBuilder {
    Client::builder().user_agent(user_agent::default_rpc_user_agent())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_rpc_http_client_succeeds() {
        assert!(build_rpc_http_client("http://localhost:23119/better-bibtex/json-rpc").is_ok());
    }
}

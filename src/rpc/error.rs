//! Error types for JSON-RPC calls to Better BibTeX.
//!
//! This module defines structured errors for the RPC client,
//! following the What/Why/Fix pattern used across the project.

use thiserror::Error;

/// Errors that can occur while calling the Better BibTeX JSON-RPC service.
#[derive(Debug, Clone, Error)]
pub enum RpcError {
    /// The endpoint could not be reached (Zotero not running, network error)
    #[error(
        "failed to connect to Better BibTeX at {endpoint}: {reason}\n  Suggestion: Make sure Zotero is running and the Better BibTeX extension is installed"
    )]
    ConnectionFailure {
        /// Endpoint URL that was called
        endpoint: String,
        /// Transport-level failure
        reason: String,
    },

    /// The service answered with a JSON-RPC error object
    #[error("BBT error: {message}")]
    Remote {
        /// RPC method that failed
        method: String,
        /// Message reported by the service, verbatim
        message: String,
    },

    /// The service answered with something that is not a usable JSON-RPC response
    #[error("unexpected response from Better BibTeX for '{method}': {reason}")]
    InvalidResponse {
        /// RPC method that was called
        method: String,
        /// What was wrong with the response
        reason: String,
    },

    /// The configured endpoint is not a usable http(s) URL
    #[error("invalid Better BibTeX endpoint '{endpoint}': {reason}\n  Suggestion: {suggestion}")]
    InvalidEndpoint {
        /// The endpoint as configured
        endpoint: String,
        /// Why it was rejected
        reason: String,
        /// How to fix the issue
        suggestion: String,
    },
}

impl RpcError {
    /// Creates a `ConnectionFailure` error.
    #[must_use]
    pub fn connection_failure(endpoint: &str, reason: &str) -> Self {
        Self::ConnectionFailure {
            endpoint: endpoint.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Creates a `Remote` error carrying the server's message.
    #[must_use]
    pub fn remote(method: &str, message: &str) -> Self {
        Self::Remote {
            method: method.to_string(),
            message: message.to_string(),
        }
    }

    /// Creates an `InvalidResponse` error.
    #[must_use]
    pub fn invalid_response(method: &str, reason: &str) -> Self {
        Self::InvalidResponse {
            method: method.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Creates an `InvalidEndpoint` error.
    #[must_use]
    pub fn invalid_endpoint(endpoint: &str, reason: &str) -> Self {
        Self::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: reason.to_string(),
            suggestion: "Use an http:// or https:// URL such as the default Better BibTeX endpoint"
                .to_string(),
        }
    }

    /// Returns true for errors the service reported about a specific request.
    ///
    /// These concern one item and do not mean the service is unusable.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote { .. })
    }

    /// Returns true for failures confined to one call's answer: a remote
    /// error or an unusable response. Connection and endpoint errors are not.
    #[must_use]
    pub fn is_item_failure(&self) -> bool {
        matches!(self, Self::Remote { .. } | Self::InvalidResponse { .. })
    }
}

//! JSON-RPC access to Better BibTeX.
//!
//! Better BibTeX exposes a JSON-RPC 2.0 service inside Zotero. Zoinks uses
//! two of its methods:
//!
//! - [`METHOD_CITATION_KEY`] maps item keys to citation keys
//! - [`METHOD_EXPORT`] exports records for citation keys
//!
//! # Architecture
//!
//! - [`RpcTransport`] - Async trait the resolver calls through
//! - [`RpcClient`] - HTTP implementation posting to the configured endpoint
//! - [`RpcError`] - Connection, remote and response-shape failures
//!
//! # Example
//!
//! ```no_run
//! use zoinks::rpc::{RpcClient, RpcTransport, METHOD_CITATION_KEY};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = RpcClient::with_default_endpoint()?;
//! let keys = client.call(METHOD_CITATION_KEY, json!([["WCKIQ23Y"]])).await?;
//! println!("{keys}");
//! # Ok(())
//! # }
//! ```

mod client;
mod envelope;
mod error;
mod http_client;

pub use client::RpcClient;
pub use error::RpcError;

use async_trait::async_trait;
use serde_json::Value;

/// Default Better BibTeX JSON-RPC endpoint on the local Zotero instance.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:23119/better-bibtex/json-rpc";

/// Method mapping item keys to citation keys.
pub const METHOD_CITATION_KEY: &str = "item.citationkey";

/// Method exporting records for citation keys.
pub const METHOD_EXPORT: &str = "item.export";

/// Export translator producing structured JSON records.
pub const EXPORT_FORMAT: &str = "jzon";

/// A way to issue JSON-RPC calls.
///
/// Implementations return the unwrapped payload: the `result` value, with
/// Better BibTeX's encoding quirks already removed.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    /// Calls `method` with positional `params` (a JSON array).
    async fn call(&self, method: &str, params: Value) -> Result<Value, RpcError>;
}

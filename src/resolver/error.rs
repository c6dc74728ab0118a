//! Error types for record resolution.

use thiserror::Error;

use crate::rpc::RpcError;

/// Errors that abort resolution of an identifier batch.
///
/// Per-item problems (unknown item key, no exported record, a remote error
/// for one key) are not errors: those entries get a placeholder record.
#[derive(Debug, Clone, Error)]
pub enum ResolveError {
    /// The RPC service could not be used
    #[error(transparent)]
    Rpc(#[from] RpcError),

    /// Export returned several records for one citation key
    #[error(
        "unexpectedly got {count} records for {identifier} (citation key '{citation_key}')\n  Suggestion: Check Better BibTeX for duplicate citation keys"
    )]
    MultipleRecords {
        /// Identifier as the user supplied it
        identifier: String,
        /// Citation key that was exported
        citation_key: String,
        /// Number of records returned
        count: usize,
    },
}

impl ResolveError {
    /// Creates a `MultipleRecords` error.
    #[must_use]
    pub fn multiple_records(identifier: &str, citation_key: &str, count: usize) -> Self {
        Self::MultipleRecords {
            identifier: identifier.to_string(),
            citation_key: citation_key.to_string(),
            count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_error_multiple_records_message() {
        let err = ResolveError::multiple_records("WCKIQ23Y", "smith2018", 2);
        let msg = err.to_string();
        assert!(msg.contains("2 records"), "should contain count");
        assert!(msg.contains("WCKIQ23Y"), "should contain identifier");
        assert!(msg.contains("smith2018"), "should contain citation key");
        assert!(msg.contains("Suggestion"), "should have suggestion");
    }

    #[test]
    fn test_resolve_error_rpc_is_transparent() {
        let err: ResolveError = RpcError::remote("item.export", "boom").into();
        assert_eq!(err.to_string(), "BBT error: boom");
    }
}

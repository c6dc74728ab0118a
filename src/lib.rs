//! Zoinks Core Library
//!
//! This library provides the pipeline behind the `zoinks` command: it turns
//! user-supplied Zotero identifiers into Better BibTeX citation keys, fetches
//! the matching records over BBT's local JSON-RPC service, and renders the
//! requested fields as text.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`parser`] - Identifier and field-name normalization
//! - [`rpc`] - JSON-RPC client and envelope unwrapping
//! - [`record`] - Case-insensitive record container
//! - [`resolver`] - Identifier → citation key → record pipeline
//! - [`output`] - Text rendering of resolved records
//! - [`exit`] - Process exit status classification

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod exit;
pub mod output;
pub mod parser;
pub mod record;
pub mod resolver;
pub mod rpc;
mod user_agent;

// Re-export commonly used types
pub use exit::ExitStatus;
pub use output::{OutputMode, render_citation_keys, render_records, terminal_width};
pub use parser::{Identifier, IdentifierKind, InputError, normalize_fields, parse_identifiers};
pub use record::{FieldValue, Record};
pub use resolver::{
    CitationKeyMapping, RecordMapping, ResolveError, fetch_records, resolve, resolve_citation_keys,
};
pub use rpc::{DEFAULT_ENDPOINT, RpcClient, RpcError, RpcTransport};

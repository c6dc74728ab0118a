//! Identifier resolution pipeline: identifiers → citation keys → records.
//!
//! Better BibTeX's RPC interface works off citation keys, so resolution runs
//! in two phases:
//!
//! 1. [`resolve_citation_keys`] maps every identifier to a citation key,
//!    asking `item.citationkey` once for the whole batch unless the user
//!    already supplied citation keys.
//! 2. [`fetch_records`] exports the record for each citation key, one
//!    `item.export` call per entry, in input order.
//!
//! Every identifier yields exactly one entry in each phase's mapping.
//! Entries that cannot be resolved get [`Record::placeholder`].
//!
//! # Example
//!
//! ```no_run
//! use zoinks::parser::parse_identifiers;
//! use zoinks::resolver::resolve;
//! use zoinks::rpc::RpcClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = RpcClient::with_default_endpoint()?;
//! let identifiers = parse_identifiers("WCKIQ23Y");
//! let records = resolve(&client, &identifiers).await?;
//! for (identifier, record) in &records {
//!     println!("{identifier}: {:?}", record.get("title"));
//! }
//! # Ok(())
//! # }
//! ```

mod error;

pub use error::ResolveError;

use indexmap::IndexMap;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::parser::Identifier;
use crate::record::Record;
use crate::rpc::{EXPORT_FORMAT, METHOD_CITATION_KEY, METHOD_EXPORT, RpcError, RpcTransport};

/// Identifier (as supplied) → citation key, in input order.
///
/// `None` marks an identifier Better BibTeX has no citation key for.
pub type CitationKeyMapping = IndexMap<String, Option<String>>;

/// Identifier (as supplied) → exported record, in input order.
pub type RecordMapping = IndexMap<String, Record>;

/// Resolves identifiers all the way to records.
///
/// # Errors
///
/// Returns [`ResolveError::Rpc`] when the service is unreachable or answers
/// with an unusable response, and [`ResolveError::MultipleRecords`] when one
/// citation key exports to more than one record.
pub async fn resolve(
    rpc: &dyn RpcTransport,
    identifiers: &[Identifier],
) -> Result<RecordMapping, ResolveError> {
    let citation_keys = resolve_citation_keys(rpc, identifiers).await?;
    fetch_records(rpc, &citation_keys).await
}

/// Maps each identifier to its citation key.
///
/// Inputs are assumed homogeneous in form: if any identifier carries the
/// `@` marker, all are taken as citation keys and no RPC call is made.
/// Otherwise the whole batch goes to `item.citationkey` in one call.
///
/// # Errors
///
/// Returns [`ResolveError::Rpc`] if the call fails or the response is not
/// an object.
pub async fn resolve_citation_keys(
    rpc: &dyn RpcTransport,
    identifiers: &[Identifier],
) -> Result<CitationKeyMapping, ResolveError> {
    if identifiers.is_empty() {
        return Ok(CitationKeyMapping::new());
    }

    if identifiers.iter().any(Identifier::is_citation_key) {
        debug!(
            count = identifiers.len(),
            "Citation keys supplied; skipping item key lookup"
        );
        return Ok(identifiers
            .iter()
            .map(|id| (id.raw.clone(), Some(id.key.clone())))
            .collect());
    }

    let item_keys: Vec<&str> = identifiers.iter().map(|id| id.key.as_str()).collect();
    debug!(?item_keys, "Asking Better BibTeX for citation keys");
    let response = rpc.call(METHOD_CITATION_KEY, json!([item_keys])).await?;

    let Value::Object(found) = response else {
        return Err(RpcError::invalid_response(
            METHOD_CITATION_KEY,
            "expected an object mapping item keys to citation keys",
        )
        .into());
    };

    let mut mapping = CitationKeyMapping::with_capacity(identifiers.len());
    for id in identifiers {
        let citation_key = found
            .get(&id.key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string);
        if citation_key.is_none() {
            warn!(identifier = %id.raw, "No citation key found");
        }
        mapping.entry(id.raw.clone()).or_insert(citation_key);
    }
    Ok(mapping)
}

/// Exports the record for each citation key, replacing keys with records.
///
/// Entries without a citation key, entries whose export is empty, and
/// entries the service reports an error for get [`Record::placeholder`].
///
/// # Errors
///
/// Returns [`ResolveError::MultipleRecords`] when an export yields more than
/// one record, and [`ResolveError::Rpc`] for connection failures and
/// malformed responses.
pub async fn fetch_records(
    rpc: &dyn RpcTransport,
    citation_keys: &CitationKeyMapping,
) -> Result<RecordMapping, ResolveError> {
    debug!(count = citation_keys.len(), "Getting record for each citation key");
    let mut records = RecordMapping::with_capacity(citation_keys.len());
    for (identifier, citation_key) in citation_keys {
        let record = match citation_key {
            Some(citation_key) => export_record(rpc, identifier, citation_key).await?,
            None => Record::placeholder(),
        };
        records.insert(identifier.clone(), record);
    }
    Ok(records)
}

async fn export_record(
    rpc: &dyn RpcTransport,
    identifier: &str,
    citation_key: &str,
) -> Result<Record, ResolveError> {
    let payload = match rpc
        .call(METHOD_EXPORT, json!([[citation_key], EXPORT_FORMAT]))
        .await
    {
        Ok(payload) => payload,
        Err(error) if error.is_item_failure() => {
            warn!(identifier, citation_key, error = %error, "Export failed; using placeholder");
            return Ok(Record::placeholder());
        }
        Err(error) => return Err(error.into()),
    };

    let mut items = match payload {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => {
            warn!(identifier, citation_key, payload = %other, "Export is not a list; using placeholder");
            return Ok(Record::placeholder());
        }
    };

    match items.len() {
        0 => {
            debug!(identifier, citation_key, "Did not get a record");
            Ok(Record::placeholder())
        }
        1 => {
            let item = items.remove(0);
            Ok(Record::from_json(item.clone()).unwrap_or_else(|| {
                warn!(identifier, citation_key, record = %item, "Exported record is not an object; using placeholder");
                Record::placeholder()
            }))
        }
        count => Err(ResolveError::multiple_records(identifier, citation_key, count)),
    }
}

//! Input normalization for record identifiers and field names.
//!
//! Identifiers arrive as whitespace-separated tokens in one of three forms:
//!
//! - Zotero item keys (`WCKIQ23Y`)
//! - select links (`zotero://select/library/items/WCKIQ23Y`)
//! - citation keys marked with `@` (`@smith2018`)
//!
//! # Example
//!
//! ```
//! use zoinks::parser::{parse_identifiers, IdentifierKind};
//!
//! let ids = parse_identifiers("WCKIQ23Y\nzotero://select/library/items/ABCD1234\n");
//! assert_eq!(ids.len(), 2);
//! assert_eq!(ids[1].kind, IdentifierKind::SelectLink);
//! assert_eq!(ids[1].key, "ABCD1234");
//! ```

mod error;
mod input;

pub use error::InputError;
pub use input::{CITATION_KEY_MARKER, Identifier, IdentifierKind};

use std::collections::HashSet;

use tracing::debug;

/// Splits input text on whitespace and normalizes each token.
///
/// Blank tokens are dropped and repeated identifiers are kept only at
/// their first position.
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
#[must_use]
pub fn parse_identifiers(input: &str) -> Vec<Identifier> {
    let mut seen: HashSet<&str> = HashSet::new();
    let identifiers: Vec<Identifier> = input
        .split_whitespace()
        .filter(|token| seen.insert(token))
        .filter_map(Identifier::parse)
        .collect();

    debug!(
        count = identifiers.len(),
        citation_keys = identifiers.iter().filter(|id| id.is_citation_key()).count(),
        "Parsed identifiers"
    );
    identifiers
}

/// Normalizes requested field names: trimmed, lower-cased, blanks and
/// repeats removed, order kept.
#[must_use]
pub fn normalize_fields<S: AsRef<str>>(fields: &[S]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(fields.len());
    for field in fields {
        let name = field.as_ref().trim().to_lowercase();
        if !name.is_empty() && !normalized.contains(&name) {
            normalized.push(name);
        }
    }
    normalized
}

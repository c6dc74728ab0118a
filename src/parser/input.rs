//! Types representing normalized record identifiers.

use std::fmt;

/// Leading character that marks an identifier as a Better BibTeX citation key.
pub const CITATION_KEY_MARKER: char = '@';

/// Form of identifier detected in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind {
    /// Bare Zotero item key (e.g. `WCKIQ23Y`)
    ItemKey,
    /// Deep link such as `zotero://select/library/items/WCKIQ23Y`
    SelectLink,
    /// Citation key carrying the `@` marker (e.g. `@smith2018`)
    CitationKey,
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ItemKey => write!(f, "item key"),
            Self::SelectLink => write!(f, "select link"),
            Self::CitationKey => write!(f, "citation key"),
        }
    }
}

/// A single identifier read from the input.
///
/// `raw` is the text the user supplied (whitespace trimmed) and is what
/// output is labelled with; `key` is the derived lookup value: the item key
/// for item keys and select links, the bare citation key (marker removed)
/// for citation keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    /// Original input text, trimmed
    pub raw: String,
    /// Detected identifier form
    pub kind: IdentifierKind,
    /// Derived lookup key
    pub key: String,
}

impl Identifier {
    /// Normalizes one input token. Returns `None` for blank text.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let raw = text.trim();
        if raw.is_empty() {
            return None;
        }

        if let Some(citekey) = raw.strip_prefix(CITATION_KEY_MARKER) {
            return Some(Self {
                raw: raw.to_string(),
                kind: IdentifierKind::CitationKey,
                key: citekey.trim().to_string(),
            });
        }

        if let Some(item_key) = select_link_key(raw) {
            return Some(Self {
                raw: raw.to_string(),
                kind: IdentifierKind::SelectLink,
                key: item_key,
            });
        }

        Some(Self {
            raw: raw.to_string(),
            kind: IdentifierKind::ItemKey,
            key: raw.to_string(),
        })
    }

    /// Returns true when the identifier carries the citation-key marker.
    #[must_use]
    pub fn is_citation_key(&self) -> bool {
        self.kind == IdentifierKind::CitationKey
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.key)
    }
}

/// Extracts the trailing path segment of a URI-style identifier.
fn select_link_key(raw: &str) -> Option<String> {
    if !raw.contains("://") {
        return None;
    }

    let from_url = ::url::Url::parse(raw).ok().and_then(|parsed| {
        parsed
            .path_segments()
            .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
            .map(str::to_string)
    });

    // Opaque URIs the url crate cannot segment still end in the item key.
    from_url.or_else(|| {
        raw.split("://")
            .nth(1)
            .and_then(|rest| rest.split(['?', '#']).next())
            .and_then(|path| path.rsplit('/').find(|s| !s.is_empty()))
            .map(str::to_string)
    })
}

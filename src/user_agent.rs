//! User-Agent string for requests to the Better BibTeX endpoint.

/// Project URL for User-Agent identification.
const PROJECT_UA_URL: &str = "https://github.com/mhucka/zoinks";

/// Default User-Agent for JSON-RPC requests (identifies the tool and version).
#[must_use]
pub(crate) fn default_rpc_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("zoinks/{version} (+{PROJECT_UA_URL})")
}

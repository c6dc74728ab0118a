//! Configuration lifecycle: load file config and merge it under CLI flags.

use anyhow::Result;
use tracing::debug;

use crate::app_config::{FileConfig, load_default_file_config};
use crate::cli::Args;
use zoinks::DEFAULT_ENDPOINT;

/// Level used when nothing else selects one.
const DEFAULT_LOG_LEVEL: &str = "warn";

/// Level used with `--debug`.
const DEBUG_LOG_LEVEL: &str = "debug";

/// Settings for one run after merging CLI flags, config file and defaults.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedConfig {
    pub(crate) args: Args,
    pub(crate) endpoint: String,
    pub(crate) no_gui: bool,
    pub(crate) log_level: String,
}

/// Loads the config file and applies CLI overrides.
pub(crate) fn resolve_config(args: Args) -> Result<ResolvedConfig> {
    let loaded = load_default_file_config()?;
    if let Some(path) = &loaded.path {
        debug!(path = %path.display(), loaded = loaded.config.is_some(), "Config file");
    }
    Ok(merge(args, loaded.config.as_ref()))
}

/// CLI values win over file values, which win over defaults.
pub(crate) fn merge(args: Args, file: Option<&FileConfig>) -> ResolvedConfig {
    let endpoint = args
        .endpoint
        .clone()
        .or_else(|| file.and_then(|cfg| cfg.endpoint.clone()))
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
    let no_gui = args.no_gui || file.and_then(|cfg| cfg.no_gui).unwrap_or(false);
    let log_level = if args.debugging() {
        DEBUG_LOG_LEVEL.to_string()
    } else {
        file.and_then(|cfg| cfg.log_level.clone())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
    };
    ResolvedConfig {
        args,
        endpoint,
        no_gui,
        log_level,
    }
}

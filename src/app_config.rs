//! Application configuration loading for CLI defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use thiserror::Error;

/// Levels accepted by the `log_level` key.
const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// TOML-backed file configuration for zoinks defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileConfig {
    /// Better BibTeX JSON-RPC endpoint.
    pub endpoint: Option<String>,
    /// Report errors on the terminal instead of a dialog.
    pub no_gui: Option<bool>,
    /// Default tracing level when neither `RUST_LOG` nor `--debug` is set.
    pub log_level: Option<String>,
}

impl FileConfig {
    /// Validates config values.
    pub fn validate(&self) -> Result<()> {
        if let Some(endpoint) = &self.endpoint {
            let parsed = url::Url::parse(endpoint)
                .with_context(|| format!("Invalid config value for `endpoint`: '{endpoint}'"))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                bail!(
                    "Invalid config value for `endpoint`: '{endpoint}'. Expected an http or https URL"
                );
            }
        }
        if let Some(level) = &self.log_level
            && !LOG_LEVELS.contains(&level.as_str())
        {
            bail!(
                "Invalid config value for `log_level`: '{level}'. Expected one of: {}",
                LOG_LEVELS.join(", ")
            );
        }
        Ok(())
    }
}

/// A config file that exists but cannot be used.
#[derive(Debug, Error)]
#[error("bad configuration file {}: {reason}\n  Suggestion: Fix or remove the file", .path.display())]
pub struct ConfigError {
    /// Path of the config file
    pub path: PathBuf,
    /// What was wrong, including context
    pub reason: String,
}

/// Loaded config metadata.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Resolved config path if a base directory is known.
    pub path: Option<PathBuf>,
    /// Parsed file config when a config file exists and was valid.
    pub config: Option<FileConfig>,
}

/// Resolves default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/zoinks/config.toml`
/// 2. `$HOME/.config/zoinks/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(
            PathBuf::from(xdg_config_home)
                .join("zoinks")
                .join("config.toml"),
        );
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("zoinks")
            .join("config.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads config from default path if present.
///
/// A file that exists but fails to read, parse or validate is a
/// [`ConfigError`].
pub fn load_default_file_config() -> Result<LoadedConfig> {
    let path = resolve_default_config_path();
    let Some(path_ref) = path.as_deref() else {
        return Ok(LoadedConfig { path, config: None });
    };

    if !path_ref.exists() {
        return Ok(LoadedConfig { path, config: None });
    }

    let config = load_file_config(path_ref).map_err(|err| ConfigError {
        path: path_ref.to_path_buf(),
        reason: format!("{err:#}"),
    })?;
    Ok(LoadedConfig {
        path,
        config: Some(config),
    })
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let mut cfg = FileConfig::default();
    for (line_index, raw_line) in raw.lines().enumerate() {
        let line = strip_inline_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            bail!(
                "Invalid config syntax on line {}: expected key = value",
                line_index + 1
            );
        };

        let key = raw_key.trim();
        let value = raw_value.trim();

        match key {
            "endpoint" => {
                let parsed = parse_string_literal(value).with_context(|| {
                    format!("Invalid `endpoint` value on line {}", line_index + 1)
                })?;
                cfg.endpoint = Some(parsed);
            }
            "no_gui" => {
                let parsed = parse_boolean(value).with_context(|| {
                    format!("Invalid `no_gui` value on line {}", line_index + 1)
                })?;
                cfg.no_gui = Some(parsed);
            }
            "log_level" => {
                let parsed = parse_string_literal(value).with_context(|| {
                    format!("Invalid `log_level` value on line {}", line_index + 1)
                })?;
                cfg.log_level = Some(parsed.to_ascii_lowercase());
            }
            unknown => {
                bail!(
                    "Unknown configuration key: '{}' on line {}",
                    unknown,
                    line_index + 1
                );
            }
        }
    }
    cfg.validate()?;
    Ok(cfg)
}

fn strip_inline_comment(line: &str) -> &str {
    let mut in_string = false;
    for (index, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..index],
            _ => {}
        }
    }
    line
}

fn parse_string_literal(raw_value: &str) -> Result<String> {
    if raw_value.len() < 2 || !raw_value.starts_with('"') || !raw_value.ends_with('"') {
        bail!("Expected double-quoted string");
    }
    Ok(raw_value[1..raw_value.len() - 1].to_string())
}

fn parse_boolean(raw_value: &str) -> Result<bool> {
    match raw_value.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => bail!("Expected 'true' or 'false'"),
    }
}

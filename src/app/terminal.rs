//! Terminal capabilities and tracing setup.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};

/// `--debug` value that sends the trace to the console.
pub(crate) const CONSOLE_TRACE: &str = "-";

pub(crate) fn no_color_env_requested() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty())
}

pub(crate) fn is_dumb_terminal() -> bool {
    std::env::var("TERM")
        .map(|value| value.eq_ignore_ascii_case("dumb"))
        .unwrap_or(false)
}

pub(crate) fn should_disable_color(no_color_env: bool, dumb_terminal: bool) -> bool {
    no_color_env || dumb_terminal
}

pub(crate) fn is_no_color_requested() -> bool {
    should_disable_color(no_color_env_requested(), is_dumb_terminal())
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over `default_level`. With `trace_target` set to a path
/// other than [`CONSOLE_TRACE`], the trace is written to that file instead
/// of stderr.
pub(crate) fn init_tracing(default_level: &str, trace_target: Option<&str>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    match trace_target {
        Some(target) if target != CONSOLE_TRACE => {
            let path = Path::new(target);
            let file = File::create(path)
                .with_context(|| format!("unable to write debug log '{}'", path.display()))?;
            let _ = tracing_subscriber::fmt()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_env_filter(filter)
                .try_init();
        }
        _ => {
            let _ = tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_ansi(!is_no_color_requested())
                .with_env_filter(filter)
                .try_init();
        }
    }
    Ok(())
}

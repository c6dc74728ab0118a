//! Top-level run: config, tracing, input, resolution, output.

use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing::{debug, info};
use zoinks::{
    ExitStatus, OutputMode, RpcClient, fetch_records, parse_identifiers, render_citation_keys,
    render_records, resolve_citation_keys, terminal_width,
};

use crate::app::config_manager::{self, ResolvedConfig};
use crate::app::{exit_handler, input_processor, notify, terminal};
use crate::cli::Args;

/// Runs zoinks for parsed arguments and returns the process exit status.
///
/// Failures are reported to the user here; the caller only exits.
pub(crate) async fn run_zoinks(args: Args) -> ExitStatus {
    let no_gui_flag = args.no_gui;
    let resolved = match config_manager::resolve_config(args) {
        Ok(resolved) => resolved,
        Err(err) => return report_failure(&err, no_gui_flag),
    };

    if let Err(err) = terminal::init_tracing(&resolved.log_level, resolved.args.debug.as_deref())
    {
        return report_failure(&err, resolved.no_gui);
    }
    debug!(?resolved, "Configuration resolved");

    // Read before installing the interrupt handler: the read blocks.
    let input_text = match input_processor::read_input(&resolved.args.input_source()) {
        Ok(text) => text,
        Err(err) => return report_failure(&anyhow::Error::new(err), resolved.no_gui),
    };

    tokio::select! {
        result = execute(&resolved, &input_text) => match result {
            Ok(()) => {
                debug!("done.");
                ExitStatus::Success
            }
            Err(err) => report_failure(&err, resolved.no_gui),
        },
        () = wait_for_interrupt() => {
            info!("user interrupted program -- exiting");
            ExitStatus::UserInterrupt
        }
    }
}

async fn execute(resolved: &ResolvedConfig, input_text: &str) -> Result<()> {
    let identifiers = parse_identifiers(input_text);
    let mode = OutputMode::select(&resolved.args.fields, resolved.args.list_fields);
    debug!(identifiers = identifiers.len(), ?mode, "Parsed input");

    let client = RpcClient::new(&resolved.endpoint)?;
    let width = terminal_width();

    debug!(endpoint = client.endpoint(), "Asking BBT for citation keys");
    let citation_keys = resolve_citation_keys(&client, &identifiers).await?;

    let text = if mode.needs_records() {
        let records = fetch_records(&client, &citation_keys).await?;
        debug!(records = records.len(), "Printing results");
        render_records(&records, &mode, width)
    } else {
        render_citation_keys(&citation_keys, width)
    };

    write_output(&mut io::stdout().lock(), &text).context("unable to write output")
}

/// Writes the rendered text; a closed reader (`zoinks | head`) is not a failure.
fn write_output<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    match out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {
            debug!("Output closed early");
            Ok(())
        }
        result => result,
    }
}

/// Completes on Ctrl-C; never completes if the handler cannot be installed.
async fn wait_for_interrupt() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        debug!(error = %err, "Interrupt handler unavailable");
        std::future::pending::<()>().await;
    }
}

fn report_failure(err: &anyhow::Error, no_gui: bool) -> ExitStatus {
    let status = exit_handler::exit_status_for(err);
    debug!(error = ?err, status = %status, "Run failed");
    notify::inform(&exit_handler::user_message(err, status), no_gui);
    status
}

//! CLI entry point for zoinks.

use std::process::ExitCode;

use clap::Parser;
use zoinks::ExitStatus;

mod app;
mod app_config;
mod cli;

use cli::Args;

fn main() -> ExitCode {
    // Parse CLI arguments first (before tracing, so --help works without logs).
    // Invalid arguments exit with status 2 from clap itself.
    let args = Args::parse();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            app::notify::inform(&format!("Encountered error: {err}"), true);
            return ExitCode::from(ExitStatus::Exception.code());
        }
    };

    let status = runtime.block_on(app::runtime::run_zoinks(args));
    ExitCode::from(status.code())
}

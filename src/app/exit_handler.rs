//! Exit code logic for the zoinks process.
//!
//! Single responsibility: map a failed run to the process exit status and
//! the message shown to the user.

use zoinks::ExitStatus;

use crate::app_config::ConfigError;

/// Determines the exit status for a failed run.
pub(crate) fn exit_status_for(err: &anyhow::Error) -> ExitStatus {
    if err.chain().any(|cause| cause.is::<ConfigError>()) {
        return ExitStatus::BadArgument;
    }
    ExitStatus::for_error(err)
}

/// Text shown to the user for a failed run.
///
/// Classified errors show their own message; anything else is prefixed.
pub(crate) fn user_message(err: &anyhow::Error, status: ExitStatus) -> String {
    match status {
        ExitStatus::Exception if !is_known(err) => format!("Encountered error: {err:#}"),
        _ => format!("{err:#}"),
    }
}

fn is_known(err: &anyhow::Error) -> bool {
    err.chain()
        .any(|cause| cause.is::<zoinks::ResolveError>())
}

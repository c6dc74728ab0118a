//! Process exit status classification.
//!
//! Every failure the pipeline can report maps to exactly one status here.
//! The binary carries errors as [`anyhow::Error`]; [`ExitStatus::for_error`]
//! walks the cause chain and picks the first typed error it recognizes.

use crate::parser::InputError;
use crate::resolver::ResolveError;
use crate::rpc::RpcError;

/// Process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExitStatus {
    /// Finished normally
    Success,
    /// Interrupted by the user (Ctrl-C)
    UserInterrupt,
    /// Invalid arguments or no usable input
    BadArgument,
    /// A file could not be read or written
    FileError,
    /// Zotero or Better BibTeX could not be used
    ZoteroError,
    /// Anything else
    Exception,
}

impl ExitStatus {
    /// Numeric process exit code.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::UserInterrupt => 1,
            Self::BadArgument => 2,
            Self::FileError => 3,
            Self::ZoteroError => 4,
            Self::Exception => 5,
        }
    }

    /// Short label used in debug logs.
    #[must_use]
    pub fn meaning(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::UserInterrupt => "user interrupted",
            Self::BadArgument => "bad argument",
            Self::FileError => "file error",
            Self::ZoteroError => "Zotero error",
            Self::Exception => "exception",
        }
    }

    /// Classifies an error by the first recognized cause in its chain.
    ///
    /// Unrecognized errors are [`ExitStatus::Exception`].
    #[must_use]
    pub fn for_error(error: &anyhow::Error) -> Self {
        error
            .chain()
            .find_map(classify_cause)
            .unwrap_or(Self::Exception)
    }
}

fn classify_cause(cause: &(dyn std::error::Error + 'static)) -> Option<ExitStatus> {
    if let Some(err) = cause.downcast_ref::<InputError>() {
        return Some(if err.is_file_error() {
            ExitStatus::FileError
        } else {
            ExitStatus::BadArgument
        });
    }
    if let Some(err) = cause.downcast_ref::<RpcError>() {
        return Some(classify_rpc(err));
    }
    if let Some(err) = cause.downcast_ref::<ResolveError>() {
        return Some(match err {
            ResolveError::Rpc(rpc) => classify_rpc(rpc),
            ResolveError::MultipleRecords { .. } => ExitStatus::Exception,
        });
    }
    if cause.downcast_ref::<std::io::Error>().is_some() {
        return Some(ExitStatus::FileError);
    }
    None
}

fn classify_rpc(err: &RpcError) -> ExitStatus {
    match err {
        RpcError::InvalidEndpoint { .. } => ExitStatus::BadArgument,
        RpcError::ConnectionFailure { .. }
        | RpcError::Remote { .. }
        | RpcError::InvalidResponse { .. } => ExitStatus::ZoteroError,
    }
}

impl std::fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.meaning(), self.code())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_exit_codes_are_stable() {
        let codes: Vec<u8> = [
            ExitStatus::Success,
            ExitStatus::UserInterrupt,
            ExitStatus::BadArgument,
            ExitStatus::FileError,
            ExitStatus::ZoteroError,
            ExitStatus::Exception,
        ]
        .iter()
        .map(|status| status.code())
        .collect();
        assert_eq!(codes, [0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_for_error_input_errors() {
        let err = anyhow::Error::new(InputError::no_stdin_input());
        assert_eq!(ExitStatus::for_error(&err), ExitStatus::BadArgument);

        let err = anyhow::Error::new(InputError::missing_file("/nope"));
        assert_eq!(ExitStatus::for_error(&err), ExitStatus::BadArgument);

        let err = anyhow::Error::new(InputError::unreadable_file("/x", "denied"));
        assert_eq!(ExitStatus::for_error(&err), ExitStatus::FileError);
    }

    #[test]
    fn test_for_error_rpc_errors() {
        let err = anyhow::Error::new(RpcError::connection_failure("http://x", "refused"));
        assert_eq!(ExitStatus::for_error(&err), ExitStatus::ZoteroError);

        let err = anyhow::Error::new(RpcError::invalid_endpoint("ftp://x", "bad scheme"));
        assert_eq!(ExitStatus::for_error(&err), ExitStatus::BadArgument);
    }

    #[test]
    fn test_for_error_resolve_errors() {
        let err = anyhow::Error::new(ResolveError::from(RpcError::remote("item.export", "boom")));
        assert_eq!(ExitStatus::for_error(&err), ExitStatus::ZoteroError);

        let err = anyhow::Error::new(ResolveError::multiple_records("K", "k", 2));
        assert_eq!(ExitStatus::for_error(&err), ExitStatus::Exception);
    }

    #[test]
    fn test_for_error_looks_through_context() {
        let result: Result<(), RpcError> =
            Err(RpcError::connection_failure("http://x", "refused"));
        let err = result.context("while resolving").unwrap_err();
        assert_eq!(ExitStatus::for_error(&err), ExitStatus::ZoteroError);
    }

    #[test]
    fn test_for_error_io_is_file_error() {
        let err = anyhow::Error::new(std::io::Error::other("disk full"));
        assert_eq!(ExitStatus::for_error(&err), ExitStatus::FileError);
    }

    #[test]
    fn test_for_error_unknown_is_exception() {
        let err = anyhow::anyhow!("something odd");
        assert_eq!(ExitStatus::for_error(&err), ExitStatus::Exception);
    }
}

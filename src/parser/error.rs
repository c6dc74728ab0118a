//! Error types for reading identifiers from an input source.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while collecting identifiers.
///
/// Messages follow the What/Why/Fix pattern used across the project.
#[derive(Debug, Clone, Error)]
pub enum InputError {
    /// The selected source produced no identifiers
    #[error("no input given from {source_name}\n  Suggestion: {suggestion}")]
    NoInput {
        /// Human-readable name of the source (stdin, clipboard, file path)
        source_name: String,
        /// How to fix the issue
        suggestion: String,
    },

    /// A source path was given but nothing exists there
    #[error("file does not exist: {}\n  Suggestion: Check the path given to --source", .path.display())]
    MissingFile {
        /// The path that was requested
        path: PathBuf,
    },

    /// A source file exists but could not be read
    #[error("unable to read file {}: {reason}", .path.display())]
    UnreadableFile {
        /// The path that failed to read
        path: PathBuf,
        /// Underlying I/O failure
        reason: String,
    },

    /// The platform clipboard could not be accessed
    #[error("unable to read the clipboard: {reason}")]
    Clipboard {
        /// Underlying clipboard failure
        reason: String,
    },
}

impl InputError {
    /// Creates a `NoInput` error for an empty or interactive stdin.
    #[must_use]
    pub fn no_stdin_input() -> Self {
        Self::NoInput {
            source_name: "standard input".to_string(),
            suggestion: "Pipe identifiers into zoinks or use --source FILE".to_string(),
        }
    }

    /// Creates a `NoInput` error for an empty clipboard.
    #[must_use]
    pub fn empty_clipboard() -> Self {
        Self::NoInput {
            source_name: "the clipboard".to_string(),
            suggestion: "Copy one or more Zotero identifiers first".to_string(),
        }
    }

    /// Creates a `NoInput` error for a file without identifiers.
    #[must_use]
    pub fn empty_file(path: impl Into<PathBuf>) -> Self {
        Self::NoInput {
            source_name: path.into().display().to_string(),
            suggestion: "Put one identifier per line in the file".to_string(),
        }
    }

    /// Creates a `MissingFile` error.
    #[must_use]
    pub fn missing_file(path: impl Into<PathBuf>) -> Self {
        Self::MissingFile { path: path.into() }
    }

    /// Creates an `UnreadableFile` error.
    #[must_use]
    pub fn unreadable_file(path: impl Into<PathBuf>, reason: &str) -> Self {
        Self::UnreadableFile {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Creates a `Clipboard` error.
    #[must_use]
    pub fn clipboard(reason: &str) -> Self {
        Self::Clipboard {
            reason: reason.to_string(),
        }
    }

    /// Returns true for errors caused by the file system rather than by the arguments.
    #[must_use]
    pub fn is_file_error(&self) -> bool {
        matches!(self, Self::UnreadableFile { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_no_stdin_message() {
        let msg = InputError::no_stdin_input().to_string();
        assert!(msg.contains("standard input"), "should name the source");
        assert!(msg.contains("Suggestion"), "should have suggestion");
    }

    #[test]
    fn test_input_error_missing_file_message() {
        let msg = InputError::missing_file("/tmp/nope.txt").to_string();
        assert!(msg.contains("/tmp/nope.txt"), "should contain path");
        assert!(msg.contains("does not exist"));
    }

    #[test]
    fn test_input_error_file_classification() {
        assert!(InputError::unreadable_file("/tmp/x", "permission denied").is_file_error());
        assert!(!InputError::missing_file("/tmp/x").is_file_error());
        assert!(!InputError::empty_clipboard().is_file_error());
    }
}

//! Assembly of input text from stdin, a file, or the clipboard.

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::Path;

use tracing::debug;
use zoinks::InputError;

use crate::cli::InputSource;

/// Reads the raw identifier text from the selected source.
///
/// Sources that yield only whitespace are treated as giving no input.
pub(crate) fn read_input(source: &InputSource) -> Result<String, InputError> {
    debug!(?source, "Reading identifiers");
    match source {
        InputSource::Stdin => {
            let stdin = io::stdin();
            let is_terminal = stdin.is_terminal();
            read_stdin_from(stdin.lock(), is_terminal)
        }
        InputSource::File(path) => read_file(path),
        InputSource::Clipboard => read_clipboard(),
    }
}

/// Reads identifiers piped into `reader`; an interactive terminal is no input.
pub(crate) fn read_stdin_from<R: Read>(
    mut reader: R,
    is_terminal: bool,
) -> Result<String, InputError> {
    if is_terminal {
        return Err(InputError::no_stdin_input());
    }
    let mut buffer = String::new();
    reader
        .read_to_string(&mut buffer)
        .map_err(|err| InputError::unreadable_file("standard input", &err.to_string()))?;
    non_blank(buffer, InputError::no_stdin_input)
}

pub(crate) fn read_file(path: &Path) -> Result<String, InputError> {
    if !path.exists() {
        return Err(InputError::missing_file(path));
    }
    let text = fs::read_to_string(path)
        .map_err(|err| InputError::unreadable_file(path, &err.to_string()))?;
    non_blank(text, || InputError::empty_file(path))
}

fn read_clipboard() -> Result<String, InputError> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|err| InputError::clipboard(&err.to_string()))?;
    match clipboard.get_text() {
        Ok(text) => non_blank(text, InputError::empty_clipboard),
        Err(arboard::Error::ContentNotAvailable) => Err(InputError::empty_clipboard()),
        Err(err) => Err(InputError::clipboard(&err.to_string())),
    }
}

fn non_blank(text: String, empty: impl FnOnce() -> InputError) -> Result<String, InputError> {
    if text.trim().is_empty() {
        Err(empty())
    } else {
        Ok(text)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    #[test]
    fn test_read_stdin_terminal_is_no_input() {
        let err = read_stdin_from(Cursor::new("WCKIQ23Y"), true).unwrap_err();
        assert!(matches!(err, InputError::NoInput { .. }));
    }

    #[test]
    fn test_read_stdin_piped_text() {
        let text = read_stdin_from(Cursor::new("WCKIQ23Y\n@smith2018\n"), false).unwrap();
        assert_eq!(text, "WCKIQ23Y\n@smith2018\n");
    }

    #[test]
    fn test_read_stdin_blank_is_no_input() {
        let err = read_stdin_from(Cursor::new(" \n\t\n"), false).unwrap_err();
        assert!(matches!(err, InputError::NoInput { .. }));
    }

    #[test]
    fn test_read_file_missing_path() {
        let temp = TempDir::new().unwrap();
        let err = read_file(&temp.path().join("absent.txt")).unwrap_err();
        assert!(matches!(err, InputError::MissingFile { .. }));
        assert!(!err.is_file_error());
    }

    #[test]
    fn test_read_file_contents() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("ids.txt");
        fs::write(&path, "WCKIQ23Y\n\nzotero://select/items/1_ABCD1234\n").unwrap();
        let text = read_file(&path).unwrap();
        assert!(text.contains("ABCD1234"));
    }

    #[test]
    fn test_read_file_blank_is_no_input() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("ids.txt");
        fs::write(&path, "\n\n").unwrap();
        let err = read_file(&path).unwrap_err();
        assert!(matches!(err, InputError::NoInput { .. }));
    }

    #[test]
    fn test_read_file_directory_is_file_error() {
        let temp = TempDir::new().unwrap();
        let err = read_file(temp.path()).unwrap_err();
        assert!(err.is_file_error());
    }
}

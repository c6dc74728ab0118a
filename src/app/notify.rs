//! User-facing error notification: terminal text or a macOS dialog.

use std::process::Command;

use tracing::{debug, warn};

/// Prefix for messages printed on the terminal.
pub(crate) const TERMINAL_PREFIX: &str = "‼️  ";

const DIALOG_TITLE: &str = "Zoinks error";

/// Tells the user about `message`.
///
/// Uses a dialog on macOS unless `no_gui` is set; otherwise, or if the
/// dialog cannot be shown, prints to stderr.
pub(crate) fn inform(message: &str, no_gui: bool) {
    debug!(message, "inform");
    if !no_gui && cfg!(target_os = "macos") {
        match show_dialog(message) {
            Ok(()) => return,
            Err(reason) => warn!(%reason, "Unable to show dialog; using the terminal"),
        }
    }
    eprintln!("{}", terminal_message(message));
}

pub(crate) fn terminal_message(message: &str) -> String {
    format!("{TERMINAL_PREFIX}{message}")
}

fn show_dialog(message: &str) -> Result<(), String> {
    let script = format!(
        "display dialog \"{}\" buttons {{\"OK\"}} default button \"OK\" with title \"{}\" with icon 0",
        applescript_escape(message),
        DIALOG_TITLE
    );
    let status = Command::new("osascript")
        .arg("-e")
        .arg(script)
        .status()
        .map_err(|err| err.to_string())?;
    if status.success() {
        Ok(())
    } else {
        Err(format!("osascript exited with {status}"))
    }
}

fn applescript_escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

//! CLI argument definitions using clap derive macros.

use clap::Parser;

/// Source keyword for standard input.
pub const SOURCE_STDIN: &str = "stdin";

/// Source keyword for the system clipboard.
pub const SOURCE_CLIPBOARD: &str = "clipboard";

/// Print fields of Zotero records given item keys, select links or citekeys.
///
/// Zoinks reads identifiers (Zotero item keys, `zotero://select` links, or
/// Better BibTeX citation keys prefixed with `@`) from standard input, a
/// file, or the clipboard, and prints the requested fields of each record.
/// With no field names, every field is printed. Zotero must be running with
/// the Better BibTeX extension installed.
#[derive(Parser, Debug, Clone)]
#[command(name = "zoinks")]
#[command(author, version, about)]
pub struct Args {
    /// List the field names of each record instead of their values
    #[arg(short = 'l', long)]
    pub list_fields: bool,

    /// Where to read identifiers: "stdin" (or "-"), "clipboard", or a file path
    #[arg(short = 's', long, value_name = "SRC", default_value = SOURCE_STDIN)]
    pub source: String,

    /// Print errors on the terminal instead of showing a dialog
    #[arg(short = 'U', long)]
    pub no_gui: bool,

    /// Write a debug trace to OUT ("-" for the console)
    #[arg(short = '@', long, value_name = "OUT")]
    pub debug: Option<String>,

    /// Better BibTeX JSON-RPC endpoint URL
    #[arg(short = 'e', long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Names of fields to print (case-insensitive); all fields if none
    #[arg(value_name = "FIELD")]
    pub fields: Vec<String>,
}

/// Where identifiers come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Standard input
    Stdin,
    /// The system clipboard
    Clipboard,
    /// A file with one identifier per line
    File(std::path::PathBuf),
}

impl Args {
    /// Interprets the `--source` value.
    #[must_use]
    pub fn input_source(&self) -> InputSource {
        match self.source.trim() {
            "" | "-" | SOURCE_STDIN => InputSource::Stdin,
            SOURCE_CLIPBOARD => InputSource::Clipboard,
            path => InputSource::File(std::path::PathBuf::from(path)),
        }
    }

    /// Returns true when `--debug` was given.
    #[must_use]
    pub fn debugging(&self) -> bool {
        self.debug.is_some()
    }
}

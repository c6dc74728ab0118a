//! Text rendering of resolved records.
//!
//! What gets printed depends on the requested fields ([`OutputMode`]) and
//! on how many records and fields are shown: labels are only added when
//! they are needed to tell lines apart.
//!
//! | records | fields | line format                 |
//! |---------|--------|-----------------------------|
//! | 1       | 1      | `value`                     |
//! | 1       | many   | `field: value`              |
//! | many    | 1      | `identifier: value`         |
//! | many    | many   | `identifier: field: value`  |

mod wrap;

pub use wrap::wrap;

use crate::parser::normalize_fields;
use crate::record::{FieldValue, PLACEHOLDER_FIELD, Record, is_citation_key_alias};
use crate::resolver::{CitationKeyMapping, RecordMapping};

/// Width used when the terminal size cannot be determined.
pub const FALLBACK_WIDTH: usize = 78;

/// Columns left free at the right edge of the terminal.
const RIGHT_MARGIN: usize = 2;

/// Indent of nested values in all-fields output.
const NESTED_INDENT: usize = 4;

/// Continuation indent for labelled lines.
const LABEL_INDENT: &str = "  ";

/// Returns the wrap width: terminal columns minus a margin.
///
/// `COLUMNS` wins over the detected terminal size.
#[must_use]
pub fn terminal_width() -> usize {
    let columns = std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.trim().parse::<usize>().ok())
        .or_else(|| {
            console::Term::stdout()
                .size_checked()
                .map(|(_rows, columns)| usize::from(columns))
        });
    width_from(columns)
}

/// Wrap width for a column count; unknown or too-narrow terminals fall back.
fn width_from(columns: Option<usize>) -> usize {
    match columns.map(|columns| columns.saturating_sub(RIGHT_MARGIN)) {
        Some(width) if width > 0 => width,
        _ => FALLBACK_WIDTH,
    }
}

/// What to print for each record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// Only the citation key; records need not be fetched
    CitationKeys,
    /// Names of the fields each record has
    FieldNames,
    /// Every field, pretty-printed
    AllFields,
    /// The named fields (canonical lower case)
    Fields(Vec<String>),
}

impl OutputMode {
    /// Chooses the mode for the requested field names.
    ///
    /// A lone `citationkey`/`citekey` request wins over `list_fields_only`.
    #[must_use]
    pub fn select<S: AsRef<str>>(fields: &[S], list_fields_only: bool) -> Self {
        let fields = normalize_fields(fields);
        if fields.len() == 1 && is_citation_key_alias(&fields[0]) {
            Self::CitationKeys
        } else if list_fields_only {
            Self::FieldNames
        } else if fields.is_empty() {
            Self::AllFields
        } else {
            Self::Fields(fields)
        }
    }

    /// Returns false when the output needs only citation keys.
    #[must_use]
    pub fn needs_records(&self) -> bool {
        !matches!(self, Self::CitationKeys)
    }
}

/// Accumulates wrapped output lines.
struct Writer {
    width: usize,
    text: String,
}

impl Writer {
    fn new(width: usize) -> Self {
        Self {
            width,
            text: String::new(),
        }
    }

    /// Writes `text` wrapped to the width; blank text writes an empty line.
    fn wrapped(&mut self, text: &str, indent: &str) {
        let lines = wrap(text, self.width, indent);
        if lines.is_empty() {
            self.text.push('\n');
        }
        for line in lines {
            self.text.push_str(&line);
            self.text.push('\n');
        }
    }

    /// Writes `text` as is.
    fn raw(&mut self, indent: usize, text: &str) {
        self.text.push_str(&" ".repeat(indent));
        self.text.push_str(text);
        self.text.push('\n');
    }

    fn finish(self) -> String {
        self.text
    }
}

/// Renders citation keys without fetching records.
///
/// One entry prints the bare key; several print `identifier: key` lines.
/// Identifiers without a key show `Unknown`.
#[must_use]
pub fn render_citation_keys(mapping: &CitationKeyMapping, width: usize) -> String {
    let mut out = Writer::new(width);
    if mapping.len() == 1 {
        if let Some((_, key)) = mapping.first() {
            out.wrapped(key.as_deref().unwrap_or(PLACEHOLDER_FIELD), "");
        }
        return out.finish();
    }
    for (identifier, key) in mapping {
        let key = key.as_deref().unwrap_or(PLACEHOLDER_FIELD);
        out.wrapped(&format!("{identifier}: {key}"), LABEL_INDENT);
    }
    out.finish()
}

/// Renders resolved records according to `mode`.
#[must_use]
pub fn render_records(mapping: &RecordMapping, mode: &OutputMode, width: usize) -> String {
    let mut out = Writer::new(width);
    match mode {
        OutputMode::CitationKeys => {
            let keys: CitationKeyMapping = mapping
                .iter()
                .map(|(identifier, record)| {
                    (identifier.clone(), record.citation_key().map(str::to_string))
                })
                .collect();
            return render_citation_keys(&keys, width);
        }
        OutputMode::FieldNames => write_field_names(&mut out, mapping),
        OutputMode::AllFields => {
            for record in mapping.values() {
                write_record(&mut out, record, 0);
                out.wrapped("", "");
            }
        }
        OutputMode::Fields(fields) => write_selected_fields(&mut out, mapping, fields),
    }
    out.finish()
}

fn write_field_names(out: &mut Writer, mapping: &RecordMapping) {
    if mapping.len() == 1 {
        if let Some((_, record)) = mapping.first() {
            out.wrapped(&field_name_list(record), "");
        }
        return;
    }
    for (identifier, record) in mapping {
        out.wrapped(
            &format!("{identifier}: {}", field_name_list(record)),
            LABEL_INDENT,
        );
        out.wrapped("", "");
    }
}

fn field_name_list(record: &Record) -> String {
    record.field_names().collect::<Vec<_>>().join(", ")
}

fn write_record(out: &mut Writer, record: &Record, indent: usize) {
    for (name, value) in record.iter() {
        match value {
            FieldValue::Scalar(text) => out.raw(indent, &format!("{name}: {text}")),
            FieldValue::List(items) => {
                out.raw(indent, &format!("{name}:"));
                for item in items {
                    write_list_item(out, item, indent + NESTED_INDENT);
                }
            }
            FieldValue::Record(nested) => write_record(out, nested, indent + NESTED_INDENT),
        }
    }
}

fn write_list_item(out: &mut Writer, item: &FieldValue, indent: usize) {
    match item {
        FieldValue::Scalar(text) => out.raw(indent, text),
        FieldValue::Record(record) => write_record(out, record, indent),
        FieldValue::List(items) => {
            for nested in items {
                write_list_item(out, nested, indent + NESTED_INDENT);
            }
        }
    }
}

fn write_selected_fields(out: &mut Writer, mapping: &RecordMapping, fields: &[String]) {
    let label_identifier = mapping.len() > 1;
    let label_field = fields.len() > 1;
    let indent = if label_identifier || label_field {
        LABEL_INDENT
    } else {
        ""
    };

    for (identifier, record) in mapping {
        for field in fields {
            let Some(value) = record.get(field) else {
                continue;
            };
            let mut line = String::new();
            if label_identifier {
                line.push_str(identifier);
                line.push_str(": ");
            }
            if label_field {
                line.push_str(field);
                line.push_str(": ");
            }
            line.push_str(&value.to_string());
            out.wrapped(&line, indent);
        }
    }
}

//! Greedy word wrapping for terminal output.

/// Wraps `text` into lines of at most `width` characters.
///
/// Whitespace runs collapse to single spaces. Lines after the first start
/// with `subsequent_indent`, which counts toward the width. Words longer
/// than a line are split. Blank text yields no lines.
#[must_use]
pub fn wrap(text: &str, width: usize, subsequent_indent: &str) -> Vec<String> {
    let width = width.max(1);
    let indent_len = subsequent_indent.chars().count();
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    let flush = |lines: &mut Vec<String>, current: &mut String| {
        let content = std::mem::take(current);
        if lines.is_empty() {
            lines.push(content);
        } else {
            lines.push(format!("{subsequent_indent}{content}"));
        }
    };

    for word in text.split_whitespace() {
        let mut chars: Vec<char> = word.chars().collect();
        while !chars.is_empty() {
            let room = if lines.is_empty() {
                width
            } else {
                width.saturating_sub(indent_len).max(1)
            };
            let needed = if current_len == 0 {
                chars.len()
            } else {
                current_len + 1 + chars.len()
            };

            if needed <= room {
                if current_len > 0 {
                    current.push(' ');
                }
                current.extend(chars.drain(..));
                current_len = needed;
            } else if current_len > 0 {
                flush(&mut lines, &mut current);
                current_len = 0;
            } else {
                // Word alone is wider than the line: split it.
                let rest = chars.split_off(room);
                current.extend(chars);
                flush(&mut lines, &mut current);
                chars = rest;
            }
        }
    }

    if current_len > 0 {
        flush(&mut lines, &mut current);
    }
    lines
}

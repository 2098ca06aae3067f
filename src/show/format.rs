//! The custom format renderer.
//!
//! Rendering runs in two passes. The first expands `%`-escapes against the
//! resolved tag values; the second interprets the backslash escapes `\n`,
//! `\t`, `\\` and `\"` as though the string were the body of a quoted
//! literal. A malformed second pass never aborts the run: the renderer
//! degrades to a diagnostic string instead.

use thiserror::Error;

use crate::cli::registry::tag_for_escape;
use crate::store::TagValues;

/// The expanded template contained a malformed backslash escape or a raw
/// unescaped quote.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("malformed escape sequence in format string")]
pub struct FormatDecodeError;

/// Render `template` against `values`, degrading to a diagnostic on a
/// malformed escape.
pub fn render(template: &str, values: &TagValues) -> String {
    let expanded = expand(template, values);
    match unescape(&expanded) {
        Ok(text) => text,
        Err(FormatDecodeError) => format!(
            "unable to resolve format string '{template}', make sure to \
             escape embedded quotes (\\\")"
        ),
    }
}

/// First pass: expand `%`-escapes by code point.
///
/// A trailing `%` is literal, `%%` collapses to one `%`, `%` plus a known
/// short alias substitutes that tag's value, and any other pair passes
/// through unchanged.
pub fn expand(template: &str, values: &TagValues) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars();
    while let Some(current) = chars.next() {
        if current != '%' {
            out.push(current);
            continue;
        }
        match chars.next() {
            None => out.push('%'),
            Some('%') => out.push('%'),
            Some(next) => match tag_for_escape(next) {
                Some(id) => out.push_str(values.get(id)),
                None => {
                    out.push('%');
                    out.push(next);
                }
            },
        }
    }
    out
}

/// Second pass: decode the fixed backslash escape set.
///
/// Anything else after a backslash, a trailing backslash, or a raw `"` is
/// malformed — the template grammar treats the string as a quoted-literal
/// body, so loose quotes have to be escaped.
pub fn unescape(text: &str) -> Result<String, FormatDecodeError> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(current) = chars.next() {
        match current {
            '\\' => match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('\\') => out.push('\\'),
                Some('"') => out.push('"'),
                _ => return Err(FormatDecodeError),
            },
            '"' => return Err(FormatDecodeError),
            _ => out.push(current),
        }
    }
    Ok(out)
}

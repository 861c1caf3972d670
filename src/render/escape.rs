//! Character escaping for the hand-written output formats.

use std::borrow::Cow;
use std::fmt::Write;

/// Escapes markup characters for XML text and attributes.
///
/// Control characters XML 1.0 cannot carry, even as character references,
/// are written as visible `\u{..}` text.
pub fn escape_xml(input: &str) -> Cow<'_, str> {
    if !input.chars().any(|c| matches!(c, '&' | '<' | '>' | '"' | '\'') || is_xml_forbidden(c)) {
        return Cow::Borrowed(input);
    }
    let mut out = String::with_capacity(input.len() + 16);
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if is_xml_forbidden(c) => {
                let _ = write!(out, "\\u{{{:x}}}", c as u32);
            },
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Escapes a string for embedding between JSON double quotes.
pub fn escape_json(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 8);
    for c in input.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            },
            c => out.push(c),
        }
    }
    out
}

/// Rewrites line breaks and other control characters as visible escapes,
/// so the result always fits on one line. Backslashes are doubled so an
/// escape can be told apart from literal text.
pub fn escape_line(input: &str) -> Cow<'_, str> {
    if !input.chars().any(|c| c == '\\' || c.is_control()) {
        return Cow::Borrowed(input);
    }
    let mut out = String::with_capacity(input.len() + 8);
    for c in input.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{{{:x}}}", c as u32);
            },
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Control characters other than tab, newline and carriage return, plus the
/// two noncharacters outside the XML 1.0 `Char` production.
fn is_xml_forbidden(c: char) -> bool {
    (c.is_control() && !matches!(c, '\t' | '\n' | '\r')) || matches!(c, '\u{FFFE}' | '\u{FFFF}')
}

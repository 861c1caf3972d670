use crate::render::escape::escape_line;
use crate::render::{format_timestamp, ErrorDetails};
use std::fmt::Write;

/// One labelled line per field, in a fixed order, plus an optional stack block.
pub(crate) fn plain_text(details: &ErrorDetails, labels: &[&str], timestamp_format: &str) -> String {
    let mut out = String::with_capacity(256);
    let label = labels.first().copied().unwrap_or_default();
    let message = details.message.as_deref().unwrap_or_default();

    let _ = writeln!(out, "Exception: {label}");
    let _ = writeln!(out, "Message: {}", escape_line(message));
    let _ = writeln!(out, "Timestamp: {}", format_timestamp(details.timestamp, timestamp_format));
    if let Some(id) = &details.error_id {
        let _ = writeln!(out, "Error ID: {id}");
    }
    if let Some(code) = &details.error_code {
        let _ = writeln!(out, "Error Code: {}", escape_line(code));
    }
    if let Some(category) = &details.category {
        let _ = writeln!(out, "Category: {category}");
    }
    if let Some(severity) = details.severity {
        let _ = writeln!(out, "Severity: {severity}");
    }
    if let Some(cause) = &details.cause_details {
        let cause_label = labels.get(1).copied().unwrap_or_default();
        let cause_message = cause.message.as_deref().unwrap_or_default();
        let _ = writeln!(out, "Caused by: {cause_label}: {}", escape_line(cause_message));
    }
    if let Some(frames) = &details.stack_trace {
        out.push_str("\nStack Trace:\n");
        for frame in frames {
            let _ = writeln!(out, "\tat {}", escape_line(frame));
        }
    }
    out
}

/// `[<kind>] <message> [errorId: ..] [errorCode: ..] caused by <kind>: <message>`,
/// always on a single line.
pub(crate) fn log_line(details: &ErrorDetails, labels: &[&str]) -> String {
    let mut out = String::with_capacity(128);
    let label = labels.first().copied().unwrap_or_default();
    let _ = write!(out, "[{label}] {}", escape_line(details.message.as_deref().unwrap_or_default()));
    if let Some(id) = &details.error_id {
        let _ = write!(out, " [errorId: {id}]");
    }
    if let Some(code) = &details.error_code {
        let _ = write!(out, " [errorCode: {}]", escape_line(code));
    }
    if let Some(cause) = &details.cause_details {
        let cause_label = labels.get(1).copied().unwrap_or_default();
        let cause_message = cause.message.as_deref().unwrap_or_default();
        let _ = write!(out, " caused by {cause_label}: {}", escape_line(cause_message));
    }
    if let Some(frames) = details.stack_trace.as_ref().filter(|f| !f.is_empty()) {
        let joined: Vec<_> = frames.iter().map(|f| escape_line(f)).collect();
        let _ = write!(out, " [stackTrace: {}]", joined.join(" | "));
    }
    out
}

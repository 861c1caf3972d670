use crate::render::escape::escape_xml;
use crate::render::{format_timestamp, ErrorDetails};
use serde_json::Value;
use std::fmt::Write;

/// Renders `details` under an `<exception>` root. `labels[i]` is the type
/// label of the error at depth `i` of the cause chain.
pub(crate) fn render(details: &ErrorDetails, labels: &[&str], timestamp_format: &str) -> String {
    let mut out = String::with_capacity(512);
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<exception>\n");
    write_body(&mut out, details, labels, 0, timestamp_format);
    out.push_str("</exception>");
    out
}

fn element(out: &mut String, indent: usize, name: &str, value: &str) {
    let _ = writeln!(out, "{:indent$}<{name}>{}</{name}>", "", escape_xml(value), indent = indent);
}

fn write_body(
    out: &mut String,
    details: &ErrorDetails,
    labels: &[&str],
    depth: usize,
    timestamp_format: &str,
) {
    let pad = 2 * (depth + 1);
    if let Some(label) = labels.get(depth) {
        element(out, pad, "class", label);
    }
    if let Some(id) = &details.error_id {
        element(out, pad, "errorId", id);
    }
    if let Some(code) = &details.error_code {
        element(out, pad, "errorCode", code);
    }
    if let Some(message) = &details.message {
        element(out, pad, "message", message);
    }
    if let Some(category) = &details.category {
        element(out, pad, "category", category);
    }
    if let Some(severity) = details.severity {
        element(out, pad, "severity", severity.as_str());
    }
    element(out, pad, "timestamp", &format_timestamp(details.timestamp, timestamp_format));

    if let Some(context) = &details.context {
        let _ = writeln!(out, "{:pad$}<context>", "");
        for (key, value) in &context.data {
            let text = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            let _ = writeln!(
                out,
                "{:inner$}<data key=\"{}\">{}</data>",
                "",
                escape_xml(key),
                escape_xml(&text),
                inner = pad + 2
            );
        }
        for (key, value) in &context.metadata {
            let _ = writeln!(
                out,
                "{:inner$}<metadata key=\"{}\">{}</metadata>",
                "",
                escape_xml(key),
                escape_xml(value),
                inner = pad + 2
            );
        }
        let _ = writeln!(out, "{:pad$}</context>", "");
    }

    if let Some(frames) = &details.stack_trace {
        let _ = writeln!(out, "{:pad$}<stackTrace>", "");
        for frame in frames {
            element(out, pad + 2, "frame", frame);
        }
        let _ = writeln!(out, "{:pad$}</stackTrace>", "");
    }

    if let Some(cause) = &details.cause_details {
        let _ = writeln!(out, "{:pad$}<causeDetails>", "");
        write_body(out, cause, labels, depth + 1, timestamp_format);
        let _ = writeln!(out, "{:pad$}</causeDetails>", "");
    }
}

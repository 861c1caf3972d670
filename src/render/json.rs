use crate::render::escape::escape_json;
use crate::render::ErrorDetails;
use chrono::SecondsFormat;

/// Serializes details; degrades to a minimal object instead of failing.
pub(crate) fn details_json(details: &ErrorDetails) -> String {
    serde_json::to_string(details).unwrap_or_else(|_| fallback(details))
}

pub(crate) fn fallback(details: &ErrorDetails) -> String {
    let mut fields = Vec::with_capacity(6);
    let mut push = |key: &str, value: Option<&str>| {
        if let Some(value) = value {
            fields.push(format!("\"{key}\":\"{}\"", escape_json(value)));
        }
    };
    push("errorId", details.error_id.as_deref());
    push("errorCode", details.error_code.as_deref());
    push("message", details.message.as_deref());
    push("category", details.category.as_deref());
    push("severity", details.severity.map(|s| s.as_str()));
    let timestamp = details.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true);
    push("timestamp", Some(&timestamp));
    format!("{{{}}}", fields.join(","))
}

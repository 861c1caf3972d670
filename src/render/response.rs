use crate::render::escape::escape_json;
use crate::render::ErrorDetails;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Wire-facing response envelope.
///
/// Built once per handled error and never changed afterwards; the fields are
/// read through accessors.
///
/// ```
/// use error_sdk::render::ErrorResponse;
///
/// let ok = ErrorResponse::success();
/// assert!(ok.is_success());
/// assert_eq!(ok.message(), Some("Success"));
///
/// let json: serde_json::Value = serde_json::from_str(&ok.to_json_string()).unwrap();
/// assert!(json.get("details").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    success: bool,
    timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<ErrorDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    http_status_code: Option<u16>,
}

impl ErrorResponse {
    #[inline]
    pub fn builder() -> ErrorResponseBuilder {
        ErrorResponseBuilder::default()
    }

    pub fn success() -> Self {
        Self::success_with("Success")
    }

    pub fn success_with(message: impl Into<String>) -> Self {
        Self::builder().success(true).message(message).build()
    }

    /// Failure envelope whose message is the details message.
    pub fn error(details: ErrorDetails) -> Self {
        let message = details.message.clone();
        Self { success: false, timestamp: Utc::now(), message, details: Some(details), http_status_code: None }
    }

    pub fn error_with_status(details: ErrorDetails, http_status_code: u16) -> Self {
        Self { http_status_code: Some(http_status_code), ..Self::error(details) }
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        self.success
    }

    #[inline]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    #[inline]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[inline]
    pub fn details(&self) -> Option<&ErrorDetails> {
        self.details.as_ref()
    }

    #[inline]
    pub fn http_status_code(&self) -> Option<u16> {
        self.http_status_code
    }

    #[inline]
    pub fn has_details(&self) -> bool {
        self.details.is_some()
    }

    /// Serializes the envelope. Falls back to a minimal hand-built object if
    /// serialization fails.
    pub fn to_json_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.fallback_json())
    }

    /// The envelope as a JSON object map, with the same keys as [`Self::to_json_string`].
    pub fn to_map(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => {
                let mut map = Map::new();
                map.insert("success".to_string(), Value::Bool(self.success));
                map.insert("timestamp".to_string(), Value::String(self.rfc3339()));
                if let Some(message) = &self.message {
                    map.insert("message".to_string(), Value::String(message.clone()));
                }
                if let Some(code) = self.http_status_code {
                    map.insert("httpStatusCode".to_string(), Value::from(code));
                }
                map
            },
        }
    }

    fn rfc3339(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    fn fallback_json(&self) -> String {
        let mut out = format!("{{\"success\":{},\"timestamp\":\"{}\"", self.success, self.rfc3339());
        if let Some(message) = &self.message {
            out.push_str(&format!(",\"message\":\"{}\"", escape_json(message)));
        }
        if let Some(code) = self.http_status_code {
            out.push_str(&format!(",\"httpStatusCode\":{code}"));
        }
        out.push('}');
        out
    }
}

/// Builder for [`ErrorResponse`]; `success` defaults to `false`.
#[must_use]
#[derive(Debug, Clone, Default)]
pub struct ErrorResponseBuilder {
    success: bool,
    timestamp: Option<DateTime<Utc>>,
    message: Option<String>,
    details: Option<ErrorDetails>,
    http_status_code: Option<u16>,
}

impl ErrorResponseBuilder {
    pub fn success(mut self, success: bool) -> Self {
        self.success = success;
        self
    }

    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn details(mut self, details: ErrorDetails) -> Self {
        self.details = Some(details);
        self
    }

    pub fn http_status_code(mut self, code: u16) -> Self {
        self.http_status_code = Some(code);
        self
    }

    pub fn build(self) -> ErrorResponse {
        ErrorResponse {
            success: self.success,
            timestamp: self.timestamp.unwrap_or_else(Utc::now),
            message: self.message,
            details: self.details,
            http_status_code: self.http_status_code,
        }
    }
}

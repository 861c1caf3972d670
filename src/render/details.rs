use crate::types::{ContextSnapshot, Severity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Structured description of one error, as produced by the renderer.
///
/// Absent fields are omitted from the serialized form, never emitted as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<ContextSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause_details: Option<Box<ErrorDetails>>,
}

impl ErrorDetails {
    #[inline]
    pub fn builder() -> ErrorDetailsBuilder {
        ErrorDetailsBuilder::default()
    }

    /// Causes of this error, nearest first.
    pub fn causes(&self) -> impl Iterator<Item = &ErrorDetails> {
        std::iter::successors(self.cause_details.as_deref(), |d| d.cause_details.as_deref())
    }
}

/// Builder for [`ErrorDetails`]; the timestamp defaults to the build instant.
#[must_use]
#[derive(Debug, Clone, Default)]
pub struct ErrorDetailsBuilder {
    error_id: Option<String>,
    error_code: Option<String>,
    message: Option<String>,
    category: Option<String>,
    severity: Option<Severity>,
    timestamp: Option<DateTime<Utc>>,
    context: Option<ContextSnapshot>,
    stack_trace: Option<Vec<String>>,
    cause_details: Option<Box<ErrorDetails>>,
}

impl ErrorDetailsBuilder {
    pub fn error_id(mut self, id: impl Into<String>) -> Self {
        self.error_id = Some(id.into());
        self
    }

    pub fn error_code(mut self, code: impl Into<String>) -> Self {
        self.error_code = Some(code.into());
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Sets the context; an empty snapshot is treated as absent.
    pub fn context(mut self, context: ContextSnapshot) -> Self {
        self.context = (!context.is_empty()).then_some(context);
        self
    }

    pub fn stack_trace(mut self, frames: Vec<String>) -> Self {
        self.stack_trace = Some(frames);
        self
    }

    pub fn cause_details(mut self, cause: ErrorDetails) -> Self {
        self.cause_details = Some(Box::new(cause));
        self
    }

    pub fn build(self) -> ErrorDetails {
        ErrorDetails {
            error_id: self.error_id,
            error_code: self.error_code,
            message: self.message,
            category: self.category,
            severity: self.severity,
            timestamp: self.timestamp.unwrap_or_else(Utc::now),
            context: self.context,
            stack_trace: self.stack_trace,
            cause_details: self.cause_details,
        }
    }
}

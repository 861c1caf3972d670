//! The taxonomy error type.
//!
//! [`Exception`] is a single struct holding the shared base fields (id, code,
//! message, severity, timestamp, context, cause) plus a tagged payload for the
//! concrete [`ErrorKind`]. Kind-specific constructors live in
//! [`crate::taxonomy`]; this module holds the shared contract.

use crate::http::HttpStatus;
use crate::taxonomy::system::SystemCondition;
use crate::types::{Category, ErrorId, ErrorKind, ExceptionContext, FieldErrors, Severity};
use chrono::{DateTime, Utc};
use serde_json::json;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error;
use std::fmt::{self, Display};

/// Boxed cause stored on an exception.
pub type BoxedCause = Box<dyn Error + Send + Sync + 'static>;

/// Kind-specific data carried next to the shared base fields.
#[derive(Debug)]
pub(crate) enum Payload {
    Plain(ErrorKind),
    BusinessLogic { rule: Option<String> },
    Validation(FieldErrors),
    System(SystemCondition),
    Http { kind: ErrorKind, status: HttpStatus },
}

impl Payload {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Plain(kind) | Self::Http { kind, .. } => *kind,
            Self::BusinessLogic { .. } => ErrorKind::BusinessLogic,
            Self::Validation(_) => ErrorKind::Validation,
            Self::System(_) => ErrorKind::SystemError,
        }
    }
}

/// A classified failure with identity, metadata and an optional cause.
///
/// # Examples
///
/// ```
/// use error_sdk::{Category, Exception, Severity};
///
/// let err = Exception::database("connection pool exhausted")
///     .caused_by(std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out"));
///
/// assert_eq!(err.error_code(), "DATABASE_ERROR");
/// assert_eq!(err.category(), Category::Checked);
/// assert_eq!(err.severity(), Severity::Medium);
/// assert!(err.cause().is_some());
/// ```
#[derive(Debug)]
pub struct Exception {
    id: ErrorId,
    code: String,
    message: String,
    severity: Severity,
    timestamp: DateTime<Utc>,
    context: ExceptionContext,
    cause: Option<BoxedCause>,
    payload: Payload,
    backtrace: Backtrace,
}

impl Exception {
    /// Builds an exception; an omitted code falls back to the kind default.
    pub(crate) fn compose(payload: Payload, code: Option<String>, message: String) -> Self {
        let kind = payload.kind();
        let (code, severity, context) = match &payload {
            Payload::Http { status, .. } => (
                code.unwrap_or_else(|| status.error_code()),
                http_severity(status),
                http_default_context(status),
            ),
            _ => (
                code.unwrap_or_else(|| kind.default_code()),
                kind.default_severity(),
                ExceptionContext::new(),
            ),
        };

        Self {
            id: ErrorId::new(),
            code,
            message,
            severity,
            timestamp: Utc::now(),
            context,
            cause: None,
            payload,
            backtrace: Backtrace::capture(),
        }
    }

    pub(crate) fn with_severity(mut self, severity: Severity) -> Self {
        if !matches!(self.payload, Payload::System(_)) {
            self.severity = severity;
        }
        self
    }

    pub(crate) fn payload(&self) -> &Payload {
        &self.payload
    }

    pub(crate) fn payload_mut(&mut self) -> &mut Payload {
        &mut self.payload
    }

    /// Attaches the error that led to this one.
    #[inline]
    pub fn caused_by<E>(mut self, cause: E) -> Self
    where
        E: Into<BoxedCause>,
    {
        self.cause = Some(cause.into());
        self
    }

    /// Attaches `context`; the exception owns it from now on.
    ///
    /// Entries the constructor seeded (HTTP status fields, factory fields) are
    /// kept unless `context` already defines the same key.
    pub fn with_context(mut self, context: ExceptionContext) -> Self {
        let seeded = std::mem::replace(&mut self.context, context);
        for (key, value) in seeded.all_data() {
            if !self.context.has_data(&key) {
                self.context.insert_data(key, value);
            }
        }
        for (key, value) in seeded.all_metadata() {
            if !self.context.has_metadata(&key) {
                self.context.insert_metadata(key, value);
            }
        }
        self
    }

    #[inline]
    pub fn error_id(&self) -> ErrorId {
        self.id
    }

    #[inline]
    pub fn error_code(&self) -> &str {
        &self.code
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.payload.kind()
    }

    /// Category of the kind; never varies between instances of one kind.
    #[inline]
    pub fn category(&self) -> Category {
        self.kind().category()
    }

    #[inline]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[inline]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Live context. Entries added through this reference are visible to renderers.
    #[inline]
    pub fn context(&self) -> &ExceptionContext {
        &self.context
    }

    #[inline]
    pub fn cause(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// Status carried by HTTP kinds.
    pub fn http_status(&self) -> Option<HttpStatus> {
        match &self.payload {
            Payload::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Captured stack frames, one entry per frame. Empty when capture is disabled.
    pub fn stack_frames(&self) -> Vec<String> {
        if self.backtrace.status() != BacktraceStatus::Captured {
            return Vec::new();
        }
        let rendered = self.backtrace.to_string();
        let mut frames: Vec<String> = Vec::new();
        for line in rendered.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if let Some(location) = line.strip_prefix("at ") {
                if let Some(frame) = frames.last_mut() {
                    frame.push_str(" at ");
                    frame.push_str(location);
                    continue;
                }
            }
            frames.push(strip_frame_index(line).to_string());
        }
        frames
    }
}

fn strip_frame_index(line: &str) -> &str {
    match line.split_once(": ") {
        Some((index, rest)) if index.chars().all(|c| c.is_ascii_digit()) => rest,
        _ => line,
    }
}

fn http_severity(status: &HttpStatus) -> Severity {
    if status.is_client_error() {
        Severity::Medium
    } else if status.is_server_error() {
        Severity::High
    } else {
        Severity::Low
    }
}

fn http_default_context(status: &HttpStatus) -> ExceptionContext {
    ExceptionContext::seeded(
        [
            ("statusCode", json!(status.code())),
            ("reasonPhrase", json!(status.reason_phrase())),
            ("category", json!(status.class().label())),
        ],
        [
            ("httpCategory", Category::Http.as_str().to_string()),
            ("severity", http_severity(status).as_str().to_string()),
        ],
    )
}

impl Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for Exception {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_deref().map(|cause| cause as &(dyn Error + 'static))
    }
}

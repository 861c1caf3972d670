//! Structured logging glue.
//!
//! Every log call receives its message, the error and an explicit field map;
//! there is no process-wide diagnostic context. [`TracingLogger`] forwards to
//! `tracing`, [`NoopLogger`] discards. [`ExceptionLogger`] derives the standard
//! field set from an error and never lets a misbehaving sink unwind into the
//! caller.
//!
//! # Examples
//!
//! ```
//! use error_sdk::logging::ExceptionLogger;
//! use error_sdk::Exception;
//!
//! let err = Exception::database("pool exhausted");
//! err.context().add_metadata("component", "orders").unwrap();
//!
//! let logger = ExceptionLogger::tracing();
//! let fields = logger.fields(&err);
//! assert_eq!(fields["errorCode"], "DATABASE_ERROR");
//! assert_eq!(fields["ctx_component"], "orders");
//!
//! logger.error("query failed", &err);
//! ```

use crate::traits::Describer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{self, Display};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::str::FromStr;
use std::sync::Arc;

/// Log verbosity, ordered from `Trace` to `Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[serde(alias = "WARNING")]
    Warn,
    Error,
}

impl LogLevel {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a level name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log level '{0}'")]
pub struct ParseLogLevelError(pub String);

impl FromStr for LogLevel {
    type Err = ParseLogLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TRACE" => Ok(Self::Trace),
            "DEBUG" => Ok(Self::Debug),
            "INFO" => Ok(Self::Info),
            "WARN" | "WARNING" => Ok(Self::Warn),
            "ERROR" => Ok(Self::Error),
            _ => Err(ParseLogLevelError(s.to_string())),
        }
    }
}

/// Sink for error log records.
pub trait ErrorLogger: Send + Sync {
    fn log(
        &self,
        level: LogLevel,
        message: &str,
        error: Option<&(dyn Error + 'static)>,
        fields: &BTreeMap<String, String>,
    );
}

struct FieldList<'a>(&'a BTreeMap<String, String>);

impl Display for FieldList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{key}={value:?}")?;
        }
        Ok(())
    }
}

macro_rules! emit {
    ($level:expr, $($arg:tt)+) => {
        match $level {
            LogLevel::Trace => tracing::trace!($($arg)+),
            LogLevel::Debug => tracing::debug!($($arg)+),
            LogLevel::Info => tracing::info!($($arg)+),
            LogLevel::Warn => tracing::warn!($($arg)+),
            LogLevel::Error => tracing::error!($($arg)+),
        }
    };
}

/// Forwards records to the `tracing` subscriber installed by the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl ErrorLogger for TracingLogger {
    fn log(
        &self,
        level: LogLevel,
        message: &str,
        error: Option<&(dyn Error + 'static)>,
        fields: &BTreeMap<String, String>,
    ) {
        let field = |key: &str| fields.get(key).map(String::as_str).unwrap_or_default();
        let cause = error.map(|e| e.to_string()).unwrap_or_default();
        emit!(
            level,
            error_id = field("errorId"),
            error_code = field("errorCode"),
            category = field("errorCategory"),
            severity = field("errorSeverity"),
            error = %cause,
            fields = %FieldList(fields),
            "{message}"
        );
    }
}

/// Discards every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl ErrorLogger for NoopLogger {
    fn log(&self, _: LogLevel, _: &str, _: Option<&(dyn Error + 'static)>, _: &BTreeMap<String, String>) {
    }
}

/// Builds the standard field map for an error and forwards to an [`ErrorLogger`].
#[derive(Clone)]
pub struct ExceptionLogger {
    sink: Arc<dyn ErrorLogger>,
    describer: Describer,
}

impl fmt::Debug for ExceptionLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExceptionLogger").field("describer", &self.describer).finish_non_exhaustive()
    }
}

impl Default for ExceptionLogger {
    fn default() -> Self {
        Self::tracing()
    }
}

impl ExceptionLogger {
    pub fn new(sink: Arc<dyn ErrorLogger>) -> Self {
        Self { sink, describer: Describer::default() }
    }

    #[inline]
    pub fn tracing() -> Self {
        Self::new(Arc::new(TracingLogger))
    }

    #[inline]
    pub fn noop() -> Self {
        Self::new(Arc::new(NoopLogger))
    }

    pub fn with_describer(mut self, describer: Describer) -> Self {
        self.describer = describer;
        self
    }

    /// Field map for `err`: class, message, and the taxonomy fields when known.
    ///
    /// Context metadata is exported with a `ctx_` prefix.
    pub fn fields(&self, err: &(dyn Error + 'static)) -> BTreeMap<String, String> {
        let mut fields = BTreeMap::new();
        fields.insert("exceptionClass".to_string(), self.describer.type_name(err).to_string());
        fields.insert("exceptionMessage".to_string(), err.to_string());

        if let Some(described) = self.describer.describe(err) {
            if let Some(id) = described.error_id() {
                fields.insert("errorId".to_string(), id);
            }
            if let Some(code) = described.error_code() {
                fields.insert("errorCode".to_string(), code.to_string());
            }
            if let Some(category) = described.category_name() {
                fields.insert("errorCategory".to_string(), category.to_string());
            }
            if let Some(severity) = described.severity() {
                fields.insert("errorSeverity".to_string(), severity.to_string());
            }
            if let Some(snapshot) = described.context_snapshot() {
                for (key, value) in snapshot.metadata {
                    fields.insert(format!("ctx_{key}"), value);
                }
            }
        }
        fields
    }

    pub fn log(&self, level: LogLevel, message: &str, err: &(dyn Error + 'static)) {
        self.log_with(level, message, err, BTreeMap::new());
    }

    /// Logs with `extra` fields layered over the standard ones.
    ///
    /// A panic while collecting fields (a broken `Display`, say) or inside the
    /// sink drops the record.
    pub fn log_with(
        &self,
        level: LogLevel,
        message: &str,
        err: &(dyn Error + 'static),
        extra: BTreeMap<String, String>,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            let mut fields = self.fields(err);
            fields.extend(extra);
            self.sink.log(level, message, Some(err), &fields);
        }));
    }

    pub fn trace(&self, message: &str, err: &(dyn Error + 'static)) {
        self.log(LogLevel::Trace, message, err);
    }

    pub fn debug(&self, message: &str, err: &(dyn Error + 'static)) {
        self.log(LogLevel::Debug, message, err);
    }

    pub fn info(&self, message: &str, err: &(dyn Error + 'static)) {
        self.log(LogLevel::Info, message, err);
    }

    pub fn warning(&self, message: &str, err: &(dyn Error + 'static)) {
        self.log(LogLevel::Warn, message, err);
    }

    pub fn error(&self, message: &str, err: &(dyn Error + 'static)) {
        self.log(LogLevel::Error, message, err);
    }

    /// Error-level record marked `critical=true` with a `CRITICAL: ` prefix.
    pub fn critical(&self, message: &str, err: &(dyn Error + 'static)) {
        let extra = BTreeMap::from([("critical".to_string(), "true".to_string())]);
        self.log_with(LogLevel::Error, &format!("CRITICAL: {message}"), err, extra);
    }

    /// Logs a record that is not tied to an error.
    pub fn message(&self, level: LogLevel, message: &str, fields: &BTreeMap<String, String>) {
        self.forward(level, message, None, fields);
    }

    fn forward(
        &self,
        level: LogLevel,
        message: &str,
        err: Option<&(dyn Error + 'static)>,
        fields: &BTreeMap<String, String>,
    ) {
        let sink = &self.sink;
        let _ = catch_unwind(AssertUnwindSafe(|| sink.log(level, message, err, fields)));
    }
}

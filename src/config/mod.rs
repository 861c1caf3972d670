//! Disclosure policy: how much of an error reaches the caller.
//!
//! The policy is read by the renderer (stack frames, cap on frames, timestamp
//! format), by the dispatcher's fallback paths (whether raw messages may be
//! shown, whether they are sanitized) and by the logging glue.
//!
//! # Examples
//!
//! ```
//! use error_sdk::config::DisclosurePolicy;
//! use error_sdk::logging::LogLevel;
//!
//! let policy = DisclosurePolicy::builder()
//!     .include_stack_trace(true)
//!     .max_stack_elements(None)
//!     .log_level(LogLevel::Warn)
//!     .build();
//!
//! assert!(policy.include_stack_trace);
//! assert_eq!(policy.max_stack_elements, None);
//!
//! let loaded: DisclosurePolicy = serde_json::from_str(r#"{"sanitizeMessages": false}"#).unwrap();
//! assert!(!loaded.sanitize_messages);
//! assert!(loaded.include_exception_details);
//! ```

use crate::logging::LogLevel;
use serde::{Deserialize, Serialize};

/// Default timestamp layout for the text renderers (chrono `strftime` syntax).
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DisclosurePolicy {
    pub include_stack_trace: bool,
    pub include_exception_details: bool,
    pub log_exceptions: bool,
    pub log_level: LogLevel,
    pub sanitize_messages: bool,
    /// Cap on rendered stack frames; `None` renders every frame.
    pub max_stack_elements: Option<usize>,
    /// Memoize error-kind to handler bindings in the dispatcher.
    pub enable_caching: bool,
    /// Layout for XML and plain text. JSON always uses RFC 3339.
    pub timestamp_format: String,
}

impl Default for DisclosurePolicy {
    fn default() -> Self {
        Self {
            include_stack_trace: false,
            include_exception_details: true,
            log_exceptions: true,
            log_level: LogLevel::Error,
            sanitize_messages: true,
            max_stack_elements: Some(20),
            enable_caching: true,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl DisclosurePolicy {
    #[inline]
    pub fn builder() -> DisclosurePolicyBuilder {
        DisclosurePolicyBuilder::default()
    }

    /// Everything visible, nothing redacted, verbose logging.
    #[inline]
    pub fn development() -> Self {
        Self {
            include_stack_trace: true,
            include_exception_details: true,
            sanitize_messages: false,
            log_level: LogLevel::Debug,
            ..Default::default()
        }
    }

    /// No stack frames or raw messages, redaction on.
    #[inline]
    pub fn production() -> Self {
        Self {
            include_stack_trace: false,
            include_exception_details: false,
            sanitize_messages: true,
            log_level: LogLevel::Error,
            max_stack_elements: Some(10),
            ..Default::default()
        }
    }

    /// Applies the frame cap.
    pub(crate) fn cap_frames(&self, mut frames: Vec<String>) -> Vec<String> {
        if let Some(max) = self.max_stack_elements {
            frames.truncate(max);
        }
        frames
    }
}

/// Builder for [`DisclosurePolicy`], starting from the defaults.
#[must_use]
#[derive(Debug, Clone, Default)]
pub struct DisclosurePolicyBuilder {
    policy: DisclosurePolicy,
}

impl DisclosurePolicyBuilder {
    pub fn include_stack_trace(mut self, include: bool) -> Self {
        self.policy.include_stack_trace = include;
        self
    }

    pub fn include_exception_details(mut self, include: bool) -> Self {
        self.policy.include_exception_details = include;
        self
    }

    pub fn log_exceptions(mut self, log: bool) -> Self {
        self.policy.log_exceptions = log;
        self
    }

    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.policy.log_level = level;
        self
    }

    pub fn sanitize_messages(mut self, sanitize: bool) -> Self {
        self.policy.sanitize_messages = sanitize;
        self
    }

    pub fn max_stack_elements(mut self, max: Option<usize>) -> Self {
        self.policy.max_stack_elements = max;
        self
    }

    pub fn enable_caching(mut self, enable: bool) -> Self {
        self.policy.enable_caching = enable;
        self
    }

    pub fn timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.policy.timestamp_format = format.into();
        self
    }

    pub fn build(self) -> DisclosurePolicy {
        self.policy
    }
}

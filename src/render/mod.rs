//! Rendering of errors into details, envelopes and text formats.
//!
//! [`Renderer`] accepts any `std::error::Error`. Taxonomy errors (and any type
//! registered through [`Renderer::register_describable`]) contribute their id,
//! code, category, severity and context; other errors render with those
//! fields omitted. No rendering path panics or returns an error.
//!
//! Timestamps in JSON (details, envelopes, maps) are always RFC 3339 with
//! millisecond precision so they deserialize back into [`ErrorDetails`]. XML
//! and plain text use [`DisclosurePolicy::timestamp_format`]; log lines carry
//! no timestamp since the logging backend stamps each event.
//!
//! # Examples
//!
//! ```
//! use error_sdk::render::{RenderFormat, Renderer};
//! use error_sdk::Exception;
//!
//! let renderer = Renderer::default();
//! let err = Exception::required_field("email");
//!
//! let details = renderer.to_details(&err, false);
//! assert_eq!(details.error_code.as_deref(), Some("VALIDATION_ERROR"));
//!
//! let parsed: serde_json::Value = serde_json::from_str(&renderer.to_json(&err, false)).unwrap();
//! assert_eq!(parsed["category"], "UNCHECKED");
//!
//! let line = renderer.render(&err, RenderFormat::LogLine, false);
//! assert!(line.starts_with("[ValidationException] Required field missing: email"));
//! ```

pub mod details;
pub mod escape;
mod json;
pub mod response;
mod text;
mod xml;

pub use details::{ErrorDetails, ErrorDetailsBuilder};
pub use response::{ErrorResponse, ErrorResponseBuilder};

use crate::config::DisclosurePolicy;
use crate::taxonomy::chain::CauseChain;
use crate::traits::{DescribableError, Describer};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::Write;

/// Output format for [`Renderer::render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderFormat {
    Json,
    Xml,
    PlainText,
    LogLine,
}

/// Formats `timestamp` with a chrono format string, falling back to RFC 3339
/// when the format string is invalid.
pub(crate) fn format_timestamp(timestamp: DateTime<Utc>, format: &str) -> String {
    let mut out = String::new();
    match write!(out, "{}", timestamp.format(format)) {
        Ok(()) => out,
        Err(_) => timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}

/// Converts errors into [`ErrorDetails`], [`ErrorResponse`]s and text.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    policy: DisclosurePolicy,
    describer: Describer,
}

impl Renderer {
    pub fn new(policy: DisclosurePolicy) -> Self {
        Self { policy, describer: Describer::default() }
    }

    pub fn with_describer(mut self, describer: Describer) -> Self {
        self.describer = describer;
        self
    }

    /// Lets errors of type `T` contribute their metadata.
    pub fn register_describable<T>(&mut self) -> &mut Self
    where
        T: DescribableError + 'static,
    {
        self.describer.register::<T>();
        self
    }

    #[inline]
    pub fn policy(&self) -> &DisclosurePolicy {
        &self.policy
    }

    #[inline]
    pub fn describer(&self) -> &Describer {
        &self.describer
    }

    /// Type label of `err` as used by the text renderers.
    pub fn type_name<'a>(&self, err: &'a (dyn Error + 'static)) -> &'a str {
        self.describer.type_name(err)
    }

    /// Structured details for `err` and its causes.
    ///
    /// Stack frames are attached to the outermost error only, capped at
    /// [`DisclosurePolicy::max_stack_elements`].
    pub fn to_details(&self, err: &(dyn Error + 'static), include_stack: bool) -> ErrorDetails {
        let chain: Vec<&(dyn Error + 'static)> = CauseChain::new(err).collect();
        let mut cause: Option<ErrorDetails> = None;
        for (depth, e) in chain.iter().enumerate().rev() {
            let mut details = self.describe_one(*e, include_stack && depth == 0);
            details.cause_details = cause.take().map(Box::new);
            cause = Some(details);
        }
        cause.unwrap_or_else(|| self.describe_one(err, include_stack))
    }

    fn describe_one(&self, err: &(dyn Error + 'static), include_stack: bool) -> ErrorDetails {
        let described = self.describer.describe(err);
        let message = err.to_string();
        let stack_trace = match described {
            Some(d) if include_stack => {
                let frames = self.policy.cap_frames(d.stack_frames());
                (!frames.is_empty()).then_some(frames)
            },
            _ => None,
        };

        ErrorDetails {
            error_id: described.and_then(|d| d.error_id()),
            error_code: described.and_then(|d| d.error_code().map(str::to_string)),
            message: (!message.is_empty()).then_some(message),
            category: described.and_then(|d| d.category_name().map(str::to_string)),
            severity: described.and_then(|d| d.severity()),
            timestamp: described.and_then(|d| d.timestamp()).unwrap_or_else(Utc::now),
            context: described.and_then(|d| d.context_snapshot()),
            stack_trace,
            cause_details: None,
        }
    }

    /// Failure envelope around `details`.
    pub fn to_envelope(&self, details: ErrorDetails, http_status_code: Option<u16>) -> ErrorResponse {
        match http_status_code {
            Some(code) => ErrorResponse::error_with_status(details, code),
            None => ErrorResponse::error(details),
        }
    }

    /// JSON form of [`Renderer::to_details`].
    pub fn to_json(&self, err: &(dyn Error + 'static), include_stack: bool) -> String {
        json::details_json(&self.to_details(err, include_stack))
    }

    pub fn to_xml(&self, err: &(dyn Error + 'static), include_stack: bool) -> String {
        let details = self.to_details(err, include_stack);
        xml::render(&details, &self.labels(err), &self.policy.timestamp_format)
    }

    pub fn to_plain_text(&self, err: &(dyn Error + 'static), include_stack: bool) -> String {
        let details = self.to_details(err, include_stack);
        text::plain_text(&details, &self.labels(err), &self.policy.timestamp_format)
    }

    /// Single-line form; stack frames, when included, are appended as one
    /// `[stackTrace: a | b]` segment.
    pub fn to_log_line(&self, err: &(dyn Error + 'static), include_stack: bool) -> String {
        let details = self.to_details(err, include_stack);
        text::log_line(&details, &self.labels(err))
    }

    /// Details as a JSON object map.
    pub fn to_map(&self, err: &(dyn Error + 'static), include_stack: bool) -> Map<String, Value> {
        let details = self.to_details(err, include_stack);
        match serde_json::to_value(&details) {
            Ok(Value::Object(map)) => map,
            _ => serde_json::from_str(&json::fallback(&details)).unwrap_or_default(),
        }
    }

    pub fn render(
        &self,
        err: &(dyn Error + 'static),
        format: RenderFormat,
        include_stack: bool,
    ) -> String {
        match format {
            RenderFormat::Json => self.to_json(err, include_stack),
            RenderFormat::Xml => self.to_xml(err, include_stack),
            RenderFormat::PlainText => self.to_plain_text(err, include_stack),
            RenderFormat::LogLine => self.to_log_line(err, include_stack),
        }
    }

    fn labels<'a>(&self, err: &'a (dyn Error + 'static)) -> Vec<&'a str> {
        CauseChain::new(err).map(|e| self.describer.type_name(e)).collect()
    }
}

//! Pattern-based redaction of messages before they leave the process.
//!
//! Sanitizing is never applied by constructors; the dispatcher and handlers
//! call it when [`DisclosurePolicy::sanitize_messages`](crate::config::DisclosurePolicy)
//! is set.
//!
//! ```
//! use error_sdk::sanitize::{MessageSanitizer, PatternSanitizer};
//!
//! let clean = PatternSanitizer.sanitize(
//!     "GET https://api.internal/v1 failed for ops@example.com, token=abc123",
//! );
//! assert_eq!(clean, "GET [REDACTED_URL] failed for [REDACTED_EMAIL], token=[REDACTED]");
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

/// Redacts sensitive substrings from free text.
pub trait MessageSanitizer: Send + Sync {
    fn sanitize(&self, text: &str) -> String;
}

/// Applied in order; URLs go first so their paths are not redacted piecemeal.
static RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"https?://[^\s]+", "[REDACTED_URL]"),
        (r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}", "[REDACTED_EMAIL]"),
        (r"(?i)\b(password|token|secret|key)\s*[:=]\s*[^\s,;]+", "${1}=[REDACTED]"),
        (r"[A-Za-z]:\\[^\s]+", "[REDACTED_PATH]"),
        (r"/[^\s/]+(?:/[^\s]*)+", "[REDACTED_PATH]"),
    ]
    .into_iter()
    .filter_map(|(pattern, replacement)| Regex::new(pattern).ok().map(|re| (re, replacement)))
    .collect()
});

/// Default sanitizer redacting URLs, emails, secret assignments and file paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternSanitizer;

impl MessageSanitizer for PatternSanitizer {
    fn sanitize(&self, text: &str) -> String {
        RULES.iter().fold(text.to_string(), |acc, (re, replacement)| {
            re.replace_all(&acc, *replacement).into_owned()
        })
    }
}

/// Sanitizer that returns its input unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl MessageSanitizer for Passthrough {
    fn sanitize(&self, text: &str) -> String {
        text.to_string()
    }
}

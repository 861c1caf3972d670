use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use uuid::Uuid;

/// Wire name used for errors that no handler recognised.
pub const UNKNOWN_CATEGORY: &str = "UNKNOWN";

/// Wire name used when the handling machinery itself failed.
pub const SYSTEM_CATEGORY: &str = "SYSTEM";

/// Fixed classification of an error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "CHECKED")]
    Checked,
    #[serde(rename = "UNCHECKED")]
    Unchecked,
    #[serde(rename = "ERROR")]
    SystemError,
    #[serde(rename = "HTTP")]
    Http,
}

impl Category {
    /// Returns the wire name of the category.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Checked => "CHECKED",
            Self::Unchecked => "UNCHECKED",
            Self::SystemError => "ERROR",
            Self::Http => "HTTP",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Qualitative urgency, ordered from `Low` to `Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Concrete kind of a taxonomy error.
///
/// The kind fixes the [`Category`] and the default [`Severity`]; it is also the
/// key the dispatcher memoizes handler lookups against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    Checked,
    Database,
    IoOperation,
    Unchecked,
    BusinessLogic,
    Validation,
    SystemError,
    Http,
    ClientError,
    ServerError,
}

impl ErrorKind {
    /// Every kind, in declaration order.
    pub const ALL: [ErrorKind; 10] = [
        Self::Checked,
        Self::Database,
        Self::IoOperation,
        Self::Unchecked,
        Self::BusinessLogic,
        Self::Validation,
        Self::SystemError,
        Self::Http,
        Self::ClientError,
        Self::ServerError,
    ];

    /// Human-facing type name, used by the text and log renderers.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Checked => "CheckedException",
            Self::Database => "DatabaseException",
            Self::IoOperation => "IOOperationException",
            Self::Unchecked => "UncheckedException",
            Self::BusinessLogic => "BusinessLogicException",
            Self::Validation => "ValidationException",
            Self::SystemError => "SystemErrorException",
            Self::Http => "HttpException",
            Self::ClientError => "ClientErrorException",
            Self::ServerError => "ServerErrorException",
        }
    }

    pub const fn category(&self) -> Category {
        match self {
            Self::Checked | Self::Database | Self::IoOperation => Category::Checked,
            Self::Unchecked | Self::BusinessLogic | Self::Validation => Category::Unchecked,
            Self::SystemError => Category::SystemError,
            Self::Http | Self::ClientError | Self::ServerError => Category::Http,
        }
    }

    /// Default severity of the kind. HTTP kinds refine this from their status.
    pub const fn default_severity(&self) -> Severity {
        match self {
            Self::Checked | Self::Database | Self::IoOperation | Self::Validation => {
                Severity::Medium
            },
            Self::Unchecked | Self::BusinessLogic => Severity::High,
            Self::SystemError => Severity::Critical,
            Self::Http | Self::ClientError | Self::ServerError => Severity::Low,
        }
    }

    /// Code used when the caller does not supply one.
    ///
    /// HTTP kinds derive their code from the status instead; see
    /// [`HttpStatus::error_code`](crate::http::HttpStatus::error_code).
    pub fn default_code(&self) -> String {
        derive_error_code(self.name())
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Derives a machine error code from a type name.
///
/// A trailing `Exception` is dropped, camel case becomes upper snake case and
/// the result always ends in `_ERROR`.
///
/// ```
/// use error_sdk::derive_error_code;
///
/// assert_eq!(derive_error_code("BusinessLogicException"), "BUSINESS_LOGIC_ERROR");
/// assert_eq!(derive_error_code("IOOperationException"), "IO_OPERATION_ERROR");
/// assert_eq!(derive_error_code("SystemErrorException"), "SYSTEM_ERROR");
/// ```
pub fn derive_error_code(type_name: &str) -> String {
    let stem = type_name.strip_suffix("Exception").unwrap_or(type_name);
    let chars: Vec<char> = stem.chars().collect();
    let mut code = String::with_capacity(stem.len() + 8);

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|c| c.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                code.push('_');
            }
        }
        if ch.is_alphanumeric() {
            code.extend(ch.to_uppercase());
        } else if !code.ends_with('_') {
            code.push('_');
        }
    }

    if code.is_empty() {
        return "ERROR".to_string();
    }
    if code != "ERROR" && !code.ends_with("_ERROR") {
        code.push_str("_ERROR");
    }
    code
}

/// Opaque correlation token assigned once when an error is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorId(Uuid);

impl ErrorId {
    /// Generates a fresh random id.
    #[inline]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    #[inline]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ErrorId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for ErrorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0.hyphenated(), f)
    }
}

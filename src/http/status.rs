use crate::error::{InvalidArgument, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Display};

/// Response class of an HTTP status, derived from its hundreds digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusClass {
    Informational,
    Success,
    Redirection,
    ClientError,
    ServerError,
}

impl StatusClass {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Informational => "Informational",
            Self::Success => "Success",
            Self::Redirection => "Redirection",
            Self::ClientError => "Client Error",
            Self::ServerError => "Server Error",
        }
    }

    const fn of(code: u16) -> Self {
        match code / 100 {
            1 => Self::Informational,
            2 => Self::Success,
            3 => Self::Redirection,
            4 => Self::ClientError,
            _ => Self::ServerError,
        }
    }
}

impl Display for StatusClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Entry of the static status catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HttpStatus {
    code: u16,
    reason: &'static str,
}

macro_rules! statuses {
    ($($name:ident = $code:literal, $reason:literal;)*) => {
        impl HttpStatus {
            $(pub const $name: HttpStatus = HttpStatus { code: $code, reason: $reason };)*
        }

        /// Catalog sorted by code.
        static CATALOG: &[HttpStatus] = &[$(HttpStatus::$name),*];
    };
}

statuses! {
    CONTINUE = 100, "Continue";
    SWITCHING_PROTOCOLS = 101, "Switching Protocols";
    PROCESSING = 102, "Processing";
    OK = 200, "OK";
    CREATED = 201, "Created";
    ACCEPTED = 202, "Accepted";
    NON_AUTHORITATIVE_INFORMATION = 203, "Non-Authoritative Information";
    NO_CONTENT = 204, "No Content";
    RESET_CONTENT = 205, "Reset Content";
    PARTIAL_CONTENT = 206, "Partial Content";
    MULTIPLE_CHOICES = 300, "Multiple Choices";
    MOVED_PERMANENTLY = 301, "Moved Permanently";
    FOUND = 302, "Found";
    SEE_OTHER = 303, "See Other";
    NOT_MODIFIED = 304, "Not Modified";
    USE_PROXY = 305, "Use Proxy";
    TEMPORARY_REDIRECT = 307, "Temporary Redirect";
    PERMANENT_REDIRECT = 308, "Permanent Redirect";
    BAD_REQUEST = 400, "Bad Request";
    UNAUTHORIZED = 401, "Unauthorized";
    PAYMENT_REQUIRED = 402, "Payment Required";
    FORBIDDEN = 403, "Forbidden";
    NOT_FOUND = 404, "Not Found";
    METHOD_NOT_ALLOWED = 405, "Method Not Allowed";
    NOT_ACCEPTABLE = 406, "Not Acceptable";
    PROXY_AUTHENTICATION_REQUIRED = 407, "Proxy Authentication Required";
    REQUEST_TIMEOUT = 408, "Request Timeout";
    CONFLICT = 409, "Conflict";
    GONE = 410, "Gone";
    LENGTH_REQUIRED = 411, "Length Required";
    PRECONDITION_FAILED = 412, "Precondition Failed";
    PAYLOAD_TOO_LARGE = 413, "Payload Too Large";
    URI_TOO_LONG = 414, "URI Too Long";
    UNSUPPORTED_MEDIA_TYPE = 415, "Unsupported Media Type";
    RANGE_NOT_SATISFIABLE = 416, "Range Not Satisfiable";
    EXPECTATION_FAILED = 417, "Expectation Failed";
    IM_A_TEAPOT = 418, "I'm a teapot";
    UNPROCESSABLE_ENTITY = 422, "Unprocessable Entity";
    LOCKED = 423, "Locked";
    FAILED_DEPENDENCY = 424, "Failed Dependency";
    TOO_EARLY = 425, "Too Early";
    UPGRADE_REQUIRED = 426, "Upgrade Required";
    PRECONDITION_REQUIRED = 428, "Precondition Required";
    TOO_MANY_REQUESTS = 429, "Too Many Requests";
    REQUEST_HEADER_FIELDS_TOO_LARGE = 431, "Request Header Fields Too Large";
    UNAVAILABLE_FOR_LEGAL_REASONS = 451, "Unavailable For Legal Reasons";
    INTERNAL_SERVER_ERROR = 500, "Internal Server Error";
    NOT_IMPLEMENTED = 501, "Not Implemented";
    BAD_GATEWAY = 502, "Bad Gateway";
    SERVICE_UNAVAILABLE = 503, "Service Unavailable";
    GATEWAY_TIMEOUT = 504, "Gateway Timeout";
    HTTP_VERSION_NOT_SUPPORTED = 505, "HTTP Version Not Supported";
    VARIANT_ALSO_NEGOTIATES = 506, "Variant Also Negotiates";
    INSUFFICIENT_STORAGE = 507, "Insufficient Storage";
    LOOP_DETECTED = 508, "Loop Detected";
    NOT_EXTENDED = 510, "Not Extended";
    NETWORK_AUTHENTICATION_REQUIRED = 511, "Network Authentication Required";
}

impl HttpStatus {
    /// Looks up a catalog entry.
    pub fn lookup(code: u16) -> Option<HttpStatus> {
        CATALOG.binary_search_by_key(&code, |s| s.code).ok().map(|i| CATALOG[i])
    }

    /// Looks up a catalog entry, failing for codes the catalog does not know.
    pub fn from_code(code: u16) -> Result<HttpStatus> {
        Self::lookup(code).ok_or(InvalidArgument::UnknownStatus(code))
    }

    /// Every catalog entry, sorted by code.
    pub fn all() -> &'static [HttpStatus] {
        CATALOG
    }

    #[inline]
    pub const fn code(&self) -> u16 {
        self.code
    }

    #[inline]
    pub const fn reason_phrase(&self) -> &'static str {
        self.reason
    }

    #[inline]
    pub const fn class(&self) -> StatusClass {
        StatusClass::of(self.code)
    }

    pub const fn is_informational(&self) -> bool {
        matches!(self.class(), StatusClass::Informational)
    }

    pub const fn is_success(&self) -> bool {
        matches!(self.class(), StatusClass::Success)
    }

    pub const fn is_redirection(&self) -> bool {
        matches!(self.class(), StatusClass::Redirection)
    }

    pub const fn is_client_error(&self) -> bool {
        matches!(self.class(), StatusClass::ClientError)
    }

    pub const fn is_server_error(&self) -> bool {
        matches!(self.class(), StatusClass::ServerError)
    }

    pub const fn is_error(&self) -> bool {
        self.is_client_error() || self.is_server_error()
    }

    /// Error code for exceptions carrying this status, e.g. `HTTP_404_NOT_FOUND`.
    pub fn error_code(&self) -> String {
        let reason: Vec<String> =
            self.reason.split_whitespace().map(|word| word.to_uppercase()).collect();
        format!("HTTP_{}_{}", self.code, reason.join("_"))
    }
}

impl Display for HttpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.reason)
    }
}

impl TryFrom<u16> for HttpStatus {
    type Error = InvalidArgument;

    fn try_from(code: u16) -> Result<Self> {
        Self::from_code(code)
    }
}

impl Serialize for HttpStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.code)
    }
}

impl<'de> Deserialize<'de> for HttpStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let code = u16::deserialize(deserializer)?;
        Self::from_code(code).map_err(serde::de::Error::custom)
    }
}

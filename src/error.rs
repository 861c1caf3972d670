//! Precondition failures raised at construction time.
//!
//! These are the only errors this crate returns to callers. Dispatch and
//! rendering never fail; they degrade into fallback responses instead.

use crate::types::ErrorKind;
use thiserror::Error;

/// Result alias for fallible constructors.
pub type Result<T> = std::result::Result<T, InvalidArgument>;

/// A taxonomy API was called with an argument that violates its contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidArgument {
    /// A context key was empty.
    #[error("{namespace} key cannot be empty")]
    EmptyKey {
        /// Either `data` or `metadata`.
        namespace: &'static str,
    },

    /// A client-error exception was built from a non-4xx status.
    #[error("Status code {0} is not a client error (4xx)")]
    NotClientError(u16),

    /// A server-error exception was built from a non-5xx status.
    #[error("Status code {0} is not a server error (5xx)")]
    NotServerError(u16),

    /// The status code is not in the catalog.
    #[error("Unknown HTTP status code: {0}")]
    UnknownStatus(u16),

    /// A field error was added to an exception that is not a validation error.
    #[error("{0} does not accumulate field errors")]
    NotValidation(ErrorKind),
}

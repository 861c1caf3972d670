//! # error-sdk
//!
//! Typed error taxonomy, prioritized handler dispatch and standardized error
//! responses.
//!
//! Every taxonomy error is an [`Exception`] with a stable identity (id, code,
//! category, severity, timestamp), a free-form [`ExceptionContext`] and an
//! optional cause. A [`Dispatcher`](handlers::Dispatcher) routes errors, taxonomy
//! or foreign, to the first matching handler and always produces a
//! well-formed [`ErrorResponse`](render::ErrorResponse).
//!
//! # Examples
//!
//! ## Classifying and annotating
//!
//! ```
//! use error_sdk::{Category, Exception, ExceptionContext, Severity};
//!
//! let ctx = ExceptionContext::builder()
//!     .data("orderId", 42)
//!     .metadata("component", "checkout")
//!     .build()
//!     .unwrap();
//!
//! let err = Exception::database("pool exhausted").with_context(ctx);
//! assert_eq!(err.category(), Category::Checked);
//! assert_eq!(err.severity(), Severity::Medium);
//! assert_eq!(err.error_code(), "DATABASE_ERROR");
//! ```
//!
//! ## Dispatching
//!
//! ```
//! use error_sdk::config::DisclosurePolicy;
//! use error_sdk::handlers::Dispatcher;
//! use error_sdk::Exception;
//!
//! let dispatcher = Dispatcher::new(DisclosurePolicy::default());
//!
//! let response = dispatcher.dispatch(&Exception::not_found("no such order"));
//! assert_eq!(response.http_status_code(), Some(404));
//!
//! let foreign = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
//! let response = dispatcher.dispatch(&foreign);
//! assert_eq!(response.details().unwrap().error_code.as_deref(), Some("UNHANDLED_EXCEPTION"));
//! ```
//!
//! ## Validation errors
//!
//! ```
//! use error_sdk::{Exception, FieldError};
//!
//! let err = Exception::validation_from_errors([
//!     FieldError::new("email", "must not be blank", ""),
//!     FieldError::new("age", "must be positive", -3),
//! ]);
//! assert!(err.has_errors_for_field("age"));
//! assert_eq!(err.field_errors().len(), 2);
//! ```

/// Disclosure policy consumed by rendering, dispatch and logging
pub mod config;
/// Construction-time precondition errors
pub mod error;
/// Handler trait, built-in handlers and the dispatcher
pub mod handlers;
/// Static HTTP status catalog
pub mod http;
/// Structured logging glue over `tracing`
pub mod logging;
/// The `exception_context!` macro
pub mod macros;
/// Convenience re-exports for quick starts
pub mod prelude;
/// Details, envelopes and text renderings
pub mod render;
/// Redaction of sensitive substrings
pub mod sanitize;
/// Kind-specific constructors and cause-chain traversal
pub mod taxonomy;
/// Optional metadata capability for foreign error types
pub mod traits;
/// Core exception, classification and context types
pub mod types;
/// Small queries over arbitrary errors
pub mod utils;

pub use error::{InvalidArgument, Result};
pub use traits::DescribableError;
pub use types::{
    derive_error_code, BoxedCause, Category, ContextBuilder, ContextSnapshot, ErrorId, ErrorKind,
    ErrorVec, Exception, ExceptionContext, FieldError, FieldErrors, Severity,
};

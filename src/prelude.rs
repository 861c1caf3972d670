//! Convenience re-exports for common usage patterns.
//!
//! ```
//! use error_sdk::prelude::*;
//!
//! let dispatcher = Dispatcher::new(DisclosurePolicy::production());
//! let response = dispatcher.dispatch(&Exception::required_field("email"));
//! assert!(!response.is_success());
//! assert_eq!(response.details().and_then(|d| d.severity), Some(Severity::Medium));
//! ```

// Macros
pub use crate::exception_context;

// Core types
pub use crate::types::{Category, ErrorKind, Exception, ExceptionContext, FieldError, Severity};

// Dispatch and rendering
pub use crate::config::DisclosurePolicy;
pub use crate::handlers::{Dispatcher, ExceptionHandler, FnHandler, HandlerError, HandlerTools};
pub use crate::render::{ErrorDetails, ErrorResponse, RenderFormat, Renderer};

// Traits
pub use crate::traits::DescribableError;

pub use crate::error::{InvalidArgument, Result};

//! Core data model: classification, context and the taxonomy error type.
//!
//! # Examples
//!
//! ```
//! use error_sdk::{Category, Exception, ExceptionContext};
//!
//! let ctx = ExceptionContext::new();
//! ctx.add_data("orderId", "A-17").unwrap();
//!
//! let err = Exception::business_rule("ORDER_LIMIT", "too many open orders").with_context(ctx);
//!
//! assert_eq!(err.category(), Category::Unchecked);
//! assert_eq!(err.context().get_typed::<String>("orderId").as_deref(), Some("A-17"));
//! ```
use smallvec::SmallVec;

pub mod accumulator;
pub mod classification;
pub mod context;
pub mod exception;

pub use accumulator::{FieldError, FieldErrors};
pub use classification::*;
pub use context::{ContextBuilder, ContextSnapshot, ExceptionContext};
pub use exception::{BoxedCause, Exception};

/// SmallVec-backed collection used for accumulating field errors.
///
/// Uses inline storage for up to 2 elements; most validation failures name
/// one or two fields.
pub type ErrorVec<E> = SmallVec<[E; 2]>;

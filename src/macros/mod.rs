//! Literal construction of an [`ExceptionContext`](crate::types::ExceptionContext).
//!
//! [`macro@crate::exception_context`] expands to a [`ContextBuilder`](crate::types::ContextBuilder)
//! chain, so empty keys are reported through the returned `Result` exactly as
//! with the builder.
//!
//! ```
//! use error_sdk::{exception_context, Exception};
//!
//! let ctx = exception_context!(
//!     "orderId" => 42, "sku" => "A-1";
//!     metadata "component" => "billing"
//! )
//! .unwrap();
//!
//! let err = Exception::business_rule("ORDER_LIMIT", "too many items").with_context(ctx);
//! assert_eq!(err.context().get_typed::<u32>("orderId"), Some(42));
//! assert_eq!(err.context().metadata("component").as_deref(), Some("billing"));
//! ```

/// Builds an `ExceptionContext` from `key => value` pairs.
///
/// Data entries come first; metadata entries follow a `; metadata` marker.
/// Data values may be anything convertible into `serde_json::Value`; metadata
/// values must convert into `String`.
///
/// # Examples
///
/// ```
/// use error_sdk::{exception_context, InvalidArgument};
///
/// let empty = exception_context!().unwrap();
/// assert!(empty.is_empty());
///
/// let data_only = exception_context!("retries" => 3).unwrap();
/// assert!(data_only.has_data("retries"));
///
/// let meta_only = exception_context!(; metadata "region" => "eu-west-1").unwrap();
/// assert!(meta_only.has_metadata("region"));
///
/// assert!(matches!(
///     exception_context!("" => 1),
///     Err(InvalidArgument::EmptyKey { .. })
/// ));
/// ```
#[macro_export]
macro_rules! exception_context {
    () => {
        $crate::types::ExceptionContext::builder().build()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::types::ExceptionContext::builder()
            $(.data($key, $value))+
            .build()
    };
    ($($key:expr => $value:expr),* ; metadata $($meta_key:expr => $meta_value:expr),+ $(,)?) => {
        $crate::types::ExceptionContext::builder()
            $(.data($key, $value))*
            $(.metadata($meta_key, $meta_value))+
            .build()
    };
}

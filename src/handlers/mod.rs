//! Prioritized handler chain.
//!
//! An [`ExceptionHandler`] pairs a predicate with a transform from an error
//! into an [`ErrorResponse`]. The [`Dispatcher`] keeps handlers ordered by
//! ascending [`priority`](ExceptionHandler::priority) and hands each error to
//! the first one whose predicate accepts it.
//!
//! | Priority | Handler | Accepts |
//! |---------:|---------|---------|
//! | 10 | [`SystemErrorHandler`] | `Category::SystemError` |
//! | 15 | [`HttpErrorHandler`] | `Category::Http` |
//! | 20 | [`CheckedErrorHandler`] | `Category::Checked` |
//! | 30 | [`UncheckedErrorHandler`] | `Category::Unchecked` |
//!
//! # Examples
//!
//! ```
//! use error_sdk::handlers::{Dispatcher, FnHandler};
//! use error_sdk::render::ErrorResponse;
//! use error_sdk::config::DisclosurePolicy;
//! use std::sync::Arc;
//!
//! let dispatcher = Dispatcher::new(DisclosurePolicy::default());
//! dispatcher.register(Arc::new(
//!     FnHandler::new("io", |err| err.is::<std::io::Error>(), |err, tools| {
//!         Ok(ErrorResponse::error(tools.details(err)))
//!     })
//!     .with_priority(50),
//! ));
//!
//! let io = std::io::Error::new(std::io::ErrorKind::Other, "broken pipe");
//! let response = dispatcher.dispatch(&io);
//! assert_eq!(response.message(), Some("broken pipe"));
//! ```

mod builtin;
mod dispatcher;
mod fn_handler;

pub use builtin::{CheckedErrorHandler, HttpErrorHandler, SystemErrorHandler, UncheckedErrorHandler};
pub use dispatcher::{Dispatcher, EXCEPTION_HANDLING_ERROR, UNHANDLED_EXCEPTION};
pub use fn_handler::FnHandler;

use crate::config::DisclosurePolicy;
use crate::logging::{ExceptionLogger, LogLevel};
use crate::render::{ErrorDetails, ErrorResponse, Renderer};
use crate::sanitize::MessageSanitizer;
use std::error::Error;

/// Priority given to handlers that do not choose one.
pub const DEFAULT_PRIORITY: i32 = 100;

/// Why a handler could not produce a response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HandlerError {
    /// The handler was handed an error shape it does not understand.
    #[error("handler does not support {0}")]
    Unsupported(String),
    #[error("handler failed: {0}")]
    Failed(String),
    #[error("handler panicked: {0}")]
    Panicked(String),
}

/// Recognizes one shape of error and turns it into a response envelope.
pub trait ExceptionHandler: Send + Sync {
    fn can_handle(&self, err: &(dyn Error + 'static)) -> bool;

    fn handle(
        &self,
        err: &(dyn Error + 'static),
        tools: &HandlerTools<'_>,
    ) -> Result<ErrorResponse, HandlerError>;

    /// Lower values are consulted first.
    fn priority(&self) -> i32 {
        DEFAULT_PRIORITY
    }

    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Rendering, logging and redaction shared with handlers by the dispatcher.
///
/// Every helper honors the dispatcher's [`DisclosurePolicy`].
pub struct HandlerTools<'a> {
    renderer: &'a Renderer,
    logger: &'a ExceptionLogger,
    sanitizer: &'a dyn MessageSanitizer,
}

impl<'a> HandlerTools<'a> {
    pub fn new(
        renderer: &'a Renderer,
        logger: &'a ExceptionLogger,
        sanitizer: &'a dyn MessageSanitizer,
    ) -> Self {
        Self { renderer, logger, sanitizer }
    }

    #[inline]
    pub fn renderer(&self) -> &'a Renderer {
        self.renderer
    }

    #[inline]
    pub fn logger(&self) -> &'a ExceptionLogger {
        self.logger
    }

    #[inline]
    pub fn policy(&self) -> &'a DisclosurePolicy {
        self.renderer.policy()
    }

    /// Details for `err` with stack frames and redaction applied per policy.
    pub fn details(&self, err: &(dyn Error + 'static)) -> ErrorDetails {
        let mut details = self.renderer.to_details(err, self.policy().include_stack_trace);
        if self.policy().sanitize_messages {
            let mut current = Some(&mut details);
            while let Some(d) = current {
                if let Some(message) = d.message.as_mut() {
                    *message = self.sanitizer.sanitize(message);
                }
                current = d.cause_details.as_deref_mut();
            }
        }
        details
    }

    /// Redacts `text` when the policy asks for it.
    pub fn sanitize(&self, text: &str) -> String {
        if self.policy().sanitize_messages {
            self.sanitizer.sanitize(text)
        } else {
            text.to_string()
        }
    }

    /// Logs `message` for `err` unless the policy disables error logging.
    pub fn log(&self, level: LogLevel, message: &str, err: &(dyn Error + 'static)) {
        if self.policy().log_exceptions {
            self.logger.log(level, message, err);
        }
    }

    pub fn log_critical(&self, message: &str, err: &(dyn Error + 'static)) {
        if self.policy().log_exceptions {
            self.logger.critical(message, err);
        }
    }
}

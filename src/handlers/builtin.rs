use crate::handlers::{ExceptionHandler, HandlerError, HandlerTools};
use crate::logging::LogLevel;
use crate::render::ErrorResponse;
use crate::taxonomy::SystemCondition;
use crate::types::{Category, Exception};
use std::error::Error;

fn category_of(err: &(dyn Error + 'static)) -> Option<Category> {
    err.downcast_ref::<Exception>().map(Exception::category)
}

fn expect_exception<'e>(
    err: &'e (dyn Error + 'static),
    handler: &str,
) -> Result<&'e Exception, HandlerError> {
    err.downcast_ref::<Exception>()
        .ok_or_else(|| HandlerError::Unsupported(format!("non-taxonomy error in {handler}")))
}

/// Intercepts system errors before anything else.
///
/// Memory and stack conditions are reported with a generic message so that
/// allocation sizes and call sites stay out of the response.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemErrorHandler;

impl SystemErrorHandler {
    pub const PRIORITY: i32 = 10;
    pub const SUPPORT_NOTICE: &'static str =
        "A critical system error has occurred. Please contact support.";
}

impl ExceptionHandler for SystemErrorHandler {
    fn can_handle(&self, err: &(dyn Error + 'static)) -> bool {
        category_of(err) == Some(Category::SystemError)
    }

    fn handle(
        &self,
        err: &(dyn Error + 'static),
        tools: &HandlerTools<'_>,
    ) -> Result<ErrorResponse, HandlerError> {
        let exception = expect_exception(err, self.name())?;
        tools.log_critical("Critical system error occurred", err);

        let mut details = tools.details(err);
        let generic = match exception.system_condition() {
            Some(SystemCondition::OutOfMemory) => Some("System is experiencing memory constraints"),
            Some(SystemCondition::StackOverflow) => {
                Some("System has encountered a stack overflow condition")
            },
            _ => None,
        };
        if let Some(message) = generic {
            details.message = Some(message.to_string());
        } else if details.message.is_none() {
            details.message = Some("System error occurred".to_string());
        }

        Ok(ErrorResponse::builder().message(Self::SUPPORT_NOTICE).details(details).build())
    }

    fn priority(&self) -> i32 {
        Self::PRIORITY
    }

    fn name(&self) -> &str {
        "SystemErrorHandler"
    }
}

/// Handles HTTP-classified errors and carries their status onto the envelope.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpErrorHandler;

impl HttpErrorHandler {
    pub const PRIORITY: i32 = 15;
}

impl ExceptionHandler for HttpErrorHandler {
    fn can_handle(&self, err: &(dyn Error + 'static)) -> bool {
        category_of(err) == Some(Category::Http)
    }

    fn handle(
        &self,
        err: &(dyn Error + 'static),
        tools: &HandlerTools<'_>,
    ) -> Result<ErrorResponse, HandlerError> {
        let status = expect_exception(err, self.name())?
            .http_status()
            .ok_or_else(|| HandlerError::Failed("HTTP error without a status".to_string()))?;

        if status.is_server_error() {
            tools.log(LogLevel::Error, "HTTP server error occurred", err);
        } else if status.is_client_error() {
            tools.log(LogLevel::Warn, "HTTP client error occurred", err);
        } else {
            tools.log(LogLevel::Info, "HTTP exception occurred", err);
        }

        Ok(ErrorResponse::error_with_status(tools.details(err), status.code()))
    }

    fn priority(&self) -> i32 {
        Self::PRIORITY
    }

    fn name(&self) -> &str {
        "HttpErrorHandler"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CheckedErrorHandler;

impl CheckedErrorHandler {
    pub const PRIORITY: i32 = 20;
}

impl ExceptionHandler for CheckedErrorHandler {
    fn can_handle(&self, err: &(dyn Error + 'static)) -> bool {
        category_of(err) == Some(Category::Checked)
    }

    fn handle(
        &self,
        err: &(dyn Error + 'static),
        tools: &HandlerTools<'_>,
    ) -> Result<ErrorResponse, HandlerError> {
        tools.log(tools.policy().log_level, "Checked exception occurred", err);
        Ok(ErrorResponse::error(tools.details(err)))
    }

    fn priority(&self) -> i32 {
        Self::PRIORITY
    }

    fn name(&self) -> &str {
        "CheckedErrorHandler"
    }
}

/// Last built-in stop; unchecked errors usually point at a programming error.
#[derive(Debug, Clone, Copy, Default)]
pub struct UncheckedErrorHandler;

impl UncheckedErrorHandler {
    pub const PRIORITY: i32 = 30;
}

impl ExceptionHandler for UncheckedErrorHandler {
    fn can_handle(&self, err: &(dyn Error + 'static)) -> bool {
        category_of(err) == Some(Category::Unchecked)
    }

    fn handle(
        &self,
        err: &(dyn Error + 'static),
        tools: &HandlerTools<'_>,
    ) -> Result<ErrorResponse, HandlerError> {
        tools.log(
            tools.policy().log_level,
            "Unchecked exception occurred - potential programming error",
            err,
        );
        Ok(ErrorResponse::error(tools.details(err)))
    }

    fn priority(&self) -> i32 {
        Self::PRIORITY
    }

    fn name(&self) -> &str {
        "UncheckedErrorHandler"
    }
}

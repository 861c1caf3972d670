//! Small queries over arbitrary errors.
//!
//! ```
//! use error_sdk::utils;
//! use error_sdk::Exception;
//!
//! let err = Exception::database("deadlock on orders");
//! assert!(utils::is_checked(&err));
//! assert_eq!(utils::simplified_message(&err), "A database operation failed");
//!
//! let parse = "x".parse::<u32>().unwrap_err();
//! assert_eq!(utils::simplified_message(&parse), "An invalid parameter was provided");
//! ```

use crate::taxonomy::SystemCondition;
use crate::types::{Category, ErrorKind, Exception};
use std::error::Error;
use std::io;
use std::num::{ParseFloatError, ParseIntError};
use std::str::ParseBoolError;

fn category(err: &(dyn Error + 'static)) -> Option<Category> {
    err.downcast_ref::<Exception>().map(Exception::category)
}

/// True for taxonomy errors in the checked category.
pub fn is_checked(err: &(dyn Error + 'static)) -> bool {
    category(err) == Some(Category::Checked)
}

pub fn is_unchecked(err: &(dyn Error + 'static)) -> bool {
    category(err) == Some(Category::Unchecked)
}

pub fn is_system_error(err: &(dyn Error + 'static)) -> bool {
    category(err) == Some(Category::SystemError)
}

/// Numeric status of an HTTP-classified error.
pub fn http_status_code(err: &(dyn Error + 'static)) -> Option<u16> {
    err.downcast_ref::<Exception>()
        .and_then(Exception::http_status)
        .map(|status| status.code())
}

/// User-facing message for well-known error shapes; otherwise the error's own
/// message, or a generic one when it is empty.
pub fn simplified_message(err: &(dyn Error + 'static)) -> String {
    if let Some(io) = err.downcast_ref::<io::Error>() {
        let text = match io.kind() {
            io::ErrorKind::TimedOut => "The operation timed out",
            io::ErrorKind::InvalidInput => "An invalid parameter was provided",
            _ => "A file or network operation failed",
        };
        return text.to_string();
    }
    if err.is::<ParseIntError>() || err.is::<ParseFloatError>() || err.is::<ParseBoolError>() {
        return "An invalid parameter was provided".to_string();
    }
    if let Some(exception) = err.downcast_ref::<Exception>() {
        if exception.kind() == ErrorKind::Database {
            return "A database operation failed".to_string();
        }
        if exception.system_condition() == Some(SystemCondition::OutOfMemory) {
            return "The system is out of memory".to_string();
        }
    }

    let message = err.to_string();
    if message.is_empty() {
        "An error occurred".to_string()
    } else {
        message
    }
}

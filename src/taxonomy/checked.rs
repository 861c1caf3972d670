//! Recoverable failures the caller is expected to handle: generic checked
//! errors, database failures and I/O failures.

use crate::types::exception::Payload;
use crate::types::{ErrorKind, Exception, Severity};

impl Exception {
    /// Generic checked failure with the derived `CHECKED_ERROR` code.
    pub fn checked(message: impl Into<String>) -> Self {
        Self::compose(Payload::Plain(ErrorKind::Checked), None, message.into())
    }

    pub fn checked_with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::compose(Payload::Plain(ErrorKind::Checked), Some(code.into()), message.into())
    }

    /// Database failure with the `DATABASE_ERROR` code.
    pub fn database(message: impl Into<String>) -> Self {
        Self::compose(Payload::Plain(ErrorKind::Database), None, message.into())
    }

    pub fn database_with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::compose(Payload::Plain(ErrorKind::Database), Some(code.into()), message.into())
    }

    /// The database could not be reached. Always reported as [`Severity::High`].
    pub fn connection_failure(connection_url: impl Into<String>) -> Self {
        let url = connection_url.into();
        let err = Self::database(format!("Failed to connect to database: {url}"))
            .with_severity(Severity::High);
        err.context().insert_data("connectionUrl", url);
        err.context().insert_metadata("operationType", "connection");
        err
    }

    pub fn query_failure(query: impl Into<String>, sql_error_code: impl Into<String>) -> Self {
        let query = query.into();
        let sql_error_code = sql_error_code.into();
        let err = Self::database(format!("Query execution failed [{sql_error_code}]: {query}"));
        err.context().insert_data("query", query);
        err.context().insert_data("sqlErrorCode", sql_error_code);
        err.context().insert_metadata("operationType", "query");
        err
    }

    pub fn transaction_failure(
        operation: impl Into<String>,
        transaction_id: impl Into<String>,
    ) -> Self {
        let operation = operation.into();
        let transaction_id = transaction_id.into();
        let err = Self::database(format!(
            "Transaction {operation} failed for transaction {transaction_id}"
        ));
        err.context().insert_data("operation", operation);
        err.context().insert_data("transactionId", transaction_id);
        err.context().insert_metadata("operationType", "transaction");
        err
    }

    /// I/O failure with the `IO_OPERATION_ERROR` code.
    pub fn io_operation(message: impl Into<String>) -> Self {
        Self::compose(Payload::Plain(ErrorKind::IoOperation), None, message.into())
    }

    pub fn io_operation_with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::compose(Payload::Plain(ErrorKind::IoOperation), Some(code.into()), message.into())
    }

    pub fn file_not_found(path: impl Into<String>) -> Self {
        let path = path.into();
        let err = Self::io_operation(format!("File not found: {path}"));
        err.context().insert_data("path", path);
        err.context().insert_metadata("operationType", "read");
        err
    }

    pub fn permission_denied(path: impl Into<String>, operation: impl Into<String>) -> Self {
        let path = path.into();
        let operation = operation.into();
        let err = Self::io_operation(format!("Permission denied: cannot {operation} {path}"));
        err.context().insert_data("path", path);
        err.context().insert_data("operation", operation);
        err.context().insert_metadata("operationType", "permission");
        err
    }
}

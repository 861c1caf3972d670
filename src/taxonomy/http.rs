//! HTTP-status-backed errors.
//!
//! Every HTTP error carries a catalog [`HttpStatus`]. Its code is derived from
//! the status (`HTTP_404_NOT_FOUND`), its message is prefixed with
//! `[<code> <reason>]` and its severity follows the status class: `Medium`
//! for 4xx, `High` for 5xx, `Low` otherwise.
//!
//! The client and server variants only accept statuses of their own class:
//!
//! ```
//! use error_sdk::http::HttpStatus;
//! use error_sdk::{Exception, InvalidArgument};
//!
//! let err = Exception::client_error(HttpStatus::NOT_FOUND, "no such user").unwrap();
//! assert_eq!(err.error_code(), "HTTP_404_NOT_FOUND");
//! assert_eq!(err.message(), "[404 Not Found] no such user");
//!
//! let rejected = Exception::client_error(HttpStatus::BAD_GATEWAY, "upstream");
//! assert_eq!(rejected.err(), Some(InvalidArgument::NotClientError(502)));
//! ```

use crate::error::{InvalidArgument, Result};
use crate::http::HttpStatus;
use crate::types::exception::Payload;
use crate::types::{ErrorKind, Exception};

const ERROR_TYPE: &str = "errorType";

impl Exception {
    fn with_status(kind: ErrorKind, status: HttpStatus, message: impl Into<String>) -> Self {
        let message = format!("[{} {}] {}", status.code(), status.reason_phrase(), message.into());
        Self::compose(Payload::Http { kind, status }, None, message)
    }

    /// HTTP error for any catalog status.
    pub fn http(status: HttpStatus, message: impl Into<String>) -> Self {
        Self::with_status(ErrorKind::Http, status, message)
    }

    /// Like [`Exception::http`], resolving the status from its numeric code.
    pub fn http_code(code: u16, message: impl Into<String>) -> Result<Self> {
        Ok(Self::http(HttpStatus::from_code(code)?, message))
    }

    /// Client error; fails unless `status` is in 400..=499.
    pub fn client_error(status: HttpStatus, message: impl Into<String>) -> Result<Self> {
        if !status.is_client_error() {
            return Err(InvalidArgument::NotClientError(status.code()));
        }
        Ok(Self::with_status(ErrorKind::ClientError, status, message))
    }

    /// Server error; fails unless `status` is in 500..=599.
    pub fn server_error(status: HttpStatus, message: impl Into<String>) -> Result<Self> {
        if !status.is_server_error() {
            return Err(InvalidArgument::NotServerError(status.code()));
        }
        Ok(Self::with_status(ErrorKind::ServerError, status, message))
    }

    fn client(status: HttpStatus, message: impl Into<String>) -> Self {
        Self::with_status(ErrorKind::ClientError, status, message)
    }

    fn server(status: HttpStatus, message: impl Into<String>) -> Self {
        Self::with_status(ErrorKind::ServerError, status, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::client(HttpStatus::BAD_REQUEST, message)
    }

    /// `400` naming the offending request field.
    pub fn bad_request_field(
        message: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        let err = Self::bad_request(message);
        err.context().insert_data("invalidField", field.into());
        err.context().insert_data("invalidValue", value.into());
        err.context().insert_metadata(ERROR_TYPE, "validation");
        err
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::client(HttpStatus::UNAUTHORIZED, message)
    }

    pub fn unauthorized_scheme(message: impl Into<String>, auth_scheme: impl Into<String>) -> Self {
        let err = Self::unauthorized(message);
        err.context().insert_data("authScheme", auth_scheme.into());
        err.context().insert_metadata(ERROR_TYPE, "authentication");
        err
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::client(HttpStatus::FORBIDDEN, message)
    }

    pub fn forbidden_resource(
        message: impl Into<String>,
        resource: impl Into<String>,
        required_permission: impl Into<String>,
    ) -> Self {
        let err = Self::forbidden(message);
        err.context().insert_data("resource", resource.into());
        err.context().insert_data("requiredPermission", required_permission.into());
        err.context().insert_metadata(ERROR_TYPE, "authorization");
        err
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::client(HttpStatus::NOT_FOUND, message)
    }

    /// `404` for a typed resource, e.g. `User with ID '7' not found`.
    pub fn resource_not_found(
        resource_type: impl Into<String>,
        resource_id: impl Into<String>,
    ) -> Self {
        let resource_type = resource_type.into();
        let resource_id = resource_id.into();
        let err = Self::not_found(format!("{resource_type} with ID '{resource_id}' not found"));
        err.context().insert_data("resourceType", resource_type);
        err.context().insert_data("resourceId", resource_id);
        err.context().insert_metadata(ERROR_TYPE, "resource_not_found");
        err
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::client(HttpStatus::CONFLICT, message)
    }

    pub fn too_many_requests(message: impl Into<String>, retry_after_seconds: u32) -> Self {
        let err = Self::client(HttpStatus::TOO_MANY_REQUESTS, message);
        err.context().insert_data("retryAfterSeconds", retry_after_seconds);
        err.context().insert_metadata(ERROR_TYPE, "rate_limit");
        err
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::server(HttpStatus::INTERNAL_SERVER_ERROR, message)
    }

    pub fn internal_error_in(component: impl Into<String>, operation: impl Into<String>) -> Self {
        let component = component.into();
        let operation = operation.into();
        let err = Self::internal_server_error(format!(
            "Internal error in {component} during {operation} operation"
        ));
        err.context().insert_data("component", component);
        err.context().insert_data("operation", operation);
        err.context().insert_metadata(ERROR_TYPE, "internal_error");
        err
    }

    pub fn not_implemented(feature: impl Into<String>) -> Self {
        let feature = feature.into();
        let err =
            Self::server(HttpStatus::NOT_IMPLEMENTED, format!("Feature not implemented: {feature}"));
        err.context().insert_data("feature", feature);
        err.context().insert_metadata(ERROR_TYPE, "not_implemented");
        err
    }

    pub fn bad_gateway(upstream_service: impl Into<String>) -> Self {
        let upstream = upstream_service.into();
        let err = Self::server(
            HttpStatus::BAD_GATEWAY,
            format!("Bad response from upstream service: {upstream}"),
        );
        err.context().insert_data("upstreamService", upstream);
        err.context().insert_metadata(ERROR_TYPE, "bad_gateway");
        err
    }

    /// `503`; with `retry_after_seconds` the message and context carry the delay.
    pub fn service_unavailable(
        service: impl Into<String>,
        retry_after_seconds: Option<u32>,
    ) -> Self {
        let service = service.into();
        let message = match retry_after_seconds {
            Some(secs) => format!("Service unavailable: {service} (retry after {secs} seconds)"),
            None => format!("Service unavailable: {service}"),
        };
        let err = Self::server(HttpStatus::SERVICE_UNAVAILABLE, message);
        err.context().insert_data("service", service);
        if let Some(secs) = retry_after_seconds {
            err.context().insert_data("retryAfterSeconds", secs);
        }
        err.context().insert_metadata(ERROR_TYPE, "service_unavailable");
        err
    }

    pub fn gateway_timeout(upstream_service: impl Into<String>, timeout_seconds: u32) -> Self {
        let upstream = upstream_service.into();
        let err = Self::server(
            HttpStatus::GATEWAY_TIMEOUT,
            format!("Gateway timeout waiting for {upstream} after {timeout_seconds} seconds"),
        );
        err.context().insert_data("upstreamService", upstream);
        err.context().insert_data("timeoutSeconds", timeout_seconds);
        err.context().insert_metadata(ERROR_TYPE, "gateway_timeout");
        err
    }
}

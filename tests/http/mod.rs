use error_sdk::http::{HttpStatus, StatusClass};
use error_sdk::{Category, ErrorKind, Exception, InvalidArgument, Severity};
use serde_json::json;

#[test]
fn lookup_is_total_over_the_catalog() {
    for status in HttpStatus::all() {
        assert_eq!(HttpStatus::lookup(status.code()), Some(*status));
    }
    assert_eq!(HttpStatus::lookup(599), None);
    assert_eq!(HttpStatus::from_code(99), Err(InvalidArgument::UnknownStatus(99)));
}

#[test]
fn classes_follow_numeric_ranges() {
    assert_eq!(HttpStatus::OK.class(), StatusClass::Success);
    assert_eq!(HttpStatus::NOT_FOUND.class(), StatusClass::ClientError);
    assert_eq!(HttpStatus::SERVICE_UNAVAILABLE.class(), StatusClass::ServerError);
    assert!(HttpStatus::CONFLICT.is_error());
    assert!(!HttpStatus::OK.is_error());
}

#[test]
fn client_variant_rejects_other_classes() {
    for status in HttpStatus::all() {
        let result = Exception::client_error(*status, "x");
        if (400..=499).contains(&status.code()) {
            assert_eq!(result.unwrap().kind(), ErrorKind::ClientError);
        } else {
            assert_eq!(result.unwrap_err(), InvalidArgument::NotClientError(status.code()));
        }
    }
}

#[test]
fn server_variant_rejects_other_classes() {
    for status in HttpStatus::all() {
        let result = Exception::server_error(*status, "x");
        if (500..=599).contains(&status.code()) {
            assert_eq!(result.unwrap().kind(), ErrorKind::ServerError);
        } else {
            assert_eq!(result.unwrap_err(), InvalidArgument::NotServerError(status.code()));
        }
    }
}

#[test]
fn severity_tracks_status_class() {
    assert_eq!(Exception::bad_request("x").severity(), Severity::Medium);
    assert_eq!(Exception::bad_gateway("billing").severity(), Severity::High);
    assert_eq!(Exception::http(HttpStatus::OK, "x").severity(), Severity::Low);
}

#[test]
fn default_context_describes_the_status() {
    let err = Exception::conflict("version mismatch");
    let ctx = err.context();
    assert_eq!(ctx.get("statusCode"), Some(json!(409)));
    assert_eq!(ctx.get("reasonPhrase"), Some(json!("Conflict")));
    assert_eq!(ctx.metadata("httpCategory").as_deref(), Some("HTTP"));
    assert_eq!(ctx.metadata("severity").as_deref(), Some("MEDIUM"));
    assert_eq!(err.category(), Category::Http);
}

#[test]
fn message_and_code_carry_the_status() {
    let err = Exception::resource_not_found("User", "7");
    assert_eq!(err.message(), "[404 Not Found] User with ID '7' not found");
    assert_eq!(err.error_code(), "HTTP_404_NOT_FOUND");
    assert_eq!(err.http_status(), Some(HttpStatus::NOT_FOUND));
}

#[test]
fn server_factories() {
    let err = Exception::service_unavailable("search", Some(30));
    assert_eq!(err.message(), "[503 Service Unavailable] Service unavailable: search (retry after 30 seconds)");
    assert_eq!(err.context().get("retryAfterSeconds"), Some(json!(30)));

    let err = Exception::service_unavailable("search", None);
    assert!(!err.context().has_data("retryAfterSeconds"));

    let err = Exception::gateway_timeout("payments", 15);
    assert_eq!(err.error_code(), "HTTP_504_GATEWAY_TIMEOUT");
    assert_eq!(err.context().get("timeoutSeconds"), Some(json!(15)));

    let err = Exception::internal_error_in("ledger", "reconcile");
    assert!(err.message().ends_with("Internal error in ledger during reconcile operation"));

    assert_eq!(Exception::not_implemented("export").kind(), ErrorKind::ServerError);
}

#[test]
fn client_factories() {
    let err = Exception::too_many_requests("slow down", 60);
    assert_eq!(err.http_status(), Some(HttpStatus::TOO_MANY_REQUESTS));
    assert_eq!(err.context().get("retryAfterSeconds"), Some(json!(60)));

    let err = Exception::bad_request_field("bad size", "size", 0);
    assert_eq!(err.context().get("invalidField"), Some(json!("size")));

    let err = Exception::forbidden_resource("denied", "/admin", "ADMIN");
    assert_eq!(err.context().get("requiredPermission"), Some(json!("ADMIN")));

    let err = Exception::unauthorized_scheme("token expired", "Bearer");
    assert_eq!(err.error_code(), "HTTP_401_UNAUTHORIZED");
}

#[test]
fn status_serializes_as_its_code() {
    assert_eq!(serde_json::to_value(HttpStatus::NOT_FOUND).unwrap(), json!(404));
    let parsed: HttpStatus = serde_json::from_value(json!(502)).unwrap();
    assert_eq!(parsed, HttpStatus::BAD_GATEWAY);
    assert!(serde_json::from_value::<HttpStatus>(json!(777)).is_err());
}

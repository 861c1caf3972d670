use criterion::Criterion;
use error_sdk::http::HttpStatus;
use error_sdk::{exception_context, Exception};
use std::sync::OnceLock;
use std::time::Duration;

// ============================================================================
// Test Data
// ============================================================================

/// A mixed batch resembling what a request-serving process sees.
pub fn realistic_errors() -> &'static Vec<Exception> {
    static INSTANCE: OnceLock<Vec<Exception>> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        (0..256)
            .map(|i| match i % 5 {
                0 => Exception::not_found(format!("order {i} not found")),
                1 => Exception::database(format!("deadlock on shard {}", i % 8)),
                2 => Exception::required_field("email"),
                3 => Exception::http(HttpStatus::BAD_GATEWAY, "upstream reset"),
                _ => Exception::unchecked(format!("index {i} out of range")),
            })
            .collect()
    })
}

/// A three-level cause chain with populated context.
pub fn nested_exception() -> Exception {
    let ctx = exception_context!(
        "orderId" => 42, "attempt" => 3;
        metadata "component" => "checkout", "region" => "eu-west-1"
    )
    .unwrap_or_default();

    let root = Exception::connection_failure("postgres://db-primary:5432/orders");
    let middle = Exception::database("query failed").caused_by(root);
    Exception::business_rule("ORDER_LIMIT", "order rejected")
        .with_context(ctx)
        .caused_by(middle)
}

// ============================================================================
// Criterion Configuration
// ============================================================================

pub fn configure_criterion() -> Criterion {
    Criterion::default()
        .sample_size(100)
        .warm_up_time(Duration::from_secs(3))
        .measurement_time(Duration::from_secs(5))
        .noise_threshold(0.05)
}

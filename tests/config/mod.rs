use error_sdk::config::{DisclosurePolicy, DEFAULT_TIMESTAMP_FORMAT};
use error_sdk::logging::LogLevel;

#[test]
fn defaults_are_conservative() {
    let policy = DisclosurePolicy::default();
    assert!(!policy.include_stack_trace);
    assert!(policy.include_exception_details);
    assert!(policy.log_exceptions);
    assert!(policy.sanitize_messages);
    assert!(policy.enable_caching);
    assert_eq!(policy.log_level, LogLevel::Error);
    assert_eq!(policy.max_stack_elements, Some(20));
    assert_eq!(policy.timestamp_format, DEFAULT_TIMESTAMP_FORMAT);
}

#[test]
fn builder_sets_every_field() {
    let policy = DisclosurePolicy::builder()
        .include_stack_trace(true)
        .include_exception_details(false)
        .log_exceptions(false)
        .log_level(LogLevel::Info)
        .sanitize_messages(false)
        .max_stack_elements(Some(5))
        .enable_caching(false)
        .timestamp_format("%H:%M")
        .build();

    let expected = DisclosurePolicy {
        include_stack_trace: true,
        include_exception_details: false,
        log_exceptions: false,
        log_level: LogLevel::Info,
        sanitize_messages: false,
        max_stack_elements: Some(5),
        enable_caching: false,
        timestamp_format: "%H:%M".to_string(),
    };
    assert_eq!(policy, expected);
}

#[test]
fn loads_partial_json() {
    let policy: DisclosurePolicy =
        serde_json::from_str(r#"{"includeStackTrace": true, "logLevel": "WARNING", "maxStackElements": null}"#)
            .unwrap();
    assert!(policy.include_stack_trace);
    assert_eq!(policy.log_level, LogLevel::Warn);
    assert_eq!(policy.max_stack_elements, None);
    assert!(policy.sanitize_messages);
}

#[test]
fn serializes_with_camel_case_keys() {
    let value = serde_json::to_value(DisclosurePolicy::production()).unwrap();
    assert_eq!(value["includeExceptionDetails"], false);
    assert_eq!(value["maxStackElements"], 10);
    assert_eq!(value["logLevel"], "ERROR");

    let back: DisclosurePolicy = serde_json::from_value(value).unwrap();
    assert_eq!(back, DisclosurePolicy::production());
}

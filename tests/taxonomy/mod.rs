use error_sdk::taxonomy::{SystemCondition, STATE_TRANSITION_RULE};
use error_sdk::{derive_error_code, Category, ErrorKind, Exception, FieldError, InvalidArgument, Severity};
use serde_json::json;
use std::collections::HashSet;

fn one_of_each() -> Vec<Exception> {
    vec![
        Exception::checked("c"),
        Exception::database("db"),
        Exception::io_operation("io"),
        Exception::unchecked("u"),
        Exception::business_logic("bl"),
        Exception::validation("v"),
        Exception::system("s"),
        Exception::http_code(418, "teapot").unwrap(),
        Exception::bad_request("br"),
        Exception::internal_server_error("ise"),
    ]
}

#[test]
fn error_ids_are_unique() {
    let ids: HashSet<String> = (0..500)
        .flat_map(|_| one_of_each())
        .map(|err| err.error_id().to_string())
        .collect();
    assert_eq!(ids.len(), 5000);
    assert!(ids.iter().all(|id| !id.is_empty()));
}

#[test]
fn every_kind_is_constructed_once() {
    let kinds: Vec<ErrorKind> = one_of_each().iter().map(Exception::kind).collect();
    assert_eq!(kinds, ErrorKind::ALL.to_vec());
}

#[test]
fn category_is_fixed_per_kind() {
    for err in one_of_each() {
        assert_eq!(err.category(), err.kind().category(), "{}", err.kind());
    }
    assert_eq!(Exception::checked_with_code("X", "m").category(), Category::Checked);
    assert_eq!(Exception::unchecked_with_code("X", "m").category(), Category::Unchecked);
    assert_eq!(Exception::database_with_code("X", "m").category(), Category::Checked);
}

#[test]
fn default_codes_follow_kind_names() {
    assert_eq!(Exception::checked("m").error_code(), "CHECKED_ERROR");
    assert_eq!(Exception::io_operation("m").error_code(), "IO_OPERATION_ERROR");
    assert_eq!(Exception::business_logic("m").error_code(), "BUSINESS_LOGIC_ERROR");
    assert_eq!(Exception::system("m").error_code(), "SYSTEM_ERROR");
    assert_eq!(derive_error_code("BusinessLogicException"), "BUSINESS_LOGIC_ERROR");
}

#[test]
fn explicit_code_wins() {
    let err = Exception::checked_with_code("PAYMENT_DECLINED", "card declined");
    assert_eq!(err.error_code(), "PAYMENT_DECLINED");
    assert_eq!(err.message(), "card declined");
}

#[test]
fn cause_and_context_compose() {
    let root = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let ctx = error_sdk::ExceptionContext::builder().data("attempt", 2).build().unwrap();
    let err = Exception::io_operation_with_code("READ_FAILED", "read failed")
        .caused_by(root)
        .with_context(ctx);

    assert_eq!(err.error_code(), "READ_FAILED");
    assert_eq!(err.cause().map(|c| c.to_string()).as_deref(), Some("missing"));
    assert_eq!(err.context().get("attempt"), Some(json!(2)));
}

#[test]
fn database_factories_annotate_context() {
    let err = Exception::query_failure("SELECT 1", "42P01");
    assert_eq!(err.message(), "Query execution failed [42P01]: SELECT 1");
    assert_eq!(err.severity(), Severity::Medium);
    assert_eq!(err.context().get("sqlErrorCode"), Some(json!("42P01")));

    let err = Exception::transaction_failure("commit", "tx-9");
    assert_eq!(err.message(), "Transaction commit failed for transaction tx-9");
    assert_eq!(err.context().metadata("operationType").as_deref(), Some("transaction"));

    assert_eq!(Exception::connection_failure("db://x").severity(), Severity::High);
}

#[test]
fn io_factories_annotate_context() {
    let err = Exception::permission_denied("/var/data", "write");
    assert_eq!(err.message(), "Permission denied: cannot write /var/data");
    assert_eq!(err.context().get("operation"), Some(json!("write")));
    assert_eq!(err.kind(), ErrorKind::IoOperation);

    let err = Exception::file_not_found("config.toml");
    assert_eq!(err.context().metadata("operationType").as_deref(), Some("read"));
}

#[test]
fn business_logic_factories() {
    let err = Exception::entity_constraint("UNIQUE_EMAIL", "User", "7", "email taken");
    assert_eq!(err.message(), "Business rule violation [UNIQUE_EMAIL] for User[7]: email taken");
    assert_eq!(err.business_rule_name(), Some("UNIQUE_EMAIL"));
    assert_eq!(err.severity(), Severity::High);

    let err = Exception::invalid_state_transition("Order", "1", "SHIPPED", "NEW", ["DELIVERED", "RETURNED", "DELIVERED"]);
    assert_eq!(err.business_rule_name(), Some(STATE_TRANSITION_RULE));
    assert!(err.message().ends_with("Allowed states: [DELIVERED, RETURNED]"));
    assert_eq!(err.context().get("allowedStates"), Some(json!(["DELIVERED", "RETURNED"])));
    assert_eq!(Exception::business_logic("x").business_rule_name(), None);
}

#[test]
fn required_field_example() {
    let err = Exception::required_field("username");
    assert!(err.message().contains("username"));
    assert_eq!(err.context().get("fieldName"), Some(json!("username")));
    assert_eq!(err.context().metadata("validationType").as_deref(), Some("required"));
    assert_eq!(err.severity(), Severity::Medium);
    assert_eq!(err.category(), Category::Unchecked);
}

#[test]
fn field_errors_accumulate() {
    let mut err = Exception::validation("invalid signup");
    err.add_field_error("email", "blank", "").unwrap();
    err.add_field_error("email", "malformed", "a@").unwrap();
    err.add_field_error("age", "negative", -1).unwrap();

    assert_eq!(err.errors_for_field("email").len(), 2);
    assert!(err.has_errors_for_field("age"));
    assert!(!err.has_errors_for_field("name"));
    assert_eq!(err.validation_summary().as_deref(), Some("Validation failed with 3 error(s)"));
}

#[test]
fn field_errors_only_on_validation_kinds() {
    let mut err = Exception::checked("x");
    assert_eq!(
        err.add_field_error("f", "m", 1).unwrap_err(),
        InvalidArgument::NotValidation(ErrorKind::Checked)
    );
    assert!(err.field_errors().is_empty());
    assert_eq!(err.validation_summary(), None);
}

#[test]
fn list_constructor_flattens_into_context() {
    let err = Exception::validation_from_errors(vec![
        FieldError::new("name", "blank", ""),
        FieldError::new("age", "too low", 3),
    ]);
    assert_eq!(err.context().get("validationErrorCount"), Some(json!(2)));
    assert_eq!(err.context().get("error_1_field"), Some(json!("age")));
    assert_eq!(err.context().get("error_1_rejectedValue"), Some(json!(3)));
}

#[test]
fn other_validation_factories() {
    let err = Exception::field_validation("age", -4, "must be positive");
    assert_eq!(err.message(), "Field validation failed for 'age': must be positive");
    assert_eq!(err.context().get("invalidValue"), Some(json!(-4)));

    let err = Exception::multiple_fields(["a", "b"]);
    assert_eq!(err.message(), "Multiple field validation failed for: a, b");
    assert_eq!(err.context().metadata("validationType").as_deref(), Some("multiple"));

    let err = Exception::validation_rule("AGE_LIMIT", "must be 18+");
    assert_eq!(err.message(), "Business rule validation failed: AGE_LIMIT - must be 18+");
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn system_errors_are_always_critical() {
    let errors = [
        Exception::system(""),
        Exception::out_of_memory("cache", 4096),
        Exception::stack_overflow("parse", 9000),
        Exception::thread_death("worker"),
        Exception::class_loading("Plugin"),
    ];
    for err in &errors {
        assert_eq!(err.severity(), Severity::Critical);
        assert_eq!(err.category(), Category::SystemError);
    }
    assert_eq!(errors[0].message(), "System error occurred");
    assert_eq!(errors[2].system_condition(), Some(SystemCondition::StackOverflow));
    assert_eq!(errors[2].context().get("stackDepth"), Some(json!(9000)));
    assert_eq!(Exception::checked("x").system_condition(), None);
}

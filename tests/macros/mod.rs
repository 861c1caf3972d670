use error_sdk::{exception_context, Exception, InvalidArgument};
use serde_json::json;

#[test]
fn builds_data_and_metadata() {
    let ctx = exception_context!("a" => 1, "b" => json!({"nested": true}); metadata "m" => "v").unwrap();
    assert_eq!(ctx.get("b"), Some(json!({"nested": true})));
    assert_eq!(ctx.metadata("m").as_deref(), Some("v"));
}

#[test]
fn trailing_commas_are_accepted() {
    let ctx = exception_context!("a" => 1,).unwrap();
    assert!(ctx.has_data("a"));
    let ctx = exception_context!("a" => 1; metadata "m" => "v",).unwrap();
    assert!(ctx.has_metadata("m"));
}

#[test]
fn empty_metadata_key_is_rejected() {
    let result = exception_context!("a" => 1; metadata "" => "v");
    assert_eq!(result.unwrap_err(), InvalidArgument::EmptyKey { namespace: "metadata" });
}

#[test]
fn expressions_work_as_keys_and_values() {
    let field = String::from("email");
    let attempts = 2 + 1;
    let ctx = exception_context!(field.clone() => attempts).unwrap();
    let err = Exception::validation("bad input").with_context(ctx);
    assert_eq!(err.context().get_typed::<u32>(&field), Some(3));
}

use error_sdk::{ContextSnapshot, Exception, ExceptionContext, InvalidArgument};
use serde_json::json;
use std::sync::Arc;
use std::thread;

#[test]
fn add_rejects_empty_keys() {
    let ctx = ExceptionContext::new();
    assert_eq!(ctx.add_data("", 1).unwrap_err(), InvalidArgument::EmptyKey { namespace: "data" });
    assert_eq!(
        ctx.add_metadata("", "x").unwrap_err(),
        InvalidArgument::EmptyKey { namespace: "metadata" }
    );
    assert!(ctx.is_empty());
}

#[test]
fn add_calls_chain() {
    let ctx = ExceptionContext::new();
    ctx.add_data("a", 1).unwrap().add_data("b", "two").unwrap().add_metadata("m", "v").unwrap();

    assert_eq!(ctx.get("a"), Some(json!(1)));
    assert_eq!(ctx.get_typed::<String>("b").as_deref(), Some("two"));
    assert!(ctx.has_metadata("m"));
}

#[test]
fn typed_lookup_of_wrong_shape_is_absent() {
    let ctx = ExceptionContext::builder().data("count", "many").build().unwrap();
    assert_eq!(ctx.get_typed::<u32>("count"), None);
    assert_eq!(ctx.get_typed::<u32>("missing"), None);
}

#[test]
fn snapshots_are_detached() {
    let ctx = ExceptionContext::builder().data("k", 1).build().unwrap();
    let mut snapshot = ctx.all_data();
    snapshot.insert("injected".to_string(), json!(true));

    assert!(!ctx.has_data("injected"));
    assert_eq!(ctx.all_data().len(), 1);
}

#[test]
fn merge_prefers_the_other_side() {
    let left = ExceptionContext::builder().data("k", "left").data("only_left", 1).build().unwrap();
    let right = ExceptionContext::builder().data("k", "right").metadata("m", "r").build().unwrap();

    left.merge(&right);
    assert_eq!(left.get("k"), Some(json!("right")));
    assert!(left.has_data("only_left"));
    assert_eq!(left.metadata("m").as_deref(), Some("r"));
    assert_eq!(right.all_data().len(), 1);
}

#[test]
fn merge_with_itself_is_a_no_op() {
    let ctx = ExceptionContext::builder().data("k", 1).build().unwrap();
    ctx.merge(&ctx);
    assert_eq!(ctx.all_data().len(), 1);
}

#[test]
fn copy_is_independent() {
    let original = ExceptionContext::builder().data("k", 1).build().unwrap();
    let copy = original.copy();
    copy.add_data("k", 2).unwrap();

    assert_eq!(original.get("k"), Some(json!(1)));
    assert_eq!(copy.get("k"), Some(json!(2)));
}

#[test]
fn attached_context_stays_live_through_the_error() {
    let err = Exception::checked("io").with_context(ExceptionContext::new());
    err.context().add_data("late", true).unwrap();
    assert_eq!(err.context().get("late"), Some(json!(true)));
}

#[test]
fn attaching_keeps_factory_entries() {
    let ctx = ExceptionContext::builder().data("requestId", "r-1").build().unwrap();
    let err = Exception::not_found("no user").with_context(ctx);

    assert_eq!(err.context().get("statusCode"), Some(json!(404)));
    assert_eq!(err.context().get("requestId"), Some(json!("r-1")));
}

#[test]
fn supplied_entries_override_factory_entries() {
    let ctx = ExceptionContext::builder().metadata("severity", "custom").build().unwrap();
    let err = Exception::not_found("no user").with_context(ctx);
    assert_eq!(err.context().metadata("severity").as_deref(), Some("custom"));
}

#[test]
fn clear_empties_both_namespaces() {
    let ctx = ExceptionContext::builder().data("a", 1).metadata("b", "c").build().unwrap();
    ctx.clear();
    assert!(ctx.is_empty());
}

#[test]
fn snapshot_converts_back_into_context() {
    let ctx = ExceptionContext::builder().data("a", 1).metadata("b", "c").build().unwrap();
    let snapshot: ContextSnapshot = ctx.snapshot();
    let json = serde_json::to_string(&snapshot).unwrap();
    let restored: ContextSnapshot = serde_json::from_str(&json).unwrap();

    assert_eq!(ExceptionContext::from(restored), ctx);
}

#[test]
fn concurrent_writers_do_not_lose_entries() {
    let ctx = Arc::new(ExceptionContext::new());
    let workers: Vec<_> = (0..8)
        .map(|t| {
            let ctx = Arc::clone(&ctx);
            thread::spawn(move || {
                for i in 0..50 {
                    ctx.add_data(format!("t{t}_{i}"), i).unwrap();
                    let _ = ctx.all_metadata();
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }
    assert_eq!(ctx.all_data().len(), 400);
}

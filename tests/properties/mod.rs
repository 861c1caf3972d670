//! Property-based checks over contexts, sanitizing, escaping and rendering.

use error_sdk::render::escape::{escape_json, escape_line, escape_xml};
use error_sdk::render::{ErrorDetails, Renderer};
use error_sdk::sanitize::{MessageSanitizer, PatternSanitizer};
use error_sdk::{Exception, ExceptionContext};
use proptest::prelude::*;

proptest! {
    /// Reading a context twice without writes yields the same snapshot.
    #[test]
    fn context_snapshots_are_idempotent(
        data in prop::collection::btree_map("[a-z]{1,8}", any::<i64>(), 0..16),
        metadata in prop::collection::btree_map("[a-z]{1,8}", "\\PC{0,16}", 0..16),
    ) {
        let ctx = ExceptionContext::new();
        for (key, value) in &data {
            ctx.add_data(key.clone(), *value).unwrap();
        }
        for (key, value) in &metadata {
            ctx.add_metadata(key.clone(), value.clone()).unwrap();
        }

        prop_assert_eq!(ctx.all_data(), ctx.all_data());
        prop_assert_eq!(ctx.all_metadata(), ctx.all_metadata());
        prop_assert_eq!(ctx.all_data().len(), data.len());
        prop_assert_eq!(ctx.all_metadata(), metadata);
    }

    /// Sanitizing never panics and is stable once applied.
    #[test]
    fn sanitizer_is_idempotent(text in "\\PC{0,200}") {
        let once = PatternSanitizer.sanitize(&text);
        let twice = PatternSanitizer.sanitize(&once);
        prop_assert_eq!(once, twice);
    }

    /// Escaped XML text contains no raw markup.
    #[test]
    fn xml_escape_removes_markup(text in "\\PC{0,100}") {
        let escaped = escape_xml(&text);
        prop_assert!(!escaped.contains('<') && !escaped.contains('>') && !escaped.contains('"'));
    }

    /// Escaped JSON strings parse back to the original.
    #[test]
    fn json_escape_round_trips(text in any::<String>()) {
        let quoted = format!("\"{}\"", escape_json(&text));
        let parsed: String = serde_json::from_str(&quoted).unwrap();
        prop_assert_eq!(parsed, text);
    }

    /// Line escaping always yields a single line.
    #[test]
    fn line_escape_has_no_breaks(text in any::<String>()) {
        let escaped = escape_line(&text);
        prop_assert!(!escaped.contains('\n') && !escaped.contains('\r'));
    }

    /// JSON rendering keeps code, message and category for arbitrary messages.
    #[test]
    fn json_rendering_preserves_identity(message in "\\PC{1,80}", code in "[A-Z_]{1,20}") {
        let err = Exception::checked_with_code(code.clone(), message.clone());
        let parsed: ErrorDetails = serde_json::from_str(&Renderer::default().to_json(&err, false)).unwrap();
        prop_assert_eq!(parsed.error_code, Some(code));
        prop_assert_eq!(parsed.message, Some(message));
        prop_assert_eq!(parsed.category.as_deref(), Some("CHECKED"));
    }
}

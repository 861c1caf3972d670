use crate::config::DisclosurePolicy;
use crate::handlers::{
    CheckedErrorHandler, ExceptionHandler, HandlerError, HandlerTools, HttpErrorHandler,
    SystemErrorHandler, UncheckedErrorHandler,
};
use crate::logging::{ExceptionLogger, LogLevel};
use crate::render::{ErrorDetails, ErrorResponse, Renderer};
use crate::sanitize::{MessageSanitizer, PatternSanitizer};
use crate::traits::DescribableError;
use crate::types::{ErrorId, ErrorKind, Exception, Severity, SYSTEM_CATEGORY, UNKNOWN_CATEGORY};
use chrono::Utc;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::any::Any;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Error code of the response produced when no handler matches.
pub const UNHANDLED_EXCEPTION: &str = "UNHANDLED_EXCEPTION";

/// Error code of the response produced when the selected handler fails.
pub const EXCEPTION_HANDLING_ERROR: &str = "EXCEPTION_HANDLING_ERROR";

const GENERIC_MESSAGE: &str = "An unexpected error occurred";
const UNHANDLED_NOTICE: &str = "An unexpected error occurred. Please contact support.";
const HANDLING_FAILURE_MESSAGE: &str = "Critical error occurred during exception handling";
const HANDLING_FAILURE_NOTICE: &str =
    "A critical system error has occurred. Please contact support immediately.";

/// Identity an error is memoized under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum MemoKey {
    Kind(ErrorKind),
    /// Registration index of a describable type in the dispatcher's describer.
    Describable(usize),
}

type SharedHandler = Arc<dyn ExceptionHandler>;

/// Routes errors to the first matching handler by ascending priority.
///
/// Handlers are held behind a read-mostly lock; the error-kind to handler
/// memo is a concurrent map tagged with a generation counter, so a lookup
/// racing a `register` can at worst cache a binding that is ignored on the
/// next read. Clearing the memo only costs a predicate scan on the next
/// dispatch of each kind.
///
/// [`dispatch`](Self::dispatch) never panics and never returns an error.
pub struct Dispatcher {
    handlers: RwLock<Vec<SharedHandler>>,
    memo: DashMap<MemoKey, (u64, SharedHandler)>,
    generation: AtomicU64,
    renderer: Renderer,
    logger: ExceptionLogger,
    sanitizer: Arc<dyn MessageSanitizer>,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> =
            self.handlers.read().iter().map(|h| format!("{}@{}", h.name(), h.priority())).collect();
        f.debug_struct("Dispatcher")
            .field("handlers", &names)
            .field("memoized", &self.memo.len())
            .field("policy", self.renderer.policy())
            .finish_non_exhaustive()
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(DisclosurePolicy::default())
    }
}

impl Dispatcher {
    /// Dispatcher with the four built-in handlers registered.
    pub fn new(policy: DisclosurePolicy) -> Self {
        let dispatcher = Self::without_defaults(policy);
        {
            let mut handlers = dispatcher.handlers.write();
            handlers.push(Arc::new(SystemErrorHandler));
            handlers.push(Arc::new(HttpErrorHandler));
            handlers.push(Arc::new(CheckedErrorHandler));
            handlers.push(Arc::new(UncheckedErrorHandler));
            handlers.sort_by_key(|h| h.priority());
        }
        dispatcher
    }

    /// Dispatcher with no handlers; every error takes the unhandled path.
    pub fn without_defaults(policy: DisclosurePolicy) -> Self {
        Self {
            handlers: RwLock::new(Vec::new()),
            memo: DashMap::new(),
            generation: AtomicU64::new(0),
            renderer: Renderer::new(policy),
            logger: ExceptionLogger::tracing(),
            sanitizer: Arc::new(PatternSanitizer),
        }
    }

    pub fn with_logger(mut self, logger: ExceptionLogger) -> Self {
        self.logger = logger.with_describer(self.renderer.describer().clone());
        self
    }

    pub fn with_sanitizer(mut self, sanitizer: impl MessageSanitizer + 'static) -> Self {
        self.sanitizer = Arc::new(sanitizer);
        self
    }

    /// Lets errors of type `T` contribute metadata and be memoized by type.
    pub fn register_describable<T>(&mut self) -> &mut Self
    where
        T: DescribableError + 'static,
    {
        self.renderer.register_describable::<T>();
        self.logger = self.logger.clone().with_describer(self.renderer.describer().clone());
        self.clear_cache();
        self
    }

    #[inline]
    pub fn policy(&self) -> &DisclosurePolicy {
        self.renderer.policy()
    }

    #[inline]
    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Adds `handler` and re-sorts by priority. Equal priorities keep
    /// registration order.
    pub fn register(&self, handler: Arc<dyn ExceptionHandler>) {
        let mut handlers = self.handlers.write();
        handlers.push(handler);
        handlers.sort_by_key(|h| h.priority());
        self.invalidate();
    }

    /// Removes `handler` (matched by identity). Returns whether it was registered.
    pub fn unregister(&self, handler: &Arc<dyn ExceptionHandler>) -> bool {
        let mut handlers = self.handlers.write();
        let target = Arc::as_ptr(handler) as *const ();
        let Some(index) = handlers.iter().position(|h| Arc::as_ptr(h) as *const () == target) else {
            return false;
        };
        handlers.remove(index);
        self.invalidate();
        true
    }

    /// Snapshot of the registered handlers in dispatch order.
    pub fn handlers(&self) -> Vec<Arc<dyn ExceptionHandler>> {
        self.handlers.read().clone()
    }

    pub fn clear_cache(&self) {
        self.invalidate();
    }

    /// Error kinds with a live memoized binding.
    pub fn cached_kinds(&self) -> Vec<ErrorKind> {
        let generation = self.generation.load(Ordering::Acquire);
        let mut kinds: Vec<ErrorKind> = self
            .memo
            .iter()
            .filter(|entry| entry.value().0 == generation)
            .filter_map(|entry| match entry.key() {
                MemoKey::Kind(kind) => Some(*kind),
                MemoKey::Describable(_) => None,
            })
            .collect();
        kinds.sort_by_key(|kind| kind.name());
        kinds
    }

    /// Converts `err` into a response envelope.
    ///
    /// Falls back to an "unhandled" response when no handler accepts the
    /// error, and to a "handling failure" response when the selected handler
    /// returns an error or panics, or when building the unhandled response
    /// panics.
    pub fn dispatch(&self, err: &(dyn Error + 'static)) -> ErrorResponse {
        let tools = HandlerTools::new(&self.renderer, &self.logger, self.sanitizer.as_ref());

        let handler = match catch_unwind(AssertUnwindSafe(|| self.resolve(err))) {
            Ok(Some(handler)) => handler,
            Ok(None) => {
                return catch_unwind(AssertUnwindSafe(|| self.unhandled(err, &tools)))
                    .unwrap_or_else(|payload| {
                        let failure = HandlerError::Panicked(panic_message(payload.as_ref()));
                        self.handling_failure(err, "unhandled fallback", &failure)
                    });
            },
            Err(payload) => {
                let failure = HandlerError::Panicked(panic_message(payload.as_ref()));
                return self.handling_failure(err, "handler predicate", &failure);
            },
        };

        match catch_unwind(AssertUnwindSafe(|| handler.handle(err, &tools))) {
            Ok(Ok(response)) => response,
            Ok(Err(failure)) => self.handling_failure(err, handler.name(), &failure),
            Err(payload) => {
                let failure = HandlerError::Panicked(panic_message(payload.as_ref()));
                self.handling_failure(err, handler.name(), &failure)
            },
        }
    }

    fn resolve(&self, err: &(dyn Error + 'static)) -> Option<SharedHandler> {
        let key = self.memo_key(err);
        let generation = self.generation.load(Ordering::Acquire);

        if let Some(key) = key {
            if let Some(entry) = self.memo.get(&key) {
                let (cached_generation, handler) = entry.value();
                if *cached_generation == generation {
                    return Some(Arc::clone(handler));
                }
            }
        }

        let handler = self.handlers.read().iter().find(|h| h.can_handle(err)).cloned()?;
        if let Some(key) = key {
            self.memo.insert(key, (generation, Arc::clone(&handler)));
        }
        Some(handler)
    }

    fn memo_key(&self, err: &(dyn Error + 'static)) -> Option<MemoKey> {
        if !self.policy().enable_caching {
            return None;
        }
        if let Some(exception) = err.downcast_ref::<Exception>() {
            return Some(MemoKey::Kind(exception.kind()));
        }
        self.renderer.describer().position(err).map(MemoKey::Describable)
    }

    fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.memo.clear();
    }

    fn unhandled(&self, err: &(dyn Error + 'static), tools: &HandlerTools<'_>) -> ErrorResponse {
        let policy = self.policy();
        let label = self.renderer.type_name(err);
        tools.log(LogLevel::Error, &format!("Unhandled exception occurred: {label}"), err);

        let base = tools.details(err);
        let disclosed = base.message.filter(|_| policy.include_exception_details);
        let details = ErrorDetails {
            error_id: Some(ErrorId::new().to_string()),
            error_code: Some(UNHANDLED_EXCEPTION.to_string()),
            message: Some(disclosed.clone().unwrap_or_else(|| GENERIC_MESSAGE.to_string())),
            category: Some(UNKNOWN_CATEGORY.to_string()),
            severity: Some(Severity::High),
            timestamp: Utc::now(),
            context: None,
            stack_trace: base.stack_trace,
            cause_details: None,
        };

        let notice = match disclosed {
            Some(message) => format!("Unhandled exception: {message}"),
            None => UNHANDLED_NOTICE.to_string(),
        };
        ErrorResponse::builder().message(notice).details(details).build()
    }

    fn handling_failure(
        &self,
        err: &(dyn Error + 'static),
        handler: &str,
        failure: &HandlerError,
    ) -> ErrorResponse {
        if self.policy().log_exceptions {
            let label = self.renderer.type_name(err);
            let extra = BTreeMap::from([
                ("handler".to_string(), handler.to_string()),
                ("handlerFailure".to_string(), failure.to_string()),
                ("critical".to_string(), "true".to_string()),
            ]);
            let message = format!("CRITICAL: Exception handling failed for {label}");
            // Logging must not turn a failed dispatch into a panic.
            let _ = catch_unwind(AssertUnwindSafe(|| {
                self.logger.log_with(LogLevel::Error, &message, err, extra)
            }));
        }

        let details = ErrorDetails {
            error_id: Some(ErrorId::new().to_string()),
            error_code: Some(EXCEPTION_HANDLING_ERROR.to_string()),
            message: Some(HANDLING_FAILURE_MESSAGE.to_string()),
            category: Some(SYSTEM_CATEGORY.to_string()),
            severity: Some(Severity::Critical),
            timestamp: Utc::now(),
            context: None,
            stack_trace: None,
            cause_details: None,
        };
        ErrorResponse::builder().message(HANDLING_FAILURE_NOTICE).details(details).build()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic".to_string())
}

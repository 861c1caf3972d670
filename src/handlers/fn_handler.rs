use crate::handlers::{ExceptionHandler, HandlerError, HandlerTools, DEFAULT_PRIORITY};
use crate::render::ErrorResponse;
use std::error::Error;
use std::fmt;

/// Handler assembled from a predicate closure and a transform closure.
pub struct FnHandler<P, H> {
    name: String,
    priority: i32,
    predicate: P,
    handle: H,
}

impl<P, H> FnHandler<P, H>
where
    P: Fn(&(dyn Error + 'static)) -> bool + Send + Sync,
    H: Fn(&(dyn Error + 'static), &HandlerTools<'_>) -> Result<ErrorResponse, HandlerError>
        + Send
        + Sync,
{
    pub fn new(name: impl Into<String>, predicate: P, handle: H) -> Self {
        Self { name: name.into(), priority: DEFAULT_PRIORITY, predicate, handle }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

impl<P, H> fmt::Debug for FnHandler<P, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHandler")
            .field("name", &self.name)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}

impl<P, H> ExceptionHandler for FnHandler<P, H>
where
    P: Fn(&(dyn Error + 'static)) -> bool + Send + Sync,
    H: Fn(&(dyn Error + 'static), &HandlerTools<'_>) -> Result<ErrorResponse, HandlerError>
        + Send
        + Sync,
{
    fn can_handle(&self, err: &(dyn Error + 'static)) -> bool {
        (self.predicate)(err)
    }

    fn handle(
        &self,
        err: &(dyn Error + 'static),
        tools: &HandlerTools<'_>,
    ) -> Result<ErrorResponse, HandlerError> {
        (self.handle)(err, tools)
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn name(&self) -> &str {
        &self.name
    }
}

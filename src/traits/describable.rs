//! Optional capability for errors that carry taxonomy-style metadata.
//!
//! Renderers and the dispatcher accept any `std::error::Error`. Errors that
//! implement [`DescribableError`] and are registered with the renderer expose
//! their id, code, severity and context; all others render with those fields
//! omitted.
//!
//! # Examples
//!
//! ```
//! use error_sdk::traits::DescribableError;
//! use error_sdk::Severity;
//! use std::fmt;
//!
//! #[derive(Debug)]
//! struct QuotaExceeded;
//!
//! impl fmt::Display for QuotaExceeded {
//!     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
//!         f.write_str("quota exceeded")
//!     }
//! }
//!
//! impl std::error::Error for QuotaExceeded {}
//!
//! impl DescribableError for QuotaExceeded {
//!     fn error_code(&self) -> Option<&str> {
//!         Some("QUOTA_EXCEEDED")
//!     }
//!
//!     fn severity(&self) -> Option<Severity> {
//!         Some(Severity::Medium)
//!     }
//! }
//!
//! assert_eq!(QuotaExceeded.type_name(), "QuotaExceeded");
//! assert_eq!(QuotaExceeded.error_id(), None);
//! ```

use crate::http::HttpStatus;
use crate::types::{ContextSnapshot, Exception, Severity};
use chrono::{DateTime, Utc};
use std::error::Error;

/// Accessors a renderer reads when they are available.
///
/// Every method has a default that reports the field as absent.
pub trait DescribableError: Error {
    /// Short type label used by the text and log renderers.
    fn type_name(&self) -> &str {
        short_type_name(std::any::type_name::<Self>())
    }

    fn error_id(&self) -> Option<String> {
        None
    }

    fn error_code(&self) -> Option<&str> {
        None
    }

    fn category_name(&self) -> Option<&str> {
        None
    }

    fn severity(&self) -> Option<Severity> {
        None
    }

    fn timestamp(&self) -> Option<DateTime<Utc>> {
        None
    }

    fn context_snapshot(&self) -> Option<ContextSnapshot> {
        None
    }

    fn http_status(&self) -> Option<HttpStatus> {
        None
    }

    fn stack_frames(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Recovers the capability from a plain error reference, if the concrete type is known.
pub type Probe = for<'a> fn(&'a (dyn Error + 'static)) -> Option<&'a dyn DescribableError>;

/// Probe for the concrete type `T`.
pub fn probe<'a, T>(err: &'a (dyn Error + 'static)) -> Option<&'a dyn DescribableError>
where
    T: DescribableError + 'static,
{
    err.downcast_ref::<T>().map(|e| e as &dyn DescribableError)
}

/// Label used for errors that expose no [`DescribableError`] capability.
pub const FOREIGN_TYPE_NAME: &str = "Error";

/// Ordered set of probes; the first probe that recognises an error wins.
///
/// The default set recognises [`Exception`].
#[derive(Clone)]
pub struct Describer {
    probes: Vec<Probe>,
}

impl Default for Describer {
    fn default() -> Self {
        Self { probes: vec![probe::<Exception> as Probe] }
    }
}

impl Describer {
    /// Describer that recognises nothing.
    pub fn empty() -> Self {
        Self { probes: Vec::new() }
    }

    /// Adds `T` to the recognised types.
    pub fn register<T>(&mut self) -> &mut Self
    where
        T: DescribableError + 'static,
    {
        self.probes.push(probe::<T>);
        self
    }

    pub fn describe<'a>(&self, err: &'a (dyn Error + 'static)) -> Option<&'a dyn DescribableError> {
        self.probes.iter().find_map(|probe| probe(err))
    }

    /// Registration index of the probe that recognises `err`.
    pub fn position(&self, err: &(dyn Error + 'static)) -> Option<usize> {
        self.probes.iter().position(|probe| probe(err).is_some())
    }

    /// Type label for `err`: the described type name, or `Error` when unknown.
    pub fn type_name<'a>(&self, err: &'a (dyn Error + 'static)) -> &'a str {
        self.describe(err).map_or(FOREIGN_TYPE_NAME, |d| d.type_name())
    }
}

impl std::fmt::Debug for Describer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Describer").field("probes", &self.probes.len()).finish()
    }
}

/// Last path segment of a type name, without generic arguments.
pub(crate) fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

impl DescribableError for Exception {
    fn type_name(&self) -> &str {
        self.kind().name()
    }

    fn error_id(&self) -> Option<String> {
        Some(Exception::error_id(self).to_string())
    }

    fn error_code(&self) -> Option<&str> {
        Some(Exception::error_code(self))
    }

    fn category_name(&self) -> Option<&str> {
        Some(Exception::category(self).as_str())
    }

    fn severity(&self) -> Option<Severity> {
        Some(Exception::severity(self))
    }

    fn timestamp(&self) -> Option<DateTime<Utc>> {
        Some(Exception::timestamp(self))
    }

    fn context_snapshot(&self) -> Option<ContextSnapshot> {
        let snapshot = self.context().snapshot();
        (!snapshot.is_empty()).then_some(snapshot)
    }

    fn http_status(&self) -> Option<HttpStatus> {
        Exception::http_status(self)
    }

    fn stack_frames(&self) -> Vec<String> {
        Exception::stack_frames(self)
    }
}

//! Causal-chain traversal.
//!
//! [`CauseChain`] walks `source()` links starting at the error itself. The walk
//! never yields the same error twice and stops after [`MAX_CHAIN_DEPTH`]
//! links, so a cycle built through shared ownership still terminates.
//!
//! ```
//! use error_sdk::taxonomy::chain::{root_cause, CauseChain};
//! use error_sdk::Exception;
//!
//! let io = std::io::Error::new(std::io::ErrorKind::NotFound, "settings.toml");
//! let err = Exception::io_operation("could not load settings").caused_by(io);
//!
//! assert_eq!(CauseChain::new(&err).count(), 2);
//! assert_eq!(root_cause(&err).to_string(), "settings.toml");
//! ```

use std::collections::HashSet;
use std::error::Error;

/// Upper bound on the number of errors a traversal yields.
pub const MAX_CHAIN_DEPTH: usize = 64;

/// Iterator over an error and its transitive causes.
pub struct CauseChain<'a> {
    next: Option<&'a (dyn Error + 'static)>,
    seen: HashSet<*const ()>,
}

impl<'a> CauseChain<'a> {
    pub fn new(err: &'a (dyn Error + 'static)) -> Self {
        Self { next: Some(err), seen: HashSet::new() }
    }

    /// Skips the error itself and starts at its direct cause.
    pub fn causes_of(err: &'a (dyn Error + 'static)) -> Self {
        let mut chain = Self::new(err);
        chain.next();
        chain
    }
}

impl<'a> Iterator for CauseChain<'a> {
    type Item = &'a (dyn Error + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        if self.seen.len() >= MAX_CHAIN_DEPTH {
            return None;
        }
        let addr = current as *const dyn Error as *const ();
        if !self.seen.insert(addr) {
            return None;
        }
        self.next = current.source();
        Some(current)
    }
}

/// Deepest reachable cause; the error itself when it has none.
pub fn root_cause<'a>(err: &'a (dyn Error + 'static)) -> &'a (dyn Error + 'static) {
    CauseChain::new(err).last().unwrap_or(err)
}

/// First error in the chain (the error itself included) of type `T`.
pub fn find_cause<'a, T>(err: &'a (dyn Error + 'static)) -> Option<&'a T>
where
    T: Error + 'static,
{
    CauseChain::new(err).find_map(|e| e.downcast_ref::<T>())
}

pub fn is_caused_by<T>(err: &(dyn Error + 'static)) -> bool
where
    T: Error + 'static,
{
    CauseChain::causes_of(err).any(|e| e.is::<T>())
}

#[inline]
pub fn has_cause(err: &(dyn Error + 'static)) -> bool {
    err.source().is_some()
}

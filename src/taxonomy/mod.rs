//! Kind-specific constructors for [`Exception`](crate::Exception).
//!
//! Each submodule adds an `impl Exception` block for one branch of the
//! taxonomy:
//!
//! | Module | Kinds | Category |
//! |---|---|---|
//! | [`checked`] | `Checked`, `Database`, `IoOperation` | `CHECKED` |
//! | [`unchecked`] | `Unchecked`, `BusinessLogic` | `UNCHECKED` |
//! | [`validation`] | `Validation` | `UNCHECKED` |
//! | [`system`] | `SystemError` | `ERROR` |
//! | [`http`] | `Http`, `ClientError`, `ServerError` | `HTTP` |
//!
//! [`chain`] walks causal chains of any error.

pub mod chain;
pub mod checked;
pub mod http;
pub mod system;
pub mod unchecked;
pub mod validation;

pub use chain::{find_cause, has_cause, is_caused_by, root_cause, CauseChain};
pub use system::{MemorySnapshot, SystemCondition};
pub use unchecked::STATE_TRANSITION_RULE;

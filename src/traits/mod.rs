//! Capability traits shared by the renderer, the logging glue and the dispatcher.
//!
//! - [`DescribableError`]: optional metadata accessors for any error type
//! - [`Describer`]: recovers a [`DescribableError`] from a `&dyn Error`

pub mod describable;

pub use describable::{probe, DescribableError, Describer, Probe, FOREIGN_TYPE_NAME};

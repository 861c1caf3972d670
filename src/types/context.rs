//! Key/value metadata attached to taxonomy errors.
//!
//! An [`ExceptionContext`] carries two namespaces:
//! - **data**: arbitrary JSON-compatible values keyed by name
//! - **metadata**: plain string annotations, also exported as log fields
//!
//! Both maps sit behind locks so a context can be extended through a shared
//! reference while other threads read it. Every accessor returns a snapshot.
//!
//! # Examples
//!
//! ```
//! use error_sdk::ExceptionContext;
//!
//! let ctx = ExceptionContext::builder()
//!     .data("userId", 42)
//!     .metadata("service", "accounts")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(ctx.get_typed::<u64>("userId"), Some(42));
//! assert_eq!(ctx.get_typed::<String>("userId"), None);
//! assert_eq!(ctx.metadata("service").as_deref(), Some("accounts"));
//! ```

use crate::error::{InvalidArgument, Result};
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

const DATA: &str = "data";
const METADATA: &str = "metadata";

fn check_key(key: &str, namespace: &'static str) -> Result<()> {
    if key.is_empty() {
        return Err(InvalidArgument::EmptyKey { namespace });
    }
    Ok(())
}

/// Thread-safe two-namespace context bag.
#[derive(Default)]
pub struct ExceptionContext {
    data: RwLock<HashMap<String, Value>>,
    metadata: RwLock<HashMap<String, String>>,
}

impl ExceptionContext {
    /// Creates an empty context.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a builder that validates keys once at `build()`.
    #[inline]
    pub fn builder() -> ContextBuilder {
        ContextBuilder::default()
    }

    /// Seeds a context from pairs whose keys are known to be non-empty.
    pub(crate) fn seeded<const D: usize, const M: usize>(
        data: [(&'static str, Value); D],
        metadata: [(&'static str, String); M],
    ) -> Self {
        Self {
            data: RwLock::new(data.into_iter().map(|(k, v)| (k.to_string(), v)).collect()),
            metadata: RwLock::new(metadata.into_iter().map(|(k, v)| (k.to_string(), v)).collect()),
        }
    }

    pub(crate) fn insert_data(&self, key: impl Into<String>, value: impl Into<Value>) {
        self.data.write().insert(key.into(), value.into());
    }

    pub(crate) fn insert_metadata(&self, key: impl Into<String>, value: impl Into<String>) {
        self.metadata.write().insert(key.into(), value.into());
    }

    /// Adds (or replaces) a data entry.
    ///
    /// Fails with [`InvalidArgument::EmptyKey`] when `key` is empty.
    pub fn add_data<K, V>(&self, key: K, value: V) -> Result<&Self>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let key = key.into();
        check_key(&key, DATA)?;
        self.data.write().insert(key, value.into());
        Ok(self)
    }

    /// Adds (or replaces) a metadata entry.
    pub fn add_metadata<K, V>(&self, key: K, value: V) -> Result<&Self>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let key = key.into();
        check_key(&key, METADATA)?;
        self.metadata.write().insert(key, value.into());
        Ok(self)
    }

    /// Returns a copy of the data value under `key`.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.data.read().get(key).cloned()
    }

    /// Returns the data value under `key` converted to `T`.
    ///
    /// A present value of the wrong shape yields `None`, never an error.
    pub fn get_typed<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.get(key)?;
        serde_json::from_value(value).ok()
    }

    pub fn metadata(&self, key: &str) -> Option<String> {
        self.metadata.read().get(key).cloned()
    }

    pub fn has_data(&self, key: &str) -> bool {
        self.data.read().contains_key(key)
    }

    pub fn has_metadata(&self, key: &str) -> bool {
        self.metadata.read().contains_key(key)
    }

    /// Snapshot of every data entry, ordered by key.
    pub fn all_data(&self) -> BTreeMap<String, Value> {
        self.data.read().iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    /// Snapshot of every metadata entry, ordered by key.
    pub fn all_metadata(&self) -> BTreeMap<String, String> {
        self.metadata.read().iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    /// Copies every entry of `other` into `self`; `other` wins on collisions.
    pub fn merge(&self, other: &ExceptionContext) -> &Self {
        if std::ptr::eq(self, other) {
            return self;
        }
        let data = other.all_data();
        let metadata = other.all_metadata();
        self.data.write().extend(data);
        self.metadata.write().extend(metadata);
        self
    }

    /// Returns an independent context holding the same entries.
    pub fn copy(&self) -> Self {
        Self {
            data: RwLock::new(self.data.read().clone()),
            metadata: RwLock::new(self.metadata.read().clone()),
        }
    }

    pub fn clear(&self) {
        self.data.write().clear();
        self.metadata.write().clear();
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty() && self.metadata.read().is_empty()
    }

    /// Immutable, serializable view of the context at this instant.
    pub fn snapshot(&self) -> ContextSnapshot {
        ContextSnapshot { data: self.all_data(), metadata: self.all_metadata() }
    }
}

impl Clone for ExceptionContext {
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl PartialEq for ExceptionContext {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || self.snapshot() == other.snapshot()
    }
}

impl fmt::Debug for ExceptionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExceptionContext")
            .field("data", &self.all_data())
            .field("metadata", &self.all_metadata())
            .finish()
    }
}

impl From<ContextSnapshot> for ExceptionContext {
    fn from(snapshot: ContextSnapshot) -> Self {
        Self {
            data: RwLock::new(snapshot.data.into_iter().collect()),
            metadata: RwLock::new(snapshot.metadata.into_iter().collect()),
        }
    }
}

/// Builder collecting entries before validating them together.
#[must_use]
#[derive(Debug, Default, Clone)]
pub struct ContextBuilder {
    data: Vec<(String, Value)>,
    metadata: Vec<(String, String)>,
}

impl ContextBuilder {
    pub fn data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.push((key.into(), value.into()));
        self
    }

    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.push((key.into(), value.into()));
        self
    }

    /// Validates every key and produces the context. Later duplicates win.
    pub fn build(self) -> Result<ExceptionContext> {
        let mut data = HashMap::with_capacity(self.data.len());
        for (key, value) in self.data {
            check_key(&key, DATA)?;
            data.insert(key, value);
        }
        let mut metadata = HashMap::with_capacity(self.metadata.len());
        for (key, value) in self.metadata {
            check_key(&key, METADATA)?;
            metadata.insert(key, value);
        }
        Ok(ExceptionContext { data: RwLock::new(data), metadata: RwLock::new(metadata) })
    }
}

/// Point-in-time copy of an [`ExceptionContext`], as carried by rendered details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextSnapshot {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl ContextSnapshot {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty() && self.metadata.is_empty()
    }
}

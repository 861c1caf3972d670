use crate::types::ErrorVec;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single rejected field of a validation failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub field: String,
    pub message: String,
    pub rejected_value: Value,
}

impl FieldError {
    #[inline]
    pub fn new(
        field: impl Into<String>,
        message: impl Into<String>,
        rejected_value: impl Into<Value>,
    ) -> Self {
        Self { field: field.into(), message: message.into(), rejected_value: rejected_value.into() }
    }
}

/// Ordered accumulation of field errors under one validation failure.
///
/// Backed by an [`ErrorVec`], so the common single-field case stays inline.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors {
    items: ErrorVec<FieldError>,
}

impl FieldErrors {
    #[inline]
    pub fn new() -> Self {
        Self { items: ErrorVec::new() }
    }

    #[inline]
    pub fn push(&mut self, item: FieldError) {
        self.items.push(item);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.items.iter()
    }

    /// Entries recorded against `field`, in insertion order.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldError> + 'a {
        self.items.iter().filter(move |e| e.field == field)
    }

    /// Copies the entries out; later pushes do not affect the returned list.
    pub fn to_vec(&self) -> Vec<FieldError> {
        self.items.to_vec()
    }
}

impl FromIterator<FieldError> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        Self { items: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a FieldErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

//! Validation failures.
//!
//! A validation error aggregates any number of [`FieldError`]s under a single
//! error id. The field list can grow after construction with
//! [`Exception::add_field_error`]; everything else stays fixed.
//!
//! # Examples
//!
//! ```
//! use error_sdk::{Exception, FieldError};
//!
//! let mut err = Exception::validation_from_errors(vec![
//!     FieldError::new("email", "must not be blank", ""),
//! ]);
//! err.add_field_error("age", "must be positive", -3).unwrap();
//!
//! assert_eq!(err.message(), "Validation failed with 1 error(s)");
//! assert_eq!(err.field_errors().len(), 2);
//! assert!(err.has_errors_for_field("age"));
//! assert_eq!(err.validation_summary().as_deref(), Some("Validation failed with 2 error(s)"));
//! ```

use crate::error::{InvalidArgument, Result};
use crate::types::exception::Payload;
use crate::types::{Exception, FieldError, FieldErrors};
use serde_json::Value;

const VALIDATION_TYPE: &str = "validationType";

fn count_message(count: usize) -> String {
    format!("Validation failed with {count} error(s)")
}

impl Exception {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::compose(Payload::Validation(FieldErrors::new()), None, message.into())
    }

    pub fn validation_with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::compose(Payload::Validation(FieldErrors::new()), Some(code.into()), message.into())
    }

    /// Builds a validation error from field errors collected up front.
    ///
    /// The message reports the count; each entry is also flattened into the
    /// context as `error_<i>_field`, `error_<i>_message` and `error_<i>_rejectedValue`.
    pub fn validation_from_errors(errors: impl IntoIterator<Item = FieldError>) -> Self {
        let errors: FieldErrors = errors.into_iter().collect();
        let message = count_message(errors.len());
        let err = Self::compose(Payload::Validation(errors.clone()), None, message);

        let ctx = err.context();
        ctx.insert_data("validationErrorCount", errors.len());
        ctx.insert_metadata(VALIDATION_TYPE, "multi-field");
        for (i, error) in errors.iter().enumerate() {
            ctx.insert_data(format!("error_{i}_field"), error.field.clone());
            ctx.insert_data(format!("error_{i}_message"), error.message.clone());
            ctx.insert_data(format!("error_{i}_rejectedValue"), error.rejected_value.clone());
        }
        err
    }

    /// Single rejected field.
    pub fn field(
        field: impl Into<String>,
        message: impl Into<String>,
        rejected_value: impl Into<Value>,
    ) -> Self {
        let error = FieldError::new(field, message, rejected_value);
        let err = Self::compose(
            Payload::Validation(std::iter::once(error.clone()).collect()),
            None,
            format!("Validation failed for field '{}': {}", error.field, error.message),
        );
        err.context().insert_data("field", error.field);
        err.context().insert_data("rejectedValue", error.rejected_value);
        err.context().insert_metadata(VALIDATION_TYPE, "field");
        err
    }

    pub fn field_validation(
        field_name: impl Into<String>,
        invalid_value: impl Into<Value>,
        reason: impl Into<String>,
    ) -> Self {
        let field_name = field_name.into();
        let reason = reason.into();
        let err = Self::validation(format!("Field validation failed for '{field_name}': {reason}"));
        err.context().insert_data("fieldName", field_name);
        err.context().insert_data("invalidValue", invalid_value.into());
        err.context().insert_data("validationError", reason);
        err.context().insert_metadata(VALIDATION_TYPE, "field");
        err
    }

    /// ```
    /// use error_sdk::Exception;
    ///
    /// let err = Exception::required_field("username");
    /// assert!(err.message().contains("username"));
    /// assert_eq!(err.context().get_typed::<String>("fieldName").as_deref(), Some("username"));
    /// assert_eq!(err.context().metadata("validationType").as_deref(), Some("required"));
    /// ```
    pub fn required_field(field_name: impl Into<String>) -> Self {
        let field_name = field_name.into();
        let err = Self::validation(format!("Required field missing: {field_name}"));
        err.context().insert_data("fieldName", field_name);
        err.context().insert_metadata(VALIDATION_TYPE, "required");
        err
    }

    pub fn multiple_fields<I, S>(field_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = field_names.into_iter().map(Into::into).collect();
        let listed = if names.is_empty() { "none".to_string() } else { names.join(", ") };
        let err = Self::validation(format!("Multiple field validation failed for: {listed}"));
        err.context().insert_data("fieldNames", names);
        err.context().insert_metadata(VALIDATION_TYPE, "multiple");
        err
    }

    /// A validation-level business rule failed. Compare [`Exception::business_rule`],
    /// which reports a business-logic violation instead.
    pub fn validation_rule(
        rule_name: impl Into<String>,
        rule_description: impl Into<String>,
    ) -> Self {
        let rule_name = rule_name.into();
        let rule_description = rule_description.into();
        let err = Self::validation(format!(
            "Business rule validation failed: {rule_name} - {rule_description}"
        ));
        err.context().insert_data("ruleName", rule_name);
        err.context().insert_data("ruleDescription", rule_description);
        err.context().insert_metadata(VALIDATION_TYPE, "business-rule");
        err
    }

    /// Appends a field error. Fails for non-validation kinds.
    pub fn add_field_error(
        &mut self,
        field: impl Into<String>,
        message: impl Into<String>,
        rejected_value: impl Into<Value>,
    ) -> Result<&mut Self> {
        let kind = self.kind();
        match self.payload_mut() {
            Payload::Validation(errors) => {
                errors.push(FieldError::new(field, message, rejected_value));
            },
            _ => return Err(InvalidArgument::NotValidation(kind)),
        }
        Ok(self)
    }

    /// Copy of the accumulated field errors. Empty for non-validation kinds.
    pub fn field_errors(&self) -> Vec<FieldError> {
        match self.payload() {
            Payload::Validation(errors) => errors.to_vec(),
            _ => Vec::new(),
        }
    }

    pub fn errors_for_field(&self, field: &str) -> Vec<FieldError> {
        match self.payload() {
            Payload::Validation(errors) => errors.for_field(field).cloned().collect(),
            _ => Vec::new(),
        }
    }

    pub fn has_errors_for_field(&self, field: &str) -> bool {
        match self.payload() {
            Payload::Validation(errors) => errors.for_field(field).next().is_some(),
            _ => false,
        }
    }

    /// Count-based summary of the current field errors; `None` for other kinds.
    pub fn validation_summary(&self) -> Option<String> {
        match self.payload() {
            Payload::Validation(errors) => Some(count_message(errors.len())),
            _ => None,
        }
    }
}

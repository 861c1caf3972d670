//! Failures that signal a programming or business-rule error rather than an
//! environmental condition.

use crate::types::exception::Payload;
use crate::types::{ErrorKind, Exception};
use std::collections::BTreeSet;

/// Rule name recorded for invalid state transitions.
pub const STATE_TRANSITION_RULE: &str = "STATE_TRANSITION_RULE";

impl Exception {
    pub fn unchecked(message: impl Into<String>) -> Self {
        Self::compose(Payload::Plain(ErrorKind::Unchecked), None, message.into())
    }

    pub fn unchecked_with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::compose(Payload::Plain(ErrorKind::Unchecked), Some(code.into()), message.into())
    }

    /// Business-logic failure that names no rule.
    pub fn business_logic(message: impl Into<String>) -> Self {
        Self::compose(Payload::BusinessLogic { rule: None }, None, message.into())
    }

    /// Violation of a named business rule.
    ///
    /// ```
    /// use error_sdk::{Exception, Severity};
    ///
    /// let err = Exception::business_rule("MAX_BALANCE", "balance above limit");
    /// assert_eq!(err.message(), "Business rule violation [MAX_BALANCE]: balance above limit");
    /// assert_eq!(err.business_rule_name(), Some("MAX_BALANCE"));
    /// assert_eq!(err.severity(), Severity::High);
    /// ```
    pub fn business_rule(rule: impl Into<String>, message: impl Into<String>) -> Self {
        let rule = rule.into();
        let err = Self::compose(
            Payload::BusinessLogic { rule: Some(rule.clone()) },
            None,
            format!("Business rule violation [{rule}]: {}", message.into()),
        );
        err.context().insert_data("businessRule", rule);
        err.context().insert_metadata("violationType", "business_rule");
        err
    }

    /// Rule violation scoped to one entity instance.
    pub fn entity_constraint(
        rule: impl Into<String>,
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let rule = rule.into();
        let entity_type = entity_type.into();
        let entity_id = entity_id.into();
        let err = Self::compose(
            Payload::BusinessLogic { rule: Some(rule.clone()) },
            None,
            format!(
                "Business rule violation [{rule}] for {entity_type}[{entity_id}]: {}",
                message.into()
            ),
        );
        err.context().insert_data("businessRule", rule);
        err.context().insert_data("entityType", entity_type);
        err.context().insert_data("entityId", entity_id);
        err.context().insert_metadata("violationType", "entity_constraint");
        err
    }

    /// An entity was asked to move to a state it cannot reach from its current one.
    ///
    /// Allowed states are reported sorted and deduplicated.
    pub fn invalid_state_transition<I, S>(
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
        current_state: impl Into<String>,
        target_state: impl Into<String>,
        allowed_states: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entity_type = entity_type.into();
        let entity_id = entity_id.into();
        let current = current_state.into();
        let target = target_state.into();
        let allowed: BTreeSet<String> = allowed_states.into_iter().map(Into::into).collect();
        let allowed: Vec<String> = allowed.into_iter().collect();

        let err = Self::compose(
            Payload::BusinessLogic { rule: Some(STATE_TRANSITION_RULE.to_string()) },
            None,
            format!(
                "Invalid state transition for {entity_type}[{entity_id}]: cannot transition from \
                 '{current}' to '{target}'. Allowed states: [{}]",
                allowed.join(", ")
            ),
        );
        err.context().insert_data("entityType", entity_type);
        err.context().insert_data("entityId", entity_id);
        err.context().insert_data("currentState", current);
        err.context().insert_data("targetState", target);
        err.context().insert_data("allowedStates", allowed);
        err.context().insert_metadata("violationType", "state_transition");
        err
    }

    /// Rule name carried by business-logic errors.
    pub fn business_rule_name(&self) -> Option<&str> {
        match self.payload() {
            Payload::BusinessLogic { rule } => rule.as_deref(),
            _ => None,
        }
    }
}

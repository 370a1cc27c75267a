//! Required-field validation.

use serde::Serialize;

use crate::template::{Template, Values};

/// Outcome of [`validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Validation {
    pub is_valid: bool,
    /// One message per missing required field, in declaration order.
    pub errors: Vec<String>,
}

/// Check that every required variable has a value that is non-empty after trimming.
pub fn validate(template: &Template, values: &Values) -> Validation {
    let errors: Vec<String> = template
        .variables
        .iter()
        .filter(|v| v.required)
        .filter(|v| values.get(&v.key).is_none_or(|value| value.trim().is_empty()))
        .map(|v| format!("{} is required", v.label))
        .collect();

    Validation {
        is_valid: errors.is_empty(),
        errors,
    }
}

//! Domain errors
//!
//! Lookup misses (unknown zone names, unreachable destinations) are not errors
//! and are modelled with `Option`/empty collections. This type is only for
//! inputs that break an invariant.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// A single value is unacceptable, e.g. a portal that expires before it opens.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A collection of values is inconsistent, e.g. two zones sharing a map id.
    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn constraint(msg: impl Into<String>) -> Self {
        Self::Constraint(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_names_the_problem() {
        let err = DomainError::validation("expiry must be in the future");

        assert_eq!(
            err.to_string(),
            "Validation failed: expiry must be in the future"
        );
    }

    #[test]
    fn constraint_message_names_the_problem() {
        let err = DomainError::constraint("duplicate map id 4204");

        assert_eq!(err.to_string(), "Constraint violation: duplicate map id 4204");
    }
}

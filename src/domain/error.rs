//! Unified error type for the domain layer
//!
//! Entities and domain services report rule violations through
//! [`DomainError`] so that adapters never have to match on strings.

use thiserror::Error;

/// Error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Authoring input outside its allowed domain
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Entity not found
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// State transition not allowed from the current state
    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    /// A name could not be parsed into a known value
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    pub fn invalid_state_transition(msg: impl Into<String>) -> Self {
        Self::InvalidStateTransition(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

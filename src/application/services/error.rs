//! Service error type shared by the application services

use thiserror::Error;

use crate::domain::error::DomainError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: &'static str, id: String },

    /// A transition or action not allowed in the current state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Repository(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) | DomainError::Parse(msg) => Self::Validation(msg),
            DomainError::NotFound { entity_type, id } => Self::NotFound { entity_type, id },
            DomainError::InvalidStateTransition(msg) => Self::InvalidState(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_map_to_service_errors() {
        assert!(matches!(
            ServiceError::from(DomainError::parse("bad")),
            ServiceError::Validation(_)
        ));
        assert!(ServiceError::from(DomainError::not_found("Quest", "q-1")).is_not_found());
        assert!(matches!(
            ServiceError::from(DomainError::invalid_state_transition("no")),
            ServiceError::InvalidState(_)
        ));
    }

    #[test]
    fn test_repository_errors_pass_through() {
        let err: ServiceError = anyhow::anyhow!("connection reset").into();
        assert_eq!(err.to_string(), "connection reset");
    }
}

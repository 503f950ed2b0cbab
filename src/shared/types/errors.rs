use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    /// The entity exists but fails a business precondition
    /// (bicycle not available, discount inactive or out of window).
    #[error("Invalid state of {entity}: {reason}")]
    InvalidState { entity: &'static str, reason: String },

    /// Uniqueness violation or a delete blocked by dependent records.
    #[error("Conflict on {entity}: {reason}")]
    Conflict { entity: &'static str, reason: String },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        Self::NotFound {
            entity,
            field: "id",
            value: id.to_string(),
        }
    }

    pub fn invalid_state(entity: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidState {
            entity,
            reason: reason.into(),
        }
    }

    pub fn conflict(entity: &'static str, reason: impl Into<String>) -> Self {
        Self::Conflict {
            entity,
            reason: reason.into(),
        }
    }

    /// Whether this error is likely transient (e.g. DB connection lost)
    /// and the operation may succeed if retried.
    pub fn is_transient(&self) -> bool {
        matches!(self, DomainError::Storage(_))
    }
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity_and_id() {
        let err = DomainError::not_found("Bicycle", 42);
        assert_eq!(err.to_string(), "Not found: Bicycle with id=42");
    }

    #[test]
    fn only_storage_errors_are_transient() {
        assert!(DomainError::Storage("connection reset".into()).is_transient());
        assert!(!DomainError::conflict("User", "phone already registered").is_transient());
        assert!(!DomainError::invalid_state("Bicycle", "rented").is_transient());
    }
}

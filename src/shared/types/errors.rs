use thiserror::Error;

/// Errors raised by the user record schema and the record store.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A candidate record violates a field constraint.
    #[error("User validation failed: {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// The store rejected a write because a unique field already holds `value`.
    #[error("Duplicate key: {field} '{value}' already exists")]
    Conflict { field: &'static str, value: String },

    /// The identifier is not in the store's id format.
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl DomainError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

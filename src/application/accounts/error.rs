use thiserror::Error;

use crate::shared::DomainError;

/// Failures reported to the caller of a user operation.
#[derive(Debug, Error)]
pub enum OperationError {
    /// Malformed input: schema violations, bad paging or filter values.
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    MissingField(&'static str),

    #[error("User with this email already exists")]
    DuplicateEmail,

    #[error("Invalid email or password")]
    Authentication,

    #[error("User not found")]
    NotFound,

    #[error("Invalid action. Use: 'getAll', 'create', 'login', or 'getById'")]
    InvalidAction(Option<String>),

    /// Anything the per-action checks do not classify.
    #[error("Server error: {0}")]
    Server(String),
}

impl OperationError {
    /// Whether the failure is the caller's fault (as opposed to the service's).
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Server(_))
    }
}

impl From<DomainError> for OperationError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation { .. } => Self::Validation(e.to_string()),
            other => Self::Server(other.to_string()),
        }
    }
}

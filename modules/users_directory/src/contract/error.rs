use thiserror::Error;
use uuid::Uuid;

/// Message returned when creating a user with an email that is already taken
pub const USER_ALREADY_EXISTS: &str = "User already exists.";
/// Message returned when updating a user to another user's email
pub const EMAIL_ALREADY_IN_USE: &str = "E-mail already in use.";

/// Errors that are safe to expose to other modules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsersDirectoryError {
    #[error("User not found: {id}")]
    NotFound { id: Uuid },

    #[error("{message}")]
    Conflict { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error")]
    Internal,
}

impl UsersDirectoryError {
    pub fn not_found(id: Uuid) -> Self {
        Self::NotFound { id }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self::Internal
    }
}

impl From<crate::domain::error::DomainError> for UsersDirectoryError {
    fn from(domain_error: crate::domain::error::DomainError) -> Self {
        use crate::domain::error::DomainError::*;
        match domain_error {
            UserNotFound { id } => Self::not_found(id),
            UserAlreadyExists { .. } => Self::conflict(USER_ALREADY_EXISTS),
            EmailInUse { .. } => Self::conflict(EMAIL_ALREADY_IN_USE),
            e @ (MissingField { .. } | EmptyName | NameTooLong { .. } | InvalidEmail { .. }) => {
                Self::validation(e.to_string())
            }
            Storage { .. } => Self::internal(),
        }
    }
}

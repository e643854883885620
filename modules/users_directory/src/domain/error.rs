use thiserror::Error;
use uuid::Uuid;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Name too long: {len} characters (max: {max})")]
    NameTooLong { len: usize, max: usize },

    #[error("Invalid email format: '{email}'")]
    InvalidEmail { email: String },

    #[error("User not found: {id}")]
    UserNotFound { id: Uuid },

    #[error("User with email '{email}' already exists")]
    UserAlreadyExists { email: String },

    #[error("Email '{email}' is used by another user")]
    EmailInUse { email: String },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    pub fn empty_name() -> Self {
        Self::EmptyName
    }

    pub fn name_too_long(len: usize, max: usize) -> Self {
        Self::NameTooLong { len, max }
    }

    pub fn invalid_email(email: impl Into<String>) -> Self {
        Self::InvalidEmail {
            email: email.into(),
        }
    }

    pub fn user_not_found(id: Uuid) -> Self {
        Self::UserNotFound { id }
    }

    pub fn user_already_exists(email: impl Into<String>) -> Self {
        Self::UserAlreadyExists {
            email: email.into(),
        }
    }

    pub fn email_in_use(email: impl Into<String>) -> Self {
        Self::EmailInUse {
            email: email.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Malformed or missing input, as opposed to state-dependent failures.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingField { .. }
                | Self::EmptyName
                | Self::NameTooLong { .. }
                | Self::InvalidEmail { .. }
        )
    }
}

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Pure user model for inter-module communication (no serde)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a new user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

/// Full replacement of the mutable fields of a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserReplacement {
    pub name: String,
    pub email: String,
}

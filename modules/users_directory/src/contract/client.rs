use async_trait::async_trait;
use uuid::Uuid;

use crate::contract::{
    error::UsersDirectoryError,
    model::{NewUser, User, UserReplacement},
};

/// Public API of the users directory for in-process consumers
#[async_trait]
pub trait UsersDirectoryApi: Send + Sync {
    async fn get_user(&self, id: Uuid) -> Result<User, UsersDirectoryError>;

    /// All users in insertion order
    async fn list_users(&self) -> Result<Vec<User>, UsersDirectoryError>;

    async fn create_user(&self, new_user: NewUser) -> Result<User, UsersDirectoryError>;

    /// Replace name and email of an existing user
    async fn update_user(
        &self,
        id: Uuid,
        replacement: UserReplacement,
    ) -> Result<User, UsersDirectoryError>;

    /// Idempotent removal; returns whether a user was actually removed
    async fn delete_user(&self, id: Uuid) -> Result<bool, UsersDirectoryError>;
}

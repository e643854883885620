use crate::contract::model::User;
use async_trait::async_trait;
use uuid::Uuid;

/// Port for the domain layer: persistence operations the domain needs.
/// Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Load a user by id.
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;
    /// Load the user owning `email` (exact match).
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    /// Every stored user in insertion order.
    async fn list_all(&self) -> anyhow::Result<Vec<User>>;
    /// Insert a fully-formed domain user.
    ///
    /// Service computes id/timestamps/validation; repo persists.
    async fn insert(&self, u: User) -> anyhow::Result<()>;
    /// Update an existing user (by primary key in `u.id`).
    async fn update(&self, u: User) -> anyhow::Result<()>;
    /// Delete by id. Returns true if a record was deleted.
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}

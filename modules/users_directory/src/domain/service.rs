use std::sync::Arc;

use crate::contract::model::{NewUser, User, UserReplacement};
use crate::domain::error::DomainError;
use crate::domain::repo::UsersRepository;
use crate::domain::validation::{validate_email, validate_name};
use chrono::{Duration, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Domain service with business rules for user management.
/// Depends only on the repository port, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn UsersRepository>,
    // Serializes check-then-write sequences (uniqueness, existence) across requests.
    write_gate: Arc<Mutex<()>>,
    config: ServiceConfig,
}

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub max_name_length: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_name_length: 255,
        }
    }
}

impl Service {
    pub fn new(repo: Arc<dyn UsersRepository>, config: ServiceConfig) -> Self {
        Self {
            repo,
            write_gate: Arc::new(Mutex::new(())),
            config,
        }
    }

    #[instrument(name = "users_directory.service.get_user", skip(self), fields(user_id = %id))]
    pub async fn get_user(&self, id: Uuid) -> Result<User, DomainError> {
        debug!("Getting user by id");

        let user = self
            .repo
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?
            .ok_or_else(|| DomainError::user_not_found(id))?;
        debug!("Successfully retrieved user");
        Ok(user)
    }

    #[instrument(name = "users_directory.service.list_users", skip(self))]
    pub async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        let users = self
            .repo
            .list_all()
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;
        debug!("Listed {} users", users.len());
        Ok(users)
    }

    #[instrument(
        name = "users_directory.service.create_user",
        skip(self),
        fields(email = %new_user.email)
    )]
    pub async fn create_user(&self, new_user: NewUser) -> Result<User, DomainError> {
        info!("Creating new user");

        validate_name(&new_user.name, self.config.max_name_length)?;
        validate_email(&new_user.email)?;

        let _gate = self.write_gate.lock().await;

        if self
            .repo
            .find_by_email(&new_user.email)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?
            .is_some()
        {
            return Err(DomainError::user_already_exists(new_user.email));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name,
            email: new_user.email,
            created_at: now,
            updated_at: now,
        };

        self.repo
            .insert(user.clone())
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        info!("Successfully created user with id={}", user.id);
        Ok(user)
    }

    /// Full update: replaces name and email, refreshes `updated_at`.
    ///
    /// Checks run in order: input validation, existence, email ownership.
    #[instrument(
        name = "users_directory.service.update_user",
        skip(self),
        fields(user_id = %id)
    )]
    pub async fn update_user(
        &self,
        id: Uuid,
        replacement: UserReplacement,
    ) -> Result<User, DomainError> {
        info!("Updating user");

        validate_name(&replacement.name, self.config.max_name_length)?;
        validate_email(&replacement.email)?;

        let _gate = self.write_gate.lock().await;

        let mut current = self
            .repo
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?
            .ok_or_else(|| DomainError::user_not_found(id))?;

        if let Some(owner) = self
            .repo
            .find_by_email(&replacement.email)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?
        {
            if owner.id != id {
                return Err(DomainError::email_in_use(replacement.email));
            }
        }

        current.name = replacement.name;
        current.email = replacement.email;
        // updated_at must strictly advance even if the clock does not
        current.updated_at = Utc::now().max(current.updated_at + Duration::nanoseconds(1));

        self.repo
            .update(current.clone())
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        info!("Successfully updated user");
        Ok(current)
    }

    /// Idempotent delete; `Ok(false)` when nothing was stored under `id`.
    #[instrument(
        name = "users_directory.service.delete_user",
        skip(self),
        fields(user_id = %id)
    )]
    pub async fn delete_user(&self, id: Uuid) -> Result<bool, DomainError> {
        info!("Deleting user");

        let _gate = self.write_gate.lock().await;
        let deleted = self
            .repo
            .delete(id)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        if deleted {
            info!("Successfully deleted user");
        } else {
            debug!("No user to delete");
        }
        Ok(deleted)
    }
}

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::contract::{
    client::UsersDirectoryApi,
    error::UsersDirectoryError,
    model::{NewUser, User, UserReplacement},
};
use crate::domain::service::Service;

/// Local implementation of the UsersDirectoryApi trait that delegates to the domain service
pub struct UsersDirectoryLocalClient {
    service: Arc<Service>,
}

impl UsersDirectoryLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl UsersDirectoryApi for UsersDirectoryLocalClient {
    async fn get_user(&self, id: Uuid) -> Result<User, UsersDirectoryError> {
        self.service.get_user(id).await.map_err(Into::into)
    }

    async fn list_users(&self) -> Result<Vec<User>, UsersDirectoryError> {
        self.service.list_users().await.map_err(Into::into)
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, UsersDirectoryError> {
        self.service.create_user(new_user).await.map_err(Into::into)
    }

    async fn update_user(
        &self,
        id: Uuid,
        replacement: UserReplacement,
    ) -> Result<User, UsersDirectoryError> {
        self.service
            .update_user(id, replacement)
            .await
            .map_err(Into::into)
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, UsersDirectoryError> {
        self.service.delete_user(id).await.map_err(Into::into)
    }
}

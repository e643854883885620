//! Service-layer spans and storage failure propagation.

mod common;

use std::sync::Arc;

use anyhow::{anyhow, Result};
use axum::http::{Method, StatusCode};
use serde_json::json;
use tracing_test::traced_test;
use uuid::Uuid;

use users_directory::contract::model::{NewUser, User, UserReplacement};
use users_directory::domain::error::DomainError;
use users_directory::domain::repo::UsersRepository;
use users_directory::domain::service::{Service, ServiceConfig};
use users_directory::{UsersDirectory, UsersDirectoryConfig};

const KNOWN_ID: &str = "550e8400-e29b-41d4-a716-446655440000";

// Read-only repository with a single seeded user
#[derive(Clone)]
struct MockUsersRepository {
    users: Vec<User>,
}

impl MockUsersRepository {
    fn new() -> Self {
        Self {
            users: vec![User {
                id: Uuid::parse_str(KNOWN_ID).unwrap(),
                name: "Test User".to_string(),
                email: "test@example.com".to_string(),
                created_at: chrono::Utc::now(),
                updated_at: chrono::Utc::now(),
            }],
        }
    }
}

#[async_trait::async_trait]
impl UsersRepository for MockUsersRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.users.iter().find(|u| u.email == email).cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>> {
        Ok(self.users.clone())
    }

    async fn insert(&self, _user: User) -> Result<()> {
        Ok(())
    }

    async fn update(&self, _user: User) -> Result<()> {
        Ok(())
    }

    async fn delete(&self, _id: Uuid) -> Result<bool> {
        Ok(true)
    }
}

// Every call fails as if the backing store were unreachable
struct BrokenRepository;

#[async_trait::async_trait]
impl UsersRepository for BrokenRepository {
    async fn find_by_id(&self, _id: Uuid) -> Result<Option<User>> {
        Err(anyhow!("store offline"))
    }

    async fn find_by_email(&self, _email: &str) -> Result<Option<User>> {
        Err(anyhow!("store offline"))
    }

    async fn list_all(&self) -> Result<Vec<User>> {
        Err(anyhow!("store offline"))
    }

    async fn insert(&self, _user: User) -> Result<()> {
        Err(anyhow!("store offline"))
    }

    async fn update(&self, _user: User) -> Result<()> {
        Err(anyhow!("store offline"))
    }

    async fn delete(&self, _id: Uuid) -> Result<bool> {
        Err(anyhow!("store offline"))
    }
}

fn service() -> Service {
    Service::new(Arc::new(MockUsersRepository::new()), ServiceConfig::default())
}

#[traced_test]
#[tokio::test]
async fn get_user_emits_spans() {
    let result = service().get_user(Uuid::parse_str(KNOWN_ID).unwrap()).await;

    assert!(result.is_ok());
    assert!(logs_contain("users_directory.service.get_user"));
    assert!(logs_contain("Successfully retrieved user"));
}

#[traced_test]
#[tokio::test]
async fn create_user_records_email_field() {
    let new_user = NewUser {
        name: "New User".to_string(),
        email: "new@example.com".to_string(),
    };

    let result = service().create_user(new_user).await;

    assert!(result.is_ok());
    assert!(logs_contain("users_directory.service.create_user"));
    assert!(logs_contain("new@example.com"));
}

#[traced_test]
#[tokio::test]
async fn update_user_emits_spans() {
    let result = service()
        .update_user(
            Uuid::parse_str(KNOWN_ID).unwrap(),
            UserReplacement {
                name: "Renamed".to_string(),
                email: "test@example.com".to_string(),
            },
        )
        .await;

    let user = result.unwrap();
    assert_eq!(user.name, "Renamed");
    assert!(user.updated_at > user.created_at);
    assert!(logs_contain("users_directory.service.update_user"));
}

#[traced_test]
#[tokio::test]
async fn service_reports_storage_failures() {
    let svc = Service::new(Arc::new(BrokenRepository), ServiceConfig::default());

    let err = svc.list_users().await.unwrap_err();
    assert!(matches!(err, DomainError::Storage { .. }));

    let err = svc.get_user(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, DomainError::Storage { .. }));

    let err = svc.delete_user(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, DomainError::Storage { .. }));
}

#[traced_test]
#[tokio::test]
async fn validation_runs_before_storage_is_touched() {
    let svc = Service::new(Arc::new(BrokenRepository), ServiceConfig::default());

    let err = svc
        .create_user(NewUser {
            name: "Bad Mail".to_string(),
            email: ".com".to_string(),
        })
        .await
        .unwrap_err();

    assert!(err.is_validation());
}

#[traced_test]
#[tokio::test]
async fn storage_failure_maps_to_internal_server_error() {
    let module = UsersDirectory::with_repository(
        Arc::new(BrokenRepository),
        UsersDirectoryConfig::default(),
    );
    let app = common::app_for(&module);

    let resp = common::send(&app, Method::GET, "/users", None).await;
    assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(resp.json(), json!({ "error": "Internal server error." }));

    let resp = common::send(
        &app,
        Method::POST,
        "/users",
        Some(json!({ "name": "Any", "email": "any@example.com" })),
    )
    .await;
    assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
    // the underlying cause is not leaked to clients
    assert!(!String::from_utf8_lossy(&resp.body).contains("store offline"));
}

#![allow(dead_code)]

use axum::{
    body::{Body, Bytes},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use api_ingress::{ApiIngress, ApiIngressConfig};
use users_directory::{UsersDirectory, UsersDirectoryConfig};

/// Full HTTP stack: users routes behind the ingress middleware.
pub fn app_for(module: &UsersDirectory) -> Router {
    app_with_ingress(module, ApiIngressConfig::default())
}

pub fn app_with_ingress(module: &UsersDirectory, ingress: ApiIngressConfig) -> Router {
    ApiIngress::new(ingress)
        .with_openapi(&UsersDirectory::openapi())
        .expect("openapi renders")
        .build_router(module.register_rest(Router::new()))
}

pub fn app() -> Router {
    app_for(&UsersDirectory::new(UsersDirectoryConfig::default()))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body should be JSON")
    }
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    TestResponse { status, body }
}

/// Create a user over HTTP and return the response body.
pub async fn create_user(app: &Router, name: &str, email: &str) -> Value {
    let resp = send(
        app,
        Method::POST,
        "/users",
        Some(serde_json::json!({ "name": name, "email": email })),
    )
    .await;
    assert_eq!(resp.status, StatusCode::CREATED, "create should succeed");
    resp.json()
}

pub async fn delete_user(app: &Router, id: &str) -> StatusCode {
    send(app, Method::DELETE, &format!("/users/{id}"), None)
        .await
        .status
}

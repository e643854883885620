use std::sync::Arc;

use tracing::{debug, info};
use utoipa::OpenApi;

use crate::api::rest::{openapi::UsersApiDoc, routes};
use crate::config::UsersDirectoryConfig;
use crate::contract::client::UsersDirectoryApi;
use crate::domain::repo::UsersRepository;
use crate::domain::service::{Service, ServiceConfig};
use crate::gateways::local::UsersDirectoryLocalClient;
use crate::infra::storage::InMemoryUsersRepository;

/// Module root: wires the repository into the domain service and exposes it
/// both as REST routes and as an in-process client.
#[derive(Clone)]
pub struct UsersDirectory {
    service: Arc<Service>,
}

impl UsersDirectory {
    /// Module backed by the in-memory repository.
    pub fn new(cfg: UsersDirectoryConfig) -> Self {
        Self::with_repository(Arc::new(InMemoryUsersRepository::new()), cfg)
    }

    pub fn with_repository(repo: Arc<dyn UsersRepository>, cfg: UsersDirectoryConfig) -> Self {
        info!("Initializing users_directory module");
        debug!(
            "Loaded users_directory config: max_name_length={}",
            cfg.max_name_length
        );

        let service = Service::new(
            repo,
            ServiceConfig {
                max_name_length: cfg.max_name_length,
            },
        );
        Self {
            service: Arc::new(service),
        }
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    /// In-process client over the same service the REST routes use.
    pub fn client(&self) -> Arc<dyn UsersDirectoryApi> {
        Arc::new(UsersDirectoryLocalClient::new(self.service.clone()))
    }

    pub fn register_rest(&self, router: axum::Router) -> axum::Router {
        info!("Registering users_directory REST routes");
        routes::register_routes(router, self.service.clone())
    }

    pub fn openapi() -> utoipa::openapi::OpenApi {
        UsersApiDoc::openapi()
    }
}

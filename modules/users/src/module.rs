use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info};

use crate::api::rest::routes;
use crate::config::UsersConfig;
use crate::contract::client::UsersApi;
use crate::domain::repo::UsersStore;
use crate::domain::service::{Service, ServiceConfig};
use crate::gateways::local::UsersLocalClient;
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::sea_orm_repo::SeaOrmUsersStore;

/// The users module: store, domain service, in-process client and REST routes.
#[derive(Clone)]
pub struct UsersModule {
    service: Arc<Service>,
    client: Arc<dyn UsersApi>,
}

impl UsersModule {
    /// Wire the SeaORM store to the domain service.
    pub fn init(db: DatabaseConnection, cfg: &UsersConfig) -> Self {
        info!("Initializing users module");
        debug!(
            "Loaded users config: default_page_size={}, max_page_size={}",
            cfg.default_page_size, cfg.max_page_size
        );
        Self::with_store(Arc::new(SeaOrmUsersStore::new(db)), cfg.into())
    }

    /// Wire an arbitrary store implementation (used by tests with mock stores).
    pub fn with_store(store: Arc<dyn UsersStore>, config: ServiceConfig) -> Self {
        let service = Arc::new(Service::new(store, config));
        let client: Arc<dyn UsersApi> = Arc::new(UsersLocalClient::new(service.clone()));
        Self { service, client }
    }

    /// Create the `users` table and its active-email index if missing.
    pub async fn migrate(db: &DatabaseConnection) -> anyhow::Result<()> {
        info!("Running users database migrations");
        Migrator::up(db, None)
            .await
            .context("users migrations failed")?;
        info!("Users database migrations completed successfully");
        Ok(())
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    /// In-process API for other modules.
    pub fn client(&self) -> Arc<dyn UsersApi> {
        self.client.clone()
    }

    pub fn register_rest(&self, router: Router) -> Router {
        info!("Registering users REST routes");
        routes::register_routes(router, self.service.clone())
    }
}

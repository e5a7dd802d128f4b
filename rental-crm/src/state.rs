use std::sync::Arc;

use rental_core::RentalConfig;
use rental_data_sqlx::HasPool;
use rental_security::{
    IdentityHeaders, InMemorySessionStore, RedirectFailureHandler, RoleRedirectSuccessHandler,
};
use sqlx::{Pool, Sqlite, SqlitePool};

use crate::config::CrmSettings;
use crate::services::OrderService;

#[derive(Clone)]
pub struct AppState {
    pub order_service: OrderService,
    pub pool: SqlitePool,
    pub sessions: InMemorySessionStore,
    pub login_handler: Arc<RoleRedirectSuccessHandler>,
    pub failure_handler: Arc<RedirectFailureHandler>,
    pub identity_headers: IdentityHeaders,
    pub config: RentalConfig,
}

impl AppState {
    pub fn new(pool: SqlitePool, settings: &CrmSettings, config: RentalConfig) -> Self {
        Self {
            order_service: OrderService::new(pool.clone()),
            pool,
            sessions: InMemorySessionStore::with_ttl(settings.session_ttl),
            login_handler: Arc::new(RoleRedirectSuccessHandler::new()),
            failure_handler: Arc::new(RedirectFailureHandler::default()),
            identity_headers: settings.identity_headers.clone(),
            config,
        }
    }
}

impl HasPool<Sqlite> for AppState {
    fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }
}

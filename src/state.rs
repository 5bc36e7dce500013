use std::sync::Arc;

use crate::auth::TokenService;
use crate::config::AppConfig;
use crate::database::{
    DatabaseManager, EmployeeStore, MemoryEmployeeStore, MemoryUserStore, PgEmployeeRepository,
    PgUserRepository, UserStore,
};
use crate::services::{AuthService, EmployeeService};
use crate::storage::{ImageStore, MemoryImageStore};

/// Shared, read-only handles for every request
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub tokens: Arc<TokenService>,
    pub auth: AuthService,
    pub employees: EmployeeService,
    /// `None` when running on in-memory stores
    pub database: Option<DatabaseManager>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        users: Arc<dyn UserStore>,
        employees: Arc<dyn EmployeeStore>,
        images: Arc<dyn ImageStore>,
        database: Option<DatabaseManager>,
    ) -> Self {
        let tokens = Arc::new(TokenService::new(&config.security));
        Self {
            auth: AuthService::new(users, tokens.clone()),
            employees: EmployeeService::new(employees, images),
            tokens,
            config: Arc::new(config),
            database,
        }
    }

    /// Postgres-backed stores sharing one pool
    pub fn with_database(config: AppConfig, database: DatabaseManager, images: Arc<dyn ImageStore>) -> Self {
        let pool = database.pool();
        Self::new(
            config,
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgEmployeeRepository::new(pool)),
            images,
            Some(database),
        )
    }

    /// Everything in process, images included. Data is lost on exit.
    pub fn in_memory(config: AppConfig) -> Self {
        let images = Arc::new(MemoryImageStore::new(config.images.folder.clone()));
        Self::new(
            config,
            Arc::new(MemoryUserStore::new()),
            Arc::new(MemoryEmployeeStore::new()),
            images,
            None,
        )
    }
}

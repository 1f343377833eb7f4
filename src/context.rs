/// Application context and dependency injection
use crate::{
    config::ServerConfig,
    db::{self, DatabaseOptions, SqliteAccountStore},
    error::FingerResult,
    lookup::Resolver,
};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Application context holding all shared services
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<ServerConfig>,
    pub account_db: SqlitePool,
    pub account_store: Arc<SqliteAccountStore>,
    pub resolver: Arc<Resolver>,
}

impl AppContext {
    /// Create a new application context from configuration
    pub async fn new(config: ServerConfig) -> FingerResult<Self> {
        // Validate configuration
        config.validate()?;

        // Create data directories if they don't exist
        Self::ensure_directories(&config).await?;

        // Initialize account database
        let options = DatabaseOptions {
            max_connections: config.storage.max_connections,
            enable_wal: config.storage.enable_wal,
        };
        let account_db = db::create_pool(&config.storage.account_db, options).await?;

        db::run_migrations(&account_db).await?;
        db::test_connection(&account_db).await?;

        let ctx = Self::from_parts(config, account_db);
        tracing::info!(
            "Resource lookups registered for schemes: {}",
            ctx.resolver.schemes().join(", ")
        );

        Ok(ctx)
    }

    /// Assemble a context around an already migrated pool
    pub fn from_parts(config: ServerConfig, account_db: SqlitePool) -> Self {
        let account_store = Arc::new(SqliteAccountStore::new(account_db.clone()));
        let resolver = Arc::new(Resolver::new(account_store.clone()));

        Self {
            config: Arc::new(config),
            account_db,
            account_store,
            resolver,
        }
    }

    /// Replace the resolver, e.g. with one built over a custom registry
    pub fn with_resolver(mut self, resolver: Resolver) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }

    /// Ensure required directories exist
    async fn ensure_directories(config: &ServerConfig) -> FingerResult<()> {
        let dir = &config.storage.data_directory;
        if !dir.exists() {
            tokio::fs::create_dir_all(dir).await?;
        }

        Ok(())
    }

    /// Get service URL
    pub fn service_url(&self) -> String {
        format!(
            "http://{}:{}",
            self.config.service.hostname, self.config.service.port
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;

    #[tokio::test]
    async fn test_new_creates_database() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = test_config();
        config.storage.data_directory = dir.path().join("data");
        config.storage.account_db = config.storage.data_directory.join("account.sqlite");

        let ctx = AppContext::new(config).await.unwrap();

        assert!(ctx.config.storage.account_db.exists());
        assert_eq!(ctx.account_store.count().await.unwrap(), 0);
        assert_eq!(ctx.resolver.schemes(), vec!["acct", "mailto"]);
        assert_eq!(ctx.service_url(), "http://localhost:8080");
    }

    #[tokio::test]
    async fn test_new_rejects_invalid_config() {
        let mut config = test_config();
        config.service.hostname = String::new();

        assert!(AppContext::new(config).await.is_err());
    }
}

use sea_orm::{ConnectOptions, DatabaseConnection, DbErr};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::shared::config::PoolConfig;

/// Process-wide store handle. Created once at startup and shared by every adapter.
#[derive(Clone, Debug)]
pub struct Database {
    conn: Arc<DatabaseConnection>,
}

impl Database {
    #[cfg(not(tarpaulin_include))]
    pub async fn connect(url: &str, pool: &PoolConfig) -> Result<Self, DbErr> {
        let mut opt = ConnectOptions::new(url.to_owned());
        opt.max_connections(pool.max_connections)
            .min_connections(pool.min_connections)
            .connect_timeout(Duration::from_secs(5))
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false);

        let conn = sea_orm::Database::connect(opt).await?;
        info!(
            max_connections = pool.max_connections,
            "Database connection pool ready"
        );

        Ok(Self::from_connection(conn))
    }

    pub fn from_connection(conn: DatabaseConnection) -> Self {
        Self {
            conn: Arc::new(conn),
        }
    }

    pub fn connection(&self) -> Arc<DatabaseConnection> {
        Arc::clone(&self.conn)
    }

    pub async fn ping(&self) -> Result<(), DbErr> {
        self.conn.ping().await
    }

    pub async fn close(&self) {
        match self.conn.close_by_ref().await {
            Ok(()) => info!("Database connection pool closed"),
            Err(e) => warn!(error = %e, "Failed to close database connection pool"),
        }
    }
}

/// Postgres unique violations surface as SQLSTATE 23505.
pub fn is_unique_violation(err: &DbErr) -> bool {
    let err_str = err.to_string().to_lowercase();
    err_str.contains("23505")
        || err_str.contains("duplicate key")
        || err_str.contains("unique constraint")
}

use crate::{acquire_with_metrics, close_pool, create_pool, spawn_metrics_updater, DbConfig};
use async_trait::async_trait;
use sqlx::PgPool;

/// A database backend the service lifecycle can open, probe and close.
///
/// `connect` may fail while the server is still booting; callers retry it.
/// `ping` is the readiness probe and must only succeed once the database
/// answers queries.
#[async_trait]
pub trait DatabaseClient: Send + Sync + 'static {
    type Handle: Clone + Send + Sync + 'static;

    /// Service name used for logs and metric labels
    fn name(&self) -> &str;

    async fn connect(&self) -> Result<Self::Handle, sqlx::Error>;

    async fn ping(&self, handle: &Self::Handle) -> Result<(), sqlx::Error>;

    /// Release every connection held by `handle`
    async fn disconnect(&self, handle: Self::Handle) -> Result<(), sqlx::Error>;

    /// Connections currently open through `handle`
    fn open_connections(&self, handle: &Self::Handle) -> u32;

    /// Called once the caller has accepted `handle` as its live connection
    fn on_ready(&self, _handle: &Self::Handle) {}
}

/// Postgres `cannot_connect_now`, sent while the server is still starting up
const CANNOT_CONNECT_NOW: &str = "57P03";
const TOO_MANY_CONNECTIONS: &str = "53300";

/// Whether a connect failure can clear up on its own.
///
/// Transport errors and a server that is still booting are transient. A bad
/// DSN, rejected credentials or a TLS failure will fail the same way on
/// every attempt.
pub fn is_transient(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::WorkerCrashed => true,
        sqlx::Error::Database(db) => matches!(
            db.code().as_deref(),
            Some(CANNOT_CONNECT_NOW | TOO_MANY_CONNECTIONS)
        ),
        _ => false,
    }
}

/// Postgres implementation backed by a verified [`PgPool`]
#[derive(Debug, Clone)]
pub struct PgDatabase {
    config: DbConfig,
}

impl PgDatabase {
    pub fn new(config: DbConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl DatabaseClient for PgDatabase {
    type Handle = PgPool;

    fn name(&self) -> &str {
        &self.config.service_name
    }

    async fn connect(&self) -> Result<PgPool, sqlx::Error> {
        create_pool(self.config.clone()).await
    }

    async fn ping(&self, pool: &PgPool) -> Result<(), sqlx::Error> {
        if pool.is_closed() {
            return Err(sqlx::Error::PoolClosed);
        }
        let mut conn = acquire_with_metrics(pool, &self.config.service_name).await?;
        sqlx::query("SELECT 1").execute(&mut *conn).await.map(|_| ())
    }

    async fn disconnect(&self, pool: PgPool) -> Result<(), sqlx::Error> {
        close_pool(&pool, &self.config.service_name).await;
        Ok(())
    }

    fn open_connections(&self, pool: &PgPool) -> u32 {
        pool.size()
    }

    fn on_ready(&self, pool: &PgPool) {
        spawn_metrics_updater(pool.clone(), self.config.service_name.clone());
    }
}

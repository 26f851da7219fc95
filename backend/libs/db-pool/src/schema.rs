//! Declarative schema initialization
//!
//! A service declares its tables once as a [`SchemaDefinition`]. At boot
//! [`initialize_schema`] opens a dedicated connection, creates whatever tables
//! are missing inside one transaction, and closes the connection again before
//! the pool is ever built.

use crate::{is_transient, DbConfig};
use async_trait::async_trait;
use resilience::{with_retry_if, RetryConfig, RetryError};
use sqlx::{Connection, PgConnection};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{info, warn};

/// One table and the statement that creates it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableDefinition {
    pub name: &'static str,
    pub ddl: &'static str,
}

impl TableDefinition {
    pub const fn new(name: &'static str, ddl: &'static str) -> Self {
        Self { name, ddl }
    }
}

/// Ordered set of tables owned by a service
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaDefinition {
    tables: Vec<TableDefinition>,
}

impl SchemaDefinition {
    pub fn new(tables: impl IntoIterator<Item = TableDefinition>) -> Self {
        Self {
            tables: tables.into_iter().collect(),
        }
    }

    pub fn tables(&self) -> &[TableDefinition] {
        &self.tables
    }

    /// Reject definitions that could not be applied idempotently.
    ///
    /// Every table needs a non-empty unique name and a
    /// `CREATE TABLE IF NOT EXISTS <name>` statement for that same name.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut seen = HashSet::new();

        for table in &self.tables {
            let name = table.name.trim();
            if name.is_empty() {
                return Err(SchemaError::InvalidDefinition(
                    "table name must not be empty".to_string(),
                ));
            }
            if !seen.insert(name.to_ascii_lowercase()) {
                return Err(SchemaError::InvalidDefinition(format!(
                    "table `{name}` is declared more than once"
                )));
            }
            if !creates_table(table.ddl, name) {
                return Err(SchemaError::InvalidDefinition(format!(
                    "ddl for `{name}` must be `CREATE TABLE IF NOT EXISTS {name} (...)`"
                )));
            }
        }

        Ok(())
    }
}

fn creates_table(ddl: &str, name: &str) -> bool {
    let normalized = ddl
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_lowercase();
    let expected = format!("create table if not exists {}", name.to_ascii_lowercase());

    match normalized.strip_prefix(&expected) {
        Some(rest) => rest.starts_with('(') || rest.starts_with(" ("),
        None => false,
    }
}

/// Which tables a run created and which were already present
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaReport {
    pub created: Vec<String>,
    pub existing: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("invalid schema definition: {0}")]
    InvalidDefinition(String),

    #[error("could not connect for schema initialization after {attempts} attempts: {source}")]
    Connect {
        attempts: u32,
        #[source]
        source: sqlx::Error,
    },

    #[error("failed to inspect existing tables: {0}")]
    Inspect(#[source] sqlx::Error),

    #[error("failed to create table `{table}`: {source}")]
    Ddl {
        table: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("schema transaction failed: {0}")]
    Transaction(#[source] sqlx::Error),
}

/// Where schema statements run. Implemented for a live Postgres connection.
#[async_trait]
pub trait SchemaExecutor: Send {
    /// Names of the tables visible in the current schema
    async fn existing_tables(&mut self) -> Result<Vec<String>, sqlx::Error>;

    async fn execute_ddl(&mut self, ddl: &str) -> Result<(), sqlx::Error>;
}

#[async_trait]
impl SchemaExecutor for PgConnection {
    async fn existing_tables(&mut self) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT table_name::text FROM information_schema.tables \
             WHERE table_schema = current_schema()",
        )
        .fetch_all(&mut *self)
        .await
    }

    async fn execute_ddl(&mut self, ddl: &str) -> Result<(), sqlx::Error> {
        sqlx::query(ddl).execute(&mut *self).await.map(|_| ())
    }
}

/// Create every declared table that does not exist yet
pub async fn create_all<E>(
    executor: &mut E,
    schema: &SchemaDefinition,
) -> Result<SchemaReport, SchemaError>
where
    E: SchemaExecutor + ?Sized,
{
    schema.validate()?;

    let present: HashSet<String> = executor
        .existing_tables()
        .await
        .map_err(SchemaError::Inspect)?
        .into_iter()
        .map(|name| name.to_ascii_lowercase())
        .collect();

    let mut report = SchemaReport::default();
    for table in schema.tables() {
        if present.contains(&table.name.to_ascii_lowercase()) {
            report.existing.push(table.name.to_string());
            continue;
        }

        executor
            .execute_ddl(table.ddl)
            .await
            .map_err(|source| SchemaError::Ddl {
                table: table.name.to_string(),
                source,
            })?;
        report.created.push(table.name.to_string());
    }

    Ok(report)
}

/// Apply `schema` once over a dedicated connection.
///
/// Only opening the connection is retried, and only while the failure is
/// transient. DDL failures abort immediately and roll the whole transaction
/// back.
pub async fn initialize_schema(
    config: &DbConfig,
    schema: &SchemaDefinition,
    retry: RetryConfig,
) -> Result<SchemaReport, SchemaError> {
    schema.validate()?;

    let connect_timeout = Duration::from_secs(config.connect_timeout_secs);
    let mut conn = with_retry_if(
        retry,
        || connect_once(&config.database_url, connect_timeout),
        is_transient,
    )
    .await
    .map_err(|e: RetryError<sqlx::Error>| SchemaError::Connect {
        attempts: e.attempts(),
        source: e.into_inner(),
    })?;

    let outcome = apply_in_transaction(&mut conn, schema).await;

    if let Err(e) = conn.close().await {
        warn!(
            service = %config.service_name,
            error = %e,
            "Failed to close schema connection"
        );
    }

    let report = outcome?;
    info!(
        service = %config.service_name,
        created = ?report.created,
        existing = ?report.existing,
        "Schema initialized"
    );
    Ok(report)
}

async fn connect_once(url: &str, timeout: Duration) -> Result<PgConnection, sqlx::Error> {
    match tokio::time::timeout(timeout, PgConnection::connect(url)).await {
        Ok(result) => result,
        Err(_) => Err(sqlx::Error::Io(std::io::Error::new(
            std::io::ErrorKind::TimedOut,
            "schema connection timeout",
        ))),
    }
}

async fn apply_in_transaction(
    conn: &mut PgConnection,
    schema: &SchemaDefinition,
) -> Result<SchemaReport, SchemaError> {
    let mut tx = conn.begin().await.map_err(SchemaError::Transaction)?;
    let report = create_all(&mut *tx, schema).await?;
    tx.commit().await.map_err(SchemaError::Transaction)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CASTS: TableDefinition = TableDefinition::new(
        "casts",
        "CREATE TABLE IF NOT EXISTS casts (id SERIAL PRIMARY KEY, name VARCHAR(50) NOT NULL)",
    );

    #[test]
    fn test_validate_accepts_well_formed_definition() {
        let schema = SchemaDefinition::new([CASTS]);
        assert!(schema.validate().is_ok());
    }

    #[test]
    fn test_validate_tolerates_whitespace_and_case() {
        let schema = SchemaDefinition::new([TableDefinition::new(
            "movies",
            "create table   if not exists\n    movies(\n id serial primary key\n)",
        )]);
        assert!(schema.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let schema = SchemaDefinition::new([TableDefinition::new(
            "  ",
            "CREATE TABLE IF NOT EXISTS x (id int)",
        )]);
        assert!(matches!(
            schema.validate(),
            Err(SchemaError::InvalidDefinition(_))
        ));
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let schema = SchemaDefinition::new([CASTS, CASTS]);
        let err = schema.validate().unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_validate_rejects_mismatched_or_unguarded_ddl() {
        let other_table = SchemaDefinition::new([TableDefinition::new(
            "casts",
            "CREATE TABLE IF NOT EXISTS casts_archive (id int)",
        )]);
        assert!(other_table.validate().is_err());

        let unguarded = SchemaDefinition::new([TableDefinition::new(
            "casts",
            "CREATE TABLE casts (id int)",
        )]);
        assert!(unguarded.validate().is_err());

        let destructive = SchemaDefinition::new([TableDefinition::new(
            "casts",
            "DROP TABLE casts",
        )]);
        assert!(destructive.validate().is_err());
    }
}

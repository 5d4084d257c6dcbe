//! Database layer for the cleaner.
//!
//! The target database belongs to the WordPress install; this module only
//! wraps the connection pool and executes the statements the cleanup catalog
//! renders. It is organized into submodules:
//! - `dialect` - MySQL / SQLite differences (quoting, metadata, truncate, optimize)
//! - `probe` - live schema existence checks

mod dialect;
mod probe;

pub use dialect::Dialect;
pub use probe::SchemaProbe;

use crate::config::DatabaseConfig;
use crate::errors::{DatabaseError, StatementError};
use sqlx::any::{AnyPoolOptions, AnyQueryResult, AnyRow};
use sqlx::{Any, AnyPool};
use tracing::{debug, error, info};

/// A value bound to a `?` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Text(String),
    Integer(i64),
}

/// One parameterized statement ready for execution.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub binds: Vec<BindValue>,
}

impl Statement {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            binds: Vec::new(),
        }
    }

    pub fn bind_text(mut self, value: impl Into<String>) -> Self {
        self.binds.push(BindValue::Text(value.into()));
        self
    }

    pub fn bind_int(mut self, value: i64) -> Self {
        self.binds.push(BindValue::Integer(value));
        self
    }
}

pub struct Database {
    pool: AnyPool,
    dialect: Dialect,
}

impl Database {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let dialect = Dialect::from_url(&config.url)?;
        sqlx::any::install_default_drivers();

        info!(
            "Connecting to {} database (max {} connections)",
            dialect, config.max_connections
        );

        let pool = AnyPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await
            .map_err(|e| {
                error!("FAILED to connect to database: {}", e);
                DatabaseError::ConnectionFailed {
                    reason: e.to_string(),
                }
            })?;

        info!("Successfully connected to {} database", dialect);
        Ok(Self { pool, dialect })
    }

    /// Wrap an existing pool, e.g. one built by a test fixture.
    pub fn from_pool(pool: AnyPool, dialect: Dialect) -> Self {
        Self { pool, dialect }
    }

    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn probe(&self) -> SchemaProbe<'_> {
        SchemaProbe::new(self)
    }

    /// Execute one statement and return the number of affected rows.
    pub async fn execute(&self, statement: &Statement) -> Result<u64, StatementError> {
        debug!("Executing: {}", statement.sql);

        let result: Result<AnyQueryResult, sqlx::Error> = if statement.binds.is_empty() {
            sqlx::raw_sql(&statement.sql).execute(&self.pool).await
        } else {
            let mut query = sqlx::query::<Any>(&statement.sql);
            for value in &statement.binds {
                query = match value {
                    BindValue::Text(text) => query.bind(text.as_str()),
                    BindValue::Integer(number) => query.bind(*number),
                };
            }
            query.execute(&self.pool).await
        };

        result
            .map(|done| done.rows_affected())
            .map_err(|e| StatementError {
                statement: statement.sql.clone(),
                reason: e.to_string(),
            })
    }

    /// Execute a statement that reports through its result set, such as
    /// MySQL's `OPTIMIZE TABLE`.
    pub async fn fetch_all(&self, statement: &Statement) -> Result<Vec<AnyRow>, StatementError> {
        debug!("Fetching: {}", statement.sql);

        let result = if statement.binds.is_empty() {
            sqlx::raw_sql(&statement.sql).fetch_all(&self.pool).await
        } else {
            let mut query = sqlx::query::<Any>(&statement.sql);
            for value in &statement.binds {
                query = match value {
                    BindValue::Text(text) => query.bind(text.as_str()),
                    BindValue::Integer(number) => query.bind(*number),
                };
            }
            query.fetch_all(&self.pool).await
        };

        result.map_err(|e| StatementError {
            statement: statement.sql.clone(),
            reason: e.to_string(),
        })
    }
}

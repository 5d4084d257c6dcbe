use super::Database;
use sqlx::Any;
use tracing::{debug, warn};

/// Live existence checks against the database's own metadata.
///
/// Nothing is cached: schema shape differs between installs and WooCommerce
/// versions, and may change between runs. A failing metadata query counts as
/// "does not exist" so dependent rules are skipped rather than run blind.
pub struct SchemaProbe<'a> {
    database: &'a Database,
}

impl<'a> SchemaProbe<'a> {
    pub fn new(database: &'a Database) -> Self {
        Self { database }
    }

    pub async fn table_exists(&self, table: &str) -> bool {
        let sql = self.database.dialect().table_exists_query();
        let result = sqlx::query_scalar::<Any, i64>(sql)
            .bind(table)
            .fetch_one(self.database.pool())
            .await;

        match result {
            Ok(count) => {
                debug!("Probe table {}: {}", table, count > 0);
                count > 0
            }
            Err(e) => {
                warn!("Table probe for {} failed, treating as missing: {}", table, e);
                false
            }
        }
    }

    pub async fn column_exists(&self, table: &str, column: &str) -> bool {
        let sql = self.database.dialect().column_exists_query();
        let result = sqlx::query_scalar::<Any, i64>(sql)
            .bind(table)
            .bind(column)
            .fetch_one(self.database.pool())
            .await;

        match result {
            Ok(count) => {
                debug!("Probe column {}.{}: {}", table, column, count > 0);
                count > 0
            }
            Err(e) => {
                warn!(
                    "Column probe for {}.{} failed, treating as missing: {}",
                    table, column, e
                );
                false
            }
        }
    }

    /// Subset of `tables` that does not exist, in input order.
    pub async fn missing_tables(&self, tables: &[&str]) -> Vec<String> {
        let mut missing = Vec::new();
        for table in tables {
            if !self.table_exists(table).await {
                missing.push((*table).to_string());
            }
        }
        missing
    }
}

use crate::errors::DatabaseError;
use serde::Serialize;

/// SQL flavour of the connected database.
///
/// Production WordPress installs run on MySQL or MariaDB; SQLite covers
/// embedded installs and the test suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    MySql,
    Sqlite,
}

impl Dialect {
    pub fn from_url(url: &str) -> Result<Self, DatabaseError> {
        let scheme = url.split(':').next().unwrap_or_default().to_ascii_lowercase();
        match scheme.as_str() {
            "mysql" | "mariadb" => Ok(Dialect::MySql),
            "sqlite" => Ok(Dialect::Sqlite),
            _ => Err(DatabaseError::UnsupportedUrl { scheme }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::MySql => "mysql",
            Dialect::Sqlite => "sqlite",
        }
    }

    /// Quote a validated identifier for interpolation into a statement.
    pub fn quote(&self, identifier: &str) -> String {
        match self {
            Dialect::MySql => format!("`{}`", identifier),
            Dialect::Sqlite => format!("\"{}\"", identifier),
        }
    }

    /// Binds: table name
    pub fn table_exists_query(&self) -> &'static str {
        match self {
            Dialect::MySql => {
                "SELECT COUNT(*) FROM information_schema.tables \
                 WHERE table_schema = DATABASE() AND table_name = ?"
            }
            Dialect::Sqlite => "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
        }
    }

    /// Binds: table name, column name
    pub fn column_exists_query(&self) -> &'static str {
        match self {
            Dialect::MySql => {
                "SELECT COUNT(*) FROM information_schema.columns \
                 WHERE table_schema = DATABASE() AND table_name = ? AND column_name = ?"
            }
            Dialect::Sqlite => "SELECT COUNT(*) FROM pragma_table_info(?) WHERE name = ?",
        }
    }

    /// SQLite has no TRUNCATE; an unfiltered DELETE is its equivalent.
    pub fn truncate(&self, table: &str) -> String {
        match self {
            Dialect::MySql => format!("TRUNCATE TABLE {}", self.quote(table)),
            Dialect::Sqlite => format!("DELETE FROM {}", self.quote(table)),
        }
    }

    /// Storage compaction over the given tables. SQLite can only vacuum the
    /// whole database file.
    pub fn optimize(&self, tables: &[&str]) -> Option<String> {
        if tables.is_empty() {
            return None;
        }
        match self {
            Dialect::MySql => {
                let quoted: Vec<String> = tables.iter().map(|t| self.quote(t)).collect();
                Some(format!("OPTIMIZE TABLE {}", quoted.join(", ")))
            }
            Dialect::Sqlite => Some("VACUUM".to_string()),
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

use super::{Category, RuleId};
use crate::config::{RetentionConfig, TableNames};
use crate::constants::markers;
use crate::database::{BindValue, Dialect, Statement};
use chrono::{DateTime, Duration, Utc};

/// One table, or table + column, a rule depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaintenanceTarget {
    pub table: String,
    pub column: Option<String>,
    /// Required targets are assumed present and never probed
    pub required: bool,
}

impl MaintenanceTarget {
    pub fn required_table(table: &str) -> Self {
        Self {
            table: table.to_string(),
            column: None,
            required: true,
        }
    }

    pub fn optional_table(table: &str) -> Self {
        Self {
            table: table.to_string(),
            column: None,
            required: false,
        }
    }

    pub fn optional_column(table: &str, column: &str) -> Self {
        Self {
            table: table.to_string(),
            column: Some(column.to_string()),
            required: false,
        }
    }

    pub fn describe(&self) -> String {
        match &self.column {
            Some(column) => format!("column {}.{}", self.table, column),
            None => format!("table {}", self.table),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// `DELETE FROM <table> WHERE <predicate>`; identifiers in the predicate
    /// are already quoted for the run's dialect
    Delete {
        predicate: String,
        binds: Vec<BindValue>,
    },
    /// Drop every row; used for derived caches only
    Truncate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CleanupRule {
    pub id: RuleId,
    pub category: Category,
    pub table: String,
    pub targets: Vec<MaintenanceTarget>,
    pub effect: Effect,
}

impl CleanupRule {
    pub fn statement(&self, dialect: Dialect) -> Statement {
        match &self.effect {
            Effect::Delete { predicate, binds } => Statement {
                sql: format!("DELETE FROM {} WHERE {}", dialect.quote(&self.table), predicate),
                binds: binds.clone(),
            },
            Effect::Truncate => Statement::new(dialect.truncate(&self.table)),
        }
    }

    pub fn optional_targets(&self) -> impl Iterator<Item = &MaintenanceTarget> {
        self.targets.iter().filter(|t| !t.required)
    }
}

/// Everything a run's rules are rendered from.
#[derive(Debug, Clone)]
pub struct CleanupContext<'a> {
    pub tables: &'a TableNames,
    pub retention: &'a RetentionConfig,
    pub dialect: Dialect,
    /// Wall clock of the run; all age thresholds derive from it
    pub now: DateTime<Utc>,
}

impl<'a> CleanupContext<'a> {
    pub fn quote(&self, identifier: &str) -> String {
        self.dialect.quote(identifier)
    }

    pub fn order_cutoff(&self) -> DateTime<Utc> {
        self.now - Duration::days(self.retention.order_days)
    }

    pub fn webhook_cutoff(&self) -> DateTime<Utc> {
        self.now - Duration::days(self.retention.webhook_days)
    }
}

/// LIKE pattern matching every value that starts with `prefix` literally.
pub fn like_prefix(prefix: &str) -> String {
    let escape = markers::LIKE_ESCAPE;
    let mut pattern = String::with_capacity(prefix.len() * 2 + 1);
    for c in prefix.chars() {
        if c == '_' || c == '%' || c == escape {
            pattern.push(escape);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// `<column> LIKE ? ESCAPE '!'`, to be bound with [`like_prefix`].
pub fn like_predicate(column: &str) -> String {
    format!("{} LIKE ? ESCAPE '{}'", column, markers::LIKE_ESCAPE)
}

/// `?, ?, ?` for `n` values
pub fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

pub fn sql_datetime(at: DateTime<Utc>) -> String {
    at.format(markers::SQL_DATETIME_FORMAT).to_string()
}

// File: cleaner/src/config/mod.rs
pub mod manager;
use crate::constants::{defaults, retention, schedule, tables};
use serde::{Deserialize, Serialize};
pub use manager::ConfigManager;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_table_prefix")]
    pub table_prefix: String,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub retention: RetentionConfig,
    // Resolved from table_prefix by ConfigManager
    #[serde(skip)]
    pub tables: TableNames,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// mysql://, mariadb:// or sqlite: URL
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_interval_hours")]
    pub interval_hours: u64,
    /// 6-field cron expression; takes precedence over interval_hours
    pub cron: Option<String>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_hours: schedule::DEFAULT_INTERVAL_HOURS,
            cron: None,
        }
    }
}

impl ScheduleConfig {
    pub fn describe(&self) -> String {
        match &self.cron {
            Some(expression) => format!("cron '{}'", expression),
            None => format!("every {}h", self.interval_hours),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetentionConfig {
    #[serde(default = "default_order_days")]
    pub order_days: i64,
    #[serde(default = "default_webhook_days")]
    pub webhook_days: i64,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            order_days: retention::ORDER_RETENTION_DAYS,
            webhook_days: retention::WEBHOOK_RETENTION_DAYS,
        }
    }
}

/// Fully resolved (prefixed) names of every table the cleaner may touch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableNames {
    pub posts: String,
    pub postmeta: String,
    pub comments: String,
    pub commentmeta: String,
    pub options: String,
    pub sessions: String,
    pub cart_tracking: String,
    pub webhooks: String,
    pub product_meta_lookup: String,
}

impl TableNames {
    pub fn with_prefix(prefix: &str) -> Self {
        let resolve = |name: &str| format!("{}{}", prefix, name);
        Self {
            posts: resolve(tables::POSTS),
            postmeta: resolve(tables::POSTMETA),
            comments: resolve(tables::COMMENTS),
            commentmeta: resolve(tables::COMMENTMETA),
            options: resolve(tables::OPTIONS),
            sessions: resolve(tables::SESSIONS),
            cart_tracking: resolve(tables::CART_TRACKING),
            webhooks: resolve(tables::WEBHOOKS),
            product_meta_lookup: resolve(tables::PRODUCT_META_LOOKUP),
        }
    }

    /// Tables whose absence aborts a run before any statement is issued
    pub fn required(&self) -> Vec<&str> {
        vec![&self.posts, &self.postmeta, &self.comments]
    }

    /// Core tables the platform rules act on without probing
    pub fn core(&self) -> Vec<&str> {
        vec![
            &self.posts,
            &self.postmeta,
            &self.comments,
            &self.commentmeta,
            &self.options,
        ]
    }

    /// Add-on tables that must be probed before use
    pub fn optional(&self) -> Vec<&str> {
        vec![
            &self.sessions,
            &self.cart_tracking,
            &self.webhooks,
            &self.product_meta_lookup,
        ]
    }

    pub fn all(&self) -> Vec<&str> {
        let mut all = self.core();
        all.extend(self.optional());
        all
    }
}

impl Default for TableNames {
    fn default() -> Self {
        Self::with_prefix(defaults::TABLE_PREFIX)
    }
}

/// Table identifiers cannot be bound as parameters, so they are restricted to
/// the characters MySQL accepts unquoted.
pub fn is_valid_identifier(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= 64
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn default_host() -> String {
    defaults::HOST.to_string()
}

fn default_port() -> u16 {
    defaults::PORT
}

fn default_table_prefix() -> String {
    defaults::TABLE_PREFIX.to_string()
}

fn default_max_connections() -> u32 {
    defaults::MAX_CONNECTIONS
}

fn default_true() -> bool {
    true
}

fn default_interval_hours() -> u64 {
    schedule::DEFAULT_INTERVAL_HOURS
}

fn default_order_days() -> i64 {
    retention::ORDER_RETENTION_DAYS
}

fn default_webhook_days() -> i64 {
    retention::WEBHOOK_RETENTION_DAYS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_every_table_against_prefix() {
        let tables = TableNames::with_prefix("shop_");
        assert_eq!(tables.posts, "shop_posts");
        assert_eq!(tables.sessions, "shop_woocommerce_sessions");
        assert_eq!(tables.product_meta_lookup, "shop_wc_product_meta_lookup");
        assert_eq!(tables.all().len(), 9);
        assert_eq!(
            tables.required(),
            vec!["shop_posts", "shop_postmeta", "shop_comments"]
        );
    }

    #[test]
    fn identifier_validation_rejects_quoting_characters() {
        assert!(is_valid_identifier("wp_posts"));
        assert!(is_valid_identifier("wp2$_options"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("wp_posts`; DROP TABLE x"));
        assert!(!is_valid_identifier("wp-posts"));
        assert!(!is_valid_identifier(&"a".repeat(65)));
    }

    #[test]
    fn schedule_description_prefers_cron() {
        let mut schedule = ScheduleConfig::default();
        assert_eq!(schedule.describe(), "every 24h");
        schedule.cron = Some("0 0 3 * * *".to_string());
        assert_eq!(schedule.describe(), "cron '0 0 3 * * *'");
    }
}

//! In-memory WordPress / WooCommerce databases for tests

use super::test_data::tables;
use cleaner::{Database, Dialect};
use sqlx::any::AnyPoolOptions;
use sqlx::{Any, AnyPool};
use std::sync::Arc;

/// Which parts of the schema to create
#[derive(Debug, Clone)]
pub struct Schema {
    pub prefix: String,
    pub core: bool,
    pub commentmeta: bool,
    pub sessions: bool,
    pub cart_tracking: bool,
    pub webhooks: bool,
    /// Create the webhooks table without the delivery_status column
    pub legacy_webhooks: bool,
    /// Create the webhooks table without the date_created_gmt column
    pub webhooks_without_gmt: bool,
    pub product_meta_lookup: bool,
}

impl Schema {
    /// Full WooCommerce install
    pub fn full() -> Self {
        Self {
            prefix: "wp_".to_string(),
            core: true,
            commentmeta: true,
            sessions: true,
            cart_tracking: true,
            webhooks: true,
            legacy_webhooks: false,
            webhooks_without_gmt: false,
            product_meta_lookup: true,
        }
    }

    /// WordPress without any WooCommerce tables
    pub fn platform_only() -> Self {
        Self {
            sessions: false,
            cart_tracking: false,
            webhooks: false,
            product_meta_lookup: false,
            ..Self::full()
        }
    }

    /// No tables at all
    pub fn empty() -> Self {
        Self {
            core: false,
            commentmeta: false,
            ..Self::platform_only()
        }
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }

    pub fn without_cart_tracking(mut self) -> Self {
        self.cart_tracking = false;
        self
    }

    pub fn with_legacy_webhooks(mut self) -> Self {
        self.legacy_webhooks = true;
        self
    }

    pub fn with_webhooks_without_gmt(mut self) -> Self {
        self.webhooks_without_gmt = true;
        self
    }

    fn statements(&self) -> Vec<String> {
        let p = &self.prefix;
        let mut sql = Vec::new();
        if self.core {
            sql.push(format!(
                "CREATE TABLE {p}options (
                    option_id INTEGER PRIMARY KEY AUTOINCREMENT,
                    option_name TEXT NOT NULL UNIQUE,
                    option_value TEXT NOT NULL DEFAULT '',
                    autoload TEXT NOT NULL DEFAULT 'yes'
                )"
            ));
            sql.push(format!(
                "CREATE TABLE {p}posts (
                    ID INTEGER PRIMARY KEY AUTOINCREMENT,
                    post_type TEXT NOT NULL DEFAULT 'post',
                    post_status TEXT NOT NULL DEFAULT 'publish',
                    post_date TEXT NOT NULL,
                    post_date_gmt TEXT NOT NULL,
                    post_title TEXT NOT NULL DEFAULT ''
                )"
            ));
            sql.push(format!(
                "CREATE TABLE {p}postmeta (
                    meta_id INTEGER PRIMARY KEY AUTOINCREMENT,
                    post_id INTEGER NOT NULL,
                    meta_key TEXT,
                    meta_value TEXT
                )"
            ));
            sql.push(format!(
                "CREATE TABLE {p}comments (
                    comment_ID INTEGER PRIMARY KEY AUTOINCREMENT,
                    comment_post_ID INTEGER NOT NULL DEFAULT 0,
                    comment_content TEXT NOT NULL DEFAULT '',
                    comment_approved TEXT NOT NULL DEFAULT '1'
                )"
            ));
        }
        if self.commentmeta {
            sql.push(format!(
                "CREATE TABLE {p}commentmeta (
                    meta_id INTEGER PRIMARY KEY AUTOINCREMENT,
                    comment_id INTEGER NOT NULL,
                    meta_key TEXT,
                    meta_value TEXT
                )"
            ));
        }
        if self.sessions {
            sql.push(format!(
                "CREATE TABLE {p}woocommerce_sessions (
                    session_id INTEGER PRIMARY KEY AUTOINCREMENT,
                    session_key TEXT NOT NULL UNIQUE,
                    session_value TEXT NOT NULL DEFAULT '',
                    session_expiry INTEGER NOT NULL
                )"
            ));
        }
        if self.cart_tracking {
            sql.push(format!(
                "CREATE TABLE {p}wc_cart_tracking (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    session_key TEXT NOT NULL,
                    cart_contents TEXT NOT NULL DEFAULT ''
                )"
            ));
        }
        if self.webhooks {
            let delivery_status = if self.legacy_webhooks {
                ""
            } else {
                "delivery_status TEXT NOT NULL DEFAULT 'active',"
            };
            let created_gmt = if self.webhooks_without_gmt {
                ""
            } else {
                "date_created_gmt TEXT NOT NULL DEFAULT '0000-00-00 00:00:00',"
            };
            sql.push(format!(
                "CREATE TABLE {p}wc_webhooks (
                    webhook_id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL DEFAULT '',
                    {delivery_status}
                    {created_gmt}
                    date_created TEXT NOT NULL
                )"
            ));
        }
        if self.product_meta_lookup {
            sql.push(format!(
                "CREATE TABLE {p}wc_product_meta_lookup (
                    product_id INTEGER PRIMARY KEY,
                    sku TEXT DEFAULT '',
                    stock_quantity INTEGER
                )"
            ));
        }
        sql
    }
}

/// A single-connection in-memory SQLite database with WordPress tables.
///
/// The pool holds exactly one connection that never expires, so every query
/// sees the same in-memory database.
pub struct TestDatabase {
    pool: AnyPool,
    database: Arc<Database>,
}

impl TestDatabase {
    pub async fn new() -> Self {
        Self::with_schema(Schema::full()).await
    }

    pub async fn with_schema(schema: Schema) -> Self {
        sqlx::any::install_default_drivers();
        let pool = AnyPoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory SQLite database");

        for statement in schema.statements() {
            sqlx::raw_sql(&statement)
                .execute(&pool)
                .await
                .expect("Failed to create test table");
        }

        let database = Arc::new(Database::from_pool(pool.clone(), Dialect::Sqlite));
        Self { pool, database }
    }

    pub fn database(&self) -> Arc<Database> {
        self.database.clone()
    }

    pub async fn exec(&self, sql: &str) {
        sqlx::raw_sql(sql)
            .execute(&self.pool)
            .await
            .unwrap_or_else(|e| panic!("Failed to execute '{}': {}", sql, e));
    }

    pub async fn count(&self, table: &str) -> i64 {
        self.count_where(table, "1 = 1").await
    }

    pub async fn count_where(&self, table: &str, predicate: &str) -> i64 {
        let sql = format!("SELECT COUNT(*) FROM {} WHERE {}", table, predicate);
        sqlx::query_scalar::<Any, i64>(&sql)
            .fetch_one(&self.pool)
            .await
            .unwrap_or_else(|e| panic!("Failed to count '{}': {}", sql, e))
    }

    /// Make every DELETE on `table` fail
    pub async fn fail_deletes_on(&self, table: &str) {
        self.exec(&format!(
            "CREATE TRIGGER fail_delete_{table} BEFORE DELETE ON {table} \
             BEGIN SELECT RAISE(ABORT, 'injected failure'); END"
        ))
        .await;
    }

    pub async fn insert_option(&self, name: &str) {
        sqlx::query::<Any>(&format!(
            "INSERT INTO {} (option_name, option_value) VALUES (?, ?)",
            tables::OPTIONS
        ))
        .bind(name)
        .bind("value")
        .execute(&self.pool)
        .await
        .expect("Failed to insert option");
    }

    /// Returns the new post ID
    pub async fn insert_post(&self, post_type: &str, status: &str, date_gmt: &str) -> i64 {
        sqlx::query::<Any>(&format!(
            "INSERT INTO {} (post_type, post_status, post_date, post_date_gmt) VALUES (?, ?, ?, ?)",
            tables::POSTS
        ))
        .bind(post_type)
        .bind(status)
        .bind(date_gmt)
        .bind(date_gmt)
        .execute(&self.pool)
        .await
        .expect("Failed to insert post");

        self.last_id(tables::POSTS, "ID").await
    }

    pub async fn insert_postmeta(&self, post_id: i64, key: &str) {
        sqlx::query::<Any>(&format!(
            "INSERT INTO {} (post_id, meta_key, meta_value) VALUES (?, ?, '')",
            tables::POSTMETA
        ))
        .bind(post_id)
        .bind(key)
        .execute(&self.pool)
        .await
        .expect("Failed to insert postmeta");
    }

    /// Returns the new comment ID
    pub async fn insert_comment(&self, post_id: i64, approved: &str) -> i64 {
        sqlx::query::<Any>(&format!(
            "INSERT INTO {} (comment_post_ID, comment_approved) VALUES (?, ?)",
            tables::COMMENTS
        ))
        .bind(post_id)
        .bind(approved)
        .execute(&self.pool)
        .await
        .expect("Failed to insert comment");

        self.last_id(tables::COMMENTS, "comment_ID").await
    }

    pub async fn insert_commentmeta(&self, comment_id: i64, key: &str) {
        sqlx::query::<Any>(&format!(
            "INSERT INTO {} (comment_id, meta_key, meta_value) VALUES (?, ?, '')",
            tables::COMMENTMETA
        ))
        .bind(comment_id)
        .bind(key)
        .execute(&self.pool)
        .await
        .expect("Failed to insert commentmeta");
    }

    pub async fn insert_session(&self, key: &str, expiry: i64) {
        sqlx::query::<Any>(&format!(
            "INSERT INTO {} (session_key, session_expiry) VALUES (?, ?)",
            tables::SESSIONS
        ))
        .bind(key)
        .bind(expiry)
        .execute(&self.pool)
        .await
        .expect("Failed to insert session");
    }

    pub async fn insert_cart(&self, session_key: &str) {
        sqlx::query::<Any>(&format!(
            "INSERT INTO {} (session_key, cart_contents) VALUES (?, 'a:0:{{}}')",
            tables::CART_TRACKING
        ))
        .bind(session_key)
        .execute(&self.pool)
        .await
        .expect("Failed to insert cart row");
    }

    /// Webhook created at `created_gmt` on a site running on UTC
    pub async fn insert_webhook(&self, delivery_status: &str, created_gmt: &str) {
        self.insert_webhook_at(delivery_status, created_gmt, created_gmt).await;
    }

    /// Webhook whose local `date_created` differs from its UTC creation time
    pub async fn insert_webhook_at(&self, delivery_status: &str, created_local: &str, created_gmt: &str) {
        sqlx::query::<Any>(&format!(
            "INSERT INTO {} (name, delivery_status, date_created, date_created_gmt) VALUES ('hook', ?, ?, ?)",
            tables::WEBHOOKS
        ))
        .bind(delivery_status)
        .bind(created_local)
        .bind(created_gmt)
        .execute(&self.pool)
        .await
        .expect("Failed to insert webhook");
    }

    /// Insert into a webhooks table missing `delivery_status` or `date_created_gmt`
    pub async fn insert_legacy_webhook(&self, date_created: &str) {
        sqlx::query::<Any>(&format!(
            "INSERT INTO {} (name, date_created) VALUES ('hook', ?)",
            tables::WEBHOOKS
        ))
        .bind(date_created)
        .execute(&self.pool)
        .await
        .expect("Failed to insert webhook");
    }

    pub async fn insert_product_lookup(&self, product_id: i64) {
        sqlx::query::<Any>(&format!(
            "INSERT INTO {} (product_id, sku, stock_quantity) VALUES (?, 'SKU', 5)",
            tables::PRODUCT_META_LOOKUP
        ))
        .bind(product_id)
        .execute(&self.pool)
        .await
        .expect("Failed to insert lookup row");
    }

    async fn last_id(&self, table: &str, column: &str) -> i64 {
        sqlx::query_scalar::<Any, i64>(&format!("SELECT MAX({}) FROM {}", column, table))
            .fetch_one(&self.pool)
            .await
            .expect("Failed to read last insert id")
    }
}

//! Central repository for defaults, retention windows and the well-known
//! WordPress / WooCommerce names the cleanup catalog targets.
//!
//! Constants are grouped by concern so the catalog, the config layer and the
//! tests all agree on a single source of truth.

/// Retention windows for predicate deletes
pub mod retention {
    /// Pending / cancelled / failed orders older than this are removed
    pub const ORDER_RETENTION_DAYS: i64 = 180;

    /// Failed webhook deliveries older than this are removed
    pub const WEBHOOK_RETENTION_DAYS: i64 = 90;
}

/// Schedule defaults
pub mod schedule {
    /// Default period between scheduled runs
    pub const DEFAULT_INTERVAL_HOURS: u64 = 24;

    pub const SECONDS_PER_HOUR: u64 = 3600;
}

/// Default configuration values
pub mod defaults {
    /// Default bind address for the HTTP trigger surface
    pub const HOST: &str = "127.0.0.1";

    /// Default port for the HTTP trigger surface
    pub const PORT: u16 = 8096;

    /// Default WordPress table prefix
    pub const TABLE_PREFIX: &str = "wp_";

    /// Default connection pool size
    pub const MAX_CONNECTIONS: u32 = 5;

    /// Default configuration directory
    pub const CONFIG_DIR: &str = "config";
}

/// Unprefixed table names, resolved against the configured prefix
pub mod tables {
    pub const POSTS: &str = "posts";
    pub const POSTMETA: &str = "postmeta";
    pub const COMMENTS: &str = "comments";
    pub const COMMENTMETA: &str = "commentmeta";
    pub const OPTIONS: &str = "options";
    pub const SESSIONS: &str = "woocommerce_sessions";
    pub const CART_TRACKING: &str = "wc_cart_tracking";
    pub const WEBHOOKS: &str = "wc_webhooks";
    pub const PRODUCT_META_LOOKUP: &str = "wc_product_meta_lookup";
}

/// Column names and literal values matched by the cleanup rules
pub mod markers {
    /// Option-name prefix of transient cache entries
    pub const TRANSIENT_PREFIX: &str = "_transient_";

    /// Option-name prefix of WooCommerce session entries
    pub const SESSION_OPTION_PREFIX: &str = "_wc_session_";

    pub const REVISION_POST_TYPE: &str = "revision";

    pub const ORDER_POST_TYPE: &str = "shop_order";

    /// Order statuses that never progress further
    pub const TERMINAL_ORDER_STATUSES: [&str; 3] = ["wc-pending", "wc-cancelled", "wc-failed"];

    pub const DISCARDED_COMMENT_STATES: [&str; 2] = ["spam", "trash"];

    /// Column that older webhook schemas lack
    pub const WEBHOOK_DELIVERY_STATUS_COLUMN: &str = "delivery_status";

    /// UTC creation time; `date_created` is in the site's local timezone
    pub const WEBHOOK_CREATED_GMT_COLUMN: &str = "date_created_gmt";

    pub const WEBHOOK_FAILED_STATUS: &str = "failed";

    /// Escape character used in LIKE patterns
    pub const LIKE_ESCAPE: char = '!';

    /// Datetime layout shared by MySQL DATETIME and SQLite text dates
    pub const SQL_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
}

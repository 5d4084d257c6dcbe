//! Common test data and constants

use chrono::{DateTime, Duration, TimeZone, Utc};
use cleaner::cleanup::rules::sql_datetime;

/// Fixed run clock so age thresholds are exact
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 7, 1, 12, 0, 0).unwrap()
}

/// `days` days plus `seconds` seconds before `now`, as a SQL datetime
pub fn sql_age(now: DateTime<Utc>, days: i64, seconds: i64) -> String {
    sql_datetime(now - Duration::days(days) - Duration::seconds(seconds))
}

/// Resolved table names for the default `wp_` prefix
pub mod tables {
    pub const POSTS: &str = "wp_posts";
    pub const POSTMETA: &str = "wp_postmeta";
    pub const COMMENTS: &str = "wp_comments";
    pub const COMMENTMETA: &str = "wp_commentmeta";
    pub const OPTIONS: &str = "wp_options";
    pub const SESSIONS: &str = "wp_woocommerce_sessions";
    pub const CART_TRACKING: &str = "wp_wc_cart_tracking";
    pub const WEBHOOKS: &str = "wp_wc_webhooks";
    pub const PRODUCT_META_LOOKUP: &str = "wp_wc_product_meta_lookup";
}

/// Order statuses
pub mod orders {
    pub const PENDING: &str = "wc-pending";
    pub const CANCELLED: &str = "wc-cancelled";
    pub const FAILED: &str = "wc-failed";
    pub const COMPLETED: &str = "wc-completed";
    pub const PROCESSING: &str = "wc-processing";
}

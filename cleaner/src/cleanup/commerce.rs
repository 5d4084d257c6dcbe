//! WooCommerce data cleanup.
//!
//! Durable records (sessions, orders, webhooks) are removed by predicate so
//! in-window rows survive. Derived caches (cart tracking, product meta lookup)
//! are truncated wholesale. Every add-on table is probed before use.

use super::rules::{like_predicate, like_prefix, placeholders, sql_datetime};
use super::{Category, CategoryReport, CleanupContext, CleanupRule, Effect, MaintenanceTarget, RuleId, RuleRunner};
use crate::constants::markers;
use crate::database::BindValue;

pub fn rules(ctx: &CleanupContext<'_>) -> Vec<CleanupRule> {
    let t = ctx.tables;
    let statuses = markers::TERMINAL_ORDER_STATUSES;

    let mut order_binds = vec![BindValue::Text(markers::ORDER_POST_TYPE.to_string())];
    order_binds.extend(statuses.iter().map(|s| BindValue::Text(s.to_string())));
    order_binds.push(BindValue::Text(sql_datetime(ctx.order_cutoff())));

    vec![
        CleanupRule {
            id: RuleId::SessionOptions,
            category: Category::Commerce,
            table: t.options.clone(),
            targets: vec![MaintenanceTarget::required_table(&t.options)],
            effect: Effect::Delete {
                predicate: like_predicate("option_name"),
                binds: vec![BindValue::Text(like_prefix(markers::SESSION_OPTION_PREFIX))],
            },
        },
        CleanupRule {
            id: RuleId::ExpiredSessions,
            category: Category::Commerce,
            table: t.sessions.clone(),
            targets: vec![MaintenanceTarget::optional_table(&t.sessions)],
            effect: Effect::Delete {
                predicate: "session_expiry < ?".to_string(),
                binds: vec![BindValue::Integer(ctx.now.timestamp())],
            },
        },
        CleanupRule {
            id: RuleId::StaleOrders,
            category: Category::Commerce,
            table: t.posts.clone(),
            targets: vec![MaintenanceTarget::required_table(&t.posts)],
            effect: Effect::Delete {
                predicate: format!(
                    "post_type = ? AND post_status IN ({}) AND post_date_gmt < ?",
                    placeholders(statuses.len())
                ),
                binds: order_binds,
            },
        },
        CleanupRule {
            id: RuleId::CartTracking,
            category: Category::Commerce,
            table: t.cart_tracking.clone(),
            targets: vec![MaintenanceTarget::optional_table(&t.cart_tracking)],
            effect: Effect::Truncate,
        },
        CleanupRule {
            id: RuleId::FailedWebhooks,
            category: Category::Commerce,
            table: t.webhooks.clone(),
            targets: vec![
                MaintenanceTarget::optional_table(&t.webhooks),
                MaintenanceTarget::optional_column(
                    &t.webhooks,
                    markers::WEBHOOK_DELIVERY_STATUS_COLUMN,
                ),
                MaintenanceTarget::optional_column(&t.webhooks, markers::WEBHOOK_CREATED_GMT_COLUMN),
            ],
            effect: Effect::Delete {
                predicate: format!(
                    "{} = ? AND {} < ?",
                    markers::WEBHOOK_DELIVERY_STATUS_COLUMN,
                    markers::WEBHOOK_CREATED_GMT_COLUMN
                ),
                binds: vec![
                    BindValue::Text(markers::WEBHOOK_FAILED_STATUS.to_string()),
                    BindValue::Text(sql_datetime(ctx.webhook_cutoff())),
                ],
            },
        },
        CleanupRule {
            id: RuleId::ProductMetaLookup,
            category: Category::Commerce,
            table: t.product_meta_lookup.clone(),
            targets: vec![MaintenanceTarget::optional_table(&t.product_meta_lookup)],
            effect: Effect::Truncate,
        },
    ]
}

pub async fn run(runner: &RuleRunner<'_>, ctx: &CleanupContext<'_>) -> CategoryReport {
    runner.run_category(Category::Commerce, &rules(ctx)).await
}

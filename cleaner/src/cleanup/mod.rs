//! Cleanup operation set
//!
//! A fixed, ordered catalog of idempotent maintenance statements in two
//! categories:
//!
//! - **Platform** (`platform`): WordPress core data such as transients,
//!   orphaned meta, revisions and spam/trash comments.
//! - **Commerce** (`commerce`): WooCommerce data such as session options,
//!   expired sessions, stale orders, derived cache tables and failed webhooks.
//!
//! Every rule runs through [`RuleRunner`], which probes the rule's optional
//! targets, executes the statement and captures a typed [`RuleOutcome`].
//! Rules that target add-on tables are skipped, never failed, when the table
//! or column is absent.

pub mod commerce;
pub mod platform;
pub mod rules;
pub mod runner;

pub use rules::{CleanupContext, CleanupRule, Effect, MaintenanceTarget};
pub use runner::RuleRunner;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Platform,
    Commerce,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Platform => "platform",
            Category::Commerce => "commerce",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    ExpiredTransients,
    OrphanedPostmeta,
    PostRevisions,
    SpamTrashComments,
    OrphanedCommentmeta,
    SessionOptions,
    ExpiredSessions,
    StaleOrders,
    CartTracking,
    FailedWebhooks,
    ProductMetaLookup,
}

impl RuleId {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleId::ExpiredTransients => "expired_transients",
            RuleId::OrphanedPostmeta => "orphaned_postmeta",
            RuleId::PostRevisions => "post_revisions",
            RuleId::SpamTrashComments => "spam_trash_comments",
            RuleId::OrphanedCommentmeta => "orphaned_commentmeta",
            RuleId::SessionOptions => "session_options",
            RuleId::ExpiredSessions => "expired_sessions",
            RuleId::StaleOrders => "stale_orders",
            RuleId::CartTracking => "cart_tracking",
            RuleId::FailedWebhooks => "failed_webhooks",
            RuleId::ProductMetaLookup => "product_meta_lookup",
        }
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RuleOutcome {
    Success { rows_affected: u64 },
    /// An optional table or column is absent; no statement was issued
    Skipped { missing: String },
    Failed { error: String },
}

impl RuleOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RuleOutcome::Success { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, RuleOutcome::Skipped { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RuleOutcome::Failed { .. })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RuleReport {
    pub rule: RuleId,
    #[serde(flatten)]
    pub outcome: RuleOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryStatus {
    Success,
    PartialFailure,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryReport {
    pub category: Category,
    pub status: CategoryStatus,
    pub rules: Vec<RuleReport>,
}

impl CategoryReport {
    pub fn new(category: Category, rules: Vec<RuleReport>) -> Self {
        let status = if rules.iter().any(|r| r.outcome.is_failed()) {
            CategoryStatus::PartialFailure
        } else {
            CategoryStatus::Success
        };
        Self {
            category,
            status,
            rules,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == CategoryStatus::Success
    }

    pub fn outcome(&self, rule: RuleId) -> Option<&RuleOutcome> {
        self.rules
            .iter()
            .find(|r| r.rule == rule)
            .map(|r| &r.outcome)
    }

    pub fn skipped(&self) -> Vec<RuleId> {
        self.rules
            .iter()
            .filter(|r| r.outcome.is_skipped())
            .map(|r| r.rule)
            .collect()
    }

    /// `(rule, error)` for every failed rule
    pub fn failures(&self) -> Vec<(RuleId, String)> {
        self.rules
            .iter()
            .filter_map(|r| match &r.outcome {
                RuleOutcome::Failed { error } => Some((r.rule, error.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn rows_affected(&self) -> u64 {
        self.rules
            .iter()
            .map(|r| match r.outcome {
                RuleOutcome::Success { rows_affected } => rows_affected,
                _ => 0,
            })
            .sum()
    }
}

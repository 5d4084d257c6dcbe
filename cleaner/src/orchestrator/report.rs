use crate::cleanup::{CategoryReport, RuleId, RuleOutcome};
use crate::run_tracker::Trigger;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum OptimizeOutcome {
    Success { tables: Vec<String> },
    Failed { error: String },
}

/// One row of MySQL's table-maintenance result set
/// (`Table`, `Op`, `Msg_type`, `Msg_text`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableMessage {
    pub table: String,
    pub msg_type: String,
    pub msg_text: String,
}

impl TableMessage {
    pub fn new(table: &str, msg_type: &str, msg_text: &str) -> Self {
        Self {
            table: table.to_string(),
            msg_type: msg_type.to_string(),
            msg_text: msg_text.to_string(),
        }
    }

    pub fn from_row(row: &AnyRow) -> Option<Self> {
        let msg_type: String = row.try_get("Msg_type").ok()?;
        Some(Self {
            table: row.try_get("Table").unwrap_or_default(),
            msg_type,
            msg_text: row.try_get("Msg_text").unwrap_or_default(),
        })
    }

    fn is(&self, msg_type: &str) -> bool {
        self.msg_type.eq_ignore_ascii_case(msg_type)
    }
}

impl OptimizeOutcome {
    /// A successful statement can still report per-table errors as rows.
    pub fn from_messages(tables: Vec<String>, messages: &[TableMessage]) -> Self {
        for message in messages.iter().filter(|m| m.is("warning")) {
            warn!("Optimize {}: {}", message.table, message.msg_text);
        }

        let errors: Vec<String> = messages
            .iter()
            .filter(|m| m.is("error"))
            .map(|m| format!("{}: {}", m.table, m.msg_text))
            .collect();

        if errors.is_empty() {
            OptimizeOutcome::Success { tables }
        } else {
            warn!("Table optimization reported errors: {}", errors.join("; "));
            OptimizeOutcome::Failed {
                error: errors.join("; "),
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Success,
    PartialFailure,
}

/// Result of one full pass over the catalog.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub trigger: Trigger,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub status: RunStatus,
    pub platform: CategoryReport,
    pub commerce: CategoryReport,
    pub optimize: OptimizeOutcome,
    pub skipped_rules: Vec<RuleId>,
    pub errors: Vec<String>,
}

impl RunReport {
    pub fn new(
        run_id: Uuid,
        trigger: Trigger,
        started_at: DateTime<Utc>,
        platform: CategoryReport,
        commerce: CategoryReport,
        optimize: OptimizeOutcome,
    ) -> Self {
        let mut skipped_rules = platform.skipped();
        skipped_rules.extend(commerce.skipped());

        let mut errors: Vec<String> = [&platform, &commerce]
            .iter()
            .flat_map(|category| {
                category
                    .failures()
                    .into_iter()
                    .map(move |(rule, error)| format!("{}/{}: {}", category.category.as_str(), rule, error))
            })
            .collect();
        if let OptimizeOutcome::Failed { error } = &optimize {
            errors.push(format!("optimize: {}", error));
        }

        let status = if errors.is_empty() {
            RunStatus::Success
        } else {
            RunStatus::PartialFailure
        };

        Self {
            run_id,
            trigger,
            started_at,
            finished_at: Utc::now(),
            status,
            platform,
            commerce,
            optimize,
            skipped_rules,
            errors,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == RunStatus::Success
    }

    /// Outcome of a rule from either category
    pub fn outcome(&self, rule: RuleId) -> Option<&RuleOutcome> {
        self.platform
            .outcome(rule)
            .or_else(|| self.commerce.outcome(rule))
    }

    pub fn rows_affected(&self) -> u64 {
        self.platform.rows_affected() + self.commerce.rows_affected()
    }

    pub fn log_summary(&self) {
        if self.is_success() {
            info!(
                "Cleanup run {} ({}) succeeded: {} rows removed, skipped: [{}]",
                self.run_id,
                self.trigger.as_str(),
                self.rows_affected(),
                join_ids(&self.skipped_rules)
            );
        } else {
            warn!(
                "Cleanup run {} ({}) finished with {} error(s): {}",
                self.run_id,
                self.trigger.as_str(),
                self.errors.len(),
                self.errors.join("; ")
            );
        }
    }
}

fn join_ids(ids: &[RuleId]) -> String {
    ids.iter().map(|id| id.as_str()).collect::<Vec<_>>().join(", ")
}

use super::{Category, CategoryReport, CleanupRule, RuleOutcome, RuleReport};
use crate::database::Database;
use tracing::{error, info, warn};

/// Runs rules one at a time and turns every result into a [`RuleReport`].
pub struct RuleRunner<'a> {
    database: &'a Database,
}

impl<'a> RuleRunner<'a> {
    pub fn new(database: &'a Database) -> Self {
        Self { database }
    }

    pub async fn run_rule(&self, rule: &CleanupRule) -> RuleReport {
        let probe = self.database.probe();

        for target in rule.optional_targets() {
            let present = match &target.column {
                Some(column) => probe.column_exists(&target.table, column).await,
                None => probe.table_exists(&target.table).await,
            };
            if !present {
                info!("Skipping {}: {} not present", rule.id, target.describe());
                return RuleReport {
                    rule: rule.id,
                    outcome: RuleOutcome::Skipped {
                        missing: target.describe(),
                    },
                };
            }
        }

        let statement = rule.statement(self.database.dialect());
        let outcome = match self.database.execute(&statement).await {
            Ok(rows_affected) => {
                info!("{}: {} rows affected", rule.id, rows_affected);
                RuleOutcome::Success { rows_affected }
            }
            Err(e) => {
                error!("{} failed: {}", rule.id, e);
                RuleOutcome::Failed {
                    error: e.to_string(),
                }
            }
        };

        RuleReport {
            rule: rule.id,
            outcome,
        }
    }

    /// Run every rule in order; a failure never stops the rules after it.
    pub async fn run_category(&self, category: Category, rules: &[CleanupRule]) -> CategoryReport {
        info!("Starting {} cleanup ({} rules)", category.as_str(), rules.len());

        let mut reports = Vec::with_capacity(rules.len());
        for rule in rules {
            reports.push(self.run_rule(rule).await);
        }

        let report = CategoryReport::new(category, reports);
        if report.is_success() {
            info!(
                "{} cleanup completed: {} rows removed, {} rules skipped",
                category.as_str(),
                report.rows_affected(),
                report.skipped().len()
            );
        } else {
            warn!(
                "{} cleanup completed with {} failed rules",
                category.as_str(),
                report.failures().len()
            );
        }
        report
    }
}

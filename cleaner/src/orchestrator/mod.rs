//! Maintenance orchestrator
//!
//! Runs the full catalog in a fixed order: platform cleanup, commerce cleanup,
//! then one storage-compaction statement so the optimize pass sees post-cleanup
//! table sizes. Statements are issued sequentially on the caller's task.
//!
//! The only hard stop is the precondition on the always-required tables
//! (posts, postmeta, comments); everything else is captured in the
//! [`RunReport`].

mod report;

pub use report::{OptimizeOutcome, RunReport, RunStatus, TableMessage};

use crate::cleanup::{commerce, platform, CleanupContext, RuleRunner};
use crate::config::Config;
use crate::database::{Database, Statement};
use crate::errors::{CleanerError, ConfigurationError};
use crate::run_tracker::{RunState, RunTracker, Trigger};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{error, info, instrument};
use uuid::Uuid;

pub struct MaintenanceOrchestrator {
    config: Arc<Config>,
    database: Arc<Database>,
    tracker: RunTracker,
}

impl MaintenanceOrchestrator {
    pub fn new(config: Arc<Config>, database: Arc<Database>) -> Self {
        Self {
            config,
            database,
            tracker: RunTracker::new(),
        }
    }

    pub async fn run(&self, trigger: Trigger) -> Result<RunReport, CleanerError> {
        self.run_at(trigger, Utc::now()).await
    }

    /// Run on its own task and wait for the report. Dropping the returned
    /// future (e.g. a disconnected HTTP client) does not cut the run short.
    pub async fn run_to_completion(
        self: &Arc<Self>,
        trigger: Trigger,
    ) -> Result<RunReport, CleanerError> {
        let orchestrator = Arc::clone(self);
        let handle = tokio::spawn(async move { orchestrator.run(trigger).await });

        handle.await.map_err(|e| {
            error!("Cleanup run task did not complete: {}", e);
            CleanerError::Other(format!("Cleanup run task did not complete: {}", e))
        })?
    }

    /// Run with an explicit clock; every age threshold is derived from `now`.
    #[instrument(skip(self))]
    pub async fn run_at(
        &self,
        trigger: Trigger,
        now: DateTime<Utc>,
    ) -> Result<RunReport, CleanerError> {
        let run_id = Uuid::new_v4();
        info!("Starting {} cleanup run {}", trigger.as_str(), run_id);

        let _guard = self.tracker.start_run(run_id, trigger).await;
        let result = self.execute(run_id, trigger, now).await;

        match &result {
            Ok(report) => report.log_summary(),
            Err(e) => error!("Cleanup run {} aborted: {}", run_id, e),
        }
        result
    }

    async fn execute(
        &self,
        run_id: Uuid,
        trigger: Trigger,
        now: DateTime<Utc>,
    ) -> Result<RunReport, CleanerError> {
        let tables = &self.config.tables;

        let missing = self
            .database
            .probe()
            .missing_tables(&tables.required())
            .await;
        if !missing.is_empty() {
            return Err(ConfigurationError::MissingRequiredTables { tables: missing }.into());
        }

        let ctx = CleanupContext {
            tables,
            retention: &self.config.retention,
            dialect: self.database.dialect(),
            now,
        };
        let runner = RuleRunner::new(&self.database);

        let platform = platform::run(&runner, &ctx).await;
        let commerce = commerce::run(&runner, &ctx).await;
        let optimize = self.optimize().await;

        Ok(RunReport::new(
            run_id, trigger, now, platform, commerce, optimize,
        ))
    }

    /// Compact every catalog table that exists right now.
    async fn optimize(&self) -> OptimizeOutcome {
        let probe = self.database.probe();
        let mut present = Vec::new();
        for table in self.config.tables.all() {
            if probe.table_exists(table).await {
                present.push(table);
            }
        }

        let Some(sql) = self.database.dialect().optimize(&present) else {
            return OptimizeOutcome::Success { tables: Vec::new() };
        };

        info!("Optimizing {} tables", present.len());
        let tables: Vec<String> = present.into_iter().map(str::to_string).collect();
        match self.database.fetch_all(&Statement::new(sql)).await {
            Ok(rows) => {
                let messages: Vec<TableMessage> =
                    rows.iter().filter_map(TableMessage::from_row).collect();
                OptimizeOutcome::from_messages(tables, &messages)
            }
            Err(e) => {
                error!("Table optimization failed: {}", e);
                OptimizeOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }

    pub async fn state(&self) -> RunState {
        self.tracker.state().await
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

// File: cleaner/src/scheduler/operations.rs
use crate::config::ScheduleConfig;
use crate::constants::schedule::SECONDS_PER_HOUR;
use crate::errors::ScheduleError;
use crate::orchestrator::MaintenanceOrchestrator;
use crate::run_tracker::Trigger;
use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

pub struct CleanupScheduler {
    orchestrator: Arc<MaintenanceOrchestrator>,
    settings: ScheduleConfig,
    scheduler: JobScheduler,
    job_id: Mutex<Option<Uuid>>,
    started: AtomicBool,
}

impl CleanupScheduler {
    pub async fn new(
        orchestrator: Arc<MaintenanceOrchestrator>,
        settings: ScheduleConfig,
    ) -> Result<Self> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| anyhow!("Failed to create JobScheduler: {}", e))?;

        Ok(Self {
            orchestrator,
            settings,
            scheduler,
            job_id: Mutex::new(None),
            started: AtomicBool::new(false),
        })
    }

    /// Register the recurring cleanup job. Returns `false` when scheduling is
    /// disabled or a job is already registered.
    #[instrument(skip(self))]
    pub async fn schedule(&self) -> Result<bool> {
        if !self.settings.enabled {
            info!("Scheduled cleanup disabled, skipping registration");
            return Ok(false);
        }

        let mut job_id = self.job_id.lock().await;
        if let Some(existing) = *job_id {
            info!("Cleanup already scheduled (job {}), not adding another", existing);
            return Ok(false);
        }

        let job = self.build_job()?;
        let id = self
            .scheduler
            .add(job)
            .await
            .map_err(|e| ScheduleError::RegistrationFailed {
                reason: e.to_string(),
            })?;

        if !self.started.swap(true, Ordering::SeqCst) {
            self.scheduler
                .start()
                .await
                .map_err(|e| anyhow!("Failed to start scheduler: {}", e))?;
        }

        *job_id = Some(id);
        info!("✓ Scheduled database cleanup {} (job {})", self.settings.describe(), id);
        Ok(true)
    }

    /// Remove the registered job. Returns `false` when nothing was scheduled.
    pub async fn unschedule(&self) -> Result<bool> {
        let mut job_id = self.job_id.lock().await;
        let Some(id) = job_id.take() else {
            return Ok(false);
        };

        self.scheduler
            .remove(&id)
            .await
            .map_err(|e| anyhow!("Failed to remove cleanup job {}: {}", id, e))?;
        info!("Cleanup schedule cleared (job {})", id);
        Ok(true)
    }

    /// Teardown: clear the schedule and stop the scheduler.
    pub async fn shutdown(&self) -> Result<()> {
        self.unschedule().await?;
        if self.started.swap(false, Ordering::SeqCst) {
            let mut scheduler = self.scheduler.clone();
            scheduler
                .shutdown()
                .await
                .map_err(|e| anyhow!("Failed to shut down scheduler: {}", e))?;
        }
        Ok(())
    }

    pub async fn is_scheduled(&self) -> bool {
        self.job_id.lock().await.is_some()
    }

    /// Next due time of the registered job, if any.
    pub async fn next_run(&self) -> Option<DateTime<Utc>> {
        let id = (*self.job_id.lock().await)?;
        let mut scheduler = self.scheduler.clone();
        match scheduler.next_tick_for_job(id).await {
            Ok(next) => next,
            Err(e) => {
                warn!("Could not read next tick for job {}: {}", id, e);
                None
            }
        }
    }

    pub fn settings(&self) -> &ScheduleConfig {
        &self.settings
    }

    fn build_job(&self) -> Result<Job> {
        let orchestrator = self.orchestrator.clone();
        let run = move |_uuid: Uuid, _scheduler: JobScheduler| {
            let orchestrator = orchestrator.clone();
            Box::pin(async move {
                run_scheduled_cleanup(orchestrator).await;
            }) as Pin<Box<dyn Future<Output = ()> + Send>>
        };

        let job = match &self.settings.cron {
            Some(expression) => {
                validate_6_field_cron(expression)?;
                Job::new_async(expression.as_str(), run).map_err(|e| ScheduleError::InvalidCron {
                    expression: expression.clone(),
                    reason: e.to_string(),
                })?
            }
            None => {
                let period = Duration::from_secs(self.settings.interval_hours * SECONDS_PER_HOUR);
                Job::new_repeated_async(period, run).map_err(|e| {
                    ScheduleError::RegistrationFailed {
                        reason: e.to_string(),
                    }
                })?
            }
        };

        Ok(job)
    }
}

/// Scheduled runs have no caller to report to; the outcome goes to the log.
async fn run_scheduled_cleanup(orchestrator: Arc<MaintenanceOrchestrator>) {
    info!("🧹 Executing scheduled database cleanup");

    match orchestrator.run_to_completion(Trigger::Scheduled).await {
        Ok(report) if report.is_success() => {
            info!(
                "✓ Scheduled cleanup completed: {} rows removed",
                report.rows_affected()
            );
        }
        Ok(report) => {
            warn!(
                "Scheduled cleanup completed with errors: {}",
                report.errors.join("; ")
            );
        }
        Err(e) => {
            error!("✗ Scheduled cleanup refused to run: {}", e);
        }
    }
}

pub fn validate_6_field_cron(schedule: &str) -> Result<(), ScheduleError> {
    let invalid = |reason: String| ScheduleError::InvalidCron {
        expression: schedule.to_string(),
        reason,
    };

    let parts: Vec<&str> = schedule.split_whitespace().collect();
    if parts.len() != 6 {
        return Err(invalid(format!(
            "expected 6 fields (second minute hour day month dayofweek), got {}",
            parts.len()
        )));
    }

    let fields = [
        ("second", 0, 59),
        ("minute", 0, 59),
        ("hour", 0, 23),
        ("day", 1, 31),
        ("month", 1, 12),
        ("dayofweek", 0, 7),
    ];
    for (part, (name, min, max)) in parts.iter().zip(fields) {
        validate_cron_field(part, name, min, max).map_err(invalid)?;
    }

    Ok(())
}

/// A field is a comma-separated list of elements; each element is `*`, a
/// value or a range, optionally followed by `/step`. Named and special
/// tokens (`MON`, `JAN`, `L`, `5#2`) are left to the cron parser.
fn validate_cron_field(field: &str, name: &str, min: u32, max: u32) -> Result<(), String> {
    for element in field.split(',') {
        if element.is_empty() {
            return Err(format!("empty {} list element in '{}'", name, field));
        }
        if element.chars().any(|c| c.is_ascii_alphabetic() || c == '#') {
            continue;
        }
        validate_cron_element(element, name, min, max)?;
    }
    Ok(())
}

fn validate_cron_element(element: &str, name: &str, min: u32, max: u32) -> Result<(), String> {
    let (base, step) = match element.split_once('/') {
        Some((base, step)) => (base, Some(step)),
        None => (element, None),
    };

    if let Some(step_str) = step {
        let step = step_str
            .parse::<u32>()
            .map_err(|_| format!("invalid {} step value: {}", name, step_str))?;
        if step == 0 {
            return Err(format!("{} step value cannot be 0", name));
        }
    }

    if base == "*" || base == "?" {
        return Ok(());
    }

    let in_range = |value: u32| value >= min && value <= max;

    if let Some((start, end)) = base.split_once('-') {
        let start = start
            .parse::<u32>()
            .map_err(|_| format!("invalid {} range start: {}", name, start))?;
        let end = end
            .parse::<u32>()
            .map_err(|_| format!("invalid {} range end: {}", name, end))?;
        if !in_range(start) || !in_range(end) {
            return Err(format!(
                "{} range {}-{} is outside valid range {}-{}",
                name, start, end, min, max
            ));
        }
        if start > end {
            return Err(format!("{} range {}-{} is reversed", name, start, end));
        }
        return Ok(());
    }

    let value = base
        .parse::<u32>()
        .map_err(|_| format!("invalid {} value: {}", name, base))?;
    if !in_range(value) {
        return Err(format!("{} value {} is outside valid range {}-{}", name, value, min, max));
    }

    Ok(())
}

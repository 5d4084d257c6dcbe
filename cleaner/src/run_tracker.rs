// File: cleaner/src/run_tracker.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    Manual,
    Scheduled,
}

impl Trigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trigger::Manual => "manual",
            Trigger::Scheduled => "scheduled",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveRun {
    pub run_id: Uuid,
    pub trigger: Trigger,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RunState {
    Idle,
    /// More than one entry means a manual and a scheduled run overlap
    Running { runs: Vec<ActiveRun> },
}

/// Observational record of in-flight runs. It never blocks a run from
/// starting; overlapping runs are simply both listed.
pub struct RunTracker {
    active_runs: Arc<RwLock<HashMap<Uuid, ActiveRun>>>,
}

impl RunTracker {
    pub fn new() -> Self {
        Self {
            active_runs: Arc::new(RwLock::new(HashMap::with_capacity(2))),
        }
    }

    /// Register a run. It stays listed until the returned guard is dropped,
    /// including when the run's future is dropped or panics midway.
    pub async fn start_run(&self, run_id: Uuid, trigger: Trigger) -> RunGuard {
        let mut active = self.active_runs.write().await;
        if !active.is_empty() {
            warn!(
                "Starting {} run {} while {} other run(s) are in progress",
                trigger.as_str(),
                run_id,
                active.len()
            );
        }
        active.insert(
            run_id,
            ActiveRun {
                run_id,
                trigger,
                started_at: Utc::now(),
            },
        );

        RunGuard {
            active_runs: self.active_runs.clone(),
            run_id,
        }
    }

    pub async fn state(&self) -> RunState {
        let active = self.active_runs.read().await;
        if active.is_empty() {
            RunState::Idle
        } else {
            let mut runs: Vec<ActiveRun> = active.values().cloned().collect();
            runs.sort_by_key(|r| r.started_at);
            RunState::Running { runs }
        }
    }

    pub async fn is_running(&self) -> bool {
        !self.active_runs.read().await.is_empty()
    }
}

impl Default for RunTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Removes its run from the tracker on drop.
pub struct RunGuard {
    active_runs: Arc<RwLock<HashMap<Uuid, ActiveRun>>>,
    run_id: Uuid,
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        let run_id = self.run_id;
        if let Ok(mut active) = self.active_runs.try_write() {
            finish_run(&mut active, run_id);
            return;
        }

        // Lock is contended (e.g. a status read); finish on the runtime
        let active_runs = self.active_runs.clone();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    finish_run(&mut *active_runs.write().await, run_id);
                });
            }
            Err(_) => warn!("Run {} could not be removed from the tracker", run_id),
        }
    }
}

fn finish_run(active: &mut HashMap<Uuid, ActiveRun>, run_id: Uuid) {
    match active.remove(&run_id) {
        Some(run) => {
            let duration = Utc::now().signed_duration_since(run.started_at);
            info!(
                "Run {} ({}) finished after {}ms",
                run_id,
                run.trigger.as_str(),
                duration.num_milliseconds()
            );
        }
        None => warn!("Tried to end run {} but it was not active", run_id),
    }
}

// File: cleaner/src/web/mod.rs
pub mod handlers;
pub mod server;

pub use server::{create_router, start_web_server};

use serde::Serialize;
use std::sync::Arc;

use crate::config::Config;
use crate::database::Dialect;
use crate::orchestrator::MaintenanceOrchestrator;
use crate::run_tracker::RunState;
use crate::scheduler::CleanupScheduler;

// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub orchestrator: Arc<MaintenanceOrchestrator>,
    pub scheduler: Arc<CleanupScheduler>,
    pub dialect: Dialect,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        orchestrator: Arc<MaintenanceOrchestrator>,
        scheduler: Arc<CleanupScheduler>,
        dialect: Dialect,
    ) -> Self {
        Self {
            config,
            orchestrator,
            scheduler,
            dialect,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CleanupStatus {
    pub run_state: RunState,
    pub schedule_enabled: bool,
    pub scheduled: bool,
    pub schedule: String,
    pub next_run: Option<String>,
    pub dialect: Dialect,
    pub table_prefix: String,
}

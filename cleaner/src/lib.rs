pub mod cleanup;
pub mod config;
pub mod constants;
pub mod database;
pub mod errors;
pub mod orchestrator;
pub mod run_tracker;
pub mod scheduler;
pub mod web;

// Re-export commonly used types
pub use cleanup::{Category, RuleId, RuleOutcome};
pub use config::{Config, ConfigManager, TableNames};
pub use database::{Database, Dialect, SchemaProbe};
pub use errors::CleanerError;
pub use orchestrator::{MaintenanceOrchestrator, RunReport, RunStatus};
pub use run_tracker::{RunState, Trigger};
pub use scheduler::CleanupScheduler;

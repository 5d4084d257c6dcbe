//! Recurring trigger for the cleanup orchestrator
//!
//! By default the full catalog runs every `interval_hours` (24). A 6-field
//! cron expression (sec min hour day month dow) can pin runs to a time of day
//! instead:
//!
//! ```toml
//! [schedule]
//! enabled = true
//! interval_hours = 24
//! cron = "0 30 3 * * *"  # Daily at 03:30
//! ```
//!
//! Registration is idempotent: a second `schedule()` call while a job is
//! registered is a no-op. `unschedule()` is the teardown hook.

pub mod operations;
pub use operations::{validate_6_field_cron, CleanupScheduler};

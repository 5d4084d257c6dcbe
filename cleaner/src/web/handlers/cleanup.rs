// Manual trigger and status endpoints

use axum::{extract::State, http::StatusCode, response::Json};
use tracing::{error, info, warn};

use super::common::{ApiResponse, ApiResult};
use crate::orchestrator::RunReport;
use crate::run_tracker::Trigger;
use crate::web::{AppState, CleanupStatus};

/// Run the full catalog now and return the report. Partial failures are
/// still a 200: the report carries the per-rule outcomes. The run lives on
/// its own task, so a client disconnect does not interrupt it.
pub async fn run_cleanup(State(state): State<AppState>) -> ApiResult<RunReport> {
    info!("Manual database cleanup requested");

    match state.orchestrator.run_to_completion(Trigger::Manual).await {
        Ok(report) => {
            let message = if report.is_success() {
                "Database cleaned successfully".to_string()
            } else {
                warn!("Manual cleanup finished with {} error(s)", report.errors.len());
                format!("Database cleanup finished with {} error(s)", report.errors.len())
            };
            Ok(Json(ApiResponse::success(report).with_message(message)))
        }
        Err(e) if e.is_configuration() => {
            error!("Manual cleanup refused: {}", e);
            Err((StatusCode::CONFLICT, Json(ApiResponse::error(e.to_string()))))
        }
        Err(e) => {
            error!("Manual cleanup failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(e.to_string())),
            ))
        }
    }
}

pub async fn get_cleanup_status(State(state): State<AppState>) -> ApiResult<CleanupStatus> {
    let settings = state.scheduler.settings();

    Ok(Json(ApiResponse::success(CleanupStatus {
        run_state: state.orchestrator.state().await,
        schedule_enabled: settings.enabled,
        scheduled: state.scheduler.is_scheduled().await,
        schedule: settings.describe(),
        next_run: state.scheduler.next_run().await.map(|at| at.to_rfc3339()),
        dialect: state.dialect,
        table_prefix: state.config.table_prefix.clone(),
    })))
}

// Liveness endpoint

use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use super::common::{ApiResponse, ApiResult};
use crate::web::AppState;

pub async fn get_health(State(state): State<AppState>) -> ApiResult<Value> {
    Ok(Json(ApiResponse::success(json!({
        "status": "ok",
        "dialect": state.dialect,
    }))))
}

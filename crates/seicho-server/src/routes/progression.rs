//! Progression Routes - XP, levels and badges
//!
//! HTTP handlers that delegate to ProgressionService for business logic.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use seicho::domain::DomainError;

use crate::models::{
    AddXpRequest, EvaluateStatsRequest, ProgressionResponse, UnlockResponse, XpGainResponse,
};
use crate::AppState;

fn error_response(error: DomainError) -> (StatusCode, String) {
    let status = match error {
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, error.to_string())
}

/// Get the progression overview
#[utoipa::path(
    get,
    path = "/dashboard/progression",
    responses(
        (status = 200, description = "Current progression state", body = ProgressionResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Progression"
)]
pub async fn get_progression(State(state): State<AppState>) -> Json<ProgressionResponse> {
    let overview = state.progression.overview().await;
    Json(ProgressionResponse::from(&overview))
}

/// Add an XP delta
#[utoipa::path(
    post,
    path = "/dashboard/progression/xp",
    request_body = AddXpRequest,
    responses(
        (status = 200, description = "XP applied", body = XpGainResponse),
        (status = 400, description = "Non-positive XP amount"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Progression"
)]
pub async fn add_xp(
    State(state): State<AppState>,
    Json(payload): Json<AddXpRequest>,
) -> Result<Json<XpGainResponse>, (StatusCode, String)> {
    let gain = state
        .progression
        .add_xp(payload.amount, payload.action.as_deref())
        .await
        .map_err(error_response)?;

    Ok(Json(XpGainResponse::from(&gain)))
}

/// Record a rewarded action (XP amount resolved from the reward table)
#[utoipa::path(
    post,
    path = "/dashboard/progression/actions/{action}",
    params(
        ("action" = String, Path, description = "Action name, e.g. diary_entry")
    ),
    responses(
        (status = 200, description = "Action rewarded", body = XpGainResponse),
        (status = 404, description = "Unknown action"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Progression"
)]
pub async fn record_action(
    State(state): State<AppState>,
    Path(action): Path<String>,
) -> Result<Json<XpGainResponse>, (StatusCode, String)> {
    let gain = state
        .progression
        .record_action(&action)
        .await
        .map_err(error_response)?
        .ok_or((
            StatusCode::NOT_FOUND,
            format!("Unknown action: {}", action),
        ))?;

    Ok(Json(XpGainResponse::from(&gain)))
}

/// Evaluate badge rules against a partial statistics snapshot
#[utoipa::path(
    post,
    path = "/dashboard/progression/stats",
    request_body = EvaluateStatsRequest,
    responses(
        (status = 200, description = "Evaluation result", body = UnlockResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Progression"
)]
pub async fn evaluate_stats(
    State(state): State<AppState>,
    Json(payload): Json<EvaluateStatsRequest>,
) -> Result<Json<UnlockResponse>, (StatusCode, String)> {
    let newly_unlocked = state
        .progression
        .evaluate(&payload.into())
        .await
        .map_err(error_response)?;

    Ok(Json(UnlockResponse {
        newly_unlocked: newly_unlocked.into_iter().map(Into::into).collect(),
    }))
}

/// Directly unlock a badge. Unknown ids are ignored, re-unlocks are no-ops;
/// either way the response lists what actually changed.
#[utoipa::path(
    post,
    path = "/dashboard/progression/badges/{id}/unlock",
    params(
        ("id" = String, Path, description = "Badge id")
    ),
    responses(
        (status = 200, description = "Unlock processed", body = UnlockResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Progression"
)]
pub async fn unlock_badge(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UnlockResponse>, (StatusCode, String)> {
    let unlocked = state
        .progression
        .unlock(&id)
        .await
        .map_err(error_response)?;

    Ok(Json(UnlockResponse {
        newly_unlocked: unlocked.into_iter().map(Into::into).collect(),
    }))
}

/// Acknowledge the pending badge notification
#[utoipa::path(
    post,
    path = "/dashboard/progression/notification/ack",
    responses(
        (status = 204, description = "Notification cleared"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Progression"
)]
pub async fn acknowledge_notification(State(state): State<AppState>) -> StatusCode {
    state.progression.acknowledge().await;
    StatusCode::NO_CONTENT
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard/progression", get(get_progression))
        .route("/dashboard/progression/xp", post(add_xp))
        .route(
            "/dashboard/progression/actions/:action",
            post(record_action),
        )
        .route("/dashboard/progression/stats", post(evaluate_stats))
        .route(
            "/dashboard/progression/badges/:id/unlock",
            post(unlock_badge),
        )
        .route(
            "/dashboard/progression/notification/ack",
            post(acknowledge_notification),
        )
}

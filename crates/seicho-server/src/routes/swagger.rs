//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use crate::models::{
    AddXpRequest, BadgeResponse, EvaluateStatsRequest, ProgressSummaryResponse,
    ProgressionResponse, UnlockResponse, XpGainResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::progression::get_progression,
        super::progression::add_xp,
        super::progression::record_action,
        super::progression::evaluate_stats,
        super::progression::unlock_badge,
        super::progression::acknowledge_notification,
    ),
    info(
        title = "Seicho API",
        version = "0.3.0",
        description = "成長 (Growth) - Dashboard progression engine API\n\nXP accumulation, level derivation and badge unlocks.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Progression", description = "Progression (成長) - XP, levels and badges"),
    ),
    components(
        schemas(
            BadgeResponse,
            ProgressSummaryResponse,
            ProgressionResponse,
            AddXpRequest,
            XpGainResponse,
            EvaluateStatsRequest,
            UnlockResponse,
        )
    ),
)]
pub struct ApiDoc;

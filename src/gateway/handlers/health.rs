//! Health check handler

use std::sync::Arc;

use axum::extract::State;
use serde::Serialize;
use utoipa::ToSchema;

use super::super::state::AppState;
use super::super::types::{ApiResult, ok};

/// Health check response data
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: String,
    /// Server timestamp in milliseconds
    #[schema(example = 1703494800000_i64)]
    pub timestamp_ms: i64,
    /// Whether chat notifications are being delivered
    pub notifier_enabled: bool,
    /// Orders held in memory
    pub orders_stored: usize,
    /// Accounts held in memory
    pub users_stored: usize,
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service healthy", body = HealthResponse, content_type = "application/json"),
        (status = 500, description = "Order or user store unavailable")
    ),
    tag = "System"
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> ApiResult<HealthResponse> {
    let orders_stored = state.orders.order_count().await?;
    let users_stored = state.users.user_count().await?;
    ok(HealthResponse {
        status: "healthy".to_string(),
        timestamp_ms: chrono::Utc::now().timestamp_millis(),
        notifier_enabled: state.orders.notifier().is_enabled(),
        orders_stored,
        users_stored,
    })
}

//! Order and contact handlers

use std::sync::Arc;

use axum::extract::State;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::orders::{
    ContactRequest, CreateOrderRequest, Order, OrderFilter, OrderStats, UpdateStatusRequest,
};

use super::super::state::AppState;
use super::super::types::{
    ApiError, ApiJson, ApiPath, ApiQuery, ApiResult, Empty, ErrorBody, created, ok,
    ok_with_message,
};

/// Single order payload
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderData {
    pub order: Order,
}

/// Order list payload
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderListData {
    pub orders: Vec<Order>,
    pub total: usize,
}

/// Order search payload
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderSearchData {
    pub results: Vec<Order>,
    pub total: usize,
}

/// Statistics payload
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderStatsData {
    pub stats: OrderStats,
}

/// `?q=` for search endpoints
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// Create order endpoint
///
/// POST /api/orders
#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = OrderData),
        (status = 400, description = "Missing or invalid field", body = ErrorBody)
    ),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateOrderRequest>,
) -> ApiResult<OrderData> {
    let order = state.orders.create_order(req).await?;
    created("Order created successfully", OrderData { order })
}

/// Pre-submit order check. Reports every problem, stores nothing.
///
/// POST /api/orders/validate
#[utoipa::path(
    post,
    path = "/api/orders/validate",
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "Order data is valid"),
        (status = 400, description = "List of problems", body = ErrorBody)
    ),
    tag = "Orders"
)]
pub async fn validate_order(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateOrderRequest>,
) -> ApiResult<Empty> {
    let problems = state.orders.validate_order(&req);
    if !problems.is_empty() {
        return ApiError::bad_request("Order data is invalid")
            .with_errors(problems)
            .into_err();
    }
    ok_with_message("Order data is valid", Empty {})
}

/// List orders, newest first
///
/// GET /api/orders?status=&user_id=
#[utoipa::path(
    get,
    path = "/api/orders",
    params(
        ("status" = Option<String>, Query, description = "Exact status, e.g. pending"),
        ("user_id" = Option<u64>, Query, description = "Owning user")
    ),
    responses(
        (status = 200, description = "Matching orders", body = OrderListData),
        (status = 400, description = "Malformed query")
    ),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<Arc<AppState>>,
    ApiQuery(filter): ApiQuery<OrderFilter>,
) -> ApiResult<OrderListData> {
    let orders = state.orders.list_orders(&filter).await?;
    ok(OrderListData {
        total: orders.len(),
        orders,
    })
}

/// GET /api/orders/{id}
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(("id" = u64, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order found", body = OrderData),
        (status = 404, description = "Order not found", body = ErrorBody)
    ),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<u64>,
) -> ApiResult<OrderData> {
    let order = state.orders.get_order(id).await?;
    ok(OrderData { order })
}

/// PUT /api/orders/{id}/status
#[utoipa::path(
    put,
    path = "/api/orders/{id}/status",
    params(("id" = u64, Path, description = "Order id")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = OrderData),
        (status = 400, description = "Missing or invalid status", body = ErrorBody),
        (status = 404, description = "Order not found", body = ErrorBody)
    ),
    tag = "Orders"
)]
pub async fn update_order_status(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<u64>,
    ApiJson(req): ApiJson<UpdateStatusRequest>,
) -> ApiResult<OrderData> {
    let order = state.orders.update_status(id, req).await?;
    ok_with_message("Order status updated successfully", OrderData { order })
}

/// GET /api/orders/search?q=
#[utoipa::path(
    get,
    path = "/api/orders/search",
    params(("q" = String, Query, description = "Order number, customer name or email fragment")),
    responses(
        (status = 200, description = "Matching orders", body = OrderSearchData),
        (status = 400, description = "Search query is required", body = ErrorBody)
    ),
    tag = "Orders"
)]
pub async fn search_orders(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> ApiResult<OrderSearchData> {
    let results = state
        .orders
        .search_orders(query.q.as_deref().unwrap_or_default())
        .await?;
    ok(OrderSearchData {
        total: results.len(),
        results,
    })
}

/// GET /api/orders/stats
#[utoipa::path(
    get,
    path = "/api/orders/stats",
    responses((status = 200, description = "Aggregate statistics", body = OrderStatsData)),
    tag = "Orders"
)]
pub async fn order_stats(State(state): State<Arc<AppState>>) -> ApiResult<OrderStatsData> {
    let stats = state.orders.stats().await?;
    ok(OrderStatsData { stats })
}

/// Relay a contact form to the operations chat
///
/// POST /api/contact
#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Message accepted"),
        (status = 400, description = "Missing required field", body = ErrorBody)
    ),
    tag = "Contact"
)]
pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<ContactRequest>,
) -> ApiResult<Empty> {
    state.orders.submit_contact(req)?;
    ok_with_message("Message sent successfully", Empty {})
}

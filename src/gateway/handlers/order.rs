//! Order handlers (list, create, read, update, delete)

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

use crate::error::ApiError;
use crate::models::Order;

use super::super::openapi::OrderInput;
use super::super::state::AppState;
use super::super::types::{ApiResult, Envelope, EnvelopeBody, ErrorBody, created, no_content, ok};

/// List orders
///
/// GET /orders
#[utoipa::path(
    get,
    path = "/orders",
    responses(
        (status = 200, description = "All orders in insertion order", body = Envelope<Vec<Order>>)
    ),
    tag = "Orders"
)]
pub async fn list_orders(State(state): State<Arc<AppState>>) -> ApiResult<Vec<Order>> {
    ok(state.orders.list()?)
}

/// Create order
///
/// POST /orders
///
/// Any `status` in the payload is ignored; new orders are always `pending`.
#[utoipa::path(
    post,
    path = "/orders",
    request_body(content = Envelope<OrderInput>, description = "Order fields under `data`", content_type = "application/json"),
    responses(
        (status = 201, description = "Order created with status pending", body = Envelope<Order>),
        (status = 400, description = "Missing or invalid field", body = ErrorBody)
    ),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    EnvelopeBody(payload): EnvelopeBody,
) -> ApiResult<Order> {
    created(state.orders.create(&payload)?)
}

/// Read order
///
/// GET /orders/{orderId}
#[utoipa::path(
    get,
    path = "/orders/{orderId}",
    params(("orderId" = String, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order found", body = Envelope<Order>),
        (status = 404, description = "Order not found", body = ErrorBody)
    ),
    tag = "Orders"
)]
pub async fn read_order(
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<String>,
) -> ApiResult<Order> {
    ok(state.orders.read(&order_id)?)
}

/// Update order
///
/// PUT /orders/{orderId}
#[utoipa::path(
    put,
    path = "/orders/{orderId}",
    params(("orderId" = String, Path, description = "Order id")),
    request_body(content = Envelope<OrderInput>, description = "Full replacement of the order fields, including status", content_type = "application/json"),
    responses(
        (status = 200, description = "Order updated", body = Envelope<Order>),
        (status = 400, description = "Delivered order, id mismatch, or invalid field", body = ErrorBody),
        (status = 404, description = "Order not found", body = ErrorBody)
    ),
    tag = "Orders"
)]
pub async fn update_order(
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<String>,
    EnvelopeBody(payload): EnvelopeBody,
) -> ApiResult<Order> {
    ok(state.orders.update(&order_id, &payload)?)
}

/// Delete order
///
/// DELETE /orders/{orderId}
#[utoipa::path(
    delete,
    path = "/orders/{orderId}",
    params(("orderId" = String, Path, description = "Order id")),
    responses(
        (status = 204, description = "Order deleted"),
        (status = 400, description = "Order is not pending", body = ErrorBody),
        (status = 404, description = "Order not found", body = ErrorBody)
    ),
    tag = "Orders"
)]
pub async fn delete_order(
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.orders.delete(&order_id)?;
    Ok(no_content())
}

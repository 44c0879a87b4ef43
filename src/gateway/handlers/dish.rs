//! Dish handlers (list, create, read, update)

use std::sync::Arc;

use axum::extract::{Path, State};

use crate::models::Dish;

use super::super::openapi::DishInput;
use super::super::state::AppState;
use super::super::types::{ApiResult, Envelope, EnvelopeBody, ErrorBody, created, ok};

/// List dishes
///
/// GET /dishes
#[utoipa::path(
    get,
    path = "/dishes",
    responses(
        (status = 200, description = "All dishes in insertion order", body = Envelope<Vec<Dish>>)
    ),
    tag = "Dishes"
)]
pub async fn list_dishes(State(state): State<Arc<AppState>>) -> ApiResult<Vec<Dish>> {
    ok(state.dishes.list()?)
}

/// Create dish
///
/// POST /dishes
#[utoipa::path(
    post,
    path = "/dishes",
    request_body(content = Envelope<DishInput>, description = "Dish fields under `data`", content_type = "application/json"),
    responses(
        (status = 201, description = "Dish created", body = Envelope<Dish>),
        (status = 400, description = "Missing or invalid field", body = ErrorBody)
    ),
    tag = "Dishes"
)]
pub async fn create_dish(
    State(state): State<Arc<AppState>>,
    EnvelopeBody(payload): EnvelopeBody,
) -> ApiResult<Dish> {
    created(state.dishes.create(&payload)?)
}

/// Read dish
///
/// GET /dishes/{dishId}
#[utoipa::path(
    get,
    path = "/dishes/{dishId}",
    params(("dishId" = String, Path, description = "Dish id")),
    responses(
        (status = 200, description = "Dish found", body = Envelope<Dish>),
        (status = 404, description = "Dish does not exist", body = ErrorBody)
    ),
    tag = "Dishes"
)]
pub async fn read_dish(
    State(state): State<Arc<AppState>>,
    Path(dish_id): Path<String>,
) -> ApiResult<Dish> {
    ok(state.dishes.read(&dish_id)?)
}

/// Update dish
///
/// PUT /dishes/{dishId}
#[utoipa::path(
    put,
    path = "/dishes/{dishId}",
    params(("dishId" = String, Path, description = "Dish id")),
    request_body(content = Envelope<DishInput>, description = "Full replacement of the dish fields", content_type = "application/json"),
    responses(
        (status = 200, description = "Dish updated", body = Envelope<Dish>),
        (status = 400, description = "Missing or invalid field, or id mismatch", body = ErrorBody),
        (status = 404, description = "Dish does not exist", body = ErrorBody)
    ),
    tag = "Dishes"
)]
pub async fn update_dish(
    State(state): State<Arc<AppState>>,
    Path(dish_id): Path<String>,
    EnvelopeBody(payload): EnvelopeBody,
) -> ApiResult<Dish> {
    ok(state.dishes.update(&dish_id, &payload)?)
}

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};

use crate::{
    dto::orders::{OrderDto, OrderList, OrderPlaced, PlaceOrderRequest},
    dto::ratings::SubmitRatingRequest,
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    routes::params::OrderListQuery,
    services::{order_service, rating_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders).post(place_order))
        .route("/{id}", get(get_order))
        .route("/{id}/cancel", post(cancel_order))
        .route("/{id}/rating", post(submit_rating))
}

#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = PlaceOrderRequest,
    responses(
        (status = 200, description = "Order placed; the cart is cleared atomically", body = ApiResponse<OrderPlaced>),
        (status = 400, description = "Empty cart or missing delivery location"),
    ),
    security(("netid" = [])),
    tag = "Orders"
)]
pub async fn place_order(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<PlaceOrderRequest>,
) -> AppResult<Json<ApiResponse<OrderPlaced>>> {
    order_service::place_order(&state, &user, payload)
        .await
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/orders",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("status" = Option<String>, Query, description = "Filter by order status"),
    ),
    responses(
        (status = 200, description = "The caller's orders", body = ApiResponse<OrderList>)
    ),
    security(("netid" = [])),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    order_service::list_orders(&state, &user, query)
        .await
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(
        ("id" = u64, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order with snapshot and timeline", body = ApiResponse<OrderDto>),
        (status = 404, description = "Order not found"),
    ),
    security(("netid" = [])),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<u64>,
) -> AppResult<Json<ApiResponse<OrderDto>>> {
    order_service::get_order(&state, &user, id).await.map(Json)
}

#[utoipa::path(
    post,
    path = "/api/orders/{id}/cancel",
    params(
        ("id" = u64, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order cancelled", body = ApiResponse<OrderDto>),
        (status = 409, description = "Order already claimed or terminal"),
    ),
    security(("netid" = [])),
    tag = "Orders"
)]
pub async fn cancel_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<u64>,
) -> AppResult<Json<ApiResponse<OrderDto>>> {
    order_service::cancel_order(&state, &user, id)
        .await
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/orders/{id}/rating",
    params(
        ("id" = u64, Path, description = "Order ID")
    ),
    request_body = SubmitRatingRequest,
    responses(
        (status = 200, description = "Rating recorded", body = ApiResponse<serde_json::Value>),
        (status = 409, description = "Duplicate rating or order not delivered"),
    ),
    security(("netid" = [])),
    tag = "Ratings"
)]
pub async fn submit_rating(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<u64>,
    Json(payload): Json<SubmitRatingRequest>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    rating_service::submit_rating(&state, &user, id, payload)
        .await
        .map(Json)
}

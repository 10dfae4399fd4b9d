use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};

use crate::{
    dto::deliveries::{ChecklistUpdated, DeliveryBoard, DeliveryDto, SetStepRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::delivery_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(delivery_board))
        .route("/{order_id}", get(get_delivery))
        .route("/{order_id}/claim", post(claim_delivery))
        .route("/{order_id}/decline", post(decline_delivery))
        .route("/{order_id}/checklist", post(update_checklist))
}

#[utoipa::path(
    get,
    path = "/api/deliveries",
    responses(
        (status = 200, description = "Available orders and the caller's claimed orders", body = ApiResponse<DeliveryBoard>)
    ),
    security(("netid" = [])),
    tag = "Deliveries"
)]
pub async fn delivery_board(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<DeliveryBoard>>> {
    delivery_service::board(&state, &user).await.map(Json)
}

#[utoipa::path(
    get,
    path = "/api/deliveries/{order_id}",
    params(
        ("order_id" = u64, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Delivery details with earnings", body = ApiResponse<DeliveryDto>),
        (status = 404, description = "Order not found"),
    ),
    security(("netid" = [])),
    tag = "Deliveries"
)]
pub async fn get_delivery(
    State(state): State<AppState>,
    user: AuthUser,
    Path(order_id): Path<u64>,
) -> AppResult<Json<ApiResponse<DeliveryDto>>> {
    delivery_service::get_delivery(&state, &user, order_id)
        .await
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/deliveries/{order_id}/claim",
    params(
        ("order_id" = u64, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Claimed; the caller is now the deliverer", body = ApiResponse<DeliveryDto>),
        (status = 403, description = "Cannot claim own order"),
        (status = 409, description = "Already claimed"),
    ),
    security(("netid" = [])),
    tag = "Deliveries"
)]
pub async fn claim_delivery(
    State(state): State<AppState>,
    user: AuthUser,
    Path(order_id): Path<u64>,
) -> AppResult<Json<ApiResponse<DeliveryDto>>> {
    delivery_service::claim(&state, &user, order_id)
        .await
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/deliveries/{order_id}/decline",
    params(
        ("order_id" = u64, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Claim released; order is back on the board", body = ApiResponse<DeliveryDto>),
        (status = 409, description = "Claim is final once a checklist step is set"),
    ),
    security(("netid" = [])),
    tag = "Deliveries"
)]
pub async fn decline_delivery(
    State(state): State<AppState>,
    user: AuthUser,
    Path(order_id): Path<u64>,
) -> AppResult<Json<ApiResponse<DeliveryDto>>> {
    delivery_service::decline(&state, &user, order_id)
        .await
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/deliveries/{order_id}/checklist",
    params(
        ("order_id" = u64, Path, description = "Order ID")
    ),
    request_body = SetStepRequest,
    responses(
        (status = 200, description = "Checklist updated; completing the last step fulfills the order", body = ApiResponse<ChecklistUpdated>),
        (status = 403, description = "Caller is not the claiming deliverer"),
        (status = 409, description = "Step out of order"),
    ),
    security(("netid" = [])),
    tag = "Deliveries"
)]
pub async fn update_checklist(
    State(state): State<AppState>,
    user: AuthUser,
    Path(order_id): Path<u64>,
    Json(payload): Json<SetStepRequest>,
) -> AppResult<Json<ApiResponse<ChecklistUpdated>>> {
    delivery_service::set_step(&state, &user, order_id, payload)
        .await
        .map(Json)
}

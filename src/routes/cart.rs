use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, put},
};

use crate::{
    dto::cart::{AddToCartRequest, CartView, UpdateCartItemRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(cart_view).post(add_to_cart))
        .route("/{item_id}", put(update_cart_item).delete(remove_from_cart))
}

#[utoipa::path(
    get,
    path = "/api/cart",
    responses(
        (status = 200, description = "Current cart with totals", body = ApiResponse<CartView>)
    ),
    security(("netid" = [])),
    tag = "Cart"
)]
pub async fn cart_view(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<CartView>>> {
    cart_service::list_cart(&state, &user).await.map(Json)
}

#[utoipa::path(
    post,
    path = "/api/cart",
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Item added", body = ApiResponse<CartView>),
        (status = 400, description = "Invalid quantity"),
        (status = 404, description = "Item not in catalog"),
    ),
    security(("netid" = [])),
    tag = "Cart"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<AddToCartRequest>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    cart_service::add_to_cart(&state, &user, payload)
        .await
        .map(Json)
}

#[utoipa::path(
    put,
    path = "/api/cart/{item_id}",
    params(
        ("item_id" = String, Path, description = "Catalog item ID")
    ),
    request_body = UpdateCartItemRequest,
    responses(
        (status = 200, description = "Quantity updated; a result of zero removes the line", body = ApiResponse<CartView>),
        (status = 404, description = "Item not in cart"),
    ),
    security(("netid" = [])),
    tag = "Cart"
)]
pub async fn update_cart_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(item_id): Path<String>,
    Json(payload): Json<UpdateCartItemRequest>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    cart_service::update_quantity(&state, &user, &item_id, payload)
        .await
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/cart/{item_id}",
    params(
        ("item_id" = String, Path, description = "Catalog item ID")
    ),
    responses(
        (status = 200, description = "Item removed", body = ApiResponse<CartView>),
        (status = 404, description = "Item not in cart"),
    ),
    security(("netid" = [])),
    tag = "Cart"
)]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    user: AuthUser,
    Path(item_id): Path<String>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    cart_service::remove_from_cart(&state, &user, &item_id)
        .await
        .map(Json)
}

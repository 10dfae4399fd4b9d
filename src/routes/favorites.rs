use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};

use crate::{
    dto::items::ItemList,
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::favorite_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_favorites))
        .route("/{item_id}", post(add_favorite).delete(remove_favorite))
}

#[utoipa::path(
    get,
    path = "/api/favorites",
    responses(
        (status = 200, description = "The caller's favorite items", body = ApiResponse<ItemList>)
    ),
    security(("netid" = [])),
    tag = "Favorites"
)]
pub async fn list_favorites(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<ItemList>>> {
    favorite_service::list_favorites(&state, &user)
        .await
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/favorites/{item_id}",
    params(
        ("item_id" = String, Path, description = "Catalog item ID")
    ),
    responses(
        (status = 200, description = "Added; re-adding is a no-op", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Item not in catalog"),
    ),
    security(("netid" = [])),
    tag = "Favorites"
)]
pub async fn add_favorite(
    State(state): State<AppState>,
    user: AuthUser,
    Path(item_id): Path<String>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    favorite_service::add_favorite(&state, &user, &item_id)
        .await
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/favorites/{item_id}",
    params(
        ("item_id" = String, Path, description = "Catalog item ID")
    ),
    responses(
        (status = 200, description = "Removed", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Not a favorite"),
    ),
    security(("netid" = [])),
    tag = "Favorites"
)]
pub async fn remove_favorite(
    State(state): State<AppState>,
    user: AuthUser,
    Path(item_id): Path<String>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    favorite_service::remove_favorite(&state, &user, &item_id)
        .await
        .map(Json)
}

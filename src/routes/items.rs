use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};

use crate::{
    dto::items::{ItemDto, ItemList},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    response::{ApiResponse, Meta},
    routes::params::ItemQuery,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_items))
        .route("/{item_id}", get(get_item))
}

#[utoipa::path(
    get,
    path = "/api/items",
    params(
        ("category" = Option<String>, Query, description = "Filter by category, case-insensitive")
    ),
    responses(
        (status = 200, description = "Catalog items", body = ApiResponse<ItemList>)
    ),
    security(("netid" = [])),
    tag = "Items"
)]
pub async fn list_items(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ItemQuery>,
) -> AppResult<Json<ApiResponse<ItemList>>> {
    let favorites = state.store.favorites(&user.netid);
    let items = state
        .catalog
        .items()
        .into_iter()
        .filter(|(_, item)| {
            query
                .category
                .as_ref()
                .is_none_or(|c| item.category.eq_ignore_ascii_case(c))
        })
        .map(|(id, item)| {
            let is_favorite = favorites.contains(&id);
            ItemDto::from_catalog(id, item, is_favorite)
        })
        .collect();

    Ok(Json(ApiResponse::success(
        "OK",
        ItemList { items },
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    get,
    path = "/api/items/{item_id}",
    params(
        ("item_id" = String, Path, description = "Catalog item ID")
    ),
    responses(
        (status = 200, description = "Catalog item", body = ApiResponse<ItemDto>),
        (status = 404, description = "Item not found"),
    ),
    security(("netid" = [])),
    tag = "Items"
)]
pub async fn get_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(item_id): Path<String>,
) -> AppResult<Json<ApiResponse<ItemDto>>> {
    let item = state.catalog.item(&item_id).ok_or(AppError::NotFound)?;
    let is_favorite = state.store.favorites(&user.netid).contains(&item_id);
    Ok(Json(ApiResponse::success(
        "OK",
        ItemDto::from_catalog(item_id, item, is_favorite),
        Some(Meta::empty()),
    )))
}

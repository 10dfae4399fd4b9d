use crate::{
    audit::log_audit,
    dto::items::{ItemDto, ItemList},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_favorites(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<ItemList>> {
    let favorites = state.store.favorites(&user.netid);
    let items = favorites
        .into_iter()
        .filter_map(|item_id| {
            let item = state.catalog.item(&item_id)?;
            Some(ItemDto::from_catalog(item_id, item, true))
        })
        .collect();
    Ok(ApiResponse::success(
        "OK",
        ItemList { items },
        Some(Meta::empty()),
    ))
}

/// Adding an existing favorite is a no-op success.
pub async fn add_favorite(
    state: &AppState,
    user: &AuthUser,
    item_id: &str,
) -> AppResult<ApiResponse<serde_json::Value>> {
    if state.catalog.item(item_id).is_none() {
        return Err(AppError::NotFound);
    }

    state.store.add_favorite(&user.netid, item_id);
    log_audit(
        Some(&user.netid),
        "favorite_add",
        Some("favorites"),
        Some(serde_json::json!({ "item_id": item_id })),
    );

    Ok(ApiResponse::success(
        "Added to favorites",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn remove_favorite(
    state: &AppState,
    user: &AuthUser,
    item_id: &str,
) -> AppResult<ApiResponse<serde_json::Value>> {
    if !state.store.remove_favorite(&user.netid, item_id) {
        return Err(AppError::NotFound);
    }

    log_audit(
        Some(&user.netid),
        "favorite_remove",
        Some("favorites"),
        Some(serde_json::json!({ "item_id": item_id })),
    );

    Ok(ApiResponse::success(
        "Removed from favorites",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

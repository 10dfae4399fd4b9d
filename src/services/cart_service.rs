use crate::{
    audit::log_audit,
    dto::cart::{AddToCartRequest, CartLineDto, CartView, UpdateCartItemRequest},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{self, Cart},
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Resolve a cart against the catalog. Items that no longer exist in the
/// catalog are skipped rather than failing the view.
pub fn cart_view(state: &AppState, cart: &Cart) -> CartView {
    let mut items = Vec::new();
    let mut subtotal_cents: i64 = 0;
    for (item_id, &quantity) in cart {
        let Some(item) = state.catalog.item(item_id) else {
            continue;
        };
        let line_total_cents = item.price_cents * i64::from(quantity);
        subtotal_cents += line_total_cents;
        items.push(CartLineDto {
            item_id: item_id.clone(),
            name: item.name,
            price_cents: item.price_cents,
            quantity,
            line_total_cents,
        });
    }
    let delivery_fee_cents = models::delivery_fee_cents(subtotal_cents, state.delivery_fee_percent);
    CartView {
        items,
        subtotal_cents,
        delivery_fee_cents,
        total_cents: subtotal_cents + delivery_fee_cents,
    }
}

pub async fn list_cart(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<CartView>> {
    let cart = state.store.cart(&user.netid);
    Ok(ApiResponse::success(
        "OK",
        cart_view(state, &cart),
        Some(Meta::empty()),
    ))
}

pub async fn add_to_cart(
    state: &AppState,
    user: &AuthUser,
    payload: AddToCartRequest,
) -> AppResult<ApiResponse<CartView>> {
    if payload.quantity == 0 {
        return Err(AppError::InvalidQuantity);
    }
    if state.catalog.item(&payload.item_id).is_none() {
        return Err(AppError::NotFound);
    }

    let cart = state.store.with_cart(&user.netid, |cart| {
        let quantity = cart.entry(payload.item_id.clone()).or_insert(0);
        *quantity = quantity.saturating_add(payload.quantity);
        Ok(cart.clone())
    })?;

    log_audit(
        Some(&user.netid),
        "cart_add",
        Some("cart"),
        Some(serde_json::json!({ "item_id": payload.item_id, "quantity": payload.quantity })),
    );

    Ok(ApiResponse::success(
        "Added to cart",
        cart_view(state, &cart),
        Some(Meta::empty()),
    ))
}

pub async fn update_quantity(
    state: &AppState,
    user: &AuthUser,
    item_id: &str,
    payload: UpdateCartItemRequest,
) -> AppResult<ApiResponse<CartView>> {
    if payload.delta == 0 {
        return Err(AppError::InvalidQuantity);
    }

    let cart = state.store.with_cart(&user.netid, |cart| {
        let Some(&quantity) = cart.get(item_id) else {
            return Err(AppError::NotFound);
        };
        let updated = i64::from(quantity) + i64::from(payload.delta);
        if updated <= 0 {
            cart.remove(item_id);
        } else {
            cart.insert(item_id.to_string(), updated as u32);
        }
        Ok(cart.clone())
    })?;

    log_audit(
        Some(&user.netid),
        "cart_update",
        Some("cart"),
        Some(serde_json::json!({ "item_id": item_id, "delta": payload.delta })),
    );

    Ok(ApiResponse::success(
        "Cart updated",
        cart_view(state, &cart),
        Some(Meta::empty()),
    ))
}

pub async fn remove_from_cart(
    state: &AppState,
    user: &AuthUser,
    item_id: &str,
) -> AppResult<ApiResponse<CartView>> {
    let cart = state.store.with_cart(&user.netid, |cart| {
        if cart.remove(item_id).is_none() {
            return Err(AppError::NotFound);
        }
        Ok(cart.clone())
    })?;

    log_audit(
        Some(&user.netid),
        "cart_remove",
        Some("cart"),
        Some(serde_json::json!({ "item_id": item_id })),
    );

    Ok(ApiResponse::success(
        "Removed from cart",
        cart_view(state, &cart),
        Some(Meta::empty()),
    ))
}

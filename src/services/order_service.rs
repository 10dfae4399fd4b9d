use std::collections::BTreeMap;

use chrono::Utc;

use crate::{
    audit::log_audit,
    dto::orders::{OrderDto, OrderList, OrderPlaced, PlaceOrderRequest},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{self, Order, OrderId, OrderLine, OrderStatus},
    response::{ApiResponse, Meta},
    routes::params::{OrderListQuery, SortOrder},
    state::AppState,
    timeline::Timeline,
};

/// Materialize the caller's cart into a PLACED order.
///
/// Snapshot, ledger insert and cart clear all happen inside the cart's
/// critical section, so from any concurrent caller's point of view placement
/// is atomic: either the order exists and the cart is empty, or neither.
pub async fn place_order(
    state: &AppState,
    user: &AuthUser,
    payload: PlaceOrderRequest,
) -> AppResult<ApiResponse<OrderPlaced>> {
    let location = payload.delivery_location.trim().to_string();
    if location.is_empty() {
        return Err(AppError::InvalidLocation);
    }

    let placed = state.store.with_cart(&user.netid, |cart| {
        if cart.is_empty() {
            return Err(AppError::EmptyCart);
        }

        // Copy name and price from the catalog at this instant; entries
        // whose item has vanished are dropped rather than failing the order.
        let mut items = BTreeMap::new();
        let mut subtotal_cents: i64 = 0;
        for (item_id, &quantity) in cart.iter() {
            let Some(item) = state.catalog.item(item_id) else {
                tracing::warn!(item_id = %item_id, "dropping cart entry no longer in catalog");
                continue;
            };
            subtotal_cents += item.price_cents * i64::from(quantity);
            items.insert(
                item_id.clone(),
                OrderLine {
                    name: item.name,
                    price_cents: item.price_cents,
                    quantity,
                },
            );
        }
        if items.is_empty() {
            return Err(AppError::EmptyCart);
        }

        let delivery_fee_cents =
            models::delivery_fee_cents(subtotal_cents, state.delivery_fee_percent);
        let order = Order {
            id: state.store.next_order_id(),
            user_id: user.netid.clone(),
            items,
            location: location.clone(),
            subtotal_cents,
            delivery_fee_cents,
            created_at: Utc::now(),
            status: OrderStatus::Placed,
            claimed_by: None,
            timeline: Timeline::default(),
            shopper_rated: false,
            deliverer_rated: false,
        };
        let placed = OrderPlaced {
            order_id: order.id,
            subtotal_cents,
            delivery_fee_cents,
            total_cents: order.total_cents(),
        };
        state.store.insert_order(order);
        cart.clear();
        Ok(placed)
    })?;

    log_audit(
        Some(&user.netid),
        "order_placed",
        Some("orders"),
        Some(serde_json::json!({ "order_id": placed.order_id })),
    );

    Ok(ApiResponse::success(
        "Order placed",
        placed,
        Some(Meta::empty()),
    ))
}

pub async fn list_orders(
    state: &AppState,
    user: &AuthUser,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let (page, limit, offset) = query.pagination.normalize();

    let mut orders = state.store.orders_matching(|order| {
        order.user_id == user.netid
            && query.status.is_none_or(|status| order.status == status)
    });
    match query.sort_order.unwrap_or(SortOrder::Desc) {
        SortOrder::Asc => orders.sort_by_key(|o| (o.created_at, o.id)),
        SortOrder::Desc => {
            orders.sort_by_key(|o| (o.created_at, o.id));
            orders.reverse();
        }
    }

    let total = orders.len() as i64;
    let items = orders
        .iter()
        .skip(offset as usize)
        .take(limit as usize)
        .map(OrderDto::from)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("OK", OrderList { items }, Some(meta)))
}

pub async fn get_order(
    state: &AppState,
    user: &AuthUser,
    id: OrderId,
) -> AppResult<ApiResponse<OrderDto>> {
    let order = state.store.order(id)?;
    // Scoped to participants; deliverers browse unclaimed orders through the
    // delivery board instead.
    let involved =
        order.user_id == user.netid || order.claimed_by.as_deref() == Some(user.netid.as_str());
    if !involved {
        return Err(AppError::NotFound);
    }
    Ok(ApiResponse::success(
        "OK",
        OrderDto::from(&order),
        Some(Meta::empty()),
    ))
}

pub async fn cancel_order(
    state: &AppState,
    user: &AuthUser,
    id: OrderId,
) -> AppResult<ApiResponse<OrderDto>> {
    let dto = state.store.with_order(id, |order| {
        if order.user_id != user.netid {
            return Err(AppError::Forbidden);
        }
        match order.status {
            OrderStatus::Placed => {
                order.status = OrderStatus::Cancelled;
                Ok(OrderDto::from(&*order))
            }
            OrderStatus::Claimed => Err(AppError::AlreadyClaimed),
            OrderStatus::Fulfilled | OrderStatus::Cancelled => Err(AppError::Conflict(
                "Order can no longer be cancelled".to_string(),
            )),
        }
    })?;

    log_audit(
        Some(&user.netid),
        "order_cancelled",
        Some("orders"),
        Some(serde_json::json!({ "order_id": id })),
    );

    Ok(ApiResponse::success(
        "Order cancelled",
        dto,
        Some(Meta::empty()),
    ))
}

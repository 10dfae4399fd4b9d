use crate::{
    audit::log_audit,
    dto::deliveries::{ChecklistUpdated, DeliveryBoard, DeliveryDto, SetStepRequest},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{OrderId, OrderStatus},
    response::{ApiResponse, Meta},
    state::AppState,
    timeline::ChecklistStep,
};

/// Orders a deliverer can pick up, plus the ones they already hold.
pub async fn board(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<DeliveryBoard>> {
    let mut available = state
        .store
        .orders_matching(|order| order.status == OrderStatus::Placed);
    available.sort_by_key(|o| o.id);

    let mut mine = state.store.orders_matching(|order| {
        order.status == OrderStatus::Claimed
            && order.claimed_by.as_deref() == Some(user.netid.as_str())
    });
    mine.sort_by_key(|o| o.id);

    let board = DeliveryBoard {
        available: available.iter().map(DeliveryDto::from).collect(),
        mine: mine.iter().map(DeliveryDto::from).collect(),
    };
    Ok(ApiResponse::success("OK", board, Some(Meta::empty())))
}

pub async fn get_delivery(
    state: &AppState,
    _user: &AuthUser,
    order_id: OrderId,
) -> AppResult<ApiResponse<DeliveryDto>> {
    let order = state.store.order(order_id)?;
    Ok(ApiResponse::success(
        "OK",
        DeliveryDto::from(&order),
        Some(Meta::empty()),
    ))
}

/// Take exclusive ownership of a PLACED order. Runs inside the order's
/// critical section, so of any number of concurrent claimers exactly one
/// sees PLACED and wins; the rest observe AlreadyClaimed.
pub async fn claim(
    state: &AppState,
    user: &AuthUser,
    order_id: OrderId,
) -> AppResult<ApiResponse<DeliveryDto>> {
    let dto = state.store.with_order(order_id, |order| {
        if order.status != OrderStatus::Placed {
            return Err(AppError::AlreadyClaimed);
        }
        if order.user_id == user.netid {
            return Err(AppError::SelfClaim);
        }
        order.status = OrderStatus::Claimed;
        order.claimed_by = Some(user.netid.clone());
        Ok(DeliveryDto::from(&*order))
    })?;

    log_audit(
        Some(&user.netid),
        "delivery_claimed",
        Some("orders"),
        Some(serde_json::json!({ "order_id": order_id })),
    );

    Ok(ApiResponse::success(
        "Delivery claimed",
        dto,
        Some(Meta::empty()),
    ))
}

/// Release a claimed order back to the board. Only allowed while no
/// checklist step is set; once fulfillment has started the claim is final,
/// so a partially shopped order can never be orphaned.
pub async fn decline(
    state: &AppState,
    user: &AuthUser,
    order_id: OrderId,
) -> AppResult<ApiResponse<DeliveryDto>> {
    let dto = state.store.with_order(order_id, |order| {
        if order.claimed_by.as_deref() != Some(user.netid.as_str()) {
            return Err(AppError::Forbidden);
        }
        if order.status != OrderStatus::Claimed {
            return Err(AppError::NotClaimed);
        }
        if order.timeline.started() {
            return Err(AppError::Conflict(
                "Claim is final once fulfillment has started".to_string(),
            ));
        }
        order.status = OrderStatus::Placed;
        order.claimed_by = None;
        Ok(DeliveryDto::from(&*order))
    })?;

    log_audit(
        Some(&user.netid),
        "delivery_declined",
        Some("orders"),
        Some(serde_json::json!({ "order_id": order_id })),
    );

    Ok(ApiResponse::success(
        "Delivery declined",
        dto,
        Some(Meta::empty()),
    ))
}

pub async fn set_step(
    state: &AppState,
    user: &AuthUser,
    order_id: OrderId,
    payload: SetStepRequest,
) -> AppResult<ApiResponse<ChecklistUpdated>> {
    let updated = state.store.with_order(order_id, |order| {
        if order.claimed_by.as_deref() != Some(user.netid.as_str()) {
            return Err(AppError::Forbidden);
        }

        // Re-confirming the final step of a fulfilled order is an idempotent
        // success, not a second transition.
        let final_recheck = order.status == OrderStatus::Fulfilled
            && payload.step == ChecklistStep::Delivered
            && payload.checked;
        if !final_recheck {
            if order.status != OrderStatus::Claimed {
                return Err(AppError::NotClaimed);
            }
            if payload.checked {
                order.timeline.check(payload.step)?;
            } else {
                order.timeline.uncheck(payload.step)?;
            }
            if order.timeline.is_complete() {
                order.status = OrderStatus::Fulfilled;
            }
        }

        Ok(ChecklistUpdated {
            order_id: order.id,
            status: order.status,
            timeline: order
                .timeline
                .entries()
                .map(|(step, done)| crate::dto::orders::TimelineStepDto { step, done })
                .collect(),
        })
    })?;

    log_audit(
        Some(&user.netid),
        "checklist_updated",
        Some("orders"),
        Some(serde_json::json!({
            "order_id": order_id,
            "step": payload.step.label(),
            "checked": payload.checked,
        })),
    );

    Ok(ApiResponse::success(
        "Checklist updated",
        updated,
        Some(Meta::empty()),
    ))
}

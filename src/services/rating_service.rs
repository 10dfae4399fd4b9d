use chrono::Utc;

use crate::{
    audit::log_audit,
    dto::ratings::{AverageRating, SubmitRatingRequest},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{OrderId, OrderStatus, RaterRole, Rating},
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Record a rating for the order's counterparty. The duplicate guard and the
/// record append both run inside the order's critical section, so two
/// concurrent submissions for the same (order, role) cannot both pass the
/// flag check.
pub async fn submit_rating(
    state: &AppState,
    user: &AuthUser,
    order_id: OrderId,
    payload: SubmitRatingRequest,
) -> AppResult<ApiResponse<serde_json::Value>> {
    if !(1..=5).contains(&payload.score) {
        return Err(AppError::InvalidScore);
    }

    let rated_user_id = state.store.with_order(order_id, |order| {
        let rated_user_id = match payload.rater_role {
            RaterRole::Shopper => {
                if order.user_id != user.netid {
                    return Err(AppError::Forbidden);
                }
                if order.status != OrderStatus::Fulfilled {
                    return Err(AppError::NotEligible);
                }
                if order.shopper_rated {
                    return Err(AppError::DuplicateRating);
                }
                let deliverer = order.claimed_by.clone().ok_or_else(|| {
                    AppError::Internal(anyhow::anyhow!("fulfilled order {} has no deliverer", order.id))
                })?;
                order.shopper_rated = true;
                deliverer
            }
            RaterRole::Deliverer => {
                if order.claimed_by.as_deref() != Some(user.netid.as_str()) {
                    return Err(AppError::Forbidden);
                }
                if order.status != OrderStatus::Fulfilled {
                    return Err(AppError::NotEligible);
                }
                if order.deliverer_rated {
                    return Err(AppError::DuplicateRating);
                }
                order.deliverer_rated = true;
                order.user_id.clone()
            }
        };

        state.store.push_rating(Rating {
            rated_user_id: rated_user_id.clone(),
            role: payload.rater_role.rated_role(),
            order_id,
            score: payload.score,
            created_at: Utc::now(),
        });
        Ok(rated_user_id)
    })?;

    log_audit(
        Some(&user.netid),
        "rating_submitted",
        Some("ratings"),
        Some(serde_json::json!({
            "order_id": order_id,
            "rated_user_id": rated_user_id,
            "score": payload.score,
        })),
    );

    Ok(ApiResponse::success(
        "Rating submitted",
        serde_json::json!({ "order_id": order_id }),
        Some(Meta::empty()),
    ))
}

/// Arithmetic mean of all scores for (user, role), rounded to one decimal.
/// Recomputed from the record set on every read.
pub async fn average_rating(
    state: &AppState,
    user_id: &str,
    role: RaterRole,
) -> AppResult<ApiResponse<AverageRating>> {
    let ratings = state.store.ratings_for(user_id, role);
    let count = ratings.len();
    let average = if count == 0 {
        None
    } else {
        let sum: u32 = ratings.iter().map(|r| u32::from(r.score)).sum();
        Some((f64::from(sum) / count as f64 * 10.0).round() / 10.0)
    };

    Ok(ApiResponse::success(
        "OK",
        AverageRating {
            user_id: user_id.to_string(),
            role,
            average,
            count,
        },
        Some(Meta::empty()),
    ))
}

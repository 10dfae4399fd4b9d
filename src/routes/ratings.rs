use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    dto::ratings::AverageRating,
    error::AppResult,
    middleware::auth::AuthUser,
    models::RaterRole,
    response::ApiResponse,
    services::rating_service,
    state::AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct RoleQuery {
    pub role: RaterRole,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/{user_id}/rating", get(get_average_rating))
}

#[utoipa::path(
    get,
    path = "/api/users/{user_id}/rating",
    params(
        ("user_id" = String, Path, description = "NetID of the rated user"),
        ("role" = String, Query, description = "Role the user was rated for: shopper or deliverer"),
    ),
    responses(
        (status = 200, description = "Average rating, null when unrated", body = ApiResponse<AverageRating>)
    ),
    security(("netid" = [])),
    tag = "Ratings"
)]
pub async fn get_average_rating(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(user_id): Path<String>,
    Query(query): Query<RoleQuery>,
) -> AppResult<Json<ApiResponse<AverageRating>>> {
    rating_service::average_rating(&state, &user_id, query.role)
        .await
        .map(Json)
}

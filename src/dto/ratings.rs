use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{RaterRole, UserId};

#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitRatingRequest {
    /// Role the caller played for the order; the rated user is the
    /// counterparty.
    pub rater_role: RaterRole,
    pub score: u8,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AverageRating {
    pub user_id: UserId,
    pub role: RaterRole,
    /// Mean score rounded to one decimal, or null when the user has no
    /// ratings for this role.
    pub average: Option<f64>,
    pub count: usize,
}

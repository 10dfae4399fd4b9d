use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::response::{ApiResponse, Meta};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,

    #[error("User not logged in")]
    Unauthorized,

    #[error("Bad Request {0}")]
    BadRequest(String),

    #[error("Cart is empty")]
    EmptyCart,

    #[error("Delivery location is required")]
    InvalidLocation,

    #[error("Quantity must be greater than 0")]
    InvalidQuantity,

    #[error("Rating must be an integer between 1 and 5")]
    InvalidScore,

    #[error("Order has already been claimed")]
    AlreadyClaimed,

    #[error("{0}")]
    OutOfOrder(&'static str),

    #[error("A rating for this order was already submitted")]
    DuplicateRating,

    #[error("Cannot rate before order is delivered")]
    NotEligible,

    #[error("{0}")]
    Conflict(String),

    #[error("Forbidden")]
    Forbidden,

    #[error("You cannot claim your own order")]
    SelfClaim,

    #[error("Order is not currently claimed")]
    NotClaimed,

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_)
            | AppError::EmptyCart
            | AppError::InvalidLocation
            | AppError::InvalidQuantity
            | AppError::InvalidScore => StatusCode::BAD_REQUEST,
            AppError::AlreadyClaimed
            | AppError::OutOfOrder(_)
            | AppError::DuplicateRating
            | AppError::NotEligible
            | AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Forbidden | AppError::SelfClaim | AppError::NotClaimed => {
                StatusCode::FORBIDDEN
            }
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorData {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if let AppError::Internal(err) = &self {
            tracing::error!(error = %err, "unexpected internal error");
        }

        let body = ApiResponse {
            message: self.to_string(),
            data: Some(ErrorData {
                error: self.to_string(),
            }),
            meta: Some(Meta::empty()),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

use axum::extract::FromRequestParts;

use crate::error::AppError;

/// Header set by the campus SSO front end after it authenticates a request.
/// The core never sees credentials, only the resolved NetID.
pub const NETID_HEADER: &str = "x-netid";

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub netid: String,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(NETID_HEADER)
            .ok_or(AppError::Unauthorized)?;

        let netid = header
            .to_str()
            .map_err(|_| AppError::BadRequest("Invalid x-netid header".into()))?
            .trim();

        if netid.is_empty() {
            return Err(AppError::Unauthorized);
        }

        Ok(AuthUser {
            netid: netid.to_string(),
        })
    }
}

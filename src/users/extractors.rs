use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;
use crate::users::repo_types::User;

pub const API_TOKEN_HEADER: &str = "X-API-TOKEN";

/// The user owning the `X-API-TOKEN` presented with the request. Handlers that take
/// this argument are only reached with a valid token; otherwise the request is
/// answered with 401 `{errors: "Unauthorized"}`.
pub struct AuthUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(API_TOKEN_HEADER)
            .and_then(|h| h.to_str().ok())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::unauthorized("Unauthorized"))?;

        match User::find_by_token(&state.db, token).await? {
            Some(user) => Ok(AuthUser(user)),
            None => {
                debug!("unknown api token");
                Err(AppError::unauthorized("Unauthorized"))
            }
        }
    }
}

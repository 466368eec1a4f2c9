pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod password;
pub mod repo;
pub mod repo_types;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub use extractors::AuthUser;
pub use repo_types::User;

/// Registration and login; reachable without a token.
pub fn public_router() -> Router<AppState> {
    handlers::public_routes()
}

pub fn router() -> Router<AppState> {
    handlers::current_user_routes()
}

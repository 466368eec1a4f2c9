use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::{
    error::Result,
    extract::AppJson,
    response::{DataResponse, OK},
    state::AppState,
    users::{
        dto::{LoginUserRequest, RegisterUserRequest, UpdateUserRequest, UserResponse},
        extractors::AuthUser,
        services,
    },
};

pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(register))
        .route("/users/login", post(login))
}

pub fn current_user_routes() -> Router<AppState> {
    Router::new().route(
        "/users/current",
        get(get_current).patch(update_current).delete(logout),
    )
}

#[instrument(skip(state, payload), fields(username = %payload.username))]
pub async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterUserRequest>,
) -> Result<(StatusCode, Json<DataResponse<UserResponse>>)> {
    let user = services::register(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(user))))
}

#[instrument(skip(state, payload), fields(username = %payload.username))]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginUserRequest>,
) -> Result<Json<DataResponse<UserResponse>>> {
    let user = services::login(&state.db, payload).await?;
    Ok(Json(DataResponse::new(user)))
}

#[instrument(skip_all, fields(username = %user.username))]
pub async fn get_current(AuthUser(user): AuthUser) -> Json<DataResponse<UserResponse>> {
    Json(DataResponse::new(services::get(user)))
}

#[instrument(skip_all, fields(username = %user.username))]
pub async fn update_current(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    AppJson(payload): AppJson<UpdateUserRequest>,
) -> Result<Json<DataResponse<UserResponse>>> {
    let user = services::update(&state.db, &user, payload).await?;
    Ok(Json(DataResponse::new(user)))
}

#[instrument(skip_all, fields(username = %user.username))]
pub async fn logout(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<DataResponse<&'static str>>> {
    services::logout(&state.db, &user).await?;
    Ok(Json(DataResponse::new(OK)))
}

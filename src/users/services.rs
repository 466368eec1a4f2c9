use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::users::dto::{LoginUserRequest, RegisterUserRequest, UpdateUserRequest, UserResponse};
use crate::users::password;
use crate::users::repo_types::User;
use crate::validation::Validate;

pub const USERNAME_TAKEN: &str = "Username already exists";
pub const BAD_CREDENTIALS: &str = "Username or Password wrong";

pub async fn register(db: &PgPool, req: RegisterUserRequest) -> Result<UserResponse> {
    req.validate()?;

    if User::count_by_username(db, &req.username).await? != 0 {
        warn!(username = %req.username, "username already registered");
        return Err(AppError::conflict(USERNAME_TAKEN));
    }

    let hash = password::hash(req.password).await?;
    let user = match User::create(db, &req.username, &req.name, &hash).await {
        Ok(u) => u,
        // lost a race against a concurrent registration
        Err(e) if is_unique_violation(&e) => return Err(AppError::conflict(USERNAME_TAKEN)),
        Err(e) => return Err(e.into()),
    };

    info!(username = %user.username, "user registered");
    Ok(user.into())
}

pub async fn login(db: &PgPool, req: LoginUserRequest) -> Result<UserResponse> {
    req.validate()?;

    let Some(user) = User::find_by_username(db, &req.username).await? else {
        warn!(username = %req.username, "login unknown username");
        return Err(AppError::unauthorized(BAD_CREDENTIALS));
    };

    if !password::verify(req.password, user.password.clone()).await? {
        warn!(username = %user.username, "login invalid password");
        return Err(AppError::unauthorized(BAD_CREDENTIALS));
    }

    let token = Uuid::new_v4().to_string();
    let user = User::set_token(db, &user.username, Some(&token)).await?;

    info!(username = %user.username, "user logged in");
    Ok(UserResponse {
        username: user.username,
        name: user.name,
        token: user.token,
    })
}

pub fn get(user: User) -> UserResponse {
    user.into()
}

pub async fn update(db: &PgPool, user: &User, req: UpdateUserRequest) -> Result<UserResponse> {
    req.validate()?;

    let hash = match req.password {
        Some(p) => Some(password::hash(p).await?),
        None => None,
    };
    let updated =
        User::update_profile(db, &user.username, req.name.as_deref(), hash.as_deref()).await?;

    info!(username = %updated.username, password_changed = hash.is_some(), "user updated");
    Ok(updated.into())
}

pub async fn logout(db: &PgPool, user: &User) -> Result<()> {
    User::set_token(db, &user.username, None).await?;
    info!(username = %user.username, "user logged out");
    Ok(())
}

fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .is_some_and(|e| e.is_unique_violation())
}

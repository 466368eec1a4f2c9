use anyhow::Context;
use sqlx::PgPool;

use crate::users::repo_types::User;

impl User {
    pub async fn find_by_username(db: &PgPool, username: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT username, name, password, token
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(db)
        .await
        .context("find user by username")?;
        Ok(user)
    }

    pub async fn count_by_username(db: &PgPool, username: &str) -> anyhow::Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE username = $1")
            .bind(username)
            .fetch_one(db)
            .await
            .context("count users by username")?;
        Ok(count)
    }

    /// Exact match on the session token.
    pub async fn find_by_token(db: &PgPool, token: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT username, name, password, token
            FROM users
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(db)
        .await
        .context("find user by token")?;
        Ok(user)
    }

    /// Insert a user; `password_hash` must already be hashed.
    pub async fn create(
        db: &PgPool,
        username: &str,
        name: &str,
        password_hash: &str,
    ) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, name, password)
            VALUES ($1, $2, $3)
            RETURNING username, name, password, token
            "#,
        )
        .bind(username)
        .bind(name)
        .bind(password_hash)
        .fetch_one(db)
        .await
        .context("insert user")?;
        Ok(user)
    }

    /// Sets or clears (`None`) the session token.
    pub async fn set_token(
        db: &PgPool,
        username: &str,
        token: Option<&str>,
    ) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
               SET token = $2
             WHERE username = $1
            RETURNING username, name, password, token
            "#,
        )
        .bind(username)
        .bind(token)
        .fetch_one(db)
        .await
        .context("update user token")?;
        Ok(user)
    }

    /// Absent fields keep their stored value.
    pub async fn update_profile(
        db: &PgPool,
        username: &str,
        name: Option<&str>,
        password_hash: Option<&str>,
    ) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
               SET name = COALESCE($2, name),
                   password = COALESCE($3, password)
             WHERE username = $1
            RETURNING username, name, password, token
            "#,
        )
        .bind(username)
        .bind(name)
        .bind(password_hash)
        .fetch_one(db)
        .await
        .context("update user profile")?;
        Ok(user)
    }
}

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub username: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password: String, // argon2 PHC string
    #[serde(skip_serializing)]
    pub token: Option<String>,
}

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Contact row; `username` is the owning user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Contact {
    pub id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub username: String,
}

/// Substring filters of a contact search; `None` means "don't filter".
#[derive(Debug, Clone, Default)]
pub struct ContactFilter<'a> {
    pub name: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub email: Option<&'a str>,
}

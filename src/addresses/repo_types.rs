use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Address {
    pub id: i64,
    pub street: String,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: String,
    pub postal_code: String,
    pub contact_id: i64,
}

/// Column values written by insert and update.
#[derive(Debug, Clone, Copy)]
pub struct AddressFields<'a> {
    pub street: &'a str,
    pub city: Option<&'a str>,
    pub province: Option<&'a str>,
    pub country: &'a str,
    pub postal_code: &'a str,
}

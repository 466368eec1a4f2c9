use serde::{Deserialize, Serialize};

use crate::contacts::repo_types::Contact;
use crate::validation::{not_null, Validate, ValidationErrors, Validator};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_SIZE: i64 = 10;
pub const MAX_SIZE: i64 = 100;
/// Largest page whose offset still fits in an `i64` at `MAX_SIZE`.
pub const MAX_PAGE: i64 = i64::MAX / MAX_SIZE;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateContactRequest {
    pub first_name: String,
    #[serde(default, deserialize_with = "not_null")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "not_null")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "not_null")]
    pub phone: Option<String>,
}

impl Validate for CreateContactRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .text("first_name", &self.first_name, 3, 100)
            .optional_text("last_name", self.last_name.as_deref(), 3, 100)
            .optional_text("email", self.email.as_deref(), 3, 100)
            .optional_text("phone", self.phone.as_deref(), 3, 20)
            .finish()
    }
}

/// Full replacement of a contact; `id` comes from the path.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateContactRequest {
    #[serde(default)]
    pub id: i64,
    pub first_name: String,
    #[serde(default, deserialize_with = "not_null")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "not_null")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "not_null")]
    pub phone: Option<String>,
}

impl Validate for UpdateContactRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .positive("id", self.id)
            .text("first_name", &self.first_name, 3, 100)
            .optional_text("last_name", self.last_name.as_deref(), 3, 100)
            .optional_text("email", self.email.as_deref(), 3, 100)
            .optional_text("phone", self.phone.as_deref(), 3, 20)
            .finish()
    }
}

/// Query string of `GET /api/contacts`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SearchContactRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

impl SearchContactRequest {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(DEFAULT_PAGE)
    }

    pub fn size(&self) -> i64 {
        self.size.unwrap_or(DEFAULT_SIZE)
    }
}

impl Validate for SearchContactRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .optional_text("name", self.name.as_deref(), 3, 100)
            .optional_text("phone", self.phone.as_deref(), 3, 100)
            .optional_text("email", self.email.as_deref(), 3, 100)
            .range("page", self.page(), 1, MAX_PAGE)
            .range("size", self.size(), 1, MAX_SIZE)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl From<Contact> for ContactResponse {
    fn from(c: Contact) -> Self {
        Self {
            id: c.id,
            first_name: c.first_name,
            last_name: c.last_name,
            email: c.email,
            phone: c.phone,
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::users::repo_types::User;
use crate::validation::{not_null, Validate, ValidationErrors, Validator};

/// Request body for user registration.
#[derive(Debug, Deserialize, Serialize)]
pub struct RegisterUserRequest {
    pub username: String,
    pub password: String,
    pub name: String,
}

impl Validate for RegisterUserRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .text("username", &self.username, 1, 100)
            .text("password", &self.password, 1, 100)
            .text("name", &self.name, 1, 100)
            .finish()
    }
}

/// Request body for login.
#[derive(Debug, Deserialize, Serialize)]
pub struct LoginUserRequest {
    pub username: String,
    pub password: String,
}

impl Validate for LoginUserRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .text("username", &self.username, 1, 100)
            .text("password", &self.password, 1, 100)
            .finish()
    }
}

/// Partial update of the current user.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UpdateUserRequest {
    #[serde(default, deserialize_with = "not_null")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "not_null")]
    pub password: Option<String>,
}

impl Validate for UpdateUserRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .optional_text("name", self.name.as_deref(), 1, 100)
            .optional_text("password", self.password.as_deref(), 1, 100)
            .finish()
    }
}

/// Public part of the user; the token only appears right after login.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserResponse {
    pub username: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub token: Option<String>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            username: u.username,
            name: u.name,
            token: None,
        }
    }
}

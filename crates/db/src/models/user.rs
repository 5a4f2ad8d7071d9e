//! User entity model and the signup form.

use pantry_core::accounts::{validate_username, USERNAME_MAX_LENGTH};
use pantry_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserInfo`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub failed_login_count: i32,
    pub locked_until: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Public user info embedded in auth responses.
#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub username: String,
    pub email: Option<String>,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

/// DTO for inserting a user. The password is already hashed.
#[derive(Debug)]
pub struct CreateUser {
    pub username: String,
    pub email: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
}

/// Body of `POST /signup`.
///
/// Password confirmation and strength are checked by the handler on top of
/// the declarative rules here, since they involve two fields at once.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct SignupForm {
    #[validate(
        length(min = 1, max = USERNAME_MAX_LENGTH, message = "Required. 150 characters or fewer."),
        custom(function = "validate_username")
    )]
    pub username: String,
    #[validate(length(max = 30, message = "Ensure this value has at most 30 characters."))]
    pub first_name: String,
    #[validate(length(max = 30, message = "Ensure this value has at most 30 characters."))]
    pub last_name: String,
    #[validate(email(message = "Enter a valid email address."))]
    pub email: Option<String>,
    #[validate(length(min = 1, message = "This field is required."))]
    pub password1: String,
    #[validate(length(min = 1, message = "This field is required."))]
    pub password2: String,
}

impl SignupForm {
    /// Trim the text fields and drop a blank email.
    pub fn normalize(&mut self) {
        self.username = self.username.trim().to_string();
        self.first_name = self.first_name.trim().to_string();
        self.last_name = self.last_name.trim().to_string();
        self.email = self
            .email
            .take()
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());
    }
}

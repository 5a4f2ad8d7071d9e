//! Handlers for account registration.

use axum::extract::State;
use axum::response::Response;
use axum::Json;
use pantry_core::accounts::{password_problems, PASSWORD_MIN_LENGTH, USERNAME_MAX_LENGTH};
use pantry_core::recipes::RECIPE_LIST_URL;
use pantry_db::models::user::{CreateUser, SignupForm};
use pantry_db::repositories::UserRepo;
use serde::Serialize;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::extract::{ClientInfo, JsonBody};
use crate::forms::FormErrors;
use crate::handlers::auth::create_auth_response;
use crate::response::{created, DataResponse};
use crate::state::AppState;

/// One field of the signup form as described by `GET /signup`.
#[derive(Debug, Serialize)]
pub struct FieldDescription {
    pub name: &'static str,
    pub label: &'static str,
    pub required: bool,
    pub help_text: String,
}

/// GET /signup
///
/// Describe the fields `POST /signup` accepts.
pub async fn signup_form() -> Json<DataResponse<Vec<FieldDescription>>> {
    let field = |name, label, required, help_text: String| FieldDescription {
        name,
        label,
        required,
        help_text,
    };

    Json(DataResponse {
        data: vec![
            field(
                "username",
                "Username",
                true,
                format!(
                    "Required. {USERNAME_MAX_LENGTH} characters or fewer. Letters, digits and @/./+/-/_ only."
                ),
            ),
            field("first_name", "First name", false, String::new()),
            field("last_name", "Last name", false, String::new()),
            field("email", "Email address", false, String::new()),
            field(
                "password1",
                "Password",
                true,
                format!(
                    "Your password must contain at least {PASSWORD_MIN_LENGTH} characters and can't be entirely numeric."
                ),
            ),
            field(
                "password2",
                "Password confirmation",
                true,
                "Enter the same password as before, for verification.".to_string(),
            ),
        ],
    })
}

/// POST /signup
///
/// Create an account with its chef profile and log it in. Responds `201`
/// with tokens and `Location: /recipes`.
pub async fn signup(
    State(state): State<AppState>,
    client: ClientInfo,
    JsonBody(mut form): JsonBody<SignupForm>,
) -> AppResult<Response> {
    form.normalize();

    let mut errors = FormErrors::validate(&form);
    if !errors.has("password1") && !errors.has("password2") {
        for problem in password_problems(&form.password1, &form.password2) {
            errors.add("password2", problem);
        }
    }
    if !errors.has("username") && UserRepo::username_taken(&state.pool, &form.username).await? {
        errors.add("username", "A user with that username already exists.");
    }
    errors.finish()?;

    let password_hash = hash_password(&form.password1)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create_with_chef(
        &state.pool,
        &CreateUser {
            username: form.username,
            email: form.email,
            first_name: form.first_name,
            last_name: form.last_name,
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "User signed up");

    let auth = create_auth_response(&state, &user, &client).await?;
    Ok(created(RECIPE_LIST_URL, auth))
}

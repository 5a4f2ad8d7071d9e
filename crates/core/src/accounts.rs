//! Account rules shared by signup and login.

use std::sync::LazyLock;

use regex::Regex;
use validator::ValidationError;

/// Longest accepted username.
pub const USERNAME_MAX_LENGTH: u64 = 150;

/// Shortest accepted password.
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Letters, digits and `@ . + - _` only.
static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.@+-]+$").expect("valid regex"));

/// `validator` hook for the username field.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if USERNAME_RE.is_match(username) {
        Ok(())
    } else {
        Err(ValidationError::new("username").with_message(
            "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters."
                .into(),
        ))
    }
}

/// Check the two password fields of a signup form.
///
/// Returns one message per problem; an empty vector means the pair is
/// acceptable.
pub fn password_problems(password1: &str, password2: &str) -> Vec<String> {
    let mut problems = Vec::new();
    if password1 != password2 {
        problems.push("The two password fields didn't match.".to_string());
    }
    if password1.chars().count() < PASSWORD_MIN_LENGTH {
        problems.push(format!(
            "This password is too short. It must contain at least {PASSWORD_MIN_LENGTH} characters."
        ));
    }
    if !password1.is_empty() && password1.chars().all(|c| c.is_ascii_digit()) {
        problems.push("This password is entirely numeric.".to_string());
    }
    problems
}

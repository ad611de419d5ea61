//! Input validation utilities

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

use crate::models::{NewUser, UserPayload};

const USERNAME_MIN_LEN: usize = 3;
const USERNAME_MAX_LEN: usize = 50;

/// A single rejected field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every field rejected by [`validate_user`], in field order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    fn push(&mut self, field: &'static str, message: String) {
        self.0.push(FieldError { field, message });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", messages.join("; "))
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Validate username
pub fn validate_username(username: &str) -> Result<(), String> {
    if is_blank(username) {
        return Err("Username is required.".to_string());
    }

    let len = username.chars().count();
    if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len) {
        return Err(format!(
            "Username must be between {USERNAME_MIN_LEN} and {USERNAME_MAX_LEN} characters."
        ));
    }

    Ok(())
}

/// Validate email
///
/// Accepts any address with exactly one `@` that has text on both sides and
/// no line breaks. Internationalised local parts and single-label domains
/// such as `localhost` pass.
pub fn validate_email(email: &str) -> Result<(), String> {
    if is_blank(email) {
        return Err("Email is required.".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX
        .get_or_init(|| Regex::new(r"^[^@\r\n]+@[^@\r\n]+$").expect("Failed to compile email regex"));

    if !regex.is_match(email) {
        return Err("Invalid email format.".to_string());
    }

    Ok(())
}

/// Validate display name
pub fn validate_name(name: &str) -> Result<(), String> {
    if is_blank(name) {
        return Err("Name is required.".to_string());
    }

    Ok(())
}

/// Validate a whole payload, collecting every failing field
pub fn validate_user(payload: UserPayload) -> Result<NewUser, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let username = payload.username.unwrap_or_default();
    let email = payload.email.unwrap_or_default();
    let name = payload.name.unwrap_or_default();

    if let Err(message) = validate_username(&username) {
        errors.push("username", message);
    }
    if let Err(message) = validate_email(&email) {
        errors.push("email", message);
    }
    if let Err(message) = validate_name(&name) {
        errors.push("name", message);
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(NewUser {
        username,
        email,
        name,
    })
}

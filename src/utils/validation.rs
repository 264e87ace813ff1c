use lazy_static::lazy_static;
use regex::Regex;

use super::error::AppError;

pub const MIN_PASSWORD_LENGTH: usize = 3;
const MAX_EMAIL_LENGTH: usize = 254; // RFC 5321 SMTP limit

lazy_static! {
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex");
}

/// Returns the trimmed email when it is present and well formed.
pub fn validate_email(email: Option<&str>) -> Result<String, AppError> {
    let email = email.map(str::trim).unwrap_or_default();

    if email.is_empty() {
        return Err(AppError::validation("email should not be empty"));
    }
    if email.len() > MAX_EMAIL_LENGTH {
        return Err(AppError::validation(format!(
            "email cannot exceed {} characters",
            MAX_EMAIL_LENGTH
        )));
    }
    if !EMAIL_REGEX.is_match(email) {
        return Err(AppError::validation("email must be an email"));
    }

    Ok(email.to_string())
}

pub fn validate_password(password: Option<&str>) -> Result<String, AppError> {
    let password = password.unwrap_or_default();

    if password.is_empty() {
        return Err(AppError::validation("password should not be empty"));
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::validation(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }

    Ok(password.to_string())
}

/// Required string field: present and not blank.
pub fn require_text(field: &str, value: Option<&str>) -> Result<String, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.to_string()),
        _ => Err(AppError::validation(format!("{} should not be empty", field))),
    }
}

/// Optional string field of a patch: absent is fine, blank is not.
pub fn optional_text(field: &str, value: Option<&str>) -> Result<Option<String>, AppError> {
    value.map(|v| require_text(field, Some(v))).transpose()
}

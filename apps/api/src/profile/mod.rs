// Profile API: load/save the user profile and premium flag, keyed by email.
// The "login" is just the email; nothing here verifies identity.

pub mod handlers;

use crate::errors::AppError;

/// Trims the email path segment and rejects values that cannot be an address.
pub fn normalize_email(raw: &str) -> Result<String, AppError> {
    let email = raw.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::Validation(format!(
            "'{email}' is not a valid email"
        )));
    }
    Ok(email.to_string())
}

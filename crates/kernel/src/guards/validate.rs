//! Account field validators.
//!
//! Fail-fast: each operation checks name, then email, then secret, and
//! surfaces the first failing check's message.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::GuardError;

/// Email shape: `local@domain.tld`, no whitespace, exactly one `@`.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // static pattern
    let re = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    re
});

/// Validate a display name; returns the trimmed value to store.
pub(crate) fn validate_name(name: &str) -> Result<String, GuardError> {
    let name = name.trim();

    if name.is_empty() {
        return Err(GuardError::InvalidInput("Name is required".to_string()));
    }
    if name.chars().count() > 100 {
        return Err(GuardError::InvalidInput(
            "Name cannot exceed 100 characters".to_string(),
        ));
    }
    if name.chars().count() < 2 {
        return Err(GuardError::InvalidInput(
            "Name must be at least 2 characters long".to_string(),
        ));
    }

    Ok(name.to_string())
}

/// Validate an email address.
pub(crate) fn validate_email(email: &str) -> Result<(), GuardError> {
    if email.trim().is_empty() {
        return Err(GuardError::InvalidInput("Email is required".to_string()));
    }
    if email.chars().count() > 255 {
        return Err(GuardError::InvalidInput(
            "Email cannot exceed 255 characters".to_string(),
        ));
    }
    if !EMAIL_RE.is_match(email) {
        return Err(GuardError::InvalidInput("Invalid email format".to_string()));
    }

    Ok(())
}

/// Validate an account secret (length bounds only; hashing and
/// strength policy are out of scope).
pub(crate) fn validate_secret(secret: &str) -> Result<(), GuardError> {
    if secret.trim().is_empty() {
        return Err(GuardError::InvalidInput("Password is required".to_string()));
    }
    if secret.chars().count() < 6 {
        return Err(GuardError::InvalidInput(
            "Password must be at least 6 characters long".to_string(),
        ));
    }
    if secret.chars().count() > 255 {
        return Err(GuardError::InvalidInput(
            "Password cannot exceed 255 characters".to_string(),
        ));
    }

    Ok(())
}

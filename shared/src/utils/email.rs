//! Email address utility functions
//!
//! Every lookup and store keys accounts by email, so all callers must run
//! addresses through [`normalize_email`] first to keep the unique constraint
//! case-insensitive.

use once_cell::sync::Lazy;
use regex::Regex;

/// Regular expression for a structurally valid email address
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$").unwrap()
});

/// Normalizes an email address for lookup and storage
///
/// Trims surrounding whitespace and lowercases the whole address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validates the structure of an email address
///
/// # Arguments
///
/// * `email` - Email address to validate (normalize first)
///
/// # Returns
///
/// * `bool` - True if the address is structurally valid
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Masks an email address for logging
///
/// Keeps the first character of the local part and the full domain, e.g.
/// `a***@example.com`. Full addresses never appear in logs.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first = local.chars().next().unwrap_or('*');
            format!("{}***@{}", first, domain)
        }
        _ => "***".to_string(),
    }
}

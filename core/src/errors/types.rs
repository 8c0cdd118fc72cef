//! Domain-specific error types for authentication and related operations
//!
//! Every expected, user-facing outcome of the identity flows is a typed
//! variant here; the transport layer maps the stable error codes to status
//! codes and messages. Only `DomainError::Database` and
//! `AuthError::OAuthProviderFailure` indicate infrastructure trouble rather
//! than a user-input problem.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("User already exists")]
    UserAlreadyExists,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password login unavailable, use Google sign-in")]
    PasswordLoginUnavailable,

    #[error("Email not verified")]
    UserNotVerified,

    #[error("User account is blocked")]
    UserBlocked,

    #[error("Email already verified")]
    AlreadyVerified,

    #[error("Maximum verification attempts exceeded")]
    MaxAttemptsExceeded,

    #[error("Verification code missing or expired")]
    OtpMissingOrExpired,

    #[error("Invalid verification code")]
    InvalidOtp,

    #[error("Please wait {seconds_remaining} seconds before requesting a new code")]
    CooldownActive { seconds_remaining: i64 },

    #[error("Invalid or expired reset token")]
    InvalidResetToken,

    #[error("Identity provider verification failed")]
    OAuthProviderFailure,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Token not yet valid")]
    TokenNotYetValid,

    #[error("Invalid token claims")]
    InvalidClaims,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Field required: {field}")]
    RequiredField { field: String },

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Invalid length for field: {field} (min: {min}, max: {max})")]
    InvalidLength {
        field: String,
        min: usize,
        max: usize,
    },

    #[error("Invalid format for field: {field}")]
    InvalidFormat { field: String },
}

/// Unified error response structure for API responses
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Additional error details if available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,
    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl ToString, message: impl ToString) -> Self {
        Self {
            error: error.to_string(),
            message: message.to_string(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Add a single detail to the error response
    pub fn with_detail(mut self, key: impl ToString, value: serde_json::Value) -> Self {
        let mut details = self.details.unwrap_or_default();
        details.insert(key.to_string(), value);
        self.details = Some(details);
        self
    }
}

/// Convert AuthError to ErrorResponse
impl From<AuthError> for ErrorResponse {
    fn from(err: AuthError) -> Self {
        let error_code = match &err {
            AuthError::UserAlreadyExists => "USER_ALREADY_EXISTS",
            AuthError::UserNotFound => "USER_NOT_FOUND",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::PasswordLoginUnavailable => "PASSWORD_LOGIN_UNAVAILABLE",
            AuthError::UserNotVerified => "USER_NOT_VERIFIED",
            AuthError::UserBlocked => "USER_BLOCKED",
            AuthError::AlreadyVerified => "ALREADY_VERIFIED",
            AuthError::MaxAttemptsExceeded => "MAX_ATTEMPTS_EXCEEDED",
            AuthError::OtpMissingOrExpired => "OTP_MISSING_OR_EXPIRED",
            AuthError::InvalidOtp => "INVALID_OTP",
            AuthError::CooldownActive { .. } => "COOLDOWN_ACTIVE",
            AuthError::InvalidResetToken => "INVALID_RESET_TOKEN",
            AuthError::OAuthProviderFailure => "OAUTH_PROVIDER_FAILURE",
        };

        let response = ErrorResponse::new(error_code, err.to_string());
        match err {
            AuthError::CooldownActive { seconds_remaining } => {
                response.with_detail("seconds_remaining", serde_json::json!(seconds_remaining))
            }
            _ => response,
        }
    }
}

/// Convert TokenError to ErrorResponse
impl From<TokenError> for ErrorResponse {
    fn from(err: TokenError) -> Self {
        let error_code = match &err {
            TokenError::TokenExpired => "TOKEN_EXPIRED",
            TokenError::InvalidTokenFormat => "INVALID_TOKEN_FORMAT",
            TokenError::InvalidSignature => "INVALID_SIGNATURE",
            TokenError::TokenNotYetValid => "TOKEN_NOT_YET_VALID",
            TokenError::InvalidClaims => "INVALID_CLAIMS",
            TokenError::TokenGenerationFailed => "TOKEN_GENERATION_FAILED",
        };

        ErrorResponse::new(error_code, err.to_string())
    }
}

/// Convert ValidationError to ErrorResponse
impl From<ValidationError> for ErrorResponse {
    fn from(err: ValidationError) -> Self {
        let error_code = match &err {
            ValidationError::RequiredField { .. } => "REQUIRED_FIELD",
            ValidationError::InvalidEmail => "INVALID_EMAIL",
            ValidationError::InvalidLength { .. } => "INVALID_LENGTH",
            ValidationError::InvalidFormat { .. } => "INVALID_FORMAT",
        };

        ErrorResponse::new(error_code, err.to_string())
    }
}

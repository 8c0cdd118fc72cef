//! Authentication and authorization configuration

use serde::{Deserialize, Serialize};

/// JWT session token configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub secret: String,

    /// Session token expiry time in seconds
    pub session_token_expiry: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// JWT audience claim
    #[serde(default)]
    pub audience: Option<String>,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from("your-secret-key-change-in-production"),
            session_token_expiry: 604800, // 7 days
            issuer: String::from("aran-shop"),
            audience: Some(String::from("aran-shop-api")),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set session token expiry in days
    pub fn with_session_expiry_days(mut self, days: i64) -> Self {
        self.session_token_expiry = days * 86400;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == "your-secret-key-change-in-production"
    }
}

/// One-time passcode configuration
///
/// All timing windows and attempt limits live here so that deployments can
/// tune them and tests can shrink them.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Number of minutes before an issued code expires
    pub code_expiration_minutes: i64,

    /// Minimum seconds between code resend requests
    pub resend_cooldown_seconds: i64,

    /// Maximum number of failed verification attempts per code
    pub max_attempts: i32,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: 10,
            resend_cooldown_seconds: 45,
            max_attempts: 5,
        }
    }
}

/// Password reset configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResetConfig {
    /// Number of minutes before a reset token expires
    pub token_expiration_minutes: i64,

    /// Whether a reset request for an unknown email reports "user not found".
    ///
    /// The source-compatible default reveals account existence. Setting this
    /// to `false` makes the response identical whether or not the account
    /// exists, closing the enumeration oracle.
    pub reveal_unknown_email: bool,
}

impl Default for ResetConfig {
    fn default() -> Self {
        Self {
            token_expiration_minutes: 15,
            reveal_unknown_email: true,
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// OTP configuration
    #[serde(default)]
    pub otp: OtpConfig,

    /// Password reset configuration
    #[serde(default)]
    pub reset: ResetConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let jwt_secret = std::env::var("JWT_SECRET")
            .unwrap_or_else(|_| "development-secret-please-change-in-production".to_string());
        let session_token_expiry = std::env::var("JWT_SESSION_TOKEN_EXPIRY")
            .unwrap_or_else(|_| "604800".to_string())
            .parse()
            .unwrap_or(604800);

        Self {
            jwt: JwtConfig {
                secret: jwt_secret,
                session_token_expiry,
                issuer: String::from("aran-shop"),
                audience: Some(String::from("aran-shop-api")),
            },
            otp: OtpConfig::default(),
            reset: ResetConfig::default(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            otp: OtpConfig::default(),
            reset: ResetConfig::default(),
        }
    }
}

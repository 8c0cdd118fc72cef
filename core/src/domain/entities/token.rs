//! Session token entities for JWT-based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session token expiration time (7 days)
pub const SESSION_TOKEN_EXPIRY_MINUTES: i64 = 7 * 24 * 60;

/// JWT issuer
pub const JWT_ISSUER: &str = "aran-shop";

/// JWT audience
pub const JWT_AUDIENCE: &str = "aran-shop-api";

/// Claims structure for the JWT payload
///
/// The transport layer recovers these claims to authorize unrelated
/// endpoints (cart, orders, admin), so the admin flag is embedded here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,

    /// Whether the user has administrative privileges
    pub is_admin: bool,

    /// Whether the user's email is verified
    pub is_verified: bool,
}

impl Claims {
    /// Creates new claims for a session token
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user's UUID
    /// * `is_admin` - Whether the user is an administrator
    /// * `is_verified` - Whether the user's email is verified
    /// * `expiry` - Token lifetime
    pub fn new_session_token(
        user_id: Uuid,
        is_admin: bool,
        is_verified: bool,
        expiry: Duration,
    ) -> Self {
        let now = Utc::now();
        let expires_at = now + expiry;

        Self {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            nbf: now.timestamp(),
            iss: JWT_ISSUER.to_string(),
            aud: JWT_AUDIENCE.to_string(),
            jti: Uuid::new_v4().to_string(),
            is_admin,
            is_verified,
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp();
        now >= self.exp
    }

    /// Checks if the claims are currently valid (after nbf, before exp)
    pub fn is_valid(&self) -> bool {
        let now = Utc::now().timestamp();
        now >= self.nbf && now < self.exp
    }

    /// Gets the user ID from the claims
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }

    /// Gets the expiration as a UTC timestamp
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

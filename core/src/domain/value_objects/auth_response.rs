//! Authentication response value objects for API responses.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::user::User;

/// Authentication response returned after successful login or verification
///
/// Contains the signed session token plus the user metadata the frontend
/// renders without a second round trip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthResponse {
    /// Signed session token
    pub token: String,

    /// Session token expiration time in seconds
    pub expires_in: i64,

    /// Unique identifier of the authenticated user
    pub user_id: Uuid,

    /// Display name
    pub name: String,

    /// Normalized email address
    pub email: String,

    /// Whether the user has administrative privileges
    pub is_admin: bool,
}

impl AuthResponse {
    /// Creates an authentication response from a user and a signed token
    pub fn new(user: &User, token: String, expires_in: i64) -> Self {
        Self {
            token,
            expires_in,
            user_id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            is_admin: user.is_admin,
        }
    }
}

/// Registration response
///
/// Registration never returns a session, since the account is not verified
/// yet; the frontend only needs the normalized email to drive the OTP form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterResponse {
    /// Normalized email the verification code was sent to
    pub email: String,
}

//! User entity representing a registered account in the Aran Shop system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity representing a registered account
///
/// A usable account holds at least one of `password_hash` (email + password
/// registration) or `google_id` (OAuth registration); an account may hold
/// both once the user links a password.
///
/// The OTP fields travel together: `otp_hash` is present iff
/// `otp_expires_at` is present, and both are cleared on successful
/// verification or a superseding reissue. The same pairing holds for
/// `reset_token_hash` / `reset_token_expires_at`. Only digests are stored;
/// the raw code and reset token never touch the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address, normalized to lowercase, unique per account
    pub email: String,

    /// Bcrypt hash of the password, absent for OAuth-only accounts
    pub password_hash: Option<String>,

    /// Google subject identifier, set when the account was created or
    /// linked via Google sign-in
    pub google_id: Option<String>,

    /// Whether the email address has been verified
    pub is_verified: bool,

    /// Whether the user has administrative privileges
    pub is_admin: bool,

    /// Whether the user account is blocked
    pub is_blocked: bool,

    /// Salted digest of the outstanding verification code
    pub otp_hash: Option<String>,

    /// Timestamp when the outstanding code expires
    pub otp_expires_at: Option<DateTime<Utc>>,

    /// Number of failed verification attempts against the current code
    pub otp_attempts: i32,

    /// Timestamp of the most recent code issuance, basis for the resend
    /// cooldown
    pub otp_last_sent_at: Option<DateTime<Utc>>,

    /// SHA-256 digest of the outstanding password reset token
    pub reset_token_hash: Option<String>,

    /// Timestamp when the outstanding reset token expires
    pub reset_token_expires_at: Option<DateTime<Utc>>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new unverified user registered with email and password
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash: Some(password_hash),
            google_id: None,
            is_verified: false,
            is_admin: false,
            is_blocked: false,
            otp_hash: None,
            otp_expires_at: None,
            otp_attempts: 0,
            otp_last_sent_at: None,
            reset_token_hash: None,
            reset_token_expires_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Creates a new user from a trusted identity provider
    ///
    /// The provider has already verified the email address, so the account
    /// starts verified and never enters the OTP flow.
    pub fn new_oauth(name: String, email: String, google_id: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash: None,
            google_id: Some(google_id),
            is_verified: true,
            is_admin: false,
            is_blocked: false,
            otp_hash: None,
            otp_expires_at: None,
            otp_attempts: 0,
            otp_last_sent_at: None,
            reset_token_hash: None,
            reset_token_expires_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Arms a fresh verification code
    ///
    /// Resets the attempt counter and stamps the send time, superseding any
    /// outstanding code.
    pub fn arm_otp(&mut self, otp_hash: String, expires_at: DateTime<Utc>, sent_at: DateTime<Utc>) {
        self.otp_hash = Some(otp_hash);
        self.otp_expires_at = Some(expires_at);
        self.otp_last_sent_at = Some(sent_at);
        self.otp_attempts = 0;
        self.updated_at = Utc::now();
    }

    /// Records one failed verification attempt
    pub fn record_failed_otp_attempt(&mut self) {
        self.otp_attempts += 1;
        self.updated_at = Utc::now();
    }

    /// Marks the user as verified and clears the OTP fields
    pub fn verify(&mut self) {
        self.is_verified = true;
        self.otp_hash = None;
        self.otp_expires_at = None;
        self.otp_attempts = 0;
        self.updated_at = Utc::now();
    }

    /// Checks whether the outstanding code has expired at `now`
    ///
    /// A missing code counts as expired.
    pub fn otp_expired(&self, now: DateTime<Utc>) -> bool {
        match self.otp_expires_at {
            Some(expires_at) => now >= expires_at,
            None => true,
        }
    }

    /// Arms a password reset token digest
    pub fn arm_reset_token(&mut self, token_hash: String, expires_at: DateTime<Utc>) {
        self.reset_token_hash = Some(token_hash);
        self.reset_token_expires_at = Some(expires_at);
        self.updated_at = Utc::now();
    }

    /// Consumes the reset token, installing the new password hash
    ///
    /// Both reset fields are cleared so the token is single-use by
    /// construction.
    pub fn consume_reset_token(&mut self, password_hash: String) {
        self.password_hash = Some(password_hash);
        self.reset_token_hash = None;
        self.reset_token_expires_at = None;
        self.updated_at = Utc::now();
    }

    /// Checks whether the outstanding reset token has expired at `now`
    pub fn reset_token_expired(&self, now: DateTime<Utc>) -> bool {
        match self.reset_token_expires_at {
            Some(expires_at) => now >= expires_at,
            None => true,
        }
    }

    /// Updates the display name and password hash in place
    ///
    /// Used when an unverified registration is retried with new details.
    pub fn update_registration(&mut self, name: String, password_hash: String) {
        self.name = name;
        self.password_hash = Some(password_hash);
        self.updated_at = Utc::now();
    }

    /// Links a Google subject id to an existing account
    pub fn link_google_id(&mut self, google_id: String) {
        self.google_id = Some(google_id);
        self.updated_at = Utc::now();
    }

    /// Checks whether the account can log in with a password
    pub fn has_password(&self) -> bool {
        self.password_hash.is_some()
    }

    /// Blocks the user account
    pub fn block(&mut self) {
        self.is_blocked = true;
        self.updated_at = Utc::now();
    }

    /// Unblocks the user account
    pub fn unblock(&mut self) {
        self.is_blocked = false;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_new_user_creation() {
        let user = User::new(
            "Alice".to_string(),
            "alice@example.com".to_string(),
            "bcrypt-hash".to_string(),
        );

        assert_eq!(user.name, "Alice");
        assert_eq!(user.email, "alice@example.com");
        assert!(user.has_password());
        assert!(user.google_id.is_none());
        assert!(!user.is_verified);
        assert!(!user.is_admin);
        assert!(!user.is_blocked);
        assert!(user.otp_hash.is_none());
        assert_eq!(user.otp_attempts, 0);
    }

    #[test]
    fn test_new_oauth_user_is_verified() {
        let user = User::new_oauth(
            "Bob".to_string(),
            "bob@example.com".to_string(),
            "google-sub-123".to_string(),
        );

        assert!(user.is_verified);
        assert!(!user.has_password());
        assert_eq!(user.google_id.as_deref(), Some("google-sub-123"));
    }

    #[test]
    fn test_arm_otp_resets_attempts() {
        let mut user = User::new(
            "Alice".to_string(),
            "alice@example.com".to_string(),
            "hash".to_string(),
        );
        user.otp_attempts = 3;

        let now = Utc::now();
        user.arm_otp("salt$digest".to_string(), now + Duration::minutes(10), now);

        assert_eq!(user.otp_attempts, 0);
        assert!(user.otp_hash.is_some());
        assert_eq!(user.otp_last_sent_at, Some(now));
        assert!(!user.otp_expired(now));
    }

    #[test]
    fn test_verify_clears_otp_fields() {
        let mut user = User::new(
            "Alice".to_string(),
            "alice@example.com".to_string(),
            "hash".to_string(),
        );
        let now = Utc::now();
        user.arm_otp("salt$digest".to_string(), now + Duration::minutes(10), now);
        user.record_failed_otp_attempt();

        user.verify();

        assert!(user.is_verified);
        assert!(user.otp_hash.is_none());
        assert!(user.otp_expires_at.is_none());
        assert_eq!(user.otp_attempts, 0);
    }

    #[test]
    fn test_otp_expiry_boundary() {
        let mut user = User::new(
            "Alice".to_string(),
            "alice@example.com".to_string(),
            "hash".to_string(),
        );
        let now = Utc::now();
        user.arm_otp("salt$digest".to_string(), now + Duration::minutes(10), now);

        // Valid one second before the deadline, dead at the deadline
        assert!(!user.otp_expired(now + Duration::minutes(10) - Duration::seconds(1)));
        assert!(user.otp_expired(now + Duration::minutes(10)));
    }

    #[test]
    fn test_missing_otp_counts_as_expired() {
        let user = User::new(
            "Alice".to_string(),
            "alice@example.com".to_string(),
            "hash".to_string(),
        );
        assert!(user.otp_expired(Utc::now()));
    }

    #[test]
    fn test_consume_reset_token_is_single_use() {
        let mut user = User::new(
            "Alice".to_string(),
            "alice@example.com".to_string(),
            "old-hash".to_string(),
        );
        let now = Utc::now();
        user.arm_reset_token("digest".to_string(), now + Duration::minutes(15));
        assert!(!user.reset_token_expired(now));

        user.consume_reset_token("new-hash".to_string());

        assert_eq!(user.password_hash.as_deref(), Some("new-hash"));
        assert!(user.reset_token_hash.is_none());
        assert!(user.reset_token_expires_at.is_none());
        assert!(user.reset_token_expired(now));
    }

    #[test]
    fn test_update_registration() {
        let mut user = User::new(
            "Alice".to_string(),
            "alice@example.com".to_string(),
            "old-hash".to_string(),
        );

        user.update_registration("Alicia".to_string(), "new-hash".to_string());

        assert_eq!(user.name, "Alicia");
        assert_eq!(user.password_hash.as_deref(), Some("new-hash"));
        assert!(!user.is_verified);
    }

    #[test]
    fn test_user_blocking() {
        let mut user = User::new(
            "Alice".to_string(),
            "alice@example.com".to_string(),
            "hash".to_string(),
        );

        assert!(!user.is_blocked);
        user.block();
        assert!(user.is_blocked);
        user.unblock();
        assert!(!user.is_blocked);
    }
}

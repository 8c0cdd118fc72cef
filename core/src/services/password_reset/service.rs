//! Password reset state machine

use chrono::{Duration, Utc};
use std::sync::Arc;

use aran_shared::config::ResetConfig;
use aran_shared::utils::email::mask_email;

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::UserRepository;
use crate::services::verification::generator::{generate_reset_token, hash_reset_token};

/// Service governing the reset-token lifecycle
///
/// Transitions run as compare-and-swap updates against the user row, the
/// same discipline as the OTP machine: consumption clears the token fields
/// atomically, so a token can never be redeemed twice.
pub struct PasswordResetService<R: UserRepository> {
    /// User repository for persistence
    user_repository: Arc<R>,
    /// Token lifetime configuration
    config: ResetConfig,
}

impl<R: UserRepository> PasswordResetService<R> {
    /// Create a new password reset service
    pub fn new(user_repository: Arc<R>, config: ResetConfig) -> Self {
        Self {
            user_repository,
            config,
        }
    }

    /// Request a password reset for an email identity
    ///
    /// Arms a fresh token digest with a `token_expiration_minutes` deadline,
    /// superseding any outstanding token, and returns the plaintext. Fails
    /// with `UserNotFound` when no account holds the email; whether that
    /// outcome reaches the end user is the orchestrator's policy decision.
    pub async fn request_reset(&self, email: &str) -> DomainResult<String> {
        loop {
            let current = self
                .user_repository
                .find_by_email(email)
                .await?
                .ok_or(AuthError::UserNotFound)?;

            let (plaintext, digest) = generate_reset_token();
            let expires_at =
                Utc::now() + Duration::minutes(self.config.token_expiration_minutes);

            let mut updated = current.clone();
            updated.arm_reset_token(digest, expires_at);

            if self
                .user_repository
                .update_if_unchanged(&current, updated)
                .await?
            {
                tracing::info!(
                    email = %mask_email(email),
                    event = "reset_token_issued",
                    "Issued password reset token"
                );
                return Ok(plaintext);
            }
        }
    }

    /// Consume a reset token and install a new password
    ///
    /// The presented token is digested and matched against outstanding,
    /// unexpired tokens. A token never issued, already consumed, or past
    /// its deadline all collapse into the same `InvalidResetToken` outcome.
    pub async fn consume_reset(&self, token: &str, new_password: &str) -> DomainResult<User> {
        let digest = hash_reset_token(token);

        loop {
            let current = self
                .user_repository
                .find_by_reset_token(&digest)
                .await?
                .ok_or(AuthError::InvalidResetToken)?;

            if current.reset_token_expired(Utc::now()) {
                tracing::info!(
                    email = %mask_email(&current.email),
                    event = "reset_token_expired",
                    "Rejected expired password reset token"
                );
                return Err(AuthError::InvalidResetToken.into());
            }

            let password_hash = bcrypt::hash(new_password, bcrypt::DEFAULT_COST)
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to hash password: {}", e),
                })?;

            let mut updated = current.clone();
            updated.consume_reset_token(password_hash);

            if self
                .user_repository
                .update_if_unchanged(&current, updated.clone())
                .await?
            {
                tracing::info!(
                    email = %mask_email(&updated.email),
                    event = "password_reset",
                    "Password reset completed"
                );
                return Ok(updated);
            }
        }
    }
}

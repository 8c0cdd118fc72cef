//! Email OTP state machine
//!
//! Governs issuance, resend cooldown, expiry, and attempt-limited
//! verification of one-time passcodes for an email identity. Every state
//! transition runs as an optimistic compare-and-swap against the user row
//! ([`UserRepository::update_if_unchanged`]), so concurrent requests
//! touching the same identity serialize instead of double-spending the
//! attempt budget.

use chrono::{Duration, Utc};
use std::sync::Arc;

use aran_shared::config::OtpConfig;
use aran_shared::utils::email::mask_email;

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainResult};
use crate::repositories::UserRepository;

use super::generator::{generate_otp, hash_otp, verify_otp_hash, CODE_LENGTH};
use super::traits::EmailServiceTrait;
use super::types::SendCodeResult;

/// Verification service for handling email OTP codes
pub struct VerificationService<R: UserRepository, E: EmailServiceTrait> {
    /// User repository for persistence
    user_repository: Arc<R>,
    /// Email service for dispatching codes
    email_service: Arc<E>,
    /// Timing windows and attempt cap
    config: OtpConfig,
}

impl<R: UserRepository, E: EmailServiceTrait> VerificationService<R, E> {
    /// Create a new verification service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for user persistence
    /// * `email_service` - Email dispatch implementation
    /// * `config` - OTP timing and attempt configuration
    pub fn new(user_repository: Arc<R>, email_service: Arc<E>, config: OtpConfig) -> Self {
        Self {
            user_repository,
            email_service,
            config,
        }
    }

    /// Issue a fresh verification code for a user
    ///
    /// Generates a new code, persists its salted digest together with the
    /// expiry and send timestamps, resets the attempt counter, and then
    /// dispatches the code by email. The email goes out only after the
    /// store write succeeds; a delivery failure is logged and swallowed so
    /// the stored code stays valid for a later resend.
    pub async fn issue(&self, user: &User) -> DomainResult<SendCodeResult> {
        let mut current = user.clone();
        loop {
            match self.try_arm(&current).await? {
                Some(result) => return Ok(result),
                None => {
                    // Lost the race, reload and retry from the fresh row
                    current = self.reload(current.id).await?;
                }
            }
        }
    }

    /// Verify a submitted code for an email identity
    ///
    /// Failure modes, in order: `UserNotFound`, `AlreadyVerified`,
    /// `MaxAttemptsExceeded` (the code is dead once the cap is reached,
    /// regardless of expiry), `OtpMissingOrExpired`, `InvalidOtp` (the
    /// attempt counter is atomically incremented and persisted). On a match
    /// the user is marked verified and all OTP fields are cleared.
    pub async fn verify(&self, email: &str, code: &str) -> DomainResult<User> {
        loop {
            let current = self
                .user_repository
                .find_by_email(email)
                .await?
                .ok_or(AuthError::UserNotFound)?;

            if current.is_verified {
                return Err(AuthError::AlreadyVerified.into());
            }

            if current.otp_attempts >= self.config.max_attempts {
                tracing::warn!(
                    email = %mask_email(email),
                    attempts = current.otp_attempts,
                    event = "otp_attempts_exhausted",
                    "Verification rejected, attempt budget spent"
                );
                return Err(AuthError::MaxAttemptsExceeded.into());
            }

            let now = Utc::now();
            let stored = match current.otp_hash.as_deref() {
                Some(stored) if !current.otp_expired(now) => stored,
                _ => return Err(AuthError::OtpMissingOrExpired.into()),
            };

            if code.len() == CODE_LENGTH && verify_otp_hash(code, stored) {
                let mut updated = current.clone();
                updated.verify();
                if self
                    .user_repository
                    .update_if_unchanged(&current, updated.clone())
                    .await?
                {
                    tracing::info!(
                        email = %mask_email(email),
                        event = "otp_verified",
                        "Email verified successfully"
                    );
                    return Ok(updated);
                }
            } else {
                let mut updated = current.clone();
                updated.record_failed_otp_attempt();
                if self
                    .user_repository
                    .update_if_unchanged(&current, updated.clone())
                    .await?
                {
                    tracing::warn!(
                        email = %mask_email(email),
                        attempts = updated.otp_attempts,
                        event = "otp_verification_failed",
                        "Invalid verification code submitted"
                    );
                    return Err(AuthError::InvalidOtp.into());
                }
            }
            // Row changed underneath us, retry against the fresh state
        }
    }

    /// Resend a verification code, enforcing the cooldown
    ///
    /// Fails with `CooldownActive { seconds_remaining }` while inside the
    /// cooldown window; `seconds_remaining` is never zero or negative.
    /// Outside the window this behaves exactly as [`issue`](Self::issue).
    pub async fn resend(&self, email: &str) -> DomainResult<SendCodeResult> {
        loop {
            let current = self
                .user_repository
                .find_by_email(email)
                .await?
                .ok_or(AuthError::UserNotFound)?;

            if let Some(last_sent) = current.otp_last_sent_at {
                let elapsed = Utc::now() - last_sent;
                if elapsed < Duration::seconds(self.config.resend_cooldown_seconds) {
                    // num_seconds() floors, so the remainder stays >= 1
                    // anywhere inside the window
                    let seconds_remaining =
                        self.config.resend_cooldown_seconds - elapsed.num_seconds();
                    tracing::info!(
                        email = %mask_email(email),
                        seconds_remaining,
                        event = "otp_resend_cooldown",
                        "Resend rejected, cooldown still active"
                    );
                    return Err(AuthError::CooldownActive { seconds_remaining }.into());
                }
            }

            if let Some(result) = self.try_arm(&current).await? {
                return Ok(result);
            }
            // Conflict: re-check the cooldown against the fresh row, since
            // the winner may itself have been a resend
        }
    }

    /// One compare-and-swap attempt at arming a fresh code
    ///
    /// Returns `None` when the row changed since `current` was read.
    async fn try_arm(&self, current: &User) -> DomainResult<Option<SendCodeResult>> {
        let code = generate_otp();
        let now = Utc::now();
        let expires_at = now + Duration::minutes(self.config.code_expiration_minutes);

        let mut updated = current.clone();
        updated.arm_otp(hash_otp(&code), expires_at, now);

        if !self
            .user_repository
            .update_if_unchanged(current, updated.clone())
            .await?
        {
            return Ok(None);
        }

        tracing::info!(
            email = %mask_email(&updated.email),
            event = "otp_issued",
            "Issued new verification code"
        );

        // Dispatch strictly after the store write; a failure here leaves a
        // perfectly valid code behind for a resend
        if let Err(e) = self
            .email_service
            .send_otp_email(&updated.email, &code)
            .await
        {
            tracing::error!(
                email = %mask_email(&updated.email),
                error = %e,
                event = "otp_email_failed",
                "Failed to dispatch verification code email"
            );
        }

        Ok(Some(SendCodeResult {
            email: updated.email.clone(),
            expires_at,
            next_resend_at: now + Duration::seconds(self.config.resend_cooldown_seconds),
        }))
    }

    async fn reload(&self, id: uuid::Uuid) -> DomainResult<User> {
        self.user_repository
            .find_by_id(id)
            .await?
            .ok_or(AuthError::UserNotFound.into())
    }
}

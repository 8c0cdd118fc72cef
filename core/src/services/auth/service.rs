//! Authentication orchestration service

use std::sync::Arc;

use aran_shared::config::AuthConfig;
use aran_shared::utils::email::{is_valid_email, mask_email, normalize_email};
use aran_shared::utils::validation::validators;

use crate::domain::entities::user::User;
use crate::domain::value_objects::{AuthResponse, RegisterResponse};
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::repositories::UserRepository;
use crate::services::password_reset::PasswordResetService;
use crate::services::token::{TokenService, TokenServiceConfig};
use crate::services::verification::{EmailServiceTrait, SendCodeResult, VerificationService};

use super::config::AuthServiceConfig;
use super::traits::IdTokenVerifierTrait;
use super::types::{
    ConsumePasswordResetRequest, LoginRequest, RegisterRequest, RequestPasswordResetRequest,
    ResendOtpRequest, VerifyOtpRequest,
};

/// Main authentication service orchestrating the identity lifecycle
///
/// Owns the verification, password reset, and token services and sequences
/// them into the public operations: registration, OTP verification and
/// resend, password and Google login, and the reset flow. Generic over the
/// user repository, email dispatcher, and id-token verifier so every
/// external edge is injectable.
pub struct AuthService<U, E, P>
where
    U: UserRepository,
    E: EmailServiceTrait,
    P: IdTokenVerifierTrait,
{
    /// User repository for direct account lookups
    user_repository: Arc<U>,
    /// Email OTP state machine
    verification_service: Arc<VerificationService<U, E>>,
    /// Reset token state machine
    password_reset_service: Arc<PasswordResetService<U>>,
    /// Session token issuer
    token_service: Arc<TokenService>,
    /// Identity provider token verifier
    id_token_verifier: Arc<P>,
    /// Validation bounds and information-leak policy
    config: AuthServiceConfig,
}

impl<U, E, P> AuthService<U, E, P>
where
    U: UserRepository,
    E: EmailServiceTrait,
    P: IdTokenVerifierTrait,
{
    /// Creates a new authentication service from its collaborators
    pub fn new(
        user_repository: Arc<U>,
        verification_service: Arc<VerificationService<U, E>>,
        password_reset_service: Arc<PasswordResetService<U>>,
        token_service: Arc<TokenService>,
        id_token_verifier: Arc<P>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            verification_service,
            password_reset_service,
            token_service,
            id_token_verifier,
            config,
        }
    }

    /// Wires up the full service graph from shared configuration
    ///
    /// Convenience constructor for the composition root; tests that need to
    /// tune a single sub-config build the services by hand instead.
    pub fn from_config(
        user_repository: Arc<U>,
        email_service: Arc<E>,
        id_token_verifier: Arc<P>,
        config: &AuthConfig,
    ) -> Self {
        let verification_service = Arc::new(VerificationService::new(
            Arc::clone(&user_repository),
            email_service,
            config.otp.clone(),
        ));
        let password_reset_service = Arc::new(PasswordResetService::new(
            Arc::clone(&user_repository),
            config.reset.clone(),
        ));
        let token_service = Arc::new(TokenService::new(TokenServiceConfig::from(&config.jwt)));

        Self::new(
            user_repository,
            verification_service,
            password_reset_service,
            token_service,
            id_token_verifier,
            AuthServiceConfig {
                reveal_unknown_email: config.reset.reveal_unknown_email,
                ..AuthServiceConfig::default()
            },
        )
    }

    /// Registers a new account and dispatches a verification code
    ///
    /// A verified account already holding the email is rejected with
    /// `UserAlreadyExists`. An unverified account is treated as a retried
    /// registration: its name and password are overwritten and a fresh code
    /// goes out. No session is issued; the account stays unusable until the
    /// code is verified.
    ///
    /// # Returns
    ///
    /// * `Ok(RegisterResponse)` - The normalized email the code was sent to
    /// * `Err(DomainError)` - Validation failure or `UserAlreadyExists`
    pub async fn register(&self, request: RegisterRequest) -> DomainResult<RegisterResponse> {
        if !validators::not_empty(&request.name) {
            return Err(ValidationError::RequiredField {
                field: "name".to_string(),
            }
            .into());
        }

        let email = normalize_email(&request.email);
        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail.into());
        }
        self.validate_password(&request.password)?;

        let password_hash = hash_password(&request.password)?;

        let user = match self.user_repository.find_by_email(&email).await? {
            Some(existing) if existing.is_verified => {
                tracing::info!(
                    email = %mask_email(&email),
                    event = "register_duplicate",
                    "Registration rejected, email already verified"
                );
                return Err(AuthError::UserAlreadyExists.into());
            }
            Some(existing) => {
                // Retried registration: take the latest details, keep the id
                let mut updated = existing;
                updated.update_registration(request.name.trim().to_string(), password_hash);
                self.user_repository.update(updated.clone()).await?;
                updated
            }
            None => {
                let user = User::new(request.name.trim().to_string(), email.clone(), password_hash);
                self.user_repository.create(user).await?
            }
        };

        let result = self.verification_service.issue(&user).await?;

        tracing::info!(
            email = %mask_email(&email),
            event = "user_registered",
            "Registration accepted, verification pending"
        );

        Ok(RegisterResponse {
            email: result.email,
        })
    }

    /// Verifies a submitted code and issues the first session
    ///
    /// The verify itself is persisted before session issuance, so a blocked
    /// account ends up verified yet still receives `UserBlocked`.
    pub async fn verify_otp(&self, request: VerifyOtpRequest) -> DomainResult<AuthResponse> {
        let email = normalize_email(&request.email);
        let user = self
            .verification_service
            .verify(&email, request.code.trim())
            .await?;
        self.token_service.issue_session(&user)
    }

    /// Resends the verification code, subject to the cooldown
    pub async fn resend_otp(&self, request: ResendOtpRequest) -> DomainResult<SendCodeResult> {
        let email = normalize_email(&request.email);
        self.verification_service.resend(&email).await
    }

    /// Authenticates with email and password
    ///
    /// An absent account and a wrong password collapse into the same
    /// `InvalidCredentials` outcome. An OAuth-only account gets the more
    /// helpful `PasswordLoginUnavailable` since the email is valid but the
    /// credential type is wrong.
    pub async fn login(&self, request: LoginRequest) -> DomainResult<AuthResponse> {
        let email = normalize_email(&request.email);

        let user = self
            .user_repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let password_hash = match user.password_hash.as_deref() {
            Some(hash) => hash,
            None => return Err(AuthError::PasswordLoginUnavailable.into()),
        };

        let matches =
            bcrypt::verify(&request.password, password_hash).map_err(|e| DomainError::Internal {
                message: format!("Failed to verify password: {}", e),
            })?;
        if !matches {
            tracing::warn!(
                email = %mask_email(&email),
                event = "login_failed",
                "Password login rejected"
            );
            return Err(AuthError::InvalidCredentials.into());
        }

        if !user.is_verified {
            return Err(AuthError::UserNotVerified.into());
        }

        let response = self.token_service.issue_session(&user)?;
        tracing::info!(
            email = %mask_email(&email),
            event = "user_logged_in",
            "Password login succeeded"
        );
        Ok(response)
    }

    /// Authenticates with a Google id token, bypassing OTP
    ///
    /// The provider already verified the email, so a new account is created
    /// verified and an existing account gets its `google_id` backfilled.
    /// The OTP fields are never touched on this path.
    pub async fn oauth_login(&self, id_token: &str) -> DomainResult<AuthResponse> {
        let info = self
            .id_token_verifier
            .verify_id_token(id_token)
            .await
            .map_err(|e| {
                tracing::warn!(
                    error = %e,
                    event = "oauth_verify_failed",
                    "Identity provider rejected id token"
                );
                DomainError::Auth(AuthError::OAuthProviderFailure)
            })?;

        let email = normalize_email(&info.email);
        if !is_valid_email(&email) {
            return Err(AuthError::OAuthProviderFailure.into());
        }

        let user = match self.user_repository.find_by_email(&email).await? {
            Some(mut existing) => {
                if existing.google_id.is_none() {
                    existing.link_google_id(info.subject_id.clone());
                    self.user_repository.update(existing.clone()).await?;
                }
                existing
            }
            None => {
                let user = User::new_oauth(info.name.clone(), email.clone(), info.subject_id);
                match self.user_repository.create(user).await {
                    Ok(created) => created,
                    // Lost a creation race, the other request's row wins
                    Err(DomainError::Auth(AuthError::UserAlreadyExists)) => self
                        .user_repository
                        .find_by_email(&email)
                        .await?
                        .ok_or(AuthError::UserNotFound)?,
                    Err(e) => return Err(e),
                }
            }
        };

        let response = self.token_service.issue_session(&user)?;
        tracing::info!(
            email = %mask_email(&email),
            event = "oauth_logged_in",
            "Google login succeeded"
        );
        Ok(response)
    }

    /// Requests a password reset token for an email identity
    ///
    /// The returned plaintext token is what the caller embeds into the reset
    /// link. When the email is unknown the outcome follows
    /// `reveal_unknown_email`: `true` surfaces `UserNotFound`, `false`
    /// returns `Ok(None)` so the response is indistinguishable from success.
    pub async fn request_password_reset(
        &self,
        request: RequestPasswordResetRequest,
    ) -> DomainResult<Option<String>> {
        let email = normalize_email(&request.email);
        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail.into());
        }

        match self.password_reset_service.request_reset(&email).await {
            Ok(token) => Ok(Some(token)),
            Err(DomainError::Auth(AuthError::UserNotFound)) if !self.config.reveal_unknown_email => {
                tracing::info!(
                    email = %mask_email(&email),
                    event = "reset_unknown_email",
                    "Reset requested for unknown email, responding neutrally"
                );
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Consumes a reset token and installs the new password
    pub async fn consume_password_reset(
        &self,
        request: ConsumePasswordResetRequest,
    ) -> DomainResult<()> {
        self.validate_password(&request.new_password)?;
        self.password_reset_service
            .consume_reset(request.token.trim(), &request.new_password)
            .await?;
        Ok(())
    }

    fn validate_password(&self, password: &str) -> DomainResult<()> {
        if !validators::length_between(
            password,
            self.config.min_password_length,
            self.config.max_password_length,
        ) {
            return Err(ValidationError::InvalidLength {
                field: "password".to_string(),
                min: self.config.min_password_length,
                max: self.config.max_password_length,
            }
            .into());
        }
        Ok(())
    }
}

fn hash_password(password: &str) -> DomainResult<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(|e| DomainError::Internal {
        message: format!("Failed to hash password: {}", e),
    })
}
